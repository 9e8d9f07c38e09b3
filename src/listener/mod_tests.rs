use std::io::Write;

use parking_lot::Mutex;
use tempfile::TempDir;

use super::*;
use crate::engine::RuleMatch;

/// Flags a fixed set of words and records every text it was asked to check.
struct FakeChecker {
    bad_words: &'static [&'static str],
    calls: Arc<Mutex<Vec<String>>>,
}

impl LanguageChecker for FakeChecker {
    fn check(&self, text: &str) -> Result<Vec<RuleMatch>> {
        self.calls.lock().push(text.to_string());
        let matches = text
            .split_whitespace()
            .filter(|word| self.bad_words.contains(word))
            .map(|word| RuleMatch {
                rule_id: "SPELLING_RULE".to_string(),
                line: 1,
                column: text.find(word).unwrap_or(0) + 1,
                message: format!("{word} is misspelled"),
                suggestions: vec!["fixed".to_string()],
            })
            .collect();
        Ok(matches)
    }

    fn disable_rule(&mut self, _rule_id: &str) {}
}

struct FakeFactory {
    bad_words: &'static [&'static str],
    calls: Arc<Mutex<Vec<String>>>,
}

impl EngineFactory for FakeFactory {
    fn build(&self) -> Result<Box<dyn LanguageChecker>> {
        Ok(Box::new(FakeChecker {
            bad_words: self.bad_words,
            calls: Arc::clone(&self.calls),
        }))
    }
}

struct BrokenFactory;

impl EngineFactory for BrokenFactory {
    fn build(&self) -> Result<Box<dyn LanguageChecker>> {
        Err(SpellcheckError::Engine("no engine".to_string()))
    }
}

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl SharedBuffer {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().clone()).unwrap()
    }
}

struct Harness {
    listener: SpellcheckListener,
    calls: Arc<Mutex<Vec<String>>>,
    output: SharedBuffer,
}

fn harness(bad_words: &'static [&'static str]) -> Harness {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let output = SharedBuffer::default();
    let factory = Arc::new(FakeFactory {
        bad_words,
        calls: Arc::clone(&calls),
    });
    let writer = Arc::new(ReportWriter::new(Box::new(output.clone())));
    Harness {
        listener: SpellcheckListener::new(factory, writer),
        calls,
        output,
    }
}

#[test]
fn short_identifier_never_reaches_engine() {
    let h = harness(&[]);

    let report = h.listener.check_source("int foo = 3;").unwrap();

    assert!(report.is_empty());
    assert!(h.calls.lock().is_empty());
}

#[test]
fn object_declaration_checks_variable_name() {
    let h = harness(&[]);

    h.listener.check_source("FooBarBaz object = null;").unwrap();

    assert_eq!(*h.calls.lock(), vec!["object".to_string()]);
}

#[test]
fn camel_case_identifier_is_checked_word_by_word() {
    let h = harness(&[]);

    h.listener
        .check_source("private String parserConfigurationValue = null;")
        .unwrap();

    assert_eq!(
        *h.calls.lock(),
        vec![
            "parser".to_string(),
            "Configuration".to_string(),
            "Value".to_string()
        ]
    );
}

#[test]
fn findings_of_several_words_share_one_block() {
    let h = harness(&["Configuraton", "Valeu"]);

    let report = h
        .listener
        .check_source("private String parserConfiguratonValeu = null;")
        .unwrap();

    assert_eq!(
        report.as_str(),
        "-- line: 1\n\
         \tConfiguraton is misspelled\n\
         \tSuggested correction: [fixed]\n\
         \tValeu is misspelled\n\
         \tSuggested correction: [fixed]"
    );
}

#[test]
fn comments_are_checked_as_text() {
    let h = harness(&["coment"]);

    let report = h
        .listener
        .check_source("// a coment here\nint x = 1;\n/* another\n * coment */")
        .unwrap();

    assert_eq!(
        *h.calls.lock(),
        vec!["a coment here".to_string(), "another coment".to_string()]
    );
    assert_eq!(
        report.as_str(),
        "-- line: 1\n\
         \tcoment is misspelled\n\
         \tSuggested correction: [fixed]\n\
         -- lines: 3 to 4\n\
         \tcoment is misspelled\n\
         \tSuggested correction: [fixed]"
    );
}

#[test]
fn method_declaration_name_is_checked() {
    let h = harness(&["Totl"]);

    let report = h
        .listener
        .check_source("public int computeTotl(int first, int second) {")
        .unwrap();

    assert_eq!(
        *h.calls.lock(),
        vec![
            "compute".to_string(),
            "first".to_string(),
            "second".to_string()
        ]
    );
    assert!(report.is_empty());
}

#[test]
fn code_after_inline_block_comment_is_classified() {
    let h = harness(&["misspeled"]);

    let report = h
        .listener
        .check_source("/* package */ int countValue;\nint misspeledValue = 3;\n/** Docs */")
        .unwrap();

    assert_eq!(
        *h.calls.lock(),
        vec![
            "count".to_string(),
            "Value".to_string(),
            "misspeled".to_string(),
            "Value".to_string(),
            "Docs".to_string()
        ]
    );
    assert_eq!(
        report.as_str(),
        "-- line: 2\n\tmisspeled is misspelled\n\tSuggested correction: [fixed]"
    );
}

#[test]
fn unterminated_statement_is_discarded() {
    let h = harness(&[]);

    let report = h.listener.check_source("String unfinishedValue =").unwrap();

    assert!(report.is_empty());
    assert!(h.calls.lock().is_empty());
}

#[test]
fn java_file_report_is_emitted_and_counted() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("App.java");
    fs::write(&path, "class App {\n// the coment\n}\n").unwrap();
    let h = harness(&["coment"]);

    h.listener.handle_file(&path).unwrap();

    assert_eq!(h.listener.examined_file_count(), 1);
    assert_eq!(
        h.output.contents(),
        format!(
            "Potential errors for file: {}\n-- line: 2\n\tcoment is misspelled\n\tSuggested correction: [fixed]\n",
            path.display()
        )
    );
}

#[test]
fn clean_java_file_is_counted_but_silent() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("Clean.java");
    fs::write(&path, "// all good\nclass Clean {}\n").unwrap();
    let h = harness(&[]);

    h.listener.handle_file(&path).unwrap();

    assert_eq!(h.listener.examined_file_count(), 1);
    assert!(h.output.contents().is_empty());
}

#[test]
fn other_files_are_ignored_by_default() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("notes.txt");
    fs::write(&path, "a coment\n").unwrap();
    let h = harness(&["coment"]);

    h.listener.handle_file(&path).unwrap();

    assert_eq!(h.listener.examined_file_count(), 0);
    assert!(h.calls.lock().is_empty());
    assert!(h.output.contents().is_empty());
}

#[test]
fn text_files_are_checked_when_enabled() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("notes.txt");
    fs::write(&path, "coment in notes\n").unwrap();
    let h = harness(&["coment"]);
    let listener = h.listener.with_text_files(true);

    listener.handle_file(&path).unwrap();

    assert_eq!(listener.examined_file_count(), 0);
    assert_eq!(
        h.output.contents(),
        format!(
            "Potential errors for file: {}\nline:1,column:1 - coment is misspelled\nSuggested correction: [fixed]\n",
            path.display()
        )
    );
}

#[test]
fn binary_files_are_skipped_when_text_enabled() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("blob.bin");
    fs::write(&path, [0u8, 1, 2, 3, 4, 5]).unwrap();
    let h = harness(&[]);
    let listener = h.listener.with_text_files(true);

    listener.handle_file(&path).unwrap();

    assert!(h.calls.lock().is_empty());
}

#[test]
fn missing_java_file_is_a_read_error() {
    let temp_dir = TempDir::new().unwrap();
    let h = harness(&[]);

    let result = h.listener.handle_file(&temp_dir.path().join("Gone.java"));

    assert!(matches!(result, Err(SpellcheckError::FileRead { .. })));
    assert_eq!(h.listener.examined_file_count(), 0);
}

#[test]
fn engine_failure_is_returned() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("App.java");
    fs::write(&path, "class App {}\n").unwrap();
    let writer = Arc::new(ReportWriter::new(Box::new(SharedBuffer::default())));
    let listener = SpellcheckListener::new(Arc::new(BrokenFactory), writer);

    let result = listener.handle_file(&path);

    assert!(matches!(result, Err(SpellcheckError::Engine(_))));
}
