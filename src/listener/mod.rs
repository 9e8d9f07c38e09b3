use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::{debug, trace};

use crate::crawler::FileListener;
use crate::engine::{
    EngineFactory, LanguageChecker, MAX_TEXT_FILE_SIZE, is_text_file, read_latin1,
};
use crate::error::{Result, SpellcheckError};
use crate::output::{FileReport, ReportWriter, render_matches, render_positioned_matches};
use crate::source::{
    DeclarationClassifier, LineAssembler, LogicalUnit, UnitKind, break_apart_line,
    checkable_words,
};

const JAVA_EXTENSION: &str = "java";

/// Spellchecks Java comments and declared identifiers, and optionally
/// plain-text files, writing one report per file with findings.
pub struct SpellcheckListener {
    factory: Arc<dyn EngineFactory>,
    classifier: DeclarationClassifier,
    writer: Arc<ReportWriter>,
    scan_text_files: bool,
    examined: AtomicUsize,
}

impl SpellcheckListener {
    #[must_use]
    pub fn new(factory: Arc<dyn EngineFactory>, writer: Arc<ReportWriter>) -> Self {
        Self {
            factory,
            classifier: DeclarationClassifier::new(),
            writer,
            scan_text_files: false,
            examined: AtomicUsize::new(0),
        }
    }

    #[must_use]
    pub const fn with_text_files(mut self, enabled: bool) -> Self {
        self.scan_text_files = enabled;
        self
    }

    /// Number of Java files fully examined so far.
    #[must_use]
    pub fn examined_file_count(&self) -> usize {
        self.examined.load(Ordering::SeqCst)
    }

    /// Run the Java pipeline over in-memory source and return the report.
    ///
    /// # Errors
    /// Returns an error if the engine cannot be built or fails on a unit.
    pub fn check_source(&self, source: &str) -> Result<FileReport> {
        let checker = self.factory.build()?;
        let mut assembler = LineAssembler::new();
        let mut report = FileReport::new();

        for line in source.lines() {
            if let Some(unit) = assembler.push(line) {
                let findings = self.check_unit(checker.as_ref(), &unit)?;
                report.push_block(unit.lines, &findings);
            }
        }
        let (lines, in_comment) = (assembler.line_number(), assembler.in_block_comment());
        if let Some(pending) = assembler.finish() {
            trace!(lines, in_comment, pending = %pending, "Discarding unterminated unit");
        }

        Ok(report)
    }

    fn check_unit(&self, checker: &dyn LanguageChecker, unit: &LogicalUnit) -> Result<String> {
        match &unit.kind {
            UnitKind::SingleLineComment(text) | UnitKind::BlockComment(text) => {
                if text.is_empty() {
                    return Ok(String::new());
                }
                Ok(render_matches(&checker.check(text)?))
            }
            UnitKind::Statement(text) => self.check_statement(checker, text),
        }
    }

    fn check_statement(&self, checker: &dyn LanguageChecker, statement: &str) -> Result<String> {
        let mut findings = Vec::new();
        for fragment in break_apart_line(statement) {
            let Some(identifier) = self.classifier.declared_identifier(&fragment) else {
                continue;
            };
            for word in checkable_words(identifier) {
                let rendered = render_matches(&checker.check(word)?);
                if !rendered.is_empty() {
                    findings.push(rendered);
                }
            }
        }
        Ok(findings.join("\n"))
    }

    fn handle_java_file(&self, path: &Path) -> Result<()> {
        let bytes = fs::read(path).map_err(|source| SpellcheckError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let source = String::from_utf8_lossy(&bytes);

        let report = self.check_source(&source)?;
        self.writer.emit(path, report.as_str())?;
        self.examined.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn handle_text_file(&self, path: &Path) -> Result<()> {
        let read_error = |source| SpellcheckError::FileRead {
            path: path.to_path_buf(),
            source,
        };
        if !is_text_file(path).map_err(read_error)? {
            trace!(path = %path.display(), "Not a text file");
            return Ok(());
        }
        let size = fs::metadata(path).map_err(read_error)?.len();
        if size >= MAX_TEXT_FILE_SIZE {
            debug!(path = %path.display(), size, "Text file too large, skipping");
            return Ok(());
        }

        let content = read_latin1(path, MAX_TEXT_FILE_SIZE).map_err(read_error)?;
        let checker = self.factory.build()?;
        let report = render_positioned_matches(&checker.check(&content)?);
        self.writer.emit(path, &report)
    }
}

impl FileListener for SpellcheckListener {
    fn handle_file(&self, path: &Path) -> Result<()> {
        let is_java = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(JAVA_EXTENSION));

        if is_java {
            debug!(path = %path.display(), "Checking Java file");
            self.handle_java_file(path)
        } else if self.scan_text_files {
            self.handle_text_file(path)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
