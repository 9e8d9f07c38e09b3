#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Creates an `assert_cmd` Command for the code-spellcheck binary.
#[macro_export]
macro_rules! code_spellcheck {
    () => {
        assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("code-spellcheck"))
    };
}

/// Words known to the test dictionary.
pub const DICTIONARY_WORDS: &[&str] = &[
    "this", "is", "a", "simple", "comment", "the", "value", "count", "counter", "clean",
    "receive", "first", "second", "object", "parser", "notes",
];

/// A source tree to crawl plus a dictionary kept outside of it.
pub struct TestFixture {
    pub dir: TempDir,
    pub dictionary_dir: TempDir,
}

impl TestFixture {
    /// Creates an empty source tree and a dictionary with [`DICTIONARY_WORDS`].
    pub fn new() -> Self {
        let fixture = Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
            dictionary_dir: TempDir::new().expect("Failed to create temp directory"),
        };
        fs::write(fixture.dictionary_path(), DICTIONARY_WORDS.join("\n"))
            .expect("Failed to write dictionary");
        fixture
    }

    /// Creates a file with the given content in the source tree.
    pub fn create_file(&self, relative_path: &str, content: &str) {
        let path = self.dir.path().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&path, content).expect("Failed to write file");
    }

    /// Creates a directory in the source tree.
    pub fn create_dir(&self, relative_path: &str) {
        let path = self.dir.path().join(relative_path);
        fs::create_dir_all(&path).expect("Failed to create directory");
    }

    /// Returns the root of the source tree.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn dictionary_path(&self) -> PathBuf {
        self.dictionary_dir.path().join("words")
    }

    /// Java file with a misspelled comment on line 3.
    pub fn create_misspelled_comment(&self, relative_path: &str) {
        self.create_file(
            relative_path,
            "package demo;\n\n// this is a simple coment\npublic class Demo {\n}\n",
        );
    }
}

/// Split stdout into per-file reports, sorted so runs can be compared
/// regardless of the order files finished in.
pub fn sorted_reports(stdout: &str) -> Vec<String> {
    let mut reports: Vec<String> = stdout
        .split("Potential errors for file: ")
        .skip(1)
        .map(|report| report.trim_end_matches("\nDONE!!\n").to_string())
        .collect();
    reports.sort();
    reports
}
