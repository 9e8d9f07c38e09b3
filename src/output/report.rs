use std::fmt::Write as _;
use std::io::Write;
use std::path::Path;

use parking_lot::Mutex;

use crate::engine::{RuleMatch, Suggestions};
use crate::error::Result;
use crate::source::LineRange;

/// Findings for one file, one block per logical unit, in scan order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileReport {
    body: String,
}

impl FileReport {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            body: String::new(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.body
    }

    /// Append a `-- line(s)` header and the tab-indented findings under it.
    /// Empty findings add nothing.
    pub fn push_block(&mut self, lines: LineRange, findings: &str) {
        if findings.is_empty() {
            return;
        }
        if !self.body.is_empty() {
            self.body.push('\n');
        }
        let _ = writeln!(self.body, "{lines}");
        self.body.push_str(&indent(findings));
    }
}

/// Render matches as `message` / `Suggested correction: [...]` line pairs.
#[must_use]
pub fn render_matches(matches: &[RuleMatch]) -> String {
    matches
        .iter()
        .map(|m| {
            format!(
                "{}\nSuggested correction: {}",
                m.message,
                Suggestions(&m.suggestions)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render matches of a whole-file check, prefixed with their position.
#[must_use]
pub fn render_positioned_matches(matches: &[RuleMatch]) -> String {
    matches
        .iter()
        .map(|m| {
            format!(
                "line:{},column:{} - {}\nSuggested correction: {}",
                m.line,
                m.column,
                m.message,
                Suggestions(&m.suggestions)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Prefix every line, including those after embedded newlines, with a tab.
#[must_use]
pub fn indent(text: &str) -> String {
    let mut indented = String::with_capacity(text.len() + 8);
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            indented.push('\n');
        }
        indented.push('\t');
        indented.push_str(line);
    }
    indented
}

/// Output stream shared by all workers. One report is written per lock
/// acquisition so reports of different files never interleave.
pub struct ReportWriter {
    out: Mutex<Box<dyn Write + Send>>,
}

impl ReportWriter {
    #[must_use]
    pub fn new(out: Box<dyn Write + Send>) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    #[must_use]
    pub fn stdout() -> Self {
        Self::new(Box::new(std::io::stdout()))
    }

    /// Write the report for `path`. Empty reports are skipped.
    ///
    /// # Errors
    /// Returns an I/O error if writing to the output fails.
    pub fn emit(&self, path: &Path, report: &str) -> Result<()> {
        if report.is_empty() {
            return Ok(());
        }

        let mut out = self.out.lock();
        writeln!(out, "Potential errors for file: {}", path.display())?;
        writeln!(out, "{report}")?;
        out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
