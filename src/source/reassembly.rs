use std::fmt;

const SINGLE_LINE_COMMENT: &str = "//";
const BLOCK_COMMENT_START: &str = "/*";
const BLOCK_COMMENT_END: &str = "*/";

/// Inclusive range of 1-based physical line numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRange {
    pub start: usize,
    pub end: usize,
}

impl LineRange {
    #[must_use]
    pub const fn single(line: usize) -> Self {
        Self {
            start: line,
            end: line,
        }
    }

    #[must_use]
    pub const fn is_single_line(&self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for LineRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single_line() {
            write!(f, "-- line: {}", self.end)
        } else {
            write!(f, "-- lines: {} to {}", self.start, self.end)
        }
    }
}

/// Kind and text of a reassembled logical unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitKind {
    SingleLineComment(String),
    BlockComment(String),
    Statement(String),
}

/// One comment or statement rebuilt from one or more physical lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalUnit {
    pub kind: UnitKind,
    pub lines: LineRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    Accumulating,
    InBlockComment,
}

/// Streaming state machine turning trimmed physical lines into logical units.
///
/// Lines are fed in order through [`LineAssembler::push`]; a unit is returned
/// as soon as its terminating line has been seen. Anything still pending when
/// input ends is dropped.
#[derive(Debug)]
pub struct LineAssembler {
    state: State,
    buffer: String,
    pending_start: Option<usize>,
    line_number: usize,
}

impl Default for LineAssembler {
    fn default() -> Self {
        Self::new()
    }
}

impl LineAssembler {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: State::Idle,
            buffer: String::new(),
            pending_start: None,
            line_number: 0,
        }
    }

    /// Number of physical lines consumed so far.
    #[must_use]
    pub const fn line_number(&self) -> usize {
        self.line_number
    }

    /// Whether a block comment is currently open.
    #[must_use]
    pub fn in_block_comment(&self) -> bool {
        self.state == State::InBlockComment
    }

    /// Feed the next physical line.
    pub fn push(&mut self, raw_line: &str) -> Option<LogicalUnit> {
        self.line_number += 1;
        let line = raw_line.trim();

        if line.is_empty() {
            return None;
        }

        if line.starts_with(SINGLE_LINE_COMMENT) {
            // The pending unit restarts after this line so ranges never overlap.
            if self.state != State::Idle {
                self.pending_start = None;
            }
            return Some(LogicalUnit {
                kind: UnitKind::SingleLineComment(strip_comment_markers(line)),
                lines: LineRange::single(self.line_number),
            });
        }

        self.append(line);

        if self.state == State::InBlockComment
            && !self.buffer.ends_with(BLOCK_COMMENT_END)
            && block_comment_closed(&self.buffer)
        {
            // Code follows the comment on the same line.
            self.state = State::Accumulating;
        }

        match self.state {
            State::InBlockComment if self.buffer.ends_with(BLOCK_COMMENT_END) => {
                let text = collapse_block_comment(&self.buffer);
                Some(self.emit(UnitKind::BlockComment(text)))
            }
            State::Accumulating if is_statement_end(&self.buffer) => {
                let text = self.buffer.trim().to_string();
                Some(self.emit(UnitKind::Statement(text)))
            }
            _ => None,
        }
    }

    /// Consume the assembler at end of input, returning the discarded pending text if any.
    #[must_use]
    pub fn finish(self) -> Option<String> {
        if self.buffer.is_empty() {
            None
        } else {
            Some(self.buffer)
        }
    }

    fn append(&mut self, line: &str) {
        if self.state == State::Idle {
            self.state = State::Accumulating;
            self.buffer.clear();
        } else {
            self.buffer.push(' ');
        }
        self.buffer.push_str(line);

        if self.pending_start.is_none() {
            self.pending_start = Some(self.line_number);
        }
        if line.starts_with(BLOCK_COMMENT_START) {
            self.state = State::InBlockComment;
        }
    }

    fn emit(&mut self, kind: UnitKind) -> LogicalUnit {
        let start = self.pending_start.take().unwrap_or(self.line_number);
        self.state = State::Idle;
        self.buffer.clear();

        LogicalUnit {
            kind,
            lines: LineRange {
                start,
                end: self.line_number,
            },
        }
    }
}

/// True iff the trimmed buffer ends a Java statement (`;`, `{` or `}`).
#[must_use]
pub fn is_statement_end(buffer: &str) -> bool {
    let trimmed = buffer.trim_end();
    trimmed.ends_with(';') || trimmed.ends_with('{') || trimmed.ends_with('}')
}

/// Remove `//`, `/*` and `*/` markers and trim.
#[must_use]
pub fn strip_comment_markers(text: &str) -> String {
    text.replace(BLOCK_COMMENT_START, "")
        .replace(BLOCK_COMMENT_END, "")
        .replace(SINGLE_LINE_COMMENT, "")
        .trim()
        .to_string()
}

/// True when the last `/*` in the buffer has a matching `*/` after it.
fn block_comment_closed(buffer: &str) -> bool {
    match (
        buffer.rfind(BLOCK_COMMENT_START),
        buffer.rfind(BLOCK_COMMENT_END),
    ) {
        (Some(open), Some(close)) => close >= open + BLOCK_COMMENT_START.len(),
        _ => false,
    }
}

fn collapse_block_comment(buffer: &str) -> String {
    let stripped = strip_comment_markers(buffer);
    stripped
        .split_whitespace()
        .filter(|word| !word.chars().all(|c| c == '*'))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
#[path = "reassembly_tests.rs"]
mod tests;
