mod classify;
mod identifier;
mod reassembly;

pub use classify::{Declaration, DeclarationClassifier, break_apart_line};
pub use identifier::{MIN_WORD_LENGTH, Words, checkable_words, decompose};
pub use reassembly::{
    LineAssembler, LineRange, LogicalUnit, UnitKind, is_statement_end, strip_comment_markers,
};
