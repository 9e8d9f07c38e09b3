pub mod cli;
pub mod crawler;
pub mod engine;
pub mod error;
pub mod listener;
pub mod logging;
pub mod output;
pub mod scanner;
pub mod source;

pub use error::{Result, SpellcheckError};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_USAGE_ERROR: i32 = 1;
pub const EXIT_CONFIG_ERROR: i32 = 2;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
