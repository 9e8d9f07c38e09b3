use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Plain-text files at or above this size are not checked.
pub const MAX_TEXT_FILE_SIZE: u64 = 100 * 1024 * 1024;

const SNIFF_BYTES: u64 = 1000;
const TEXT_RATIO: f64 = 0.95;
const MARKUP_RATIO: f64 = 0.05;
const SKIPPED_EXTENSIONS: &[&str] = &["html", "xml", "class"];
const EXTRA_TEXT_CHARS: &str = "ßöäüÖÄÜ§%°²³´âêîôÂÊÔÎáéíóàèìòÁÉÍÓÀÈÌÒ©¢£¥±¿»«¼½¾ª";

/// Read up to `max_bytes` of a file, decoding each byte as ISO-8859-1.
///
/// # Errors
/// Returns an I/O error if the file cannot be opened or read.
pub fn read_latin1(path: &Path, max_bytes: u64) -> std::io::Result<String> {
    let mut data = Vec::new();
    File::open(path)?.take(max_bytes).read_to_end(&mut data)?;
    Ok(data.into_iter().map(char::from).collect())
}

/// Heuristic plain-text check based on the first kilobyte of the file.
///
/// # Errors
/// Returns an I/O error if the sample cannot be read.
pub fn is_text_file(path: &Path) -> std::io::Result<bool> {
    let skipped = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SKIPPED_EXTENSIONS.contains(&ext));
    if skipped || !path.is_file() {
        return Ok(false);
    }

    let sample = read_latin1(path, SNIFF_BYTES)?;
    Ok(is_text_sample(&sample))
}

/// Whether a decoded sample looks like prose rather than binary data or markup.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn is_text_sample(sample: &str) -> bool {
    let total = sample.chars().count();
    if total == 0 {
        return false;
    }

    let text_chars = sample.chars().filter(|&c| is_text_char(c)).count();
    if (text_chars as f64) / (total as f64) <= TEXT_RATIO {
        return false;
    }

    let markup_chars = sample.chars().filter(|&c| c == '<' || c == '>').count();
    (markup_chars as f64) / (total as f64) < MARKUP_RATIO
}

fn is_text_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || c.is_ascii_punctuation()
        || matches!(c, ' ' | '\n' | '\r' | '\t')
        || EXTRA_TEXT_CHARS.contains(c)
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
