use std::path::PathBuf;

use super::*;

#[test]
fn cli_no_paths_parses() {
    let cli = Cli::parse_from(["code-spellcheck"]);

    assert!(cli.paths.is_empty());
    assert_eq!(cli.verbose, 0);
    assert!(!cli.quiet);
}

#[test]
fn cli_with_paths() {
    let cli = Cli::parse_from(["code-spellcheck", "src", "lib"]);

    assert_eq!(cli.paths, vec![PathBuf::from("src"), PathBuf::from("lib")]);
}

#[test]
fn cli_defaults() {
    let cli = Cli::parse_from(["code-spellcheck", "src"]);

    assert_eq!(cli.threads, None);
    assert_eq!(cli.queue_capacity, DEFAULT_QUEUE_CAPACITY);
    assert_eq!(cli.dictionary, None);
    assert!(cli.disable_rules.is_empty());
    assert!(cli.exclude.is_empty());
    assert!(!cli.gitignore);
    assert!(!cli.text_files);
}

#[test]
fn cli_with_threads_and_capacity() {
    let cli = Cli::parse_from([
        "code-spellcheck",
        "-j",
        "3",
        "--queue-capacity",
        "10",
        "src",
    ]);
    let config = cli.crawl_config();

    assert_eq!(config.threads, 3);
    assert_eq!(config.queue_capacity, 10);
    assert!(!config.respect_gitignore);
}

#[test]
fn cli_default_threads_follow_parallelism() {
    let cli = Cli::parse_from(["code-spellcheck", "src"]);

    assert_eq!(cli.crawl_config().threads, default_threads());
}

#[test]
fn cli_zero_threads_rejected() {
    let result = Cli::try_parse_from(["code-spellcheck", "--threads", "0", "src"]);

    assert!(result.is_err());
}

#[test]
fn cli_zero_queue_capacity_rejected() {
    let result = Cli::try_parse_from(["code-spellcheck", "--queue-capacity", "0", "src"]);

    assert!(result.is_err());
}

#[test]
fn cli_non_numeric_threads_rejected() {
    let result = Cli::try_parse_from(["code-spellcheck", "--threads", "many", "src"]);

    assert!(result.is_err());
}

#[test]
fn cli_repeatable_options() {
    let cli = Cli::parse_from([
        "code-spellcheck",
        "-x",
        "**/generated/**",
        "--exclude",
        "*.txt",
        "--disable-rule",
        "SPELLING_RULE",
        "--disable-rule",
        "WHITESPACE_RULE",
        "src",
    ]);

    assert_eq!(cli.exclude, vec!["**/generated/**", "*.txt"]);
    assert_eq!(cli.disable_rules, vec!["SPELLING_RULE", "WHITESPACE_RULE"]);
}

#[test]
fn cli_flags() {
    let cli = Cli::parse_from([
        "code-spellcheck",
        "--gitignore",
        "--text-files",
        "-d",
        "words.txt",
        "-vv",
        "-q",
        "src",
    ]);

    assert!(cli.gitignore);
    assert!(cli.text_files);
    assert_eq!(cli.dictionary, Some(PathBuf::from("words.txt")));
    assert_eq!(cli.verbose, 2);
    assert!(cli.quiet);
    assert!(cli.crawl_config().respect_gitignore);
}

#[test]
fn cli_verify() {
    use clap::CommandFactory;
    Cli::command().debug_assert();
}
