use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;
use tracing::warn;

use code_spellcheck::cli::Cli;
use code_spellcheck::crawler::{FileCrawler, validate_roots};
use code_spellcheck::engine::{DEFAULT_DICTIONARY_PATHS, Dictionary, DictionaryCheckerFactory};
use code_spellcheck::listener::SpellcheckListener;
use code_spellcheck::output::{ReportWriter, ScanProgress};
use code_spellcheck::scanner::{GlobFilter, HiddenFileFilter};
use code_spellcheck::{
    EXIT_CONFIG_ERROR, EXIT_SUCCESS, EXIT_USAGE_ERROR, Result, SpellcheckError, logging,
};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    if cli.paths.is_empty() {
        eprintln!("Must provide at least one valid source path to inspect");
        std::process::exit(EXIT_USAGE_ERROR);
    }

    let exit_code = match run(&cli) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_CONFIG_ERROR
        }
    };

    std::process::exit(exit_code);
}

fn run(cli: &Cli) -> Result<i32> {
    // 1. Roots are validated before anything else is loaded
    validate_roots(&cli.paths)?;

    // 2. Checking engine
    let dictionary = Arc::new(load_dictionary(cli.dictionary.as_deref())?);
    let factory = Arc::new(DictionaryCheckerFactory::new(dictionary, &cli.disable_rules));

    // 3. Listener and crawler
    let writer = Arc::new(ReportWriter::stdout());
    let listener =
        Arc::new(SpellcheckListener::new(factory, writer).with_text_files(cli.text_files));

    let mut crawler =
        FileCrawler::new(cli.crawl_config()).with_progress(ScanProgress::new(cli.quiet));
    crawler.add_filter(HiddenFileFilter);
    if !cli.exclude.is_empty() {
        crawler.add_filter(GlobFilter::new(&cli.exclude)?);
    }
    crawler.add_listener(listener.clone());

    // 4. Crawl
    let summary = crawler.crawl(&cli.paths)?;
    for failure in &summary.failures {
        warn!(path = %failure.path.display(), error = %failure.error, "File was not checked");
    }

    if listener.examined_file_count() > 0 {
        println!("\nDONE!!");
    } else {
        eprintln!(
            "No java files found under directories: [{}]",
            display_roots(&cli.paths)
        );
    }

    Ok(EXIT_SUCCESS)
}

fn load_dictionary(explicit: Option<&Path>) -> Result<Dictionary> {
    if let Some(path) = explicit {
        return Dictionary::load(path);
    }
    let path = Dictionary::locate_default(DEFAULT_DICTIONARY_PATHS).ok_or_else(|| {
        SpellcheckError::Config(format!(
            "no dictionary found (looked for {}); pass one with --dictionary",
            DEFAULT_DICTIONARY_PATHS.join(", ")
        ))
    })?;
    Dictionary::load(path)
}

fn display_roots(roots: &[PathBuf]) -> String {
    roots
        .iter()
        .map(|root| root.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
