use std::path::PathBuf;

use clap::Parser;

use crate::crawler::{CrawlConfig, DEFAULT_QUEUE_CAPACITY, default_threads};

#[derive(Parser, Debug)]
#[command(name = "code-spellcheck")]
#[command(author, version, about = "Spell-check comments and declared identifiers in Java source trees")]
#[command(long_about = "Crawls directories for Java sources and reports likely spelling mistakes \
    in comments and in the names of declared variables and methods.\n\n\
    Exit codes:\n  \
    0 - Crawl completed (findings do not change the exit code)\n  \
    1 - No source path given\n  \
    2 - Configuration or runtime error")]
pub struct Cli {
    /// Root directories to crawl
    pub paths: Vec<PathBuf>,

    /// Number of worker threads [default: available parallelism]
    #[arg(short = 'j', long, value_parser = parse_positive)]
    pub threads: Option<usize>,

    /// Capacity of the queue between the crawler and the workers
    #[arg(long, default_value_t = DEFAULT_QUEUE_CAPACITY, value_parser = parse_positive)]
    pub queue_capacity: usize,

    /// Word list to check against, one word per line
    #[arg(short, long)]
    pub dictionary: Option<PathBuf>,

    /// Additional rule ids to disable (can be specified multiple times)
    #[arg(long = "disable-rule")]
    pub disable_rules: Vec<String>,

    /// Exclude patterns (glob syntax, can be specified multiple times)
    #[arg(long, short = 'x')]
    pub exclude: Vec<String>,

    /// Honour .gitignore files while walking
    #[arg(long)]
    pub gitignore: bool,

    /// Also check plain-text files
    #[arg(long)]
    pub text_files: bool,

    /// Increase output verbosity (-v, -vv for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only report errors; no progress spinner
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    #[must_use]
    pub fn crawl_config(&self) -> CrawlConfig {
        CrawlConfig {
            threads: self.threads.unwrap_or_else(default_threads),
            queue_capacity: self.queue_capacity,
            respect_gitignore: self.gitignore,
        }
    }
}

fn parse_positive(s: &str) -> Result<usize, String> {
    let value: usize = s.parse().map_err(|e| format!("{e}"))?;
    if value == 0 {
        return Err("must be at least 1".to_string());
    }
    Ok(value)
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
