//! Scrapes an article's metadata, writes the post stub, and creates the post's
//! image directory. Prints the slug, title, description, author, and date on
//! five lines of stdout.

use anyhow::{Context, Result};
use clap::Parser;
use postpress::config::Config;
use postpress::extract::extract;
use postpress::fetch::HttpFetcher;
use postpress::logging;
use std::path::PathBuf;

/// Commandline arguments.
#[derive(Parser, Debug)]
#[command(name = "extractor", about = "Extract article metadata into a post stub")]
struct Cli {
    /// The article URL, e.g. https://secondthoughts.ai/p/ai-agent-security
    url: String,

    /// The blog repository, or any directory inside it.
    #[arg(long, default_value = ".")]
    root: PathBuf,
}

fn run_on_args(args: impl Iterator<Item = std::ffi::OsString>) -> Result<()> {
    let args = Cli::parse_from(args);
    let root = std::fs::canonicalize(&args.root)
        .with_context(|| format!("Resolving root directory {:?}", args.root))?;
    let config = Config::from_directory(&root)?;
    let fetcher = HttpFetcher::new()?;
    let article = extract(&config, &fetcher, &args.url)?;
    for line in article.lines() {
        println!("{}", line);
    }
    Ok(())
}

fn main() {
    logging::init();
    if let Err(e) = run_on_args(std::env::args_os()) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
