//! Adds a post to the blog: runs the extractor, normalizes the header image,
//! and prepends the post to the front-end listing.

use anyhow::{Context, Result};
use clap::Parser;
use postpress::config::Config;
use postpress::logging;
use postpress::publish::{Published, Publisher};
use std::path::{Path, PathBuf};

/// Commandline arguments.
#[derive(Parser, Debug)]
#[command(
    name = "publisher",
    about = "Add a hosted article to the blog",
    after_help = "Examples:\n  publisher https://secondthoughts.ai/p/article ./image.jpg\n  publisher https://secondthoughts.ai/p/article https://example.com/image.jpg"
)]
struct Cli {
    /// The article URL.
    post_url: String,

    /// The header image: a local path or an http(s):// URL.
    image_source: String,

    /// The blog repository, or any directory inside it.
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Don't run `git pull` first.
    #[arg(long)]
    skip_pull: bool,

    /// The extractor executable. Defaults to the `extractor` next to this
    /// program.
    #[arg(long)]
    extractor: Option<PathBuf>,
}

fn run_on_args(args: impl Iterator<Item = std::ffi::OsString>) -> Result<Published> {
    let args = Cli::parse_from(args);
    let root = std::fs::canonicalize(&args.root)
        .with_context(|| format!("Resolving root directory {:?}", args.root))?;
    let config = Config::from_directory(&root)?;
    tracing::info!("Working directory: {}", config.root_directory.display());

    let extractor = match args.extractor {
        Some(path) => path,
        None => std::env::current_exe()
            .context("Locating the extractor executable")?
            .with_file_name(format!("extractor{}", std::env::consts::EXE_SUFFIX)),
    };

    let publisher = Publisher {
        config: &config,
        extractor: &extractor,
        skip_pull: args.skip_pull,
    };
    Ok(publisher.publish(&args.post_url, &args.image_source)?)
}

fn print_summary(published: &Published) {
    let show = |path: &Path| {
        path.strip_prefix(&published.root)
            .unwrap_or(path)
            .display()
            .to_string()
    };
    println!();
    println!("{}", "=".repeat(50));
    println!("Successfully added post: {}", published.slug);
    println!();
    println!("Files created/modified:");
    println!("  - {}", show(&published.stub));
    println!("  - {}", show(&published.header));
    println!("  - {}", show(&published.listing));
    println!();
    println!("Next steps:");
    println!("  1. Review the changes");
    println!("  2. Run 'npm run dev' to verify the post appears correctly");
    println!("  3. Commit when satisfied");
}

fn main() {
    logging::init();
    match run_on_args(std::env::args_os()) {
        Ok(published) => print_summary(&published),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}
