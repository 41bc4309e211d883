//! The extractor pipeline: validate the article URL, fetch the page, scan it
//! for metadata, then write the post stub and create the post's image
//! directory.
//!
//! Validation happens before any I/O, so a bad URL never touches the network
//! or the filesystem.

use crate::article::{Article, Slug, ValidationError};
use crate::config::Config;
use crate::fetch::{Fetch, FetchError};
use crate::scan;
use crate::stub;
use lol_html::errors::RewritingError;
use std::path::PathBuf;
use thiserror::Error;
use tracing::info;

/// Runs the whole extraction for `url` and returns the scraped [`Article`].
pub fn extract(config: &Config, fetcher: &dyn Fetch, url: &str) -> Result<Article> {
    let slug = Slug::from_url(url, &config.source_prefix)?;

    if !config.posts_directory.is_dir() {
        return Err(Error::MissingPostsDirectory(config.posts_directory.clone()));
    }

    info!(url, "Fetching article");
    let html = fetcher.fetch(url)?;
    let fields = scan::scan(&html)?;
    let article = Article {
        slug,
        title: fields.title,
        description: fields.description,
        author: fields.author,
        date: fields.date,
    };

    let stub_path = config.stub_path(article.slug.as_str());
    stub::write_stub(&stub_path, &article).map_err(|err| Error::Io {
        path: stub_path.clone(),
        err,
    })?;
    info!(path = %stub_path.display(), "Created MDX file");

    let image_dir = config.image_directory(article.slug.as_str());
    let created = stub::create_image_directory(&image_dir).map_err(|err| Error::Io {
        path: image_dir.clone(),
        err,
    })?;
    match created {
        true => info!(path = %image_dir.display(), "Created image directory"),
        false => info!(path = %image_dir.display(), "Image directory already exists"),
    }

    Ok(article)
}

/// The result of an extraction.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents a failed extraction.
#[derive(Debug, Error)]
pub enum Error {
    /// Returned when the URL doesn't carry a slug under the source prefix.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Returned when the article page can't be retrieved.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Returned when the HTML scanner gives up on the page.
    #[error("Scanning article HTML")]
    Scan(#[from] RewritingError),

    /// Returned when the configured posts directory doesn't exist.
    #[error("'{}' directory not found", .0.display())]
    MissingPostsDirectory(PathBuf),

    /// Returned when the stub or image directory can't be written.
    #[error("Writing '{}'", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        err: std::io::Error,
    },
}
