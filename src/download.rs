//! Downloads remote header images into transient files.
//!
//! The returned [`NamedTempFile`] deletes itself when dropped, so the download
//! is cleaned up however the rest of the run goes.

use crate::fetch::{FetchError, HttpFetcher};
use reqwest::header::CONTENT_TYPE;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

const DEFAULT_EXTENSION: &str = ".jpg";

/// Whether an image source names a remote resource rather than a local path.
pub fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Picks a file extension (with the leading dot) for a downloaded image. The
/// response's `Content-Type` wins; otherwise the extension of the URL's path
/// (ignoring any query string); otherwise `.jpg`.
pub fn extension_for(content_type: Option<&str>, url: &str) -> String {
    let content_type = content_type.unwrap_or_default();
    for (needle, extension) in [
        ("jpeg", ".jpg"),
        ("jpg", ".jpg"),
        ("png", ".png"),
        ("gif", ".gif"),
        ("webp", ".webp"),
    ] {
        if content_type.contains(needle) {
            return extension.to_owned();
        }
    }

    let path = match Url::parse(url) {
        Ok(parsed) => parsed.path().to_owned(),
        Err(_) => url.split('?').next().unwrap_or_default().to_owned(),
    };
    match Path::new(&path).extension().and_then(|ext| ext.to_str()) {
        Some(ext) if !ext.is_empty() => format!(".{}", ext),
        _ => DEFAULT_EXTENSION.to_owned(),
    }
}

/// Downloads `url` into a new temporary file whose name ends in the inferred
/// extension.
pub fn download(fetcher: &HttpFetcher, url: &str) -> Result<NamedTempFile> {
    info!(url, "Downloading image");
    let response = fetcher.get(url)?;
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let extension = extension_for(content_type.as_deref(), url);
    debug!(?content_type, %extension, "Inferred image extension");

    let bytes = response.bytes().map_err(|err| {
        Error::Fetch(FetchError::Body {
            url: url.to_owned(),
            err,
        })
    })?;

    let mut file = tempfile::Builder::new()
        .prefix("postpress-")
        .suffix(&extension)
        .tempfile()
        .map_err(Error::TempFile)?;
    file.write_all(&bytes).map_err(Error::TempFile)?;
    file.flush().map_err(Error::TempFile)?;
    info!(path = %file.path().display(), "Downloaded to temp file");
    Ok(file)
}

/// The result of a download.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents a failed image download.
#[derive(Debug, Error)]
pub enum Error {
    /// Returned when the image can't be retrieved.
    #[error("Error downloading image")]
    Fetch(#[from] FetchError),

    /// Returned when the temporary file can't be created or written.
    #[error("Writing downloaded image")]
    TempFile(#[source] std::io::Error),
}
