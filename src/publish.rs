//! Stitches the publishing steps together:
//!
//! 1. Pull the latest repository state (best effort)
//! 2. Run the extractor in its own process to write the post stub
//! 3. Resolve the header image, downloading it if it's remote
//! 4. Normalize the header into the post's image directory
//! 5. Drop the transient download, if any
//! 6. Prepend the post's slug to the front-end listing
//!
//! Any failing step ends the run. Files written by earlier steps stay where
//! they are.

use crate::config::Config;
use crate::download;
use crate::fetch::{FetchError, HttpFetcher};
use crate::header;
use crate::listing;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{info, warn};

/// Settings for one publishing run.
pub struct Publisher<'a> {
    /// Where the post, image, and listing files live.
    pub config: &'a Config,

    /// The `extractor` executable.
    pub extractor: &'a Path,

    /// Skip the `git pull` step.
    pub skip_pull: bool,
}

/// What a successful run produced.
#[derive(Debug)]
pub struct Published {
    pub root: PathBuf,
    pub slug: String,
    pub stub: PathBuf,
    pub header: PathBuf,
    pub listing: PathBuf,
}

impl Publisher<'_> {
    /// Publishes the article at `post_url` with the header image at
    /// `image_source` (a local path or an `http(s)://` URL).
    pub fn publish(&self, post_url: &str, image_source: &str) -> Result<Published> {
        if !self.skip_pull {
            git_pull(&self.config.root_directory);
        }

        let output = run_extractor(self.extractor, &self.config.root_directory, post_url)?;
        info!("Extractor complete. Slug: {}", output.slug);
        for line in &output.details {
            info!("  {}", line);
        }

        let source = HeaderSource::resolve(image_source)?;
        let header_path = self.config.header_path(&output.slug);
        header::normalize_file(source.path(), &header_path)?;
        source.cleanup();

        listing::patch_file(&self.config.listing_file, &output.slug)?;

        Ok(Published {
            root: self.config.root_directory.clone(),
            stub: self.config.stub_path(&output.slug),
            header: header_path,
            listing: self.config.listing_file.clone(),
            slug: output.slug,
        })
    }
}

/// Runs `git pull` in `root`. Failures are logged and otherwise ignored.
/// Returns whether the pull succeeded.
pub fn git_pull(root: &Path) -> bool {
    info!("Running git pull...");
    match Command::new("git").arg("pull").current_dir(root).output() {
        Ok(output) if output.status.success() => {
            info!("Git pull complete.");
            true
        }
        Ok(output) => {
            warn!(
                "git pull failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            );
            false
        }
        Err(err) => {
            warn!("git pull failed: {}", err);
            false
        }
    }
}

/// The extractor's standard output: the slug on the first line, then the
/// remaining metadata lines.
#[derive(Debug, PartialEq, Eq)]
pub struct ExtractorOutput {
    pub slug: String,
    pub details: Vec<String>,
}

impl ExtractorOutput {
    /// Parses captured stdout. Returns `None` if there's no slug.
    pub fn parse(stdout: &str) -> Option<ExtractorOutput> {
        let mut lines = stdout.trim().lines();
        let slug = lines.next().filter(|slug| !slug.is_empty())?;
        Some(ExtractorOutput {
            slug: slug.to_owned(),
            details: lines.map(str::to_owned).collect(),
        })
    }
}

/// Runs the extractor for `post_url` as a child process rooted at `root`. Its
/// stderr (logs and diagnostics) passes straight through to ours.
pub fn run_extractor(extractor: &Path, root: &Path, post_url: &str) -> Result<ExtractorOutput> {
    info!("Running extractor for {}...", post_url);
    let output = Command::new(extractor)
        .arg("--root")
        .arg(root)
        .arg(post_url)
        .stdin(Stdio::null())
        .stderr(Stdio::inherit())
        .output()
        .map_err(|err| Error::SpawnExtractor {
            path: extractor.to_owned(),
            err,
        })?;
    if !output.status.success() {
        return Err(Error::Extractor(output.status));
    }
    ExtractorOutput::parse(&String::from_utf8_lossy(&output.stdout)).ok_or(Error::EmptyOutput)
}

/// A header image ready to be read from disk.
pub enum HeaderSource {
    /// A file the user pointed at. Left alone.
    Local(PathBuf),

    /// A transient download. Deleted on [`HeaderSource::cleanup`] or drop.
    Downloaded(NamedTempFile),
}

impl HeaderSource {
    /// Downloads `source` if it's an `http(s)://` URL; otherwise checks that
    /// the local file exists.
    pub fn resolve(source: &str) -> Result<HeaderSource> {
        if download::is_remote(source) {
            let fetcher = HttpFetcher::new()?;
            Ok(HeaderSource::Downloaded(download::download(&fetcher, source)?))
        } else {
            HeaderSource::local(Path::new(source))
        }
    }

    /// Fails with [`Error::NotFound`] if `path` doesn't exist.
    pub fn local(path: &Path) -> Result<HeaderSource> {
        match path.exists() {
            true => Ok(HeaderSource::Local(path.to_owned())),
            false => Err(Error::NotFound(path.to_owned())),
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            HeaderSource::Local(path) => path,
            HeaderSource::Downloaded(file) => file.path(),
        }
    }

    /// Removes a transient download. Failing to remove it only warrants a
    /// warning.
    pub fn cleanup(self) {
        if let HeaderSource::Downloaded(file) = self {
            let path = file.path().to_owned();
            if let Err(err) = file.close() {
                warn!(path = %path.display(), "Removing temp file: {}", err);
            }
        }
    }
}

/// The result of a publishing step.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents a failed publishing run.
#[derive(Debug, Error)]
pub enum Error {
    /// Returned when the extractor executable can't be started.
    #[error("Running extractor '{}'", .path.display())]
    SpawnExtractor {
        path: PathBuf,
        #[source]
        err: std::io::Error,
    },

    /// Returned when the extractor exits unsuccessfully. Its diagnostics have
    /// already been written to stderr.
    #[error("Error running extractor: {0}")]
    Extractor(ExitStatus),

    /// Returned when the extractor succeeds without printing a slug.
    #[error("Extractor produced no output")]
    EmptyOutput,

    /// Returned when a local header image doesn't exist.
    #[error("Image file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Returned when the HTTP client can't be set up.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Returned when a remote header image can't be downloaded.
    #[error(transparent)]
    Download(#[from] download::Error),

    /// Returned when the header image can't be normalized.
    #[error(transparent)]
    Header(#[from] header::Error),

    /// Returned when the listing file can't be patched.
    #[error(transparent)]
    Listing(#[from] listing::Error),
}
