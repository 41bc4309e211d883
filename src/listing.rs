//! Patches the front-end listing of featured posts.
//!
//! The listing is a TypeScript array literal:
//!
//! ```text
//! const postSlugs = [
//!   "newest-post",
//!   "older-post",
//! ];
//! ```
//!
//! New slugs go first, indented like the existing first element. The match is
//! purely textual; a reformatted declaration (e.g., a comment between the
//! bracket and the first element) is not recognized. There is no duplicate
//! check.

use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use thiserror::Error;
use tracing::info;

/// Inserts `"slug",` as the first element of the `postSlugs` array in
/// `source`. Returns `None` if the declaration isn't found.
pub fn insert_slug(source: &str, slug: &str) -> Option<String> {
    static DECLARATION: OnceLock<Regex> = OnceLock::new();
    let declaration = DECLARATION.get_or_init(|| {
        // constant pattern; should always compile
        Regex::new(r"(const postSlugs = \[\s*\n)(\s*)").unwrap()
    });

    let captures = declaration.captures(source)?;
    let head = captures.get(1)?;
    let indent = captures.get(2).map_or("", |m| m.as_str());

    let mut out = String::with_capacity(source.len() + indent.len() + slug.len() + 4);
    out.push_str(&source[..head.end()]);
    out.push_str(indent);
    out.push('"');
    out.push_str(slug);
    out.push_str("\",\n");
    out.push_str(&source[head.end()..]);
    Some(out)
}

/// Rewrites the listing file at `path` in place with `slug` prepended.
pub fn patch_file(path: &Path, slug: &str) -> Result<()> {
    info!(path = %path.display(), "Updating post listing");
    let source = std::fs::read_to_string(path).map_err(|err| Error::Io {
        path: path.to_owned(),
        err,
    })?;
    let patched =
        insert_slug(&source, slug).ok_or_else(|| Error::MissingDeclaration(path.to_owned()))?;
    std::fs::write(path, patched).map_err(|err| Error::Io {
        path: path.to_owned(),
        err,
    })?;
    info!("Added '{}' to postSlugs array", slug);
    Ok(())
}

/// The result of patching the listing.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents a failure to patch the listing file.
#[derive(Debug, Error)]
pub enum Error {
    /// Returned when the file has no `const postSlugs = [` declaration
    /// followed by a newline.
    #[error("Could not find postSlugs array in '{}'", .0.display())]
    MissingDeclaration(PathBuf),

    /// Returned when the file can't be read or written.
    #[error("Updating '{}'", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        err: std::io::Error,
    },
}
