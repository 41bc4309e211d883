//! Writes the on-disk artifacts for a freshly extracted [`Article`]: the
//! `.mdx` stub holding only frontmatter, and the (empty) image directory the
//! header image will later land in.

use crate::article::Article;
use std::fmt::Write;
use std::io;
use std::path::Path;

/// Renders the frontmatter block for `article`:
///
/// ```text
/// ---
/// title: "..."
/// subtitle: "..."
/// authors: "..."
/// date: "YYYY-MM-DD"
/// ---
/// ```
///
/// Missing fields render as `""`.
pub fn frontmatter(article: &Article) -> String {
    let date = article.date_string();
    let mut out = String::from("---\n");
    for (key, value) in [
        ("title", article.title.as_deref().unwrap_or_default()),
        ("subtitle", article.description.as_deref().unwrap_or_default()),
        ("authors", article.author.as_deref().unwrap_or_default()),
        ("date", date.as_str()),
    ] {
        // writing to a String never fails
        let _ = writeln!(out, "{}: \"{}\"", key, quote(value));
    }
    out.push_str("---\n");
    out
}

/// Escapes `value` for a YAML double-quoted scalar.
fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out
}

/// Writes (or overwrites) the stub file at `path`.
pub fn write_stub(path: &Path, article: &Article) -> io::Result<()> {
    std::fs::write(path, frontmatter(article))
}

/// Creates `dir` and any missing parents. Returns `false` if it already
/// existed.
pub fn create_image_directory(dir: &Path) -> io::Result<bool> {
    if dir.is_dir() {
        return Ok(false);
    }
    std::fs::create_dir_all(dir)?;
    Ok(true)
}
