//! Defines the [`Slug`] and [`Article`] types.

use std::fmt;
use thiserror::Error;

/// The identifier of a post. A slug is the part of an article URL that follows
/// the configured source prefix (e.g., `ai-agent-security` for
/// `https://secondthoughts.ai/p/ai-agent-security`). It keys the stub file,
/// the image directory, and the listing entry.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Slug(String);

impl Slug {
    /// Derives a slug from `url` by stripping `prefix`. Fails if `url` doesn't
    /// start with `prefix` or if nothing follows it.
    pub fn from_url(url: &str, prefix: &str) -> Result<Slug, ValidationError> {
        match url.strip_prefix(prefix) {
            None => Err(ValidationError::WrongPrefix {
                prefix: prefix.to_owned(),
            }),
            Some("") => Err(ValidationError::MissingSlug {
                prefix: prefix.to_owned(),
            }),
            Some(rest) => Ok(Slug(rest.to_owned())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Returned when an article URL can't be turned into a [`Slug`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The URL doesn't begin with the source prefix.
    #[error("URL must start with {prefix}")]
    WrongPrefix { prefix: String },

    /// The URL is exactly the source prefix.
    #[error("URL must include a path after {prefix}")]
    MissingSlug { prefix: String },
}

/// Metadata scraped from an article page. Only the slug is guaranteed; every
/// other field is whatever the page happened to carry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Article {
    pub slug: Slug,
    pub title: Option<String>,
    pub description: Option<String>,
    pub author: Option<String>,
    pub date: Option<String>,
}

impl Article {
    /// The five lines the extractor prints for its caller, in order: slug,
    /// title, description, author, date. Missing fields are empty lines.
    pub fn lines(&self) -> [String; 5] {
        [
            self.slug.to_string(),
            self.title.clone().unwrap_or_default(),
            self.description.clone().unwrap_or_default(),
            self.author.clone().unwrap_or_default(),
            self.date_string(),
        ]
    }

    /// The publish date as `YYYY-MM-DD`, or an empty string.
    pub fn date_string(&self) -> String {
        self.date.clone().unwrap_or_default()
    }
}
