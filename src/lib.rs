//! The library code behind the `extractor` and `publisher` binaries, which
//! import an article hosted elsewhere into a blog repository. The work breaks
//! down into two programs:
//!
//! 1. The extractor ([`crate::extract`]) fetches the article page, scans it
//!    for metadata ([`crate::scan`]), writes a frontmatter-only post stub
//!    ([`crate::stub`]), and prints the metadata for its caller.
//! 2. The publisher ([`crate::publish`]) runs the extractor in a child
//!    process, normalizes a header image to 4:3 ([`crate::header`]), and
//!    adds the post to the front-end listing ([`crate::listing`]).
//!
//! Both programs locate the blog repository through [`crate::config`].

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

pub mod article;
pub mod config;
pub mod download;
pub mod extract;
pub mod fetch;
pub mod header;
pub mod listing;
pub mod logging;
pub mod publish;
pub mod scan;
pub mod stub;
