//! Pulls article metadata out of a page's HTML.
//!
//! The title, description, and author come from a single streaming pass over
//! the markup: [`lol_html`] emits element and text events, and an
//! [`ArticleScanner`] folds them into [`PageFields`]. The publish date isn't
//! in the markup proper; it lives in a JSON-LD blob, so [`date_published`]
//! finds it with a plain text search over the raw page.

use chrono::NaiveDate;
use lol_html::errors::RewritingError;
use lol_html::html_content::{Element, TextChunk};
use lol_html::{element, text, HtmlRewriter, Settings};
use regex::Regex;
use std::cell::RefCell;
use std::sync::OnceLock;
use tracing::warn;

/// Attributes the source site's head manager puts on the tags it owns. Only
/// `<title>` and description `<meta>` tags carrying one of these are the
/// article's own; the bare ones are site-wide defaults.
const MARKERS: [&str; 2] = ["data-rh", "data-preact-helmet"];

/// The fields found in a page. `None` means the page didn't carry the field.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageFields {
    pub title: Option<String>,
    pub description: Option<String>,
    pub author: Option<String>,
    pub date: Option<String>,
}

/// Scans `html` for the article's title, description, author, and publish
/// date.
pub fn scan(html: &str) -> Result<PageFields, RewritingError> {
    let scanner = RefCell::new(ArticleScanner::default());
    let mut rewriter = HtmlRewriter::new(
        Settings {
            element_content_handlers: vec![
                element!("title", |el| {
                    scanner.borrow_mut().on_title(el);
                    Ok(())
                }),
                text!("title", |chunk| {
                    scanner.borrow_mut().on_title_text(chunk);
                    Ok(())
                }),
                element!("meta", |el| {
                    scanner.borrow_mut().on_meta(el);
                    Ok(())
                }),
            ],
            ..Settings::default()
        },
        |_: &[u8]| {},
    );
    rewriter.write(html.as_bytes())?;
    rewriter.end()?;

    let scanner = scanner.into_inner();
    Ok(PageFields {
        title: scanner.title,
        description: scanner.description,
        author: scanner.author,
        date: date_published(html),
    })
}

/// Visitor state for one pass over one page.
#[derive(Default)]
struct ArticleScanner {
    title: Option<String>,
    description: Option<String>,
    author: Option<String>,

    /// Set while inside a marked `<title>` and no title has been taken yet.
    in_title: bool,

    /// Text of the current title; chunks may arrive split.
    title_text: String,
}

impl ArticleScanner {
    fn on_title(&mut self, el: &Element) {
        self.in_title = self.title.is_none() && is_marked(el);
        self.title_text.clear();
    }

    fn on_title_text(&mut self, chunk: &TextChunk) {
        if !self.in_title {
            return;
        }
        self.title_text.push_str(chunk.as_str());
        if chunk.last_in_text_node() {
            self.title = Some(decode(self.title_text.trim()));
            self.in_title = false;
        }
    }

    fn on_meta(&mut self, el: &Element) {
        let content = || decode(&el.get_attribute("content").unwrap_or_default());
        match el.get_attribute("name").as_deref() {
            Some("description") if is_marked(el) => self.description = Some(content()),
            Some("author") => self.author = Some(content()),
            _ => {}
        }
    }
}

fn is_marked(el: &Element) -> bool {
    MARKERS.iter().any(|marker| el.has_attribute(marker))
}

fn decode(raw: &str) -> String {
    html_escape::decode_html_entities(raw).into_owned()
}

/// Finds `"datePublished":"YYYY-MM-DDT…"` anywhere in `html` and returns the
/// date part of the first occurrence as written. A match that isn't a real
/// calendar date is still returned, with a warning.
pub fn date_published(html: &str) -> Option<String> {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let pattern = PATTERN.get_or_init(|| {
        // constant pattern; should always compile
        Regex::new(r#""datePublished":"(\d{4}-\d{2}-\d{2})T[^"]*""#).unwrap()
    });
    let date = pattern.captures(html)?.get(1)?.as_str();
    if NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() {
        warn!(date, "datePublished is not a calendar date");
    }
    Some(date.to_owned())
}
