//! Outbound HTTP. Everything here is a blocking `GET`; there are no retries
//! and no timeouts beyond the client's defaults.

use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use thiserror::Error;

/// The source site answers the default `reqwest` agent with an error page.
const BROWSER_USER_AGENT: &str = "Mozilla/5.0";

/// Retrieves the HTML for an article page. The extractor goes through this
/// trait so tests can serve fixture pages.
pub trait Fetch {
    fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// [`Fetch`] over real HTTP.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<HttpFetcher, FetchError> {
        Ok(HttpFetcher { client: client()? })
    }

    /// Issues a `GET` for `url` and returns the response if its status is
    /// 2xx.
    pub fn get(&self, url: &str) -> Result<Response, FetchError> {
        tracing::debug!(url, "GET");
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|err| FetchError::Request {
                url: url.to_owned(),
                err,
            })?;
        response
            .error_for_status()
            .map_err(|err| FetchError::Status {
                url: url.to_owned(),
                err,
            })
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.get(url)?.text().map_err(|err| FetchError::Body {
            url: url.to_owned(),
            err,
        })
    }
}

fn client() -> Result<Client, FetchError> {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
    Client::builder()
        .default_headers(headers)
        .build()
        .map_err(FetchError::Client)
}

/// Represents a network or HTTP failure.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Returned when the HTTP client can't be constructed (e.g., no TLS
    /// backend).
    #[error("Building HTTP client")]
    Client(#[source] reqwest::Error),

    /// Returned when the request couldn't be sent or no response arrived.
    #[error("Failed to fetch {url}")]
    Request {
        url: String,
        #[source]
        err: reqwest::Error,
    },

    /// Returned for non-2xx responses.
    #[error("Failed to fetch {url}")]
    Status {
        url: String,
        #[source]
        err: reqwest::Error,
    },

    /// Returned when the response body can't be read or decoded.
    #[error("Reading response body from {url}")]
    Body {
        url: String,
        #[source]
        err: reqwest::Error,
    },
}
