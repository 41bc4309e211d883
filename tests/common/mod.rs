//! A local HTTP server for tests that exercise the real `reqwest` client.
//!
//! The crate's HTTP is blocking, so the tests stay synchronous: a small
//! runtime drives server startup and mock registration, and requests are
//! made from the test thread outside of it.

use tokio::runtime::Runtime;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub struct Site {
    // dropped before the runtime
    server: MockServer,
    runtime: Runtime,
}

impl Site {
    pub fn start() -> Site {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let server = runtime.block_on(MockServer::start());
        Site { server, runtime }
    }

    /// Serves `body` with `content_type` at `route`, but only to clients
    /// sending the browser User-Agent. Anything else gets wiremock's 404.
    pub fn serve(&self, route: &str, content_type: &str, body: &[u8]) {
        let mock = Mock::given(method("GET"))
            .and(path(route))
            .and(header("user-agent", "Mozilla/5.0"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(body.to_vec(), content_type));
        self.runtime.block_on(mock.mount(&self.server));
    }

    pub fn url(&self, route: &str) -> String {
        format!("{}{}", self.server.uri(), route)
    }
}
