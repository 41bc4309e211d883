mod common;

use common::Site;
use postpress::download::{self, download};
use postpress::fetch::{Fetch, FetchError, HttpFetcher};

const IMAGE_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nnot really a png";

#[test]
fn test_download_names_file_by_content_type() {
    let site = Site::start();
    site.serve("/images/photo", "image/png", IMAGE_BYTES);
    let fetcher = HttpFetcher::new().unwrap();

    let file = download(&fetcher, &site.url("/images/photo")).unwrap();
    let name = file.path().file_name().unwrap().to_str().unwrap().to_owned();
    assert!(name.starts_with("postpress-"), "{}", name);
    assert!(name.ends_with(".png"), "{}", name);
    assert_eq!(IMAGE_BYTES, std::fs::read(file.path()).unwrap().as_slice());

    let path = file.path().to_owned();
    drop(file);
    assert!(!path.exists());
}

#[test]
fn test_download_falls_back_to_url_extension() {
    let site = Site::start();
    site.serve("/images/photo.gif", "application/octet-stream", IMAGE_BYTES);
    let fetcher = HttpFetcher::new().unwrap();

    let file = download(&fetcher, &site.url("/images/photo.gif")).unwrap();
    assert_eq!(
        Some("gif"),
        file.path().extension().and_then(|ext| ext.to_str())
    );
}

#[test]
fn test_download_not_found() {
    let site = Site::start();
    let fetcher = HttpFetcher::new().unwrap();
    let url = site.url("/images/missing.png");

    match download(&fetcher, &url) {
        Err(download::Error::Fetch(FetchError::Status { url: failed, err })) => {
            assert_eq!(url, failed);
            assert_eq!(Some(reqwest::StatusCode::NOT_FOUND), err.status());
        }
        other => panic!("wanted a status error, got {:?}", other),
    }
}

#[test]
fn test_fetch_page_text() {
    let site = Site::start();
    site.serve("/p/hello", "text/html; charset=utf-8", b"<title>Hi</title>");
    let fetcher = HttpFetcher::new().unwrap();

    assert_eq!(
        "<title>Hi</title>",
        fetcher.fetch(&site.url("/p/hello")).unwrap()
    );
}

#[test]
fn test_fetch_non_success_status() {
    let site = Site::start();
    let fetcher = HttpFetcher::new().unwrap();

    match fetcher.fetch(&site.url("/p/gone")) {
        Err(FetchError::Status { .. }) => {}
        other => panic!("wanted a status error, got {:?}", other),
    }
}
