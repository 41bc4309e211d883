#![cfg(unix)]

mod common;

use common::Site;
use image::{ImageFormat, Rgba, RgbaImage};
use postpress::config::Config;
use postpress::header;
use postpress::publish::{Error, Publisher};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const LISTING: &str = include_str!("fixtures/writing-spotlight.tsx");

/// A blog repository with a listing file, plus a stand-in extractor that
/// prints a fixed slug.
struct Blog {
    tmp: TempDir,
    config: Config,
    extractor: PathBuf,
}

impl Blog {
    fn new() -> Blog {
        let tmp = TempDir::new().unwrap();
        let config = Config::with_root(tmp.path());
        std::fs::create_dir_all(config.listing_file.parent().unwrap()).unwrap();
        std::fs::write(&config.listing_file, LISTING).unwrap();
        let extractor = fake_extractor(tmp.path());
        Blog {
            tmp,
            config,
            extractor,
        }
    }

    fn publisher(&self) -> Publisher<'_> {
        Publisher {
            config: &self.config,
            extractor: &self.extractor,
            skip_pull: true,
        }
    }

    fn image(&self, width: u32, height: u32) -> PathBuf {
        let path = self.tmp.path().join("source.png");
        RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 0]))
            .save_with_format(&path, ImageFormat::Png)
            .unwrap();
        path
    }

    fn listing(&self) -> String {
        std::fs::read_to_string(&self.config.listing_file).unwrap()
    }
}

fn fake_extractor(dir: &Path) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;
    let path = dir.join("fake-extractor");
    std::fs::write(
        &path,
        "#!/bin/sh\nprintf 'new-post\\nNew Post\\nSubtitle\\nAuthor\\n2025-03-14\\n'\n",
    )
    .unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

#[test]
fn test_publish_local_image() {
    let blog = Blog::new();
    let source = blog.image(1600, 900);

    let published = blog
        .publisher()
        .publish(
            "https://secondthoughts.ai/p/new-post",
            source.to_str().unwrap(),
        )
        .unwrap();

    assert_eq!("new-post", published.slug);
    assert_eq!(blog.config.header_path("new-post"), published.header);

    let header = image::open(&published.header).unwrap().into_rgb8();
    assert_eq!((1200, 900), header.dimensions());
    assert!(header.pixels().all(|p| p.0 == [255, 255, 255]));
    assert!(source.exists());

    assert!(blog
        .listing()
        .contains("const postSlugs = [\n  \"new-post\",\n  \"a\",\n  \"b\",\n];"));
}

#[test]
fn test_publish_twice_duplicates_listing_entry() {
    let blog = Blog::new();
    let source = blog.image(300, 400);
    for _ in 0..2 {
        blog.publisher()
            .publish(
                "https://secondthoughts.ai/p/new-post",
                source.to_str().unwrap(),
            )
            .unwrap();
    }
    assert_eq!(2, blog.listing().matches("\"new-post\",").count());
}

#[test]
fn test_publish_missing_image() {
    let blog = Blog::new();
    let missing = blog.tmp.path().join("missing.jpg");
    match blog.publisher().publish(
        "https://secondthoughts.ai/p/new-post",
        missing.to_str().unwrap(),
    ) {
        Err(Error::NotFound(path)) => assert_eq!(missing, path),
        other => panic!("wanted a not-found error, got {:?}", other),
    }
    assert_eq!(LISTING, blog.listing());
}

#[test]
fn test_publish_without_listing_declaration() {
    let blog = Blog::new();
    std::fs::write(&blog.config.listing_file, "export const slugs = [];\n").unwrap();
    let source = blog.image(400, 300);
    match blog.publisher().publish(
        "https://secondthoughts.ai/p/new-post",
        source.to_str().unwrap(),
    ) {
        Err(Error::Listing(_)) => {}
        other => panic!("wanted a listing error, got {:?}", other),
    }
    // the header was already written; nothing is rolled back
    assert!(blog.config.header_path("new-post").is_file());
}

#[test]
fn test_publish_remote_image() {
    let blog = Blog::new();
    let mut png = Vec::new();
    RgbaImage::from_pixel(400, 400, Rgba([0, 0, 255, 255]))
        .write_to(&mut std::io::Cursor::new(&mut png), ImageFormat::Png)
        .unwrap();
    let site = Site::start();
    site.serve("/header", "image/png", &png);

    let published = blog
        .publisher()
        .publish("https://secondthoughts.ai/p/new-post", &site.url("/header"))
        .unwrap();

    let header = image::open(&published.header).unwrap().into_rgb8();
    assert_eq!((400, 300), header.dimensions());
    assert!(header.pixels().all(|p| p.0 == [0, 0, 255]));
}

#[test]
fn test_publish_remote_image_undecodable() {
    let blog = Blog::new();
    let site = Site::start();
    site.serve("/header.png", "image/png", b"definitely not a png");

    match blog.publisher().publish(
        "https://secondthoughts.ai/p/new-post",
        &site.url("/header.png"),
    ) {
        Err(Error::Header(header::Error::Decode { path, .. })) => {
            let name = path.file_name().unwrap().to_str().unwrap();
            assert!(name.starts_with("postpress-"), "{}", name);
            // the transient download is gone even though the run failed
            assert!(!path.exists());
        }
        other => panic!("wanted a decode error, got {:?}", other),
    }
    assert!(!blog.config.header_path("new-post").exists());
    assert_eq!(LISTING, blog.listing());
}
