//! Normalizes header images: every post's header is an opaque 4:3 PNG.
//!
//! Transparent pixels are composited onto white (not black, and not kept), and
//! images of any other aspect ratio are center-cropped along the long axis.
//! The geometry lives in [`crop_for`] so it can be reasoned about without
//! decoding anything.

use image::{DynamicImage, ImageError, ImageFormat, Rgb, RgbImage};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Width and height of the target aspect ratio.
const ASPECT: (u64, u64) = (4, 3);

/// A crop rectangle within an image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Crop {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

/// Computes the centered 4:3 crop for a `width` x `height` image. Returns
/// `None` if the image is already exactly 4:3.
///
/// * Too wide: keep the full height, width becomes `floor(height * 4 / 3)`.
/// * Too tall: keep the full width, height becomes `floor(width * 3 / 4)`.
///
/// Offsets are `floor` of half the removed span, so an odd remainder leaves
/// the extra pixel on the right or bottom.
pub fn crop_for(width: u32, height: u32) -> Option<Crop> {
    let (w, h) = (u64::from(width), u64::from(height));
    let (aspect_w, aspect_h) = ASPECT;
    match (w * aspect_h).cmp(&(h * aspect_w)) {
        std::cmp::Ordering::Equal => None,
        std::cmp::Ordering::Greater => {
            // new_width <= width, so it fits in a u32
            let new_width = (h * aspect_w / aspect_h) as u32;
            Some(Crop {
                left: (width - new_width) / 2,
                top: 0,
                width: new_width,
                height,
            })
        }
        std::cmp::Ordering::Less => {
            let new_height = (w * aspect_h / aspect_w) as u32;
            Some(Crop {
                left: 0,
                top: (height - new_height) / 2,
                width,
                height: new_height,
            })
        }
    }
}

/// Converts `img` to 8-bit RGB. Anything with an alpha channel is
/// alpha-blended over an opaque white background; everything else (grayscale,
/// 16-bit, float) is converted directly.
pub fn flatten(img: DynamicImage) -> RgbImage {
    if !img.color().has_alpha() {
        return img.into_rgb8();
    }
    let rgba = img.into_rgba8();
    RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        let over_white = |c: u8| -> u8 {
            let (c, a) = (u32::from(c), u32::from(a));
            ((c * a + 255 * (255 - a) + 127) / 255) as u8
        };
        Rgb([over_white(r), over_white(g), over_white(b)])
    })
}

/// Flattens and crops `img` to an opaque 4:3 image.
pub fn normalize(img: DynamicImage) -> RgbImage {
    let rgb = flatten(img);
    let (width, height) = rgb.dimensions();
    match crop_for(width, height) {
        None => {
            info!("Image already 4:3 ratio: {}x{}", width, height);
            rgb
        }
        Some(crop) => {
            info!(
                "Cropped {}: {}x{} -> {}x{}",
                match crop.width < width {
                    true => "horizontally",
                    false => "vertically",
                },
                width,
                height,
                crop.width,
                crop.height
            );
            image::imageops::crop_imm(&rgb, crop.left, crop.top, crop.width, crop.height)
                .to_image()
        }
    }
}

/// Reads the image at `source` (format sniffed from its contents), normalizes
/// it, and writes it to `destination` as PNG, creating missing parent
/// directories. Returns the output dimensions.
pub fn normalize_file(source: &Path, destination: &Path) -> Result<(u32, u32)> {
    info!(path = %source.display(), "Processing image");
    let bytes = std::fs::read(source).map_err(|err| Error::Read {
        path: source.to_owned(),
        err,
    })?;
    let img = image::load_from_memory(&bytes).map_err(|err| Error::Decode {
        path: source.to_owned(),
        err,
    })?;

    let out = normalize(img);

    if let Some(dir) = destination.parent() {
        std::fs::create_dir_all(dir).map_err(|err| Error::CreateDirectory {
            path: dir.to_owned(),
            err,
        })?;
    }
    out.save_with_format(destination, ImageFormat::Png)
        .map_err(|err| Error::Encode {
            path: destination.to_owned(),
            err,
        })?;
    info!(path = %destination.display(), "Saved header image");
    Ok(out.dimensions())
}

/// The result of a normalization.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents a failure to normalize a header image.
#[derive(Debug, Error)]
pub enum Error {
    /// Returned when the source file can't be read.
    #[error("Reading image '{}'", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        err: std::io::Error,
    },

    /// Returned when the source isn't a decodable image.
    #[error("Decoding image '{}'", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        err: ImageError,
    },

    /// Returned when the destination directory can't be created.
    #[error("Creating directory '{}'", .path.display())]
    CreateDirectory {
        path: PathBuf,
        #[source]
        err: std::io::Error,
    },

    /// Returned when the PNG can't be encoded or written.
    #[error("Saving image '{}'", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        err: ImageError,
    },
}
