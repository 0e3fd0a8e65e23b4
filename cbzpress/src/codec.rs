use std::io::Cursor;

use image::{DynamicImage, ImageError, ImageFormat, ImageOutputFormat};

/// The kinds of pages that are recompressed, everything else is copied as is
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageFormat {
    /// Lossless
    Png,
    /// Lossy
    Jpeg,
}

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("could not decode the {0:?} page: {1}")]
    Decode(PageFormat, #[source] ImageError),
    #[error("could not encode the {0:?} page: {1}")]
    Encode(PageFormat, #[source] ImageError),
}

impl PageFormat {
    /// Guesses the format from the file extension, ignoring case
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.to_ascii_lowercase();
        if name.ends_with(".png") {
            Some(PageFormat::Png)
        } else if name.ends_with(".jpg") || name.ends_with(".jpeg") {
            Some(PageFormat::Jpeg)
        } else {
            None
        }
    }

    fn image_format(self) -> ImageFormat {
        match self {
            PageFormat::Png => ImageFormat::Png,
            PageFormat::Jpeg => ImageFormat::Jpeg,
        }
    }
}

pub fn decode(bytes: &[u8], format: PageFormat) -> Result<DynamicImage, CodecError> {
    image::load_from_memory_with_format(bytes, format.image_format())
        .map_err(|e| CodecError::Decode(format, e))
}

/// `quality` is only used for lossy formats, and is clamped to `1..=100`
pub fn encode(
    img: &DynamicImage,
    format: PageFormat,
    quality: u8,
) -> Result<Vec<u8>, CodecError> {
    let mut bytes = Cursor::new(Vec::new());
    let result = match format {
        PageFormat::Png => img.write_to(&mut bytes, ImageOutputFormat::Png),
        PageFormat::Jpeg => {
            let quality = ImageOutputFormat::Jpeg(quality.clamp(1, 100));
            if img.color().has_alpha() {
                DynamicImage::ImageRgb8(img.to_rgb8()).write_to(&mut bytes, quality)
            } else {
                img.write_to(&mut bytes, quality)
            }
        }
    };
    result.map_err(|e| CodecError::Encode(format, e))?;
    Ok(bytes.into_inner())
}
