use cbzpress_common::{
    args,
    bin_common::args::condense::{CondenseArgs, CondenseCli, Outcome},
    utils::imgutils::grayscale,
};
use image::DynamicImage;

use crate::codec::{self, CodecError, PageFormat};

args! {
    #[derive(Copy, Clone, Debug)]
    Press {
        "Quality of the re-encoded jpeg pages, between 1 and 100"
        jpeg_quality: u8 = 20;

        "Remove the gutters of jpeg pages as well, they are only turned gray otherwise"
        condense_jpeg: bool = false;

        condense: Condense;
    }
}

/// A recompressed page
#[derive(Debug)]
pub struct Pressed {
    pub bytes: Vec<u8>,
    /// `None` if the gutters were never looked for
    pub outcome: Option<Outcome>,
}

impl PressArgs {
    /// Png pages are condensed. Jpeg pages are turned gray and are only condensed if
    /// asked to.
    pub fn press(&self, bytes: &[u8], format: PageFormat) -> Result<Pressed, CodecError> {
        let img = codec::decode(bytes, format)?;

        let (img, outcome) = match format {
            PageFormat::Png => {
                let condensed = self.condense.condense(&img.to_rgba8());
                (
                    DynamicImage::ImageRgba8(condensed.page),
                    Some(condensed.outcome),
                )
            }
            PageFormat::Jpeg => {
                let gray = grayscale(&img);
                if self.condense_jpeg {
                    let condensed = self.condense.condense(&gray);
                    (
                        DynamicImage::ImageLuma8(condensed.page),
                        Some(condensed.outcome),
                    )
                } else {
                    (DynamicImage::ImageLuma8(gray), None)
                }
            }
        };

        let bytes = codec::encode(&img, format, self.jpeg_quality)?;
        Ok(Pressed { bytes, outcome })
    }
}
