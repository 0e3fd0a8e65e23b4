use std::{
    fmt,
    num::{NonZeroU32, NonZeroUsize},
};

use image::Pixel;

use crate::{
    condense::{
        bands::detect_bands,
        complement::{content_regions, total_area},
        reassemble::{reassemble, ReassembleError},
    },
    utils::{
        imgutils::{binarize, is_img_empty, orient, resize_nearest, Mask, Page},
        percent::{Percent, Threshold},
    },
};

use super::args_helper::args;

args! {
    #[derive(Copy, Clone, Debug)]
    Condense {
        "Binarization threshold in percent used when looking for gutters, or 'off' to \
         look for pure white gutters in the page as is"
        binarization_threshold: Threshold = Threshold::At(Percent::new(60).unwrap());

        "Width of the output pages"
        target_width: NonZeroU32 = NonZeroU32::new(1236).unwrap();

        "Height of the output pages"
        target_height: NonZeroU32 = NonZeroU32::new(1648).unwrap();

        "Pages with at least this many gutters are not condensed, the detection most \
         likely failed"
        max_inner_rects: NonZeroUsize = NonZeroUsize::new(20).unwrap();

        "Pages whose content covers at most this many percent of the output area are not \
         condensed"
        min_content_percent: Percent = Percent::new(10).unwrap();
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CondenseError {
    #[error("the page is empty")]
    EmptyImage,
    #[error("could not reassemble the page: {0}")]
    Reassemble(#[from] ReassembleError),
}

/// What happened to a page before it was oriented and resized
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Reassembled { bands: usize, regions: usize },
    TooManyBands { bands: usize },
    TooLittleContent { area: u64 },
    Invalid(CondenseError),
}

impl Outcome {
    pub fn is_reassembled(&self) -> bool {
        matches!(self, Outcome::Reassembled { .. })
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Reassembled { bands, regions } => {
                write!(f, "condensed {regions} regions between {bands} gutters")
            }
            Outcome::TooManyBands { bands } => {
                write!(f, "kept as is, found too many gutters ({bands})")
            }
            Outcome::TooLittleContent { area } => {
                write!(f, "kept as is, too little content ({area} pixels)")
            }
            Outcome::Invalid(e) => write!(f, "kept as is, {e}"),
        }
    }
}

pub struct Condensed<P: Pixel> {
    pub page: Page<P>,
    pub outcome: Outcome,
}

impl CondenseArgs {
    pub fn target_dimensions(&self) -> (u32, u32) {
        (self.target_width.get(), self.target_height.get())
    }

    fn target_area(&self) -> u64 {
        u64::from(self.target_width.get()) * u64::from(self.target_height.get())
    }

    /// The mask the gutters are searched for in
    pub fn working_mask<P>(&self, page: &Page<P>) -> Mask
    where
        P: Pixel<Subpixel = u8>,
    {
        match self.binarization_threshold {
            Threshold::At(threshold) => binarize(page, threshold),
            Threshold::Off => Mask::exact_white(page),
        }
    }

    /// Removes the gutters of the page, unless the detection looks like it failed, and
    /// then makes it portrait and the target size. The condensed page is always built
    /// from the pixels of `page`, never from the binarized mask.
    pub fn condense<P>(&self, page: &Page<P>) -> Condensed<P>
    where
        P: Pixel<Subpixel = u8> + 'static,
    {
        let (stitched, outcome) = match self.stitch(page) {
            Ok((stitched, outcome)) => (stitched, outcome),
            Err(e) => (None, Outcome::Invalid(e)),
        };
        let chosen = stitched.unwrap_or_else(|| page.clone());

        let (width, height) = self.target_dimensions();
        Condensed {
            page: resize_nearest(&orient(chosen), width, height),
            outcome,
        }
    }

    /// The reassembled page, or `None` if the original should be kept
    fn stitch<P>(&self, page: &Page<P>) -> Result<(Option<Page<P>>, Outcome), CondenseError>
    where
        P: Pixel<Subpixel = u8>,
    {
        if is_img_empty(page) {
            return Err(CondenseError::EmptyImage);
        }

        let mask = self.working_mask(page);
        let bands = detect_bands(&mask);
        if bands.len() >= self.max_inner_rects.get() {
            return Ok((None, Outcome::TooManyBands { bands: bands.len() }));
        }

        let regions = content_regions(mask.width(), mask.height(), &bands);
        let area = total_area(&regions);
        if area * 100 <= u64::from(self.min_content_percent.get()) * self.target_area() {
            return Ok((None, Outcome::TooLittleContent { area }));
        }

        let stitched = reassemble(page, &regions)?;
        Ok((
            Some(stitched),
            Outcome::Reassembled {
                bands: bands.len(),
                regions: regions.len(),
            },
        ))
    }
}
