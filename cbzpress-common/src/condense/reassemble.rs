use image::{ImageBuffer, Pixel};

use crate::utils::imgutils::Page;

use super::rect::Rect;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ReassembleError {
    #[error("the regions are not equally wide, the first is {first} and another {other}")]
    UnequalWidths { first: u32, other: u32 },
    #[error("the region {0} is not inside the page")]
    OutOfBounds(Rect),
    #[error("the reassembled page would be empty")]
    Empty,
}

/// Stacks the regions of `page` on top of each other, in order. All regions must have
/// the same width. No regions at all gives back the page as is.
pub fn reassemble<P>(page: &Page<P>, regions: &[Rect]) -> Result<Page<P>, ReassembleError>
where
    P: Pixel<Subpixel = u8>,
{
    let Some(first) = regions.first() else {
        return Ok(page.clone());
    };

    let width = first.width();
    for region in regions {
        if region.width() != width {
            return Err(ReassembleError::UnequalWidths {
                first: width,
                other: region.width(),
            });
        }
        if !region.is_inside(page.width(), page.height()) {
            return Err(ReassembleError::OutOfBounds(*region));
        }
    }

    let height: u32 = regions.iter().map(Rect::height).sum();
    if width == 0 || height == 0 {
        return Err(ReassembleError::Empty);
    }

    let channels = usize::from(P::CHANNEL_COUNT);
    let stride = page.width() as usize * channels;
    let row_len = width as usize * channels;
    let raw = page.as_raw();

    let mut buf = Vec::with_capacity(row_len * height as usize);
    for region in regions {
        let left = region.min_x as usize * channels;
        for y in region.min_y..region.max_y {
            let start = y as usize * stride + left;
            buf.extend_from_slice(&raw[start..start + row_len]);
        }
    }

    Ok(ImageBuffer::from_raw(width, height, buf).expect("sized from the regions"))
}
