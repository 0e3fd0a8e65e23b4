use crate::utils::imgutils::{Mask, WHITE};

use super::rect::Band;

/// A line may contain at most this many non-white pixels and still be background
pub const NOISE_TOLERANCE: usize = 20;

/// A background run must be longer than this to be a gutter and not just noise
pub const MIN_BAND_SIZE: u32 = 15;

/// Finds the gutters of the page, all horizontal bands from the top down followed by all
/// vertical bands from the left. The background is assumed to be white.
///
/// Rows and columns are scanned independently, so a band always spans the whole mask. A
/// run of background lines shorter than [`MIN_BAND_SIZE`] is ignored, except at the very
/// end where the last run is always included.
pub fn detect_bands(mask: &Mask) -> Vec<Band> {
    let (width, height) = (mask.width(), mask.height());
    let stride = width as usize;
    let raw = mask.as_raw();

    let rows = background_runs(height, |y| {
        let start = y as usize * stride;
        is_background(raw[start..start + stride].iter())
    });

    let columns = background_runs(width, |x| {
        is_background(raw.iter().skip(x as usize).step_by(stride))
    });

    rows.into_iter()
        .map(|(start, end)| Band::rows(start, end, width))
        .chain(
            columns
                .into_iter()
                .map(|(start, end)| Band::columns(start, end, height)),
        )
        .collect()
}

fn is_background<'a>(line: impl Iterator<Item = &'a u8>) -> bool {
    line.filter(|&&p| p != WHITE)
        .take(NOISE_TOLERANCE + 1)
        .count()
        <= NOISE_TOLERANCE
}

/// Half-open ranges of consecutive lines in `0..len` that are background
fn background_runs(len: u32, background: impl Fn(u32) -> bool) -> Vec<(u32, u32)> {
    let mut runs = vec![];
    let mut start = None;

    for i in 0..len {
        match (background(i), start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                if i - s > MIN_BAND_SIZE {
                    runs.push((s, i));
                }
                start = None;
            }
            _ => (),
        }
    }

    if let Some(s) = start {
        runs.push((s, len));
    }

    runs
}
