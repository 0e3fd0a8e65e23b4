use super::rect::{Band, Rect};

/// One bit per pixel, set if some band covers it. Stored row-major.
struct CoverageMask {
    width: u32,
    words: Vec<u64>,
}

impl CoverageMask {
    fn new(width: u32, height: u32) -> Self {
        let bits = width as usize * height as usize;
        Self {
            width,
            words: vec![0; (bits + 63) / 64],
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        self.width as usize * y as usize + x as usize
    }

    /// `rect` must be inside the mask
    fn cover(&mut self, rect: Rect) {
        for y in rect.min_y..rect.max_y {
            for x in rect.min_x..rect.max_x {
                let i = self.index(x, y);
                self.words[i / 64] |= 1u64 << (i % 64);
            }
        }
    }

    fn is_covered(&self, x: u32, y: u32) -> bool {
        let i = self.index(x, y);
        self.words[i / 64] & (1u64 << (i % 64)) != 0
    }
}

/// Finds the parts of a `width` x `height` page that are not covered by any of the
/// bands.
///
/// The page is scanned row by row. An uncovered pixel starts a new region, which is
/// grown to the right as far as that row is uncovered, and then downwards as far as its
/// left-most column is uncovered. Nothing else inside the region is checked, so a region
/// can overlap bands that do not touch its left edge. After a region is found, the scan
/// continues on the region's last row, just after the pixel that stopped it from
/// growing to the right.
pub fn content_regions(width: u32, height: u32, bands: &[Band]) -> Vec<Rect> {
    let mut mask = CoverageMask::new(width, height);
    bands
        .iter()
        .filter_map(|band| band.rect.clip(width, height))
        .for_each(|rect| mask.cover(rect));

    let mut regions = vec![];
    let mut y = 0;
    while y < height {
        let mut x = 0;
        while x < width {
            if !mask.is_covered(x, y) {
                let (start_x, start_y) = (x, y);

                while x < width && !mask.is_covered(x, y) {
                    x += 1;
                }

                while y < height && !mask.is_covered(start_x, y) {
                    y += 1;
                }

                regions.push(Rect {
                    min_x: start_x,
                    min_y: start_y,
                    max_x: x,
                    max_y: y,
                });

                // at least `start_y` was uncovered
                y -= 1;
            }
            x += 1;
        }
        y += 1;
    }

    regions
}

/// Total number of pixels in all regions, overlaps counted twice
pub fn total_area(regions: &[Rect]) -> u64 {
    regions.iter().map(Rect::area).sum()
}
