use std::fmt;

/// A half-open rectangle of pixels, `min` is inclusive and `max` exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rect {
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
}

impl Rect {
    /// Returns `None` if the corners are the wrong way around
    pub fn new(min_x: u32, min_y: u32, max_x: u32, max_y: u32) -> Option<Self> {
        (min_x <= max_x && min_y <= max_y).then_some(Self {
            min_x,
            min_y,
            max_x,
            max_y,
        })
    }

    /// The rectangle covering a whole `width` x `height` image
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            min_x: 0,
            min_y: 0,
            max_x: width,
            max_y: height,
        }
    }

    pub fn width(&self) -> u32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> u32 {
        self.max_y - self.min_y
    }

    pub fn area(&self) -> u64 {
        u64::from(self.width()) * u64::from(self.height())
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Whether the whole rectangle fits in a `width` x `height` image
    pub fn is_inside(&self, width: u32, height: u32) -> bool {
        self.max_x <= width && self.max_y <= height
    }

    /// The part of this that is inside a `width` x `height` image, if any
    pub fn clip(&self, width: u32, height: u32) -> Option<Self> {
        if self.min_x >= width || self.min_y >= height {
            return None;
        }
        Self::new(
            self.min_x,
            self.min_y,
            self.max_x.min(width),
            self.max_y.min(height),
        )
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({},{})-({},{})",
            self.min_x, self.min_y, self.max_x, self.max_y
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// The band spans the full width, i.e., it is a run of rows
    Horizontal,
    /// The band spans the full height, i.e., it is a run of columns
    Vertical,
}

/// A presumably blank gutter going all the way across the page it was found on
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Band {
    pub axis: Axis,
    pub rect: Rect,
}

impl Band {
    /// Rows `start..end` of an image that is `width` wide
    pub fn rows(start: u32, end: u32, width: u32) -> Self {
        Self {
            axis: Axis::Horizontal,
            rect: Rect {
                min_x: 0,
                min_y: start,
                max_x: width,
                max_y: end,
            },
        }
    }

    /// Columns `start..end` of an image that is `height` high
    pub fn columns(start: u32, end: u32, height: u32) -> Self {
        Self {
            axis: Axis::Vertical,
            rect: Rect {
                min_x: start,
                min_y: 0,
                max_x: end,
                max_y: height,
            },
        }
    }
}
