//! Removal of blank gutters between comic panels.
//!
//! A page is turned into a [`Mask`](crate::utils::imgutils::Mask), gutter [bands] are
//! found on it, the uncovered [content regions](complement) are computed and finally
//! [stitched together](reassemble) from the pixels of the original page.

pub mod bands;
pub mod complement;
pub mod reassemble;
pub mod rect;
