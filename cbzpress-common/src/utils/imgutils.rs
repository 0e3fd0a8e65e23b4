use image::imageops;
use image::{GenericImage, GenericImageView, GrayImage, ImageBuffer, Pixel};

pub use image::imageops::colorops::grayscale;

use crate::condense::rect::Rect;

use super::percent::Percent;

pub const WHITE: u8 = u8::MAX;
pub const BLACK: u8 = u8::MIN;

/// A page with 8-bit channels, whatever the kind of pixel
pub type Page<P> = ImageBuffer<P, Vec<u8>>;

/// A gray image where every pixel is either [`WHITE`] or [`BLACK`].
pub struct Mask(pub GrayImage);

impl Mask {
    fn from_raw(width: u32, height: u32, raw: Vec<u8>) -> Self {
        Mask(GrayImage::from_raw(width, height, raw).expect("one byte per pixel"))
    }

    /// Every exactly-white pixel becomes white, the rest black.
    pub fn exact_white<P>(page: &Page<P>) -> Self
    where
        P: Pixel<Subpixel = u8>,
    {
        let raw = page
            .pixels()
            .map(|p| {
                let rgb = p.to_rgb();
                if rgb.channels().iter().all(|&c| c == WHITE) {
                    WHITE
                } else {
                    BLACK
                }
            })
            .collect();
        Self::from_raw(page.width(), page.height(), raw)
    }

    pub fn width(&self) -> u32 {
        self.0.width()
    }

    pub fn height(&self) -> u32 {
        self.0.height()
    }

    /// The pixels row-major, one byte each
    pub fn as_raw(&self) -> &[u8] {
        self.0.as_raw()
    }
}

/// Turn the page into black and white. The three color channels are averaged and
/// compared against `threshold` percent of 255, everything above it becomes white.
pub fn binarize<P>(page: &Page<P>, threshold: Percent) -> Mask
where
    P: Pixel<Subpixel = u8>,
{
    let threshold = u16::from(threshold.of_u8_range());
    let raw = page
        .pixels()
        .map(|p| {
            let sum: u16 = p.to_rgb().channels().iter().map(|&c| u16::from(c)).sum();
            if sum / 3 > threshold {
                WHITE
            } else {
                BLACK
            }
        })
        .collect();
    Mask::from_raw(page.width(), page.height(), raw)
}

/// Rotates landscape pages 90 degrees clockwise, portrait pages are left alone.
pub fn orient<P>(page: Page<P>) -> Page<P>
where
    P: Pixel<Subpixel = u8> + 'static,
{
    if page.width() > page.height() {
        imageops::rotate90(&page)
    } else {
        page
    }
}

/// Nearest neighbor resize to exactly `width` x `height`, ignoring the aspect ratio.
/// Output pixel (x, y) is taken from (x * src_width / width, y * src_height / height).
pub fn resize_nearest<P>(page: &Page<P>, width: u32, height: u32) -> Page<P>
where
    P: Pixel<Subpixel = u8>,
{
    if is_img_empty(page) {
        return ImageBuffer::new(width, height);
    }

    let (src_width, src_height) = page.dimensions();
    let scale = |i: u32, src: u32, dst: u32| -> u32 {
        let scaled = u64::from(i) * u64::from(src) / u64::from(dst);
        scaled.try_into().expect("less than src")
    };

    ImageBuffer::from_fn(width, height, |x, y| {
        *page.get_pixel(scale(x, src_width, width), scale(y, src_height, height))
    })
}

pub fn construct_gray(raw: &[&[u8]]) -> GrayImage {
    assert!(raw.windows(2).all(|w| w[0].len() == w[1].len()));
    let height = raw.len() as u32;
    let width = raw.iter().next().map(|row| row.len()).unwrap_or(0) as u32;
    GrayImage::from_fn(width, height, |x, y| {
        image::Luma([raw[y as usize][x as usize]])
    })
}

pub fn is_img_empty<T>(img: &T) -> bool
where
    T: GenericImageView,
{
    img.width() == 0 || img.height() == 0
}

/// Fills the part of `rect` that is inside the image
pub fn fill_rect<I: GenericImage>(img: &mut I, rect: Rect, color: I::Pixel) {
    let Some(rect) = rect.clip(img.width(), img.height()) else {
        return;
    };
    for y in rect.min_y..rect.max_y {
        for x in rect.min_x..rect.max_x {
            img.put_pixel(x, y, color);
        }
    }
}

/// Draws the inner border of `rect`, clipped to the image
pub fn outline_rect<I: GenericImage>(img: &mut I, rect: Rect, color: I::Pixel) {
    let Some(rect) = rect.clip(img.width(), img.height()) else {
        return;
    };
    if rect.is_empty() {
        return;
    }
    for x in rect.min_x..rect.max_x {
        img.put_pixel(x, rect.min_y, color);
        img.put_pixel(x, rect.max_y - 1, color);
    }
    for y in rect.min_y..rect.max_y {
        img.put_pixel(rect.min_x, y, color);
        img.put_pixel(rect.max_x - 1, y, color);
    }
}

#[cfg(test)]
mod test {
    use image::{GrayImage, Luma, Rgb, RgbImage, Rgba, RgbaImage};
    use rand::{rngs::SmallRng, Rng, SeedableRng};

    use super::*;

    fn random_rgb(width: u32, height: u32, seed: u64) -> RgbImage {
        let mut rng = SmallRng::seed_from_u64(seed);
        RgbImage::from_fn(width, height, |_, _| Rgb(rng.gen()))
    }

    /// Every pixel gets its own color
    fn markers(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            Rgb([x as u8, y as u8, (x * 7 + y * 13) as u8])
        })
    }

    #[test]
    fn binarize_two_tone() {
        for seed in 0..5 {
            let img = random_rgb(37, 23, seed);
            for threshold in [0, 1, 50, 99, 100] {
                let mask = binarize(&img, Percent::new(threshold).unwrap());
                assert!(mask.as_raw().iter().all(|&p| p == WHITE || p == BLACK));
                assert_eq!(img.dimensions(), mask.0.dimensions());
            }
        }
    }

    #[test]
    fn binarize_average() {
        // 60% of 255 is 153
        let img = construct_gray(&[&[152, 153, 154, 255, 0]]);
        let mask = binarize(&img, Percent::new(60).unwrap());
        assert_eq!(&[BLACK, BLACK, WHITE, WHITE, BLACK], mask.as_raw());

        // (200 + 200 + 62) / 3 = 154
        let img = RgbImage::from_pixel(1, 1, Rgb([200, 200, 62]));
        assert_eq!(&[WHITE], binarize(&img, Percent::new(60).unwrap()).as_raw());

        // (200 + 199 + 62) / 3 = 153.67, rounded down
        let img = RgbImage::from_pixel(1, 1, Rgb([200, 199, 62]));
        assert_eq!(&[BLACK], binarize(&img, Percent::new(60).unwrap()).as_raw());
    }

    #[test]
    fn binarize_ignores_alpha() {
        let img = RgbaImage::from_pixel(2, 2, Rgba([255, 255, 255, 0]));
        let mask = binarize(&img, Percent::new(50).unwrap());
        assert!(mask.as_raw().iter().all(|&p| p == WHITE));
    }

    #[test]
    fn binarize_everything_black_at_hundred() {
        let img = GrayImage::from_pixel(3, 3, Luma([WHITE]));
        let mask = binarize(&img, Percent::HUNDRED);
        assert!(mask.as_raw().iter().all(|&p| p == BLACK));
    }

    #[test]
    fn exact_white_mask() {
        let mut img = RgbImage::from_pixel(3, 1, Rgb([255, 255, 255]));
        img.put_pixel(1, 0, Rgb([255, 254, 255]));
        let mask = Mask::exact_white(&img);
        assert_eq!(&[WHITE, BLACK, WHITE], mask.as_raw());
    }

    #[test]
    fn rotate_permutation() {
        let img = markers(5, 3);
        let rotated = orient(img.clone());
        assert_eq!((3, 5), rotated.dimensions());
        for (x, y, p) in img.enumerate_pixels() {
            assert_eq!(p, rotated.get_pixel(img.height() - 1 - y, x));
        }
    }

    #[test]
    fn portrait_not_rotated() {
        let img = markers(3, 5);
        assert_eq!(img, orient(img.clone()));

        let square = markers(4, 4);
        assert_eq!(square, orient(square.clone()));
    }

    #[test]
    fn resize_exact_dimensions() {
        let img = random_rgb(17, 29, 1);
        for (w, h) in [(1, 1), (17, 29), (100, 3), (3, 100), (1236, 1648), (8, 8)] {
            assert_eq!((w, h), resize_nearest(&img, w, h).dimensions());
        }
    }

    #[test]
    fn resize_samples() {
        let img = markers(4, 2);
        let up = resize_nearest(&img, 8, 4);
        for (x, y, p) in up.enumerate_pixels() {
            assert_eq!(img.get_pixel(x / 2, y / 2), p);
        }

        let down = resize_nearest(&img, 2, 1);
        assert_eq!(img.get_pixel(0, 0), down.get_pixel(0, 0));
        assert_eq!(img.get_pixel(2, 0), down.get_pixel(1, 0));

        // 3 * 4 / 5 = 2.4
        let odd = resize_nearest(&img, 5, 2);
        assert_eq!(img.get_pixel(2, 1), odd.get_pixel(3, 1));
    }

    #[test]
    fn resize_same_size_is_identity() {
        let img = random_rgb(13, 7, 2);
        assert_eq!(img, resize_nearest(&img, 13, 7));
    }

    #[test]
    fn resize_empty_source() {
        let img = RgbImage::new(0, 10);
        let resized = resize_nearest(&img, 4, 5);
        assert_eq!((4, 5), resized.dimensions());
    }

    #[test]
    fn paint_clipped() {
        let mut img = GrayImage::from_pixel(4, 4, Luma([BLACK]));
        fill_rect(&mut img, Rect::new(2, 2, 10, 10).unwrap(), Luma([WHITE]));
        assert_eq!(4, img.pixels().filter(|p| p[0] == WHITE).count());

        let mut img = GrayImage::from_pixel(4, 4, Luma([BLACK]));
        outline_rect(&mut img, Rect::new(0, 0, 4, 4).unwrap(), Luma([WHITE]));
        assert_eq!(12, img.pixels().filter(|p| p[0] == WHITE).count());
        assert_eq!(BLACK, img.get_pixel(1, 1)[0]);
    }
}
