// NOTE: every test will complain about the functions it doesn't use
#![allow(unused)]

use std::{
    fs::File,
    io::{Cursor, Write},
    path::{Path, PathBuf},
};

use image::{DynamicImage, ImageOutputFormat, Rgb, RgbImage};
use tempfile::TempDir;
use zip::{write::FileOptions, ZipWriter};

/// Returns a temporary directory inside cargo's tmpdir
pub fn tmp_dir() -> TempDir {
    TempDir::new_in(cargo_tmpdir()).expect("could not create temporary dir")
}

/// Returns cargo's tmpdir
pub fn cargo_tmpdir() -> PathBuf {
    PathBuf::from(option_env!("CARGO_TARGET_TMPDIR").expect("no cargo tmpdir???"))
}

/// A directory entry if the name ends with a slash, otherwise a file
pub fn write_cbz(path: &Path, entries: &[(&str, Vec<u8>)]) {
    let file = File::create(path).expect("could not create the cbz");
    let mut zip = ZipWriter::new(file);
    for (name, bytes) in entries {
        if name.ends_with('/') {
            zip.add_directory(*name, FileOptions::default()).unwrap();
        } else {
            zip.start_file(*name, FileOptions::default()).unwrap();
            zip.write_all(bytes).unwrap();
        }
    }
    zip.finish().unwrap();
}

/// A dark page with a white gutter across rows `start..end`
pub fn gutter_page(width: u32, height: u32, start: u32, end: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        if (start..end).contains(&y) {
            Rgb([255, 255, 255])
        } else {
            Rgb([(x % 40) as u8, 10, (y % 40) as u8])
        }
    })
}

pub fn encoded(img: RgbImage, format: ImageOutputFormat) -> Vec<u8> {
    let mut bytes = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(img)
        .write_to(&mut bytes, format)
        .expect("could not encode");
    bytes.into_inner()
}
