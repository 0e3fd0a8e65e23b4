mod common;

use std::num::NonZeroU32;

use cbzpress::{
    archive::{press_cbz, press_into, ArchiveError, Summary},
    cbz_reader::CbzReader,
    press::PressArgs,
};
use cbzpress_common::bin_common::{args::condense::CondenseArgs, termination::Cookie};
use common::{encoded, gutter_page, tmp_dir, write_cbz};
use image::{ColorType, GenericImageView, ImageOutputFormat};

fn args() -> PressArgs {
    PressArgs::default().condense(
        CondenseArgs::default()
            .target_width(NonZeroU32::new(30).unwrap())
            .target_height(NonZeroU32::new(40).unwrap()),
    )
}

fn sample_entries() -> Vec<(&'static str, Vec<u8>)> {
    vec![
        ("ComicInfo.xml", b"<ComicInfo/>".to_vec()),
        ("pages/", vec![]),
        (
            "pages/001.png",
            encoded(gutter_page(60, 80, 30, 50), ImageOutputFormat::Png),
        ),
        (
            "pages/002.jpg",
            encoded(gutter_page(64, 48, 0, 0), ImageOutputFormat::Jpeg(90)),
        ),
        ("pages/003.png", b"definitely not a png".to_vec()),
    ]
}

#[test]
fn recompress_archive() {
    let dir = tmp_dir();
    let input = dir.path().join("volume.cbz");
    let output = dir.path().join("out.cbz");
    let entries = sample_entries();
    write_cbz(&input, &entries);

    let summary = press_cbz(&input, &output, &args(), &Cookie::detached()).unwrap();
    assert_eq!(
        Summary {
            condensed: 1,
            kept: 1,
            failed: 1,
            copied: 2,
        },
        summary
    );

    let written = CbzReader::new(&output).unwrap().read_all().unwrap();
    let names: Vec<&str> = written.iter().map(|e| e.name.as_str()).collect();
    let expected_names: Vec<&str> = entries.iter().map(|(name, _)| *name).collect();
    assert_eq!(expected_names, names);

    assert!(written[1].is_dir);
    assert_eq!(entries[0].1, written[0].bytes);
    assert_eq!(entries[4].1, written[4].bytes);

    let png = image::load_from_memory(&written[2].bytes).unwrap();
    assert_eq!((30, 40), png.dimensions());

    let jpeg = image::load_from_memory(&written[3].bytes).unwrap();
    assert_eq!((64, 48), jpeg.dimensions());
    assert_eq!(ColorType::L8, jpeg.color());
}

#[test]
fn condensed_png_lost_its_gutter() {
    let dir = tmp_dir();
    let input = dir.path().join("volume.cbz");
    let output = dir.path().join("out.cbz");
    write_cbz(
        &input,
        &[(
            "001.png",
            encoded(gutter_page(60, 80, 30, 50), ImageOutputFormat::Png),
        )],
    );

    // Same size as the condensed page, so nothing is resampled
    let args = PressArgs::default().condense(
        CondenseArgs::default()
            .target_width(NonZeroU32::new(60).unwrap())
            .target_height(NonZeroU32::new(60).unwrap()),
    );
    press_cbz(&input, &output, &args, &Cookie::detached()).unwrap();

    let written = CbzReader::new(&output).unwrap().read_all().unwrap();
    let page = image::load_from_memory(&written[0].bytes).unwrap().to_rgb8();
    assert_eq!((60, 60), page.dimensions());
    assert!(page.pixels().all(|p| p.0 != [255, 255, 255]));
}

#[test]
fn named_after_input() {
    let dir = tmp_dir();
    let input = dir.path().join("volume 2.cbz");
    write_cbz(&input, &sample_entries());
    let out_dir = dir.path().join("out");
    std::fs::create_dir(&out_dir).unwrap();

    let (output, _) = press_into(&input, &out_dir, &args(), &Cookie::detached()).unwrap();
    assert_eq!(out_dir.join("volume 2_modified.cbz"), output);
    assert!(output.is_file());
}

#[test]
fn terminated_leaves_nothing() {
    let dir = tmp_dir();
    let input = dir.path().join("volume.cbz");
    let output = dir.path().join("out.cbz");
    write_cbz(&input, &sample_entries());

    let cookie = Cookie::detached();
    cookie.terminate();
    let result = press_cbz(&input, &output, &args(), &cookie);
    assert!(matches!(result, Err(ArchiveError::Terminated(_))));
    assert!(!output.exists());
    assert_eq!(1, std::fs::read_dir(dir.path()).unwrap().count());
}

#[test]
fn missing_input() {
    let dir = tmp_dir();
    let result = press_cbz(
        &dir.path().join("nope.cbz"),
        &dir.path().join("out.cbz"),
        &args(),
        &Cookie::detached(),
    );
    assert!(matches!(result, Err(ArchiveError::Cbz(_))));
}
