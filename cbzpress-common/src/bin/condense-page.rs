use std::path::PathBuf;

use cbzpress_common::{
    bin_common::{
        args::condense::{CondenseArgs, CondenseCli},
        init::init_eyre,
    },
    condense::{bands::detect_bands, complement::content_regions},
    utils::{
        fsutils::ensure_dir,
        imgutils::{fill_rect, outline_rect},
    },
};
use clap::Parser;
use color_eyre::eyre::{self, Context};
use image::{Rgba, RgbaImage};

#[derive(Parser)]
#[command()]
/// Removes the gutters of loose images, the same way as for pages in a cbz
struct Cli {
    #[command(flatten)]
    condense: CondenseCli,

    /// Paint the gutters red and outline the content regions green, instead of condensing
    #[arg(long)]
    paint: bool,

    /// Where to save the resulting images as png, nothing is saved if left out
    #[arg(long, short = 'o')]
    outdir: Option<PathBuf>,

    /// The image files to use
    inputs: Vec<PathBuf>,
}

fn paint(page: &RgbaImage, args: &CondenseArgs) -> RgbaImage {
    let mask = args.working_mask(page);
    let bands = detect_bands(&mask);
    let regions = content_regions(mask.width(), mask.height(), &bands);

    let mut painted = page.clone();
    for band in &bands {
        fill_rect(&mut painted, band.rect, Rgba([255, 0, 0, 255]));
    }
    for region in &regions {
        outline_rect(&mut painted, *region, Rgba([0, 255, 0, 255]));
    }
    println!("  {} gutters, {} regions", bands.len(), regions.len());
    painted
}

fn main() -> eyre::Result<()> {
    init_eyre()?;
    let cli = Cli::parse();
    let args = cli.condense.to_args();

    if let Some(outdir) = &cli.outdir {
        ensure_dir(outdir).wrap_err_with(|| format!("Could not create {outdir:?}"))?;
    }

    for input in &cli.inputs {
        let page = image::open(input)
            .wrap_err_with(|| format!("Could not open {:?}", input))?
            .to_rgba8();

        let condensed = args.condense(&page);
        println!("{}: {}", input.display(), condensed.outcome);

        let output = if cli.paint {
            paint(&page, &args)
        } else {
            condensed.page
        };

        if let Some(outdir) = &cli.outdir {
            let stem = input
                .file_stem()
                .ok_or_else(|| eyre::eyre!("{input:?} is not a file"))?;
            let output_path = outdir.join(stem).with_extension("png");
            output
                .save(&output_path)
                .wrap_err_with(|| format!("Could not save to {output_path:?}"))?;
        }
    }

    Ok(())
}
