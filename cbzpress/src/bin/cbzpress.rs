use std::path::PathBuf;

use cbzpress::{archive::press_into, press::PressCli};
use cbzpress_common::{
    bin_common::{
        init::{init_eyre, init_logger, verbosity},
        rc::args_or_rc,
        termination,
    },
    utils::fsutils::ensure_dir,
};
use clap::Parser;
use color_eyre::eyre::{self, Context};

#[derive(Parser, Debug)]
#[command()]
/// Removes the blank gutters between the panels of the pages in cbz files, and resizes
/// the pages to fit an e-reader.
///
/// This uses rayon, so the `RAYON_NUM_THREADS` environment variable might be of interest.
struct Cli {
    #[command(flatten)]
    press_args: PressCli,

    /// The cbz files to modify, comma separated or given multiple times
    #[arg(long, short = 'f', required = true, num_args = 1.., value_delimiter = ',', value_parser = trimmed_path)]
    files: Vec<PathBuf>,

    /// Directory to save the modified cbz files in
    #[arg(long, short = 'o', default_value = ".")]
    output: PathBuf,

    /// A file to additionally write the logs to
    #[arg(long)]
    logfile: Option<PathBuf>,

    /// Log what happens to every page
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn trimmed_path(s: &str) -> Result<PathBuf, String> {
    match s.trim() {
        "" => Err("empty path".to_string()),
        s => Ok(s.into()),
    }
}

fn main() -> eyre::Result<()> {
    init_eyre()?;
    let cli = Cli::parse_from(args_or_rc(".cbzpressrc")?);
    init_logger(cli.logfile.as_deref(), verbosity(cli.verbose))?;

    log::debug!("CLI arguments: {cli:#?}");
    let args = cli.press_args.to_args();

    ensure_dir(&cli.output).wrap_err_with(|| {
        format!("failed to create the output dir at: {}", cli.output.display())
    })?;

    let term_cookie =
        termination::Cookie::new().wrap_err("failed to create term cookie")?;

    let mut failed = 0;
    for cbz_file in &cli.files {
        if term_cookie.is_terminating() {
            log::warn!("Terminating, skipping the remaining files");
            break;
        }

        log::info!("Processing CBZ file: {}", cbz_file.display());
        match press_into(cbz_file, &cli.output, &args, &term_cookie) {
            Ok((output, summary)) => {
                log::info!("Successfully created: {} ({summary})", output.display())
            }
            Err(e) => {
                failed += 1;
                log::error!("Error processing {}: {}", cbz_file.display(), e);
            }
        }
    }

    if term_cookie.is_terminating() {
        eyre::bail!("terminated before all files were processed");
    }

    if failed > 0 {
        eyre::bail!("failed to process {failed} of {} files", cli.files.len());
    }

    Ok(())
}
