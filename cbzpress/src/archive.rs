use std::{
    borrow::Cow,
    fmt,
    path::{Path, PathBuf},
};

use cbzpress_common::bin_common::termination::{Cookie, Terminated};
use rayon::prelude::*;

use crate::{
    cbz_reader::{CbzReader, Entry},
    cbz_writer::CbzWriter,
    codec::PageFormat,
    error,
    press::PressArgs,
};

#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error(transparent)]
    Cbz(#[from] error::Error),
    #[error(transparent)]
    Terminated(#[from] Terminated),
    #[error("{0:?} does not name a file")]
    NoFileName(PathBuf),
}

/// What was done to each entry of an archive
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub condensed: usize,
    /// Pages that were recompressed but kept their gutters
    pub kept: usize,
    /// Pages that could not be recompressed, their original bytes were written
    pub failed: usize,
    /// Entries that are not pages, copied as they were
    pub copied: usize,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} condensed, {} kept their gutters, {} failed, {} other entries",
            self.condensed, self.kept, self.failed, self.copied
        )
    }
}

#[derive(Clone, Copy)]
enum Fate {
    Condensed,
    Kept,
    Failed,
    Copied,
}

struct Processed<'a> {
    entry: &'a Entry,
    bytes: Cow<'a, [u8]>,
    fate: Fate,
}

/// Where the compressed version of `input` ends up
pub fn output_path(input: &Path, output_dir: &Path) -> Result<PathBuf, ArchiveError> {
    let stem = input
        .file_stem()
        .ok_or_else(|| ArchiveError::NoFileName(input.to_owned()))?;
    let mut name = stem.to_os_string();
    name.push("_modified.cbz");
    Ok(output_dir.join(name))
}

fn process<'a>(entry: &'a Entry, args: &PressArgs) -> Processed<'a> {
    let copied = move |fate| Processed {
        entry,
        bytes: Cow::Borrowed(&entry.bytes),
        fate,
    };

    let Some(format) = PageFormat::from_name(&entry.name).filter(|_| !entry.is_dir) else {
        return copied(Fate::Copied);
    };

    match args.press(&entry.bytes, format) {
        Ok(pressed) => {
            let fate = match &pressed.outcome {
                Some(outcome) if outcome.is_reassembled() => Fate::Condensed,
                _ => Fate::Kept,
            };
            if let Some(outcome) = &pressed.outcome {
                log::debug!("{}: {}", entry.name, outcome);
            }
            Processed {
                entry,
                bytes: Cow::Owned(pressed.bytes),
                fate,
            }
        }
        Err(e) => {
            log::warn!("Keeping {} as it was: {}", entry.name, e);
            copied(Fate::Failed)
        }
    }
}

/// Recompresses every page of the cbz at `input` into a new cbz at `output`. Pages are
/// processed in parallel and written in their original order, with their original
/// names.
pub fn press_cbz(
    input: &Path,
    output: &Path,
    args: &PressArgs,
    cookie: &Cookie,
) -> Result<Summary, ArchiveError> {
    let entries = CbzReader::new(input)?.read_all()?;
    log::info!("Read {} entries from {}", entries.len(), input.display());

    let processed = entries
        .par_iter()
        .map(|entry| {
            cookie.check()?;
            Ok(process(entry, args))
        })
        .collect::<Result<Vec<_>, Terminated>>()?;

    let mut summary = Summary::default();
    let mut writer = CbzWriter::new(output)?;
    for Processed { entry, bytes, fate } in processed {
        cookie.check()?;
        if entry.is_dir {
            writer.add_dir(&entry.name)?;
        } else {
            writer.add_file(&entry.name, &bytes)?;
        }

        match fate {
            Fate::Condensed => summary.condensed += 1,
            Fate::Kept => summary.kept += 1,
            Fate::Failed => summary.failed += 1,
            Fate::Copied => summary.copied += 1,
        }
    }
    writer.finish()?;

    Ok(summary)
}

/// [`press_cbz`] into `output_dir`, named after `input`
pub fn press_into(
    input: &Path,
    output_dir: &Path,
    args: &PressArgs,
    cookie: &Cookie,
) -> Result<(PathBuf, Summary), ArchiveError> {
    let output = output_path(input, output_dir)?;
    let summary = press_cbz(input, &output, args, cookie)?;
    Ok((output, summary))
}
