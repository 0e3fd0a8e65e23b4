use std::ffi::{OsStr, OsString};

use color_eyre::eyre::{self, Context};

use crate::utils::fsutils::read_optional_file;

/// The command line arguments. If there are none, the whitespace separated flags in the
/// file `rc_file` are used instead, if it exists.
pub fn args_or_rc(rc_file: &str) -> eyre::Result<Vec<OsString>> {
    let args: Vec<OsString> = std::env::args_os().collect();
    with_rc(args, rc_file)
}

fn with_rc(mut args: Vec<OsString>, rc_file: &str) -> eyre::Result<Vec<OsString>> {
    if args.len() == 1 {
        if let Some(flags) = read_optional_file(rc_file)
            .wrap_err_with(|| format!("Could not read config file at: {rc_file}"))?
        {
            args.extend(flags.split_whitespace().map(|s| OsStr::new(s).to_owned()));
        }
    }

    Ok(args)
}
