use std::{
    io::Write,
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;
use zip::{write::FileOptions, CompressionMethod, ZipWriter};

use crate::{
    codec::PageFormat,
    error::{ErrContext, Result},
};

/// Writes a new cbz. Everything goes to a temporary file next to the destination, which
/// only replaces the destination when [`CbzWriter::finish`] is called.
pub struct CbzWriter {
    path: PathBuf,
    zip: ZipWriter<NamedTempFile>,
}

impl CbzWriter {
    pub fn new<P: Into<PathBuf>>(path: P) -> Result<Self> {
        let path = path.into();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let tmp = NamedTempFile::new_in(dir).context(|| dir.display())?;
        Ok(Self {
            path,
            zip: ZipWriter::new(tmp),
        })
    }

    /// Pages are already compressed, so they are only stored
    fn options(name: &str) -> FileOptions {
        let method = if PageFormat::from_name(name).is_some() {
            CompressionMethod::Stored
        } else {
            CompressionMethod::Deflated
        };
        FileOptions::default().compression_method(method)
    }

    pub fn add_file(&mut self, name: &str, bytes: &[u8]) -> Result<()> {
        let ctx = || format!("{} <- {}", self.path.display(), name);
        self.zip
            .start_file(name, Self::options(name))
            .context(ctx)?;
        self.zip.write_all(bytes).context(ctx)?;
        Ok(())
    }

    pub fn add_dir(&mut self, name: &str) -> Result<()> {
        self.zip
            .add_directory(name, FileOptions::default())
            .context(|| format!("{} <- {}", self.path.display(), name))
    }

    /// Writes the central directory and moves the archive into place
    pub fn finish(mut self) -> Result<PathBuf> {
        let ctx = || self.path.display();
        let tmp = self.zip.finish().context(ctx)?;
        tmp.persist(&self.path).context(ctx)?;
        Ok(self.path)
    }
}
