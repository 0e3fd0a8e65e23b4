use std::{
    fs::File,
    io::{BufReader, Read},
    path::PathBuf,
};

use zip::ZipArchive;

use crate::error::{ErrContext, Result};

/// A file or directory inside a cbz
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    /// Always empty for directories
    pub bytes: Vec<u8>,
    pub is_dir: bool,
}

pub struct CbzReader {
    path: PathBuf,
    archive: ZipArchive<BufReader<File>>,
    index: usize,
}

impl CbzReader {
    pub fn new<P: Into<PathBuf>>(path: P) -> Result<Self> {
        let path = path.into();
        let ctx = || path.display();
        let file = File::open(&path).context(ctx)?;
        let archive = ZipArchive::new(BufReader::new(file)).context(ctx)?;
        Ok(Self {
            path,
            archive,
            index: 0,
        })
    }

    /// Number of entries, including directories
    pub fn len(&self) -> usize {
        self.archive.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The next entry in the order they are stored in the archive
    pub fn next(&mut self) -> Result<Option<Entry>> {
        if self.index >= self.archive.len() {
            return Ok(None);
        }

        let ctx = || self.path.display();
        let mut file = self
            .archive
            .by_index({
                let i = self.index;
                self.index += 1;
                i
            })
            .context(ctx)?;

        let name = file.name().to_string();
        if file.is_dir() {
            return Ok(Some(Entry {
                name,
                bytes: vec![],
                is_dir: true,
            }));
        }

        let ctx = || format!("{} -> {}", ctx(), name);
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes).context(ctx)?;

        Ok(Some(Entry {
            name,
            bytes,
            is_dir: false,
        }))
    }

    pub fn read_all(mut self) -> Result<Vec<Entry>> {
        let mut entries = Vec::with_capacity(self.len());
        while let Some(entry) = self.next()? {
            entries.push(entry);
        }
        Ok(entries)
    }
}
