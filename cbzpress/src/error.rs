use std::io;

use tempfile::PersistError;
use zip::result::ZipError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
#[error("Error when '{context}', apparently: {kind}")]
pub struct Error {
    context: String,
    kind: ErrorKind,
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum ErrorKind {
    #[error("io: {0}")]
    Io(#[from] io::Error),
    #[error("zip: {0}")]
    Zip(#[from] ZipError),
    #[error("persist: {0}")]
    Persist(#[from] PersistError),
}

pub(crate) trait ErrContext<T> {
    fn context<S: ToString, F: FnOnce() -> S>(self, provider: F) -> Result<T>;
}

impl<T, E> ErrContext<T> for std::result::Result<T, E>
where
    E: Into<ErrorKind>,
{
    fn context<S: ToString, F: FnOnce() -> S>(self, provider: F) -> Result<T> {
        self.map_err(|e| Error {
            context: provider().to_string(),
            kind: e.into(),
        })
    }
}
