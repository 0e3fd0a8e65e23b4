pub mod archive;
pub mod cbz_reader;
pub mod cbz_writer;
pub mod codec;
pub mod error;
pub mod press;
