pub mod args;
pub mod init;
pub mod rc;
pub mod termination;
