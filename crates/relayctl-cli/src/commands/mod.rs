//! CLI command implementations

pub mod daemon;
pub mod init;
pub mod serve;
