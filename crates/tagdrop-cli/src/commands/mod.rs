//! CLI subcommand implementations.

pub mod fetch;
pub mod init;
pub mod play;
pub mod validate;
