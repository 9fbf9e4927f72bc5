//! Library side of the `ow` command-line tool.

pub mod commands;
pub mod logging;
pub mod summary;
pub mod types;
