//! CLI commands for tidypath

pub mod decode;
pub mod dispatch;
pub mod encode;
pub mod init;
pub mod path;
pub mod rename;
