mod decode;
mod encode;
mod init;
mod misc;
mod path;
mod rename;
pub mod support;
