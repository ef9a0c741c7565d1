pub mod config;
pub mod logging;

pub mod api;
pub mod download;
pub mod error;
pub mod filename;
pub mod resolver;
pub mod storage;

pub use error::{Error, ErrorKind, TransportError};
