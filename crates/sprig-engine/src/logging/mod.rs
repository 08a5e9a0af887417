//! Logger setup.
//!
//! The crate logs through the `log` facade; `init_logging` wires it to
//! `env_logger` for binaries that want a default backend.

mod init;

pub use init::{init_logging, LoggingConfig};
