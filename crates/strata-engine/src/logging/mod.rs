//! Logging setup.
//!
//! The engine emits diagnostics through the `log` facade only. Applications
//! that do not bring their own logger can call [`init_logging`] early in
//! `main` to get an `env_logger` backend.

mod init;

pub use init::{init_logging, LoggingConfig};
