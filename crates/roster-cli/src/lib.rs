//! Library surface of the roster importer CLI.
//!
//! Argument parsing and command wiring live in the binary target; this
//! crate exposes the pieces that integration tests and the binary share.

pub mod logging;
pub mod sink;
