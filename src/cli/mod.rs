//! Command-line surface for MatteSync.
//!
//! The binary is a thin shell over [`run::RunArgs::execute`]; everything it
//! prints is rendered by [`report`].

pub mod common;
pub mod report;
pub mod run;

// Re-export types used by main.rs and tests
pub use common::{CliError, CliResult, ExitCode};
pub use run::RunArgs;
