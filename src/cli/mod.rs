//! Command-line interface.

mod args;
pub mod check;
pub mod export;
pub mod serve;

pub use args::{CheckArgs, Cli, Commands, ExportArgs, ExportFormat};
