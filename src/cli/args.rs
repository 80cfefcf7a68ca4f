//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

use crate::export::ExportKind;

/// Inkpot live preview studio CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Show debug diagnostics
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Story directory (relative to project root)
    #[arg(short, long, global = true, value_hint = clap::ValueHint::DirPath)]
    pub story: Option<PathBuf>,

    /// Config file path (default: search upward for inkpot.toml)
    #[arg(short = 'C', long, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start the live preview server
    #[command(visible_alias = "s")]
    Serve {
        /// Network interface to bind (e.g., 127.0.0.1, 0.0.0.0)
        #[arg(short, long)]
        interface: Option<std::net::IpAddr>,

        /// Port number to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Enable file watching for live recompiles
        #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
        watch: Option<bool>,
    },

    /// Export a document as raw ink, compiled JSON or a web bundle
    #[command(visible_alias = "e")]
    Export {
        #[command(flatten)]
        args: ExportArgs,
    },

    /// Compile documents once and report diagnostics
    #[command(visible_alias = "c")]
    Check {
        #[command(flatten)]
        args: CheckArgs,
    },
}

/// Export command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct ExportArgs {
    /// Document to export (workspace-relative id, e.g. `chapters/one`)
    #[arg(value_name = "DOC")]
    pub doc: String,

    /// Artifact kind to produce
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: ExportFormat,

    /// Output file (default: `<doc>.<ext>` in the current directory)
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}

/// Check command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct CheckArgs {
    /// Documents to check. If omitted, checks the whole workspace.
    #[arg(value_name = "DOC")]
    pub docs: Vec<String>,
}

/// CLI-facing export format names.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Raw Ink source
    Ink,
    /// Compiled story JSON
    Json,
    /// Standalone HTML bundle
    Web,
}

impl ExportFormat {
    pub fn kind(self) -> ExportKind {
        match self {
            Self::Ink => ExportKind::Source,
            Self::Json => ExportKind::Json,
            Self::Web => ExportKind::Web,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_format_maps_to_kind() {
        assert_eq!(ExportFormat::Ink.kind(), ExportKind::Source);
        assert_eq!(ExportFormat::Json.kind(), ExportKind::Json);
        assert_eq!(ExportFormat::Web.kind(), ExportKind::Web);
    }

    #[test]
    fn test_cli_parses_export() {
        let cli = Cli::try_parse_from(["inkpot", "export", "chapters/one", "-f", "web"]).unwrap();
        match cli.command {
            Commands::Export { args } => {
                assert_eq!(args.doc, "chapters/one");
                assert_eq!(args.format, ExportFormat::Web);
                assert!(args.output.is_none());
            }
            _ => panic!("expected export command"),
        }
    }

    #[test]
    fn test_cli_parses_serve_defaults() {
        let cli = Cli::try_parse_from(["inkpot", "serve"]).unwrap();
        match cli.command {
            Commands::Serve {
                interface,
                port,
                watch,
            } => {
                assert!(interface.is_none());
                assert!(port.is_none());
                assert!(watch.is_none());
            }
            _ => panic!("expected serve command"),
        }
    }

    #[test]
    fn test_cli_serve_watch_flag_without_value() {
        let cli = Cli::try_parse_from(["inkpot", "serve", "--watch"]).unwrap();
        match cli.command {
            Commands::Serve { watch, .. } => assert_eq!(watch, Some(true)),
            _ => panic!("expected serve command"),
        }
    }
}
