//! CLI command definitions for the `syard` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod route;
pub mod status;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use switchyard_types::provider::RequestClass;

/// Route LLM requests across free-tier providers with automatic fallback.
#[derive(Parser)]
#[command(name = "syard", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to switchyard.toml (defaults to ~/.switchyard/switchyard.toml).
    #[arg(long, global = true, env = "SWITCHYARD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Emit logs as JSON lines on stderr.
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Export spans to stdout via OpenTelemetry.
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Route a text prompt to the first available text provider.
    Text {
        /// The user prompt.
        prompt: String,

        /// Optional system instruction.
        #[arg(long, short)]
        system: Option<String>,
    },

    /// Route an image plus prompt to the first available vision provider.
    Vision {
        /// Image file path, or `-` to read from stdin.
        image: PathBuf,

        /// The user prompt.
        prompt: String,

        /// Optional system instruction.
        #[arg(long, short)]
        system: Option<String>,
    },

    /// Show per-provider quota and availability.
    Status,

    /// Show which provider would be tried first for a request class.
    Recommend {
        /// Request class: text or vision.
        class: RequestClass,
    },

    /// Start the REST API server.
    Serve {
        /// Port to listen on.
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to.
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}
