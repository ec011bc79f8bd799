// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines the validate and syntax subcommands and global flags.

use clap::{Parser, Subcommand};
use kegd::output::OutputMode;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "kegd")]
#[command(about = "Validate Kubernetes element deployment strategies")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputMode::Normal)]
    pub output: OutputMode,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a deployment strategy file and report its compose scripts
    Validate {
        /// Path to the strategy YAML file
        file: PathBuf,
    },

    /// Show the strategy and element templating syntax
    Syntax {
        /// Configuration file (defaults to kegd.yml discovery in the current directory)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}
