// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines all subcommands and their arguments.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "halyard")]
#[command(about = "Zero-downtime git release deployment with atomic symlink switching")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print the final result
    #[arg(short, long, global = true, conflicts_with = "json")]
    pub quiet: bool,

    /// Print progress as JSON lines
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by commands that talk to a deploy target.
#[derive(Args, Debug, Clone, Default)]
pub struct TargetArgs {
    /// Path to the configuration file (default: discover halyard.yml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Target destination (defined in config)
    #[arg(short, long)]
    pub destination: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new halyard.yml configuration file
    Init {
        /// Source repository URL
        #[arg(long)]
        repository: Option<String>,

        /// Absolute deploy root on the target
        #[arg(long)]
        deploy_path: Option<String>,

        /// Overwrite an existing configuration file
        #[arg(short, long)]
        force: bool,
    },

    /// Push a new release, build it, activate it, and restart
    Deploy {
        #[command(flatten)]
        target: TargetArgs,

        /// Branch, tag, or commit to deploy (overrides config)
        #[arg(short, long)]
        revision: Option<String>,
    },

    /// Activate the release before the current one, then restart
    Rollback {
        #[command(flatten)]
        target: TargetArgs,
    },

    /// List releases on the target, newest first
    Releases {
        #[command(flatten)]
        target: TargetArgs,
    },
}
