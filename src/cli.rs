use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(subcommand_value_name = "SUBCOMMAND")]
#[command(subcommand_help_heading = "Subcommands")]
pub struct Cli {
    /// Path to config file (default: `$XDG_CONFIG_HOME/trellis/config.kdl`).
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub subcommand: Sub,
}

#[derive(Subcommand)]
pub enum Sub {
    /// Validate the config file.
    Validate,
    /// Run a script of actions against a tree of headless windows and print the result.
    Replay {
        /// Number of tiled windows to open before running the script.
        #[arg(short, long, default_value_t = 3)]
        windows: u64,
        /// Number of floating windows to open after the tiled ones.
        #[arg(short, long, default_value_t = 0)]
        floating: u64,
        /// Print the final tree as JSON instead of text.
        #[arg(long)]
        json: bool,
        /// Script with one key combo, action name or JSON action per line. `#` starts a comment.
        script: PathBuf,
    },
}
