use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Extract tagged audio files from finished media downloads
#[derive(Parser, Debug)]
#[command(name = "audiokeep", version)]
pub struct Cli {
    /// Configuration file
    #[arg(long, global = true, value_name = "FILE", env = "AUDIOKEEP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print results as JSON on stdout
    #[arg(long, global = true)]
    pub json: bool,

    /// Emit log lines as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Process every manifest in a directory
    Recover {
        /// Directory holding `<stem>.info.json` manifests
        dir: PathBuf,

        /// Descend into subdirectories
        #[arg(long, short)]
        recursive: bool,
    },
    /// Process a single manifest
    Item {
        /// Path to a `<stem>.info.json` manifest
        manifest: PathBuf,
    },
}
