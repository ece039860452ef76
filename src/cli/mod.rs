pub mod completions;
pub mod list;
pub mod slice;

use clap::{Parser, Subcommand};

/// spriteslice - Cut sprite sheets into individual sprites
#[derive(Parser, Debug)]
#[command(name = "spriteslice")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Only print warnings and errors
    #[arg(long, short, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Slice a sprite sheet and zip the sprites
    Slice(slice::SliceArgs),

    /// List the frames in a metadata file
    List(list::ListArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}
