//! Command-line arguments.

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the `folio` shell.
#[derive(Debug, Clone, Parser)]
#[command(name = "folio")]
#[command(about = "Replay input scripts against the Folio canvas editor")]
#[command(version)]
pub struct CliArgs {
    /// Input script to replay (JSON array of steps)
    #[arg(long)]
    pub script: Option<PathBuf>,

    /// Editor settings file (JSON)
    #[arg(long, env = "FOLIO_SETTINGS")]
    pub settings: Option<PathBuf>,

    /// Saved design to start from
    #[arg(long, conflicts_with = "template")]
    pub design: Option<PathBuf>,

    /// Built-in template to start from
    #[arg(long)]
    pub template: Option<String>,

    /// Write the design JSON here instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Export the design as SVG
    #[arg(long)]
    pub svg: Option<PathBuf>,

    /// Render the current view, with selection, as SVG
    #[arg(long)]
    pub preview: Option<PathBuf>,

    /// Print the keyboard shortcuts and exit
    #[arg(long)]
    pub keys: bool,

    /// Viewport width in pixels
    #[arg(long, default_value = "1280")]
    pub width: f64,

    /// Viewport height in pixels
    #[arg(long, default_value = "800")]
    pub height: f64,
}
