use clap::{ArgAction, Parser, Subcommand};
use datasurvey::config::{DEFAULT_DATA_ROOT, DEFAULT_REPORT_PATH};
use std::num::NonZeroUsize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "datasurvey", version)]
#[command(about = "Inventory a labeled raster dataset and write a Markdown report")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Dataset root holding the manifests and image directories
    #[arg(long, global = true, default_value = DEFAULT_DATA_ROOT)]
    pub data_root: PathBuf,

    /// Where the Markdown report is written
    #[arg(long, global = true, default_value = DEFAULT_REPORT_PATH)]
    pub report: PathBuf,

    /// Keep only the first N files (by id) of each directory
    #[arg(long, global = true)]
    pub max_files: Option<NonZeroUsize>,

    /// JSON configuration file
    #[arg(long, global = true, env = "DATASURVEY_CONFIG")]
    pub config: Option<PathBuf>,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn max_files(&self) -> Option<usize> {
        self.max_files.map(NonZeroUsize::get)
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the report, write it and print it (default)
    Report,

    /// Compare manifests with directories without probing files
    Check {
        /// Print the comparison as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the metadata the probe tool reports for files
    Probe {
        #[arg(required = true, num_args = 1..)]
        files: Vec<PathBuf>,

        /// Print the metadata as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the effective configuration
    Config,
}
