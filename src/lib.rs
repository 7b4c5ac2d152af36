//! Markbox: a bounding-box annotation session engine for YOLO-style
//! datasets.
//!
//! Markbox models the state behind an interactive labeling tool: a user
//! steps through a folder of images, draws labeled rectangles, and the
//! rectangles persist in the normalized text format a YOLO-style detector
//! consumes. The engine is UI-agnostic; a GUI drives the live label set for
//! in-canvas edits and the session for navigation, and everything here can
//! be exercised from tests without a display.
//!
//! # Modules
//!
//! - [`geom`]: pixel-box / normalized-record conversions
//! - [`label_file`]: per-image label file save and load
//! - [`labels`]: the live rectangle set and its identity handles
//! - [`dataset`]: image/label path enumeration and the cursor
//! - [`session`]: the save-before-navigate protocol
//! - [`importer`]: merging external detector predictions
//! - [`detector`]: invoking the external detector
//! - [`config`]: the startup options file
//! - [`error`]: error types for markbox operations

pub mod config;
pub mod dataset;
pub mod detector;
pub mod error;
pub mod geom;
pub mod importer;
pub mod label_file;
pub mod labels;
pub mod session;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use error::MarkboxError;

/// The markbox CLI application.
#[derive(Parser)]
#[command(name = "markbox")]
#[command(version, author, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Move predicted label files into the labels folder.
    Import(ImportArgs),

    /// Run the external detector and import its predictions.
    Detect(DetectArgs),
}

/// Arguments for the import subcommand.
#[derive(clap::Args)]
struct ImportArgs {
    /// Folder holding the predicted label files.
    #[arg(long)]
    predictions: PathBuf,

    /// Labels folder the predictions are moved into.
    #[arg(long)]
    labels: PathBuf,
}

/// Arguments for the detect subcommand.
#[derive(clap::Args)]
struct DetectArgs {
    /// Options file with detector and folder settings.
    #[arg(long, default_value = "options.json")]
    config: PathBuf,
}

/// Run the markbox CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), MarkboxError> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Import(args)) => {
            let moved = importer::import_predictions(&args.predictions, &args.labels)?;
            println!("Imported {} prediction file(s)", moved);
            Ok(())
        }
        Some(Commands::Detect(args)) => {
            let options = config::Options::load(&args.config)?;
            let moved = detector::predict_and_import(&options)?;
            println!("Imported {} prediction file(s)", moved);
            Ok(())
        }
        None => {
            println!("markbox {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Bounding-box annotation session engine for YOLO-style datasets.");
            println!();
            println!("Run 'markbox --help' for usage information.");
            Ok(())
        }
    }
}
