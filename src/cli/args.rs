//! CLI argument definitions.

use crate::config::{ConfidencePolicy, OutputFormat};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Wildlife species identification and safety guidance from photos.
#[derive(Debug, Parser)]
#[command(name = "wilda")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Input image files or directories to identify.
    pub inputs: Vec<PathBuf>,

    /// Common options for identification.
    #[command(flatten)]
    pub identify: IdentifyArgs,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    Config {
        /// Configuration action to perform.
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Manage models.
    Models {
        /// Models action to perform.
        #[command(subcommand)]
        action: ModelsAction,
    },
    /// Browse the species catalog.
    Catalog {
        /// Catalog action to perform.
        #[command(subcommand)]
        action: CatalogAction,
    },
}

/// Config subcommand actions.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ConfigAction {
    /// Create default configuration file.
    Init,
    /// Display current configuration.
    Show,
    /// Print configuration file path.
    Path,
}

/// Models subcommand actions.
#[derive(Debug, Subcommand)]
pub enum ModelsAction {
    /// List configured models.
    List,
    /// Add a new model to configuration.
    Add {
        /// Name for this model (e.g., "wildlife-v1").
        name: String,
        /// Path to the ONNX model file.
        #[arg(long)]
        path: PathBuf,
        /// Download URL for `models fetch`.
        #[arg(long)]
        url: Option<String>,
        /// Expected SHA-256 digest of the model file.
        #[arg(long)]
        sha256: Option<String>,
        /// Set as the default model.
        #[arg(long)]
        default: bool,
    },
    /// Verify model files exist and are valid.
    Check,
    /// Download a configured model from its URL.
    Fetch {
        /// Model name from configuration.
        name: String,
    },
}

/// Catalog subcommand actions.
#[derive(Debug, Subcommand)]
pub enum CatalogAction {
    /// List all species in the catalog.
    List,
    /// Show full safety details for one species.
    Show {
        /// Species id, common name, or scientific name.
        name: String,
    },
}

/// Arguments for the identify command.
#[derive(Debug, Args)]
#[allow(clippy::struct_excessive_bools)]
pub struct IdentifyArgs {
    /// Model name from configuration.
    #[arg(short, long, env = "WILDA_MODEL")]
    pub model: Option<String>,

    /// Path to ONNX model file (overrides config).
    #[arg(long, env = "WILDA_MODEL_PATH")]
    pub model_path: Option<PathBuf>,

    /// Path to a species catalog file (overrides bundled catalog).
    #[arg(long, env = "WILDA_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Output formats (comma-separated: csv,json).
    #[arg(short, long, value_delimiter = ',', env = "WILDA_FORMAT")]
    pub format: Option<Vec<OutputFormat>>,

    /// Output directory (default: same as input).
    #[arg(short, long, env = "WILDA_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// How to derive confidence values.
    #[arg(long, value_enum, env = "WILDA_CONFIDENCE")]
    pub confidence: Option<ConfidencePolicy>,

    /// Lower bound of the simulated confidence band (0.0-1.0).
    #[arg(long, value_parser = parse_unit_interval, env = "WILDA_CONFIDENCE_FLOOR")]
    pub confidence_floor: Option<f64>,

    /// Width of the simulated confidence band (0.0-1.0).
    #[arg(long, value_parser = parse_unit_interval, env = "WILDA_CONFIDENCE_SPAN")]
    pub confidence_span: Option<f64>,

    /// Reprocess files even if output exists.
    #[arg(long)]
    pub force: bool,

    /// Stop on first error.
    #[arg(long)]
    pub fail_fast: bool,

    /// Omit the UTF-8 BOM from CSV output.
    #[arg(long)]
    pub no_csv_bom: bool,

    /// Suppress informational output.
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity (-v: debug, -vv: trace, -vvv: trace+runtime).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Parse and validate a value in the unit interval.
fn parse_unit_interval(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;

    if !(0.0..=1.0).contains(&value) {
        return Err(format!("value must be between 0.0 and 1.0, got {value}"));
    }

    Ok(value)
}
