//! Wilda - Wildlife species identification CLI tool.
//!
//! This crate identifies animal species from photos and reports safety
//! guidance, degrading to a heuristic classifier when no predictive model
//! is available.

#![warn(missing_docs)]

pub mod catalog;
pub mod classify;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod imaging;
pub mod model;
pub mod output;
pub mod pipeline;

use catalog::Catalog;
use clap::Parser;
use classify::{Identifier, IdentifyOptions};
use cli::{CatalogAction, Cli, Command, ConfigAction, IdentifyArgs, ModelsAction};
use config::{Config, ModelConfig, config_file_path, load_default_config, save_default_config};
use pipeline::{ProcessCheck, collect_input_files, output_dir_for, process_file, should_process};
use std::path::PathBuf;
use tracing::{error, info, warn};

pub use error::{Error, Result};

/// Main entry point for wilda CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.identify.verbose, cli.identify.quiet);

    // Load configuration
    let config = load_default_config()?;

    // Handle subcommands
    if let Some(command) = cli.command {
        return handle_command(command, &config);
    }

    // Default: identify photos
    // Show help if no inputs provided
    if cli.inputs.is_empty() {
        use clap::CommandFactory;
        Cli::command().print_help()?;
        return Ok(());
    }

    identify_files(&cli.inputs, &cli.identify, &config)
}

/// Identify species in the given photo files.
fn identify_files(inputs: &[PathBuf], args: &IdentifyArgs, config: &Config) -> Result<()> {
    use std::time::Instant;

    let total_start = Instant::now();

    // Collect all input files
    let files = collect_input_files(inputs)?;
    if files.is_empty() {
        return Err(Error::NoValidImageFiles);
    }

    info!("Found {} image file(s) to identify", files.len());

    config::validate_config(config)?;

    // Load the species catalog
    let catalog = load_catalog(args, config)?;
    info!("Catalog loaded: {} species", catalog.len());

    // Resolve the primary model, if any is configured
    let model_path = resolve_model_path(args, config)?;
    if model_path.is_none() {
        info!("No primary model configured; using heuristic classifier");
    }

    // Resolve selection options
    let options = IdentifyOptions {
        confidence_policy: args.confidence.unwrap_or(config.defaults.confidence),
        confidence_floor: args
            .confidence_floor
            .unwrap_or(config.defaults.confidence_floor),
        confidence_span: args
            .confidence_span
            .unwrap_or(config.defaults.confidence_span),
    };
    let confidence_policy = options.confidence_policy;

    let formats = args
        .format
        .clone()
        .unwrap_or_else(|| config.defaults.formats.clone());
    let output_dir = args.output_dir.clone();
    let force = args.force;
    let fail_fast = args.fail_fast;
    let csv_bom_enabled = !args.no_csv_bom;

    // Build the identification service
    let identifier = Identifier::new(catalog, options, model_path);

    let runtime = tokio::runtime::Runtime::new().map_err(|e| Error::Internal {
        message: format!("Failed to create async runtime: {e}"),
    })?;

    runtime.block_on(async {
        // Pre-load so the first photo does not pay the model latency
        identifier.load().await;
        if identifier.is_fallback() {
            info!("Classifier ready in fallback mode");
        } else {
            info!("Classifier ready with primary model");
        }

        // Process files
        let mut processed = 0;
        let mut skipped = 0;
        let mut errors = 0;
        let mut identified = 0;
        let mut hazardous = 0;

        for file in &files {
            let file_output_dir = output_dir_for(file, output_dir.as_deref());

            match should_process(file, &file_output_dir, &formats, force) {
                ProcessCheck::SkipExists => {
                    info!("Skipping (output exists): {}", file.display());
                    skipped += 1;
                    continue;
                }
                ProcessCheck::Process => {}
            }

            match process_file(
                file,
                &file_output_dir,
                &identifier,
                &formats,
                confidence_policy,
                csv_bom_enabled,
            )
            .await
            {
                Ok(result) => {
                    processed += 1;
                    if result.identified {
                        identified += 1;
                    }
                    if result.hazardous {
                        hazardous += 1;
                    }
                }
                Err(e) => {
                    error!("Failed to process {}: {}", file.display(), e);
                    errors += 1;
                    if fail_fast {
                        return Err(e);
                    }
                }
            }
        }

        // Summary
        let total_duration = total_start.elapsed().as_secs_f64();
        info!(
            "Complete: {} processed, {} skipped, {} errors, {} identified ({} hazardous) in {:.2}s",
            processed, skipped, errors, identified, hazardous, total_duration
        );

        if errors > 0 && !fail_fast {
            warn!("{} file(s) had errors", errors);
        }

        Ok(())
    })
}

/// Load the species catalog from an override file or the bundled data.
fn load_catalog(args: &IdentifyArgs, config: &Config) -> Result<Catalog> {
    let override_path = args.catalog.as_ref().or(config.catalog.path.as_ref());

    match override_path {
        Some(path) => {
            info!("Loading catalog: {}", path.display());
            Catalog::from_file(path)
        }
        None => Catalog::bundled(),
    }
}

/// Resolve the primary model file path from arguments and configuration.
fn resolve_model_path(args: &IdentifyArgs, config: &Config) -> Result<Option<PathBuf>> {
    if let Some(path) = &args.model_path {
        return Ok(Some(path.clone()));
    }

    let name = args.model.as_ref().or(config.defaults.model.as_ref());
    match name {
        Some(name) => {
            let model = config::get_model(config, name)?;
            info!("Using model '{}': {}", name, model.path.display());
            Ok(Some(model.path.clone()))
        }
        None => Ok(None),
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    // Build filter string based on verbosity level.
    // ONNX Runtime logging is suppressed by default because running without
    // the library is expected in fallback mode.
    let filter_str = if quiet {
        "warn,ort=off".to_string()
    } else {
        match verbose {
            0 => "info,ort=off".to_string(),
            1 => "debug,ort=warn".to_string(),
            2 => "trace,ort=info".to_string(),
            _ => "trace".to_string(), // -vvv: no runtime filter, full trace
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    fmt().with_env_filter(filter).init();
}

fn handle_command(command: Command, config: &Config) -> Result<()> {
    match command {
        Command::Config { action } => handle_config_command(action),
        Command::Models { action } => handle_models_command(action, config),
        Command::Catalog { action } => handle_catalog_command(action, config),
    }
}

fn handle_config_command(action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Init => {
            let path = config_file_path()?;
            if path.exists() {
                println!("Configuration file already exists: {}", path.display());
                println!("Use 'wilda models add' to add models.");
            } else {
                let config = Config::default();
                let saved_path = save_default_config(&config)?;
                println!("Created configuration file: {}", saved_path.display());
                println!("\nNext steps:");
                println!(
                    "  wilda models add <name> --path <model.onnx> --url <download-url> --default"
                );
            }
            Ok(())
        }
        ConfigAction::Show => {
            let config = load_default_config()?;
            println!("{config:#?}");
            Ok(())
        }
        ConfigAction::Path => {
            let path = config_file_path()?;
            println!("{}", path.display());
            Ok(())
        }
    }
}

fn handle_models_command(action: ModelsAction, config: &Config) -> Result<()> {
    match action {
        ModelsAction::List => {
            if config.models.is_empty() {
                println!("No models configured.");
                println!("Species identification will use the heuristic classifier.");
            } else {
                println!("Configured models:");
                for (name, model) in &config.models {
                    let default_marker = config.defaults.model.as_ref().is_some_and(|d| d == name);
                    println!(
                        "  {} ({}){}",
                        name,
                        model.path.display(),
                        if default_marker { " [default]" } else { "" }
                    );
                }
            }
            Ok(())
        }
        ModelsAction::Add {
            name,
            path,
            url,
            sha256,
            default,
        } => handle_models_add(name, path, url, sha256, default),
        ModelsAction::Check => {
            for (name, model) in &config.models {
                config::validate_model_config(name, model)?;
                if model.path.exists() {
                    println!("  {name}: OK");
                } else {
                    println!("  {name}: model file missing (run 'wilda models fetch {name}')");
                }
            }
            Ok(())
        }
        ModelsAction::Fetch { name } => handle_models_fetch(&name, config),
    }
}

/// Handle the `models add` command.
fn handle_models_add(
    name: String,
    path: PathBuf,
    url: Option<String>,
    sha256: Option<String>,
    set_default: bool,
) -> Result<()> {
    // A model with a download URL may not exist locally yet
    if url.is_none() && !path.exists() {
        return Err(Error::ModelFileNotFound { path });
    }

    // Load existing config
    let mut config = load_default_config()?;

    // Check if model already exists
    if config.models.contains_key(&name) {
        return Err(Error::ModelAlreadyExists { name });
    }

    let model = ModelConfig {
        path: path.clone(),
        url,
        sha256,
    };
    config::validate_model_config(&name, &model)?;

    // Add the model
    config.models.insert(name.clone(), model);

    // Set as default if requested
    if set_default {
        config.defaults.model = Some(name.clone());
    }

    // Save config
    let config_path = save_default_config(&config)?;

    println!("Added model '{name}'");
    println!("  Model: {}", path.display());
    println!("  Default: {}", if set_default { "yes" } else { "no" });
    println!("\nConfiguration saved to: {}", config_path.display());

    Ok(())
}

/// Handle the `models fetch` command.
fn handle_models_fetch(name: &str, config: &Config) -> Result<()> {
    let model = config::get_model(config, name)?;
    let url = model.url.clone().ok_or_else(|| Error::ModelUrlMissing {
        name: name.to_string(),
    })?;

    if let Some(parent) = model.path.parent() {
        std::fs::create_dir_all(parent).map_err(Error::Io)?;
    }

    let runtime = tokio::runtime::Runtime::new().map_err(|e| Error::Internal {
        message: format!("Failed to create async runtime: {e}"),
    })?;

    let client = model::download_client()?;
    runtime.block_on(async { model::download_file(&client, &url, &model.path).await })?;

    if let Some(sha256) = &model.sha256 {
        model::verify_sha256(&model.path, sha256)?;
    }

    println!();
    println!("Model '{name}' saved to: {}", model.path.display());
    println!();
    println!("Ready to identify:");
    println!("  wilda photo.jpg");

    Ok(())
}

fn handle_catalog_command(action: CatalogAction, config: &Config) -> Result<()> {
    let catalog = match &config.catalog.path {
        Some(path) => Catalog::from_file(path)?,
        None => Catalog::bundled()?,
    };

    match action {
        CatalogAction::List => {
            println!("Known species:");
            for record in catalog.records() {
                println!(
                    "  {} ({}) - {}, {}",
                    record.name, record.scientific_name, record.category, record.danger_level
                );
            }
            Ok(())
        }
        CatalogAction::Show { name } => {
            let record = catalog
                .get(&name)
                .or_else(|| catalog.find_by_name(&name))
                .ok_or(Error::SpeciesNotFound { name })?;

            println!("{} ({})", record.name, record.scientific_name);
            println!("  Category: {}", record.category);
            println!("  Danger:   {}", record.danger_level);
            println!();
            println!("{}", record.description);
            println!("Habitat: {}", record.habitat);
            println!();
            println!("Safety tips:");
            for tip in &record.safety_tips {
                println!("  - {tip}");
            }
            if let Some(first_aid) = &record.first_aid {
                println!();
                println!("First aid:");
                for step in first_aid {
                    println!("  - {step}");
                }
            }
            if let Some(advice) = &record.emergency_advice {
                println!();
                println!("Emergency: {advice}");
            }
            Ok(())
        }
    }
}
