//! Single photo processing pipeline.

use crate::classify::Identifier;
use crate::config::{ConfidencePolicy, OutputFormat};
use crate::error::Result;
use crate::imaging::decode_image_file;
use crate::output::{CsvWriter, JsonResultWriter, OutputWriter, Record, reporter};
use crate::pipeline::output_path_for;
use std::path::Path;
use tracing::{debug, info};

/// Result of processing a single photo.
#[derive(Debug)]
pub struct ProcessResult {
    /// Whether a species was identified.
    pub identified: bool,
    /// Whether the identified species is dangerous or lethal.
    pub hazardous: bool,
}

/// Process a single photo: decode, identify, report, write outputs.
///
/// # Arguments
///
/// * `input_path` - Path to the input image file
/// * `output_dir` - Directory for output files
/// * `identifier` - Identification service
/// * `formats` - Output formats to generate
/// * `confidence_policy` - Policy recorded in JSON output
/// * `csv_bom_enabled` - Whether to include UTF-8 BOM in CSV output for Excel compatibility
pub async fn process_file(
    input_path: &Path,
    output_dir: &Path,
    identifier: &Identifier,
    formats: &[OutputFormat],
    confidence_policy: ConfidencePolicy,
    csv_bom_enabled: bool,
) -> Result<ProcessResult> {
    info!("Processing: {}", input_path.display());

    let image = decode_image_file(input_path)?;
    debug!("Decoded {}x{} pixels", image.width(), image.height());

    let result = identifier.identify(&image).await;
    let record = Record::new(input_path.to_path_buf(), result, identifier.is_fallback());

    reporter::print_report(&record);

    for format in formats {
        write_output(
            input_path,
            output_dir,
            *format,
            &record,
            confidence_policy,
            csv_bom_enabled,
        )?;
    }

    let hazardous = record
        .result
        .species
        .as_ref()
        .is_some_and(|s| s.danger_level.is_hazardous());

    Ok(ProcessResult {
        identified: record.result.species.is_some(),
        hazardous,
    })
}

/// Write one record to an output file.
fn write_output(
    input_path: &Path,
    output_dir: &Path,
    format: OutputFormat,
    record: &Record,
    confidence_policy: ConfidencePolicy,
    csv_bom_enabled: bool,
) -> Result<()> {
    let output_path = output_path_for(input_path, output_dir, format);
    debug!("Writing {} output: {}", format, output_path.display());

    let mut writer: Box<dyn OutputWriter> = match format {
        OutputFormat::Csv => Box::new(CsvWriter::new(&output_path, csv_bom_enabled)?),
        OutputFormat::Json => Box::new(JsonResultWriter::new(&output_path, confidence_policy)),
    };

    writer.write_header()?;
    writer.write_record(record)?;
    writer.finalize()?;

    Ok(())
}
