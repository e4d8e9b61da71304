//! JSON output format writer.

use crate::catalog::{Category, DangerLevel};
use crate::config::ConfidencePolicy;
use crate::error::Result;
use crate::output::{OutputWriter, Record};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// JSON result file structure.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonResultFile {
    /// Source image file name.
    pub source_file: String,
    /// Analysis timestamp.
    pub analyzed_at: DateTime<Utc>,
    /// Classifier path that served the request.
    pub classifier_mode: String,
    /// How the confidence value was derived.
    pub confidence_policy: ConfidencePolicy,
    /// Identified species, absent when nothing could be identified.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub species: Option<JsonSpecies>,
    /// Confidence score.
    pub confidence: f64,
}

/// Species details in JSON output.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonSpecies {
    /// Stable species id.
    pub id: String,
    /// Common name.
    pub name: String,
    /// Scientific name.
    pub scientific_name: String,
    /// Species category.
    pub category: Category,
    /// Danger level of an encounter.
    pub danger_level: DangerLevel,
    /// Safety tips for encounters.
    pub safety_tips: Vec<String>,
    /// First aid steps, for non-harmless species.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_aid: Option<Vec<String>>,
    /// Emergency advice, for non-harmless species.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency_advice: Option<String>,
}

/// Writer for JSON identification output files.
pub struct JsonResultWriter {
    record: Option<Record>,
    output_path: PathBuf,
    confidence_policy: ConfidencePolicy,
}

impl JsonResultWriter {
    /// Create a new JSON result writer.
    pub fn new(output_path: &Path, confidence_policy: ConfidencePolicy) -> Self {
        Self {
            record: None,
            output_path: output_path.to_path_buf(),
            confidence_policy,
        }
    }
}

impl OutputWriter for JsonResultWriter {
    fn write_header(&mut self) -> Result<()> {
        // No header for JSON - written at finalize
        Ok(())
    }

    fn write_record(&mut self, record: &Record) -> Result<()> {
        self.record = Some(record.clone());
        Ok(())
    }

    fn finalize(&mut self) -> Result<()> {
        let Some(record) = self.record.take() else {
            return Ok(());
        };

        let species = record.result.species.as_ref().map(|s| JsonSpecies {
            id: s.id.clone(),
            name: s.name.clone(),
            scientific_name: s.scientific_name.clone(),
            category: s.category,
            danger_level: s.danger_level,
            safety_tips: s.safety_tips.clone(),
            first_aid: s.first_aid.clone(),
            emergency_advice: s.emergency_advice.clone(),
        });

        let result = JsonResultFile {
            source_file: record
                .file_path
                .file_name()
                .map_or_else(|| record.file_path.display().to_string(), |n| {
                    n.to_string_lossy().into_owned()
                }),
            analyzed_at: Utc::now(),
            classifier_mode: record.mode.to_string(),
            confidence_policy: self.confidence_policy,
            species,
            confidence: record.result.confidence,
        };

        let file = File::create(&self.output_path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, &result).map_err(|e| {
            crate::error::Error::JsonWrite {
                path: self.output_path.clone(),
                source: e,
            }
        })?;

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::classify::Identification;
    use tempfile::tempdir;

    #[test]
    fn test_json_writer_identified() {
        let dir = tempdir().unwrap();
        let output_path = dir.path().join("photo.wilda.json");

        let catalog = Catalog::bundled().unwrap();
        let record = Record::new(
            PathBuf::from("/photos/photo.jpg"),
            Identification {
                species: Some(catalog.get("redback").unwrap().clone()),
                confidence: 0.91,
            },
            true,
        );

        let mut writer = JsonResultWriter::new(&output_path, ConfidencePolicy::Simulated);
        writer.write_header().unwrap();
        writer.write_record(&record).unwrap();
        writer.finalize().unwrap();

        let content = std::fs::read_to_string(&output_path).unwrap();
        let parsed: JsonResultFile = serde_json::from_str(&content).unwrap();

        assert_eq!(parsed.source_file, "photo.jpg");
        assert_eq!(parsed.classifier_mode, "heuristic");
        let species = parsed.species.unwrap();
        assert_eq!(species.id, "redback");
        assert_eq!(species.danger_level, DangerLevel::Dangerous);
        assert!(species.first_aid.is_some());
        assert!((parsed.confidence - 0.91).abs() < 1e-9);
    }

    #[test]
    fn test_json_writer_unidentified_omits_species() {
        let dir = tempdir().unwrap();
        let output_path = dir.path().join("photo.wilda.json");

        let record = Record::new(
            PathBuf::from("photo.jpg"),
            Identification::none(),
            true,
        );

        let mut writer = JsonResultWriter::new(&output_path, ConfidencePolicy::Simulated);
        writer.write_header().unwrap();
        writer.write_record(&record).unwrap();
        writer.finalize().unwrap();

        let content = std::fs::read_to_string(&output_path).unwrap();
        assert!(!content.contains("\"species\""));

        let parsed: JsonResultFile = serde_json::from_str(&content).unwrap();
        assert!(parsed.species.is_none());
        assert!(parsed.confidence.abs() < f64::EPSILON);
    }
}
