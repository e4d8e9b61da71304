//! Catalog loading and lookup.

use super::types::{DangerLevel, SpeciesRecord};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// On-disk catalog file structure.
#[derive(Debug, Serialize, Deserialize)]
struct CatalogFile {
    /// Schema version of the catalog file.
    schema_version: String,
    /// Human-readable region the catalog covers.
    #[serde(default)]
    region: String,
    /// Species entries, in display order.
    species: Vec<SpeciesRecord>,
}

/// The ordered, read-only species reference table.
///
/// Loaded once at startup and shared by reference afterwards.
#[derive(Debug, Clone)]
pub struct Catalog {
    records: Vec<SpeciesRecord>,
}

impl Catalog {
    /// Load the catalog bundled into the binary.
    pub fn bundled() -> Result<Self> {
        const BUNDLED_CATALOG: &str = include_str!("../../catalog.json");

        let file: CatalogFile =
            serde_json::from_str(BUNDLED_CATALOG).map_err(|e| Error::CatalogParse {
                path: std::path::PathBuf::from("bundled://catalog.json"),
                source: e,
            })?;

        debug!(
            "Bundled catalog: schema {}, region '{}'",
            file.schema_version, file.region
        );
        Self::from_records(file.species)
    }

    /// Load a catalog from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::CatalogRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        let file: CatalogFile =
            serde_json::from_str(&content).map_err(|e| Error::CatalogParse {
                path: path.to_path_buf(),
                source: e,
            })?;

        Self::from_records(file.species)
    }

    /// Build a catalog from records, validating the safety-metadata invariant.
    pub fn from_records(records: Vec<SpeciesRecord>) -> Result<Self> {
        for record in &records {
            validate_record(record)?;
        }
        Ok(Self { records })
    }

    /// All species records, in catalog order.
    pub fn records(&self) -> &[SpeciesRecord] {
        &self.records
    }

    /// Number of species in the catalog.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the catalog contains no species.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up a species by id.
    pub fn get(&self, id: &str) -> Option<&SpeciesRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Look up a species by common or scientific name, case-insensitive.
    pub fn find_by_name(&self, name: &str) -> Option<&SpeciesRecord> {
        self.records.iter().find(|r| {
            r.name.eq_ignore_ascii_case(name) || r.scientific_name.eq_ignore_ascii_case(name)
        })
    }
}

/// Check that first aid and emergency advice are present exactly when the
/// species is not harmless.
fn validate_record(record: &SpeciesRecord) -> Result<()> {
    let harmless = record.danger_level == DangerLevel::Harmless;
    let has_first_aid = record.first_aid.as_ref().is_some_and(|steps| !steps.is_empty());
    let has_emergency = record
        .emergency_advice
        .as_ref()
        .is_some_and(|advice| !advice.is_empty());

    if harmless && (has_first_aid || has_emergency) {
        return Err(Error::CatalogValidation {
            message: format!(
                "species '{}' is harmless but carries first aid or emergency advice",
                record.id
            ),
        });
    }
    if !harmless && (!has_first_aid || !has_emergency) {
        return Err(Error::CatalogValidation {
            message: format!(
                "species '{}' is {} but lacks first aid or emergency advice",
                record.id, record.danger_level
            ),
        });
    }

    Ok(())
}
