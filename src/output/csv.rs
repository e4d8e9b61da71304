//! CSV output format writer.

use crate::constants::UTF8_BOM;
use crate::constants::confidence::DECIMAL_PLACES;
use crate::error::Result;
use crate::output::{OutputWriter, Record};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// CSV format output writer.
pub struct CsvWriter {
    writer: BufWriter<File>,
    bom_enabled: bool,
}

impl CsvWriter {
    /// Create a new CSV writer.
    ///
    /// When `bom_enabled` is set, a UTF-8 BOM is written ahead of the header
    /// so Excel detects the encoding.
    pub fn new(path: &Path, bom_enabled: bool) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
            bom_enabled,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_header(&mut self) -> Result<()> {
        if self.bom_enabled {
            self.writer.write_all(UTF8_BOM)?;
        }
        writeln!(
            self.writer,
            "File,Species,Scientific name,Category,Danger level,Confidence,Mode"
        )?;
        Ok(())
    }

    fn write_record(&mut self, record: &Record) -> Result<()> {
        match &record.result.species {
            Some(species) => writeln!(
                self.writer,
                "{},{},{},{},{},{:.decimal$},{}",
                escape_csv(&record.file_path.display().to_string()),
                escape_csv(&species.name),
                escape_csv(&species.scientific_name),
                species.category,
                species.danger_level,
                record.result.confidence,
                record.mode,
                decimal = DECIMAL_PLACES,
            )?,
            None => writeln!(
                self.writer,
                "{},,,,,{:.decimal$},{}",
                escape_csv(&record.file_path.display().to_string()),
                record.result.confidence,
                record.mode,
                decimal = DECIMAL_PLACES,
            )?,
        }
        Ok(())
    }

    fn finalize(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Escape a value for CSV output.
fn escape_csv(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::classify::Identification;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn identified_record() -> Record {
        let catalog = Catalog::bundled().unwrap();
        Record::new(
            PathBuf::from("backyard.jpg"),
            Identification {
                species: Some(catalog.records()[0].clone()),
                confidence: 0.8123,
            },
            true,
        )
    }

    #[test]
    fn test_csv_writer_with_bom() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let mut writer = CsvWriter::new(&path, true).unwrap();
        writer.write_header().unwrap();
        writer.write_record(&identified_record()).unwrap();
        writer.finalize().unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(UTF8_BOM));

        let content = String::from_utf8_lossy(&bytes);
        assert!(content.contains("File,Species,Scientific name"));
        assert!(content.contains("Dugite"));
        assert!(content.contains("0.8123"));
        assert!(content.contains("heuristic"));
    }

    #[test]
    fn test_csv_writer_without_bom() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let mut writer = CsvWriter::new(&path, false).unwrap();
        writer.write_header().unwrap();
        writer.finalize().unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(!bytes.starts_with(UTF8_BOM));
    }

    #[test]
    fn test_csv_writer_unidentified_row() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let mut writer = CsvWriter::new(&path, false).unwrap();
        writer.write_header().unwrap();
        writer
            .write_record(&Record::new(
                PathBuf::from("blank.png"),
                Identification::none(),
                true,
            ))
            .unwrap();
        writer.finalize().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("blank.png,,,,,0.0000,heuristic"));
    }

    #[test]
    fn test_escape_csv() {
        assert_eq!(escape_csv("plain"), "plain");
        assert_eq!(escape_csv("a,b"), "\"a,b\"");
        assert_eq!(escape_csv("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
