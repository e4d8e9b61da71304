//! Output writer trait definition.

use crate::error::Result;
use crate::output::Record;

/// Trait for writing identification results.
pub trait OutputWriter {
    /// Write the file header (if applicable).
    fn write_header(&mut self) -> Result<()>;

    /// Write a single identification record.
    fn write_record(&mut self, record: &Record) -> Result<()>;

    /// Finalize the output (flush, close, etc.).
    fn finalize(&mut self) -> Result<()>;
}
