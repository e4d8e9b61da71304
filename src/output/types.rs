//! Output type definitions.

use crate::classify::Identification;
use std::path::PathBuf;

/// Which classifier path produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifierMode {
    /// The primary model was available for the request.
    Primary,
    /// The heuristic path ran exclusively.
    Heuristic,
}

impl std::fmt::Display for ClassifierMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Primary => write!(f, "primary"),
            Self::Heuristic => write!(f, "heuristic"),
        }
    }
}

/// One analyzed photo with its identification result.
#[derive(Debug, Clone)]
pub struct Record {
    /// Path to the source image file.
    pub file_path: PathBuf,
    /// Identification result for the image.
    pub result: Identification,
    /// Classifier path that served the request.
    pub mode: ClassifierMode,
}

impl Record {
    /// Build a record for an analyzed file.
    pub fn new(file_path: PathBuf, result: Identification, fallback: bool) -> Self {
        Self {
            file_path,
            result,
            mode: if fallback {
                ClassifierMode::Heuristic
            } else {
                ClassifierMode::Primary
            },
        }
    }
}
