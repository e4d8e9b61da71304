//! Species record type definitions.

use serde::{Deserialize, Serialize};

/// Broad category a species belongs to, used for heuristic scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Snakes.
    Snake,
    /// Spiders.
    Spider,
    /// Insects.
    Insect,
    /// Mammals.
    Mammal,
    /// Birds.
    Bird,
    /// Everything else (reptiles, lizards, amphibians).
    Other,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Snake => write!(f, "snake"),
            Self::Spider => write!(f, "spider"),
            Self::Insect => write!(f, "insect"),
            Self::Mammal => write!(f, "mammal"),
            Self::Bird => write!(f, "bird"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// How dangerous an encounter with a species is, ordered by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DangerLevel {
    /// No risk to people.
    Harmless,
    /// Unpleasant but rarely serious.
    Caution,
    /// Medically significant; treatment may be required.
    Dangerous,
    /// Potentially life-threatening.
    Lethal,
}

impl DangerLevel {
    /// Whether this level warrants a prominent warning.
    pub const fn is_hazardous(self) -> bool {
        matches!(self, Self::Dangerous | Self::Lethal)
    }
}

impl std::fmt::Display for DangerLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Harmless => write!(f, "harmless"),
            Self::Caution => write!(f, "caution"),
            Self::Dangerous => write!(f, "dangerous"),
            Self::Lethal => write!(f, "lethal"),
        }
    }
}

/// A single species entry with its safety metadata.
///
/// Records are immutable once loaded; `first_aid` and `emergency_advice`
/// are required exactly when `danger_level` is not [`DangerLevel::Harmless`]
/// (enforced at catalog load time).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeciesRecord {
    /// Stable key for this species.
    pub id: String,
    /// Common name.
    pub name: String,
    /// Scientific name.
    pub scientific_name: String,
    /// Category used by the heuristic scorer.
    pub category: Category,
    /// Danger level of an encounter.
    pub danger_level: DangerLevel,
    /// Short description of the species.
    pub description: String,
    /// Where the species is typically found.
    pub habitat: String,
    /// Ordered safety tips for encounters.
    pub safety_tips: Vec<String>,
    /// Ordered first aid steps (non-harmless species only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_aid: Option<Vec<String>>,
    /// Single emergency advice line (non-harmless species only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emergency_advice: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_danger_level_ordering() {
        assert!(DangerLevel::Harmless < DangerLevel::Caution);
        assert!(DangerLevel::Caution < DangerLevel::Dangerous);
        assert!(DangerLevel::Dangerous < DangerLevel::Lethal);
    }

    #[test]
    fn test_danger_level_is_hazardous() {
        assert!(!DangerLevel::Harmless.is_hazardous());
        assert!(!DangerLevel::Caution.is_hazardous());
        assert!(DangerLevel::Dangerous.is_hazardous());
        assert!(DangerLevel::Lethal.is_hazardous());
    }

    #[test]
    fn test_category_serde_roundtrip() {
        let json = serde_json::to_string(&Category::Spider).ok();
        assert_eq!(json.as_deref(), Some("\"spider\""));
        let parsed: Option<Category> = serde_json::from_str("\"snake\"").ok();
        assert_eq!(parsed, Some(Category::Snake));
    }
}
