//! Heuristic species scorer.
//!
//! Maps a color profile and the catalog's category priors to an unnormalized
//! weight per species. This is a stand-in feature-to-label mapping for a
//! predictive model whose output classes do not align with the catalog; the
//! jitter term breaks ties and keeps repeated calls from being identical.

use crate::catalog::{Catalog, Category};
use crate::constants::scorer::{
    BASE_WEIGHT, DARK_AVERAGE, REPTILE_GREEN_BONUS, SNAKE_WARM_BONUS, SPIDER_DARK_BONUS,
    SPIDER_RED_BONUS,
};
use crate::imaging::ColorProfile;
use rand::Rng;

/// One candidate weight, tied to a catalog index. Per-call only.
#[derive(Debug, Clone, Copy)]
pub struct ScoreEntry {
    /// Index into the catalog.
    pub index: usize,
    /// Unnormalized selection weight, always `>= BASE_WEIGHT`.
    pub weight: f64,
}

/// Score every catalog entry against a color profile.
pub fn score<R: Rng>(profile: &ColorProfile, catalog: &Catalog, rng: &mut R) -> Vec<ScoreEntry> {
    catalog
        .records()
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let mut weight = BASE_WEIGHT;

            match record.category {
                Category::Spider => {
                    // Dark images and red-dominant tones both point at spiders.
                    if profile.average < DARK_AVERAGE {
                        weight += SPIDER_DARK_BONUS;
                    }
                    if profile.r > profile.g && profile.r > profile.b {
                        weight += SPIDER_RED_BONUS;
                    }
                }
                Category::Snake => {
                    if profile.r > profile.b {
                        weight += SNAKE_WARM_BONUS;
                    }
                }
                Category::Other => {
                    if profile.g > profile.r {
                        weight += REPTILE_GREEN_BONUS;
                    }
                }
                Category::Insect | Category::Mammal | Category::Bird => {}
            }

            weight += rng.r#gen::<f64>();
            ScoreEntry { index, weight }
        })
        .collect()
}
