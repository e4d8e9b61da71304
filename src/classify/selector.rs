//! Weighted selection and confidence derivation.

use super::scorer::ScoreEntry;
use crate::config::ConfidencePolicy;
use crate::constants::confidence::MAX;
use rand::Rng;

/// Pick a catalog index by proportional (roulette-wheel) sampling.
///
/// Draws `u` uniformly from `[0, total)` and returns the first index whose
/// running weight sum reaches `u`, so an entry's selection probability equals
/// its share of the total weight. Empty entries or a zero total fall back to
/// a uniform draw over the catalog; `None` only when the catalog is empty.
pub fn select<R: Rng>(
    entries: &[ScoreEntry],
    catalog_len: usize,
    rng: &mut R,
) -> Option<usize> {
    let total: f64 = entries.iter().map(|e| e.weight).sum();

    if entries.is_empty() || total <= 0.0 {
        if catalog_len == 0 {
            return None;
        }
        return Some(rng.gen_range(0..catalog_len));
    }

    let draw = rng.r#gen::<f64>() * total;
    let mut running = 0.0;
    for entry in entries {
        running += entry.weight;
        if running >= draw {
            return Some(entry.index);
        }
    }

    // Float accumulation can leave the last sliver uncovered.
    entries.last().map(|e| e.index)
}

/// Derive a confidence value for a selected entry.
///
/// The simulated policy samples a narrow high band independent of the
/// winning weight; the evidence policy reports the winning weight's share of
/// the total. Both are capped at [`MAX`].
pub fn confidence<R: Rng>(
    policy: ConfidencePolicy,
    weight: f64,
    total: f64,
    floor: f64,
    span: f64,
    rng: &mut R,
) -> f64 {
    match policy {
        ConfidencePolicy::Simulated => (span.mul_add(rng.r#gen::<f64>(), floor)).min(MAX),
        ConfidencePolicy::Evidence => {
            if total > 0.0 {
                (weight / total).clamp(0.0, MAX)
            } else {
                0.0
            }
        }
    }
}
