//! Color profile extraction.
//!
//! Samples a fixed window at the center of the image and reduces it to
//! per-channel means. The profile is the only feature the heuristic scorer
//! sees, so extraction stays pure and deterministic to keep the two testable
//! in isolation.

use super::PixelBuffer;
use crate::constants::{NEUTRAL_CHANNEL, SAMPLE_WINDOW};

/// Compact color statistics for one image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorProfile {
    /// Mean red channel over the sample window.
    pub r: u8,
    /// Mean green channel over the sample window.
    pub g: u8,
    /// Mean blue channel over the sample window.
    pub b: u8,
    /// Mean of the three channel means.
    pub average: u8,
}

impl ColorProfile {
    /// Profile substituted when no pixels can be sampled.
    pub const NEUTRAL: Self = Self {
        r: NEUTRAL_CHANNEL,
        g: NEUTRAL_CHANNEL,
        b: NEUTRAL_CHANNEL,
        average: NEUTRAL_CHANNEL,
    };
}

/// Extract a color profile from a pixel buffer.
///
/// The sample window is [`SAMPLE_WINDOW`] pixels on a side, clamped to the
/// image extent per axis and centered on the image. Channel means are floored
/// to integers. A zero-size buffer yields [`ColorProfile::NEUTRAL`].
pub fn extract(image: &PixelBuffer) -> ColorProfile {
    if image.is_empty() {
        return ColorProfile::NEUTRAL;
    }

    let side_x = SAMPLE_WINDOW.min(image.width());
    let side_y = SAMPLE_WINDOW.min(image.height());
    let x0 = (image.width() - side_x) / 2;
    let y0 = (image.height() - side_y) / 2;

    let mut sums = [0_u64; 3];
    for y in y0..y0 + side_y {
        for x in x0..x0 + side_x {
            let [r, g, b] = image.pixel(x, y);
            sums[0] += u64::from(r);
            sums[1] += u64::from(g);
            sums[2] += u64::from(b);
        }
    }

    let count = u64::from(side_x) * u64::from(side_y);
    #[allow(clippy::cast_possible_truncation)]
    let channel = |sum: u64| (sum / count) as u8;
    let r = channel(sums[0]);
    let g = channel(sums[1]);
    let b = channel(sums[2]);
    #[allow(clippy::cast_possible_truncation)]
    let average = ((u16::from(r) + u16::from(g) + u16::from(b)) / 3) as u8;

    ColorProfile { r, g, b, average }
}
