//! Application-wide constants.
//!
//! All magic numbers and strings are defined here to ensure consistency
//! and make changes easy to track.

/// Application name used for config directories and user-facing messages.
pub const APP_NAME: &str = "wilda";

/// Side length in pixels of the square sample window used for color profiling.
pub const SAMPLE_WINDOW: u32 = 100;

/// Neutral channel value returned when an image yields no sampleable pixels.
pub const NEUTRAL_CHANNEL: u8 = 128;

/// Spatial input resolution expected by the primary model.
pub const MODEL_INPUT_SIZE: u32 = 224;

/// Supported image file extensions for input collection.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "webp"];

/// Confidence value bounds and defaults.
pub mod confidence {
    /// Minimum valid confidence value.
    pub const MIN: f64 = 0.0;
    /// Ceiling applied to every reported confidence.
    pub const MAX: f64 = 0.98;
    /// Default lower bound of the simulated confidence band.
    pub const DEFAULT_FLOOR: f64 = 0.70;
    /// Default width of the simulated confidence band.
    pub const DEFAULT_SPAN: f64 = 0.25;
    /// Decimal places for confidence formatting.
    pub const DECIMAL_PLACES: usize = 4;
}

/// Heuristic scoring weights.
///
/// The bonuses encode coarse color priors per catalog category; they are
/// unnormalized and combined with a per-entry jitter in `[0, 1)`.
pub mod scorer {
    /// Weight every catalog entry starts from.
    pub const BASE_WEIGHT: f64 = 1.0;
    /// Profile average below this value counts as a dark image.
    pub const DARK_AVERAGE: u8 = 100;
    /// Spider bonus for dark images.
    pub const SPIDER_DARK_BONUS: f64 = 3.0;
    /// Spider bonus for a dominant red channel.
    pub const SPIDER_RED_BONUS: f64 = 3.0;
    /// Snake bonus for brown/tan tones (red over blue).
    pub const SNAKE_WARM_BONUS: f64 = 2.0;
    /// Reptile/lizard bonus for green-leaning images.
    pub const REPTILE_GREEN_BONUS: f64 = 2.0;
}

/// Output file extensions by format.
pub mod output_extensions {
    /// CSV output extension.
    pub const CSV: &str = ".wilda.results.csv";
    /// JSON output extension.
    pub const JSON: &str = ".wilda.json";
}

/// UTF-8 Byte Order Mark for Excel compatibility in CSV files.
pub const UTF8_BOM: &[u8; 3] = b"\xEF\xBB\xBF";

/// Download settings for model fetching.
pub mod download {
    /// Connect timeout in seconds.
    pub const CONNECT_TIMEOUT_SECS: u64 = 30;
    /// Overall request timeout in seconds.
    pub const REQUEST_TIMEOUT_SECS: u64 = 300;
}
