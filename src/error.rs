//! Error types for wilda.

/// Result type alias for wilda operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for wilda.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration directory could not be determined.
    #[error("could not determine configuration directory for this platform")]
    ConfigDirNotFound,

    /// Data directory could not be determined.
    #[error("could not determine data directory for this platform")]
    DataDirNotFound,

    /// Failed to read configuration file.
    #[error("failed to read config file '{path}'")]
    ConfigRead {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}'")]
    ConfigParse {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },

    /// Configuration validation failed.
    #[error("configuration validation failed: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    /// Failed to write configuration file.
    #[error("failed to write config file '{path}'")]
    ConfigWrite {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize configuration.
    #[error("failed to serialize config")]
    ConfigSerialize {
        /// Underlying serialization error.
        #[source]
        source: toml::ser::Error,
    },

    /// Model not found in configuration.
    #[error("model '{name}' not found in configuration")]
    ModelNotFound {
        /// Name of the missing model.
        name: String,
    },

    /// Model file does not exist.
    #[error("model file does not exist: {path}")]
    ModelFileNotFound {
        /// Path to the missing model file.
        path: std::path::PathBuf,
    },

    /// Model already exists in configuration.
    #[error("model '{name}' already exists in configuration")]
    ModelAlreadyExists {
        /// Name of the existing model.
        name: String,
    },

    /// No primary model configured.
    #[error("no primary model configured")]
    ModelNotConfigured,

    /// Model has no download URL configured.
    #[error("model '{name}' has no download URL configured")]
    ModelUrlMissing {
        /// Name of the model.
        name: String,
    },

    /// Failed to initialize the inference runtime.
    #[error("failed to initialize inference runtime: {reason}")]
    RuntimeInitialization {
        /// Description of the initialization failure.
        reason: String,
    },

    /// Failed to load the primary model.
    #[error("failed to load model: {reason}")]
    ModelLoad {
        /// Description of the load failure.
        reason: String,
    },

    /// Inference failed.
    #[error("inference failed: {reason}")]
    Inference {
        /// Description of the inference failure.
        reason: String,
    },

    /// Download failed.
    #[error("failed to download from '{url}'")]
    DownloadFailed {
        /// URL that failed.
        url: String,
        /// Underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Downloaded file did not match its expected checksum.
    #[error("checksum mismatch for '{path}': expected {expected}, got {actual}")]
    ChecksumMismatch {
        /// Path to the downloaded file.
        path: std::path::PathBuf,
        /// Expected SHA-256 digest.
        expected: String,
        /// Actual SHA-256 digest.
        actual: String,
    },

    /// Failed to read catalog file.
    #[error("failed to read catalog file '{path}'")]
    CatalogRead {
        /// Path to the catalog file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse catalog file.
    #[error("failed to parse catalog file '{path}'")]
    CatalogParse {
        /// Path to the catalog file.
        path: std::path::PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// Catalog validation failed.
    #[error("catalog validation failed: {message}")]
    CatalogValidation {
        /// Description of the validation failure.
        message: String,
    },

    /// Species not found in catalog.
    #[error("species '{name}' not found in catalog")]
    SpeciesNotFound {
        /// Name or id that was looked up.
        name: String,
    },

    /// No valid image files found.
    #[error("no valid image files found in the provided paths")]
    NoValidImageFiles,

    /// Failed to decode an image file.
    #[error("failed to decode image '{path}'")]
    ImageDecode {
        /// Path to the image file.
        path: std::path::PathBuf,
        /// Underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Pixel buffer dimensions do not match the data length.
    #[error("pixel buffer size mismatch: expected {expected} bytes, got {actual}")]
    PixelBufferSize {
        /// Expected byte length (width * height * 3).
        expected: usize,
        /// Actual byte length.
        actual: usize,
    },

    /// Failed to write JSON output file.
    #[error("failed to write JSON output file '{path}'")]
    JsonWrite {
        /// Path to the JSON file.
        path: std::path::PathBuf,
        /// Underlying serialization error.
        #[source]
        source: serde_json::Error,
    },

    /// Internal error (for unexpected failures).
    #[error("internal error: {message}")]
    Internal {
        /// Error message.
        message: String,
    },
}
