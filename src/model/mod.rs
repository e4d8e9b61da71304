//! Model acquisition: downloading and verifying primary model files.

mod fetch;

pub use fetch::{download_client, download_file, verify_sha256};
