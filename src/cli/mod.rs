//! Command-line interface definitions.

mod args;

pub use args::{CatalogAction, Cli, Command, ConfigAction, IdentifyArgs, ModelsAction};
