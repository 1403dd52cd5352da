//! Command handlers for the deptrag CLI.

pub mod compound;
pub mod department;
pub mod document;
pub mod search;

// Re-export command types for convenience
pub use compound::CompoundCommand;
pub use department::DepartmentCommand;
pub use document::DocumentCommand;
pub use search::SearchCommand;

use deptrag_catalog::Connection;
use deptrag_core::{config::AppConfig, AppResult};
use serde::Serialize;

/// Open the workspace catalog, creating it on first use.
pub(crate) fn open_catalog(config: &AppConfig) -> AppResult<Connection> {
    let path = config.catalog_db_path();
    tracing::debug!("Opening catalog at {:?}", path);
    deptrag_catalog::init_catalog(&path)
}

pub(crate) fn print_json<T: Serialize>(value: &T) -> AppResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
