//! Compound records.

use crate::types::Compound;
use deptrag_core::{AppError, AppResult};
use rusqlite::{params, Connection};

/// Create a compound and return it with its assigned id.
pub fn create_compound(conn: &Connection, title: &str) -> AppResult<Compound> {
    let title = title.trim();
    if title.is_empty() {
        return Err(AppError::Catalog("Compound title is required".to_string()));
    }

    conn.execute("INSERT INTO compounds (title) VALUES (?1)", params![title])
        .map_err(|e| AppError::Catalog(format!("Failed to insert compound: {}", e)))?;

    let compound = Compound {
        id: conn.last_insert_rowid(),
        title: title.to_string(),
    };
    tracing::info!(id = compound.id, "Created compound '{}'", compound.title);
    Ok(compound)
}

/// All compounds, ordered by id.
pub fn list_compounds(conn: &Connection) -> AppResult<Vec<Compound>> {
    let mut stmt = conn
        .prepare("SELECT id, title FROM compounds ORDER BY id")
        .map_err(|e| AppError::Catalog(format!("Failed to prepare query: {}", e)))?;

    let compounds = stmt
        .query_map([], |row| {
            Ok(Compound {
                id: row.get(0)?,
                title: row.get(1)?,
            })
        })
        .map_err(|e| AppError::Catalog(format!("Failed to query compounds: {}", e)))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| AppError::Catalog(format!("Failed to read compound: {}", e)))?;

    Ok(compounds)
}

pub(crate) fn compound_exists(conn: &Connection, compound_id: i64) -> AppResult<bool> {
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM compounds WHERE id = ?1",
            params![compound_id],
            |row| row.get(0),
        )
        .map_err(|e| AppError::Catalog(format!("Failed to look up compound: {}", e)))?;
    Ok(count > 0)
}
