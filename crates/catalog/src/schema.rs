//! Catalog database setup.

use deptrag_core::{AppError, AppResult};
use rusqlite::Connection;
use std::path::Path;

/// Open (creating if needed) the catalog database at `db_path`.
pub fn init_catalog(db_path: &Path) -> AppResult<Connection> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| AppError::Catalog(format!("Failed to create catalog directory: {}", e)))?;
    }

    let conn = Connection::open(db_path)
        .map_err(|e| AppError::Catalog(format!("Failed to open catalog: {}", e)))?;

    conn.execute_batch(
        r#"
        PRAGMA foreign_keys = ON;

        CREATE TABLE IF NOT EXISTS compounds (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS departments (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            compound_id INTEGER NOT NULL,
            title TEXT NOT NULL,
            FOREIGN KEY (compound_id) REFERENCES compounds(id)
        );

        CREATE TABLE IF NOT EXISTS documents (
            id INTEGER PRIMARY KEY,
            compound_id INTEGER NOT NULL,
            title TEXT NOT NULL,
            url TEXT,
            size INTEGER NOT NULL DEFAULT 0,
            sha256 TEXT,
            status TEXT,
            index_name TEXT,
            indexer_name TEXT,
            FOREIGN KEY (compound_id) REFERENCES compounds(id)
        );

        CREATE TABLE IF NOT EXISTS department_documents (
            department_id INTEGER NOT NULL,
            document_id INTEGER NOT NULL,
            compound_id INTEGER NOT NULL,
            PRIMARY KEY (department_id, document_id),
            FOREIGN KEY (department_id) REFERENCES departments(id),
            FOREIGN KEY (document_id) REFERENCES documents(id)
        );

        CREATE INDEX IF NOT EXISTS idx_departments_compound ON departments(compound_id);
        CREATE INDEX IF NOT EXISTS idx_documents_compound ON documents(compound_id);
        "#,
    )
    .map_err(|e| AppError::Catalog(format!("Failed to create tables: {}", e)))?;

    tracing::debug!("Initialized catalog at {:?}", db_path);
    Ok(conn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_creates_tables() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested/catalog.db");
        let conn = init_catalog(&path).unwrap();
        assert!(path.exists());

        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN \
                 ('compounds', 'departments', 'documents', 'department_documents')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 4);
    }

    #[test]
    fn test_init_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("catalog.db");
        drop(init_catalog(&path).unwrap());
        assert!(init_catalog(&path).is_ok());
    }
}
