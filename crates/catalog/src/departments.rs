//! Department records.

use crate::compounds::compound_exists;
use crate::types::Department;
use deptrag_core::{AppError, AppResult};
use rusqlite::{params, Connection, OptionalExtension, Row};

fn department_from_row(row: &Row<'_>) -> rusqlite::Result<Department> {
    Ok(Department {
        id: row.get(0)?,
        compound_id: row.get(1)?,
        title: row.get(2)?,
    })
}

/// Create a department inside an existing compound.
pub fn create_department(conn: &Connection, compound_id: i64, title: &str) -> AppResult<Department> {
    let title = title.trim();
    if title.is_empty() {
        return Err(AppError::Catalog("Department title is required".to_string()));
    }
    if !compound_exists(conn, compound_id)? {
        return Err(AppError::Catalog(format!(
            "Compound {} not found",
            compound_id
        )));
    }

    conn.execute(
        "INSERT INTO departments (compound_id, title) VALUES (?1, ?2)",
        params![compound_id, title],
    )
    .map_err(|e| AppError::Catalog(format!("Failed to insert department: {}", e)))?;

    let department = Department {
        id: conn.last_insert_rowid(),
        compound_id,
        title: title.to_string(),
    };
    tracing::info!(
        id = department.id,
        compound = compound_id,
        "Created department '{}'",
        department.title
    );
    Ok(department)
}

/// Departments of a compound, ordered by id.
pub fn list_departments(conn: &Connection, compound_id: i64) -> AppResult<Vec<Department>> {
    let mut stmt = conn
        .prepare("SELECT id, compound_id, title FROM departments WHERE compound_id = ?1 ORDER BY id")
        .map_err(|e| AppError::Catalog(format!("Failed to prepare query: {}", e)))?;

    let departments = stmt
        .query_map(params![compound_id], department_from_row)
        .map_err(|e| AppError::Catalog(format!("Failed to query departments: {}", e)))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| AppError::Catalog(format!("Failed to read department: {}", e)))?;

    Ok(departments)
}

/// Look up a department; `None` when it does not exist in that compound.
pub fn get_department(
    conn: &Connection,
    department_id: i64,
    compound_id: i64,
) -> AppResult<Option<Department>> {
    conn.query_row(
        "SELECT id, compound_id, title FROM departments WHERE id = ?1 AND compound_id = ?2",
        params![department_id, compound_id],
        department_from_row,
    )
    .optional()
    .map_err(|e| AppError::Catalog(format!("Failed to look up department: {}", e)))
}

/// Compound owning a department, if the department exists.
pub(crate) fn department_compound(conn: &Connection, department_id: i64) -> AppResult<Option<i64>> {
    conn.query_row(
        "SELECT compound_id FROM departments WHERE id = ?1",
        params![department_id],
        |row| row.get(0),
    )
    .optional()
    .map_err(|e| AppError::Catalog(format!("Failed to look up department: {}", e)))
}
