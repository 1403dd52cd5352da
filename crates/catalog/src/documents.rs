//! Document records and department assignments.

use crate::compounds::compound_exists;
use crate::departments::{department_compound, get_department};
use crate::types::{Document, NewDocument};
use deptrag_core::{AppError, AppResult};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::collections::BTreeSet;

const DOCUMENT_COLUMNS: &str =
    "d.id, d.compound_id, d.title, d.url, d.size, d.sha256, d.status, d.index_name, d.indexer_name";

fn document_from_row(row: &Row<'_>) -> rusqlite::Result<Document> {
    Ok(Document {
        id: row.get(0)?,
        compound_id: row.get(1)?,
        title: row.get(2)?,
        url: row.get(3)?,
        size: row.get(4)?,
        sha256: row.get(5)?,
        status: row.get(6)?,
        index_name: row.get(7)?,
        indexer_name: row.get(8)?,
    })
}

fn query_documents(
    conn: &Connection,
    sql: &str,
    params: impl rusqlite::Params,
) -> AppResult<Vec<Document>> {
    let mut stmt = conn
        .prepare(sql)
        .map_err(|e| AppError::Catalog(format!("Failed to prepare query: {}", e)))?;

    let documents = stmt
        .query_map(params, document_from_row)
        .map_err(|e| AppError::Catalog(format!("Failed to query documents: {}", e)))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| AppError::Catalog(format!("Failed to read document: {}", e)))?;

    Ok(documents)
}

/// Register a document that exists in the search index.
pub fn add_document(conn: &Connection, compound_id: i64, document: NewDocument) -> AppResult<Document> {
    if document.id <= 0 {
        return Err(AppError::Catalog(format!(
            "Invalid document id: {}",
            document.id
        )));
    }
    let title = document.title.trim().to_string();
    if title.is_empty() {
        return Err(AppError::Catalog("Document title is required".to_string()));
    }
    if !compound_exists(conn, compound_id)? {
        return Err(AppError::Catalog(format!(
            "Compound {} not found",
            compound_id
        )));
    }

    conn.execute(
        "INSERT INTO documents (id, compound_id, title, url, size, sha256, status, index_name, indexer_name)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            document.id,
            compound_id,
            title,
            document.url,
            document.size,
            document.sha256,
            document.status,
            document.index_name,
            document.indexer_name,
        ],
    )
    .map_err(|e| AppError::Catalog(format!("Failed to insert document {}: {}", document.id, e)))?;

    tracing::info!(id = document.id, compound = compound_id, "Added document '{}'", title);

    Ok(Document {
        id: document.id,
        compound_id,
        title,
        url: document.url,
        size: document.size,
        sha256: document.sha256,
        status: document.status,
        index_name: document.index_name,
        indexer_name: document.indexer_name,
    })
}

/// Documents of a compound, ordered by id.
pub fn list_documents(conn: &Connection, compound_id: i64) -> AppResult<Vec<Document>> {
    let sql = format!(
        "SELECT {} FROM documents d WHERE d.compound_id = ?1 ORDER BY d.id",
        DOCUMENT_COLUMNS
    );
    query_documents(conn, &sql, params![compound_id])
}

/// Assign a document to a department.
///
/// The assignment takes the department's compound; the document must belong
/// to the same compound. Returns `false` when the assignment already existed.
pub fn assign_document(conn: &Connection, department_id: i64, document_id: i64) -> AppResult<bool> {
    let compound_id = department_compound(conn, department_id)?.ok_or_else(|| {
        AppError::Catalog(format!("Department {} not found", department_id))
    })?;

    let document_compound: Option<i64> = conn
        .query_row(
            "SELECT compound_id FROM documents WHERE id = ?1",
            params![document_id],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| AppError::Catalog(format!("Failed to look up document: {}", e)))?;

    match document_compound {
        None => {
            return Err(AppError::Catalog(format!(
                "Document {} not found",
                document_id
            )))
        }
        Some(owner) if owner != compound_id => {
            return Err(AppError::Catalog(format!(
                "Document {} belongs to compound {}, not {}",
                document_id, owner, compound_id
            )))
        }
        Some(_) => {}
    }

    let inserted = conn
        .execute(
            "INSERT OR IGNORE INTO department_documents (department_id, document_id, compound_id)
             VALUES (?1, ?2, ?3)",
            params![department_id, document_id, compound_id],
        )
        .map_err(|e| AppError::Catalog(format!("Failed to assign document: {}", e)))?;

    tracing::debug!(
        department = department_id,
        document = document_id,
        inserted,
        "Assigned document"
    );
    Ok(inserted > 0)
}

/// Documents assigned to a department, ordered by id.
pub fn list_department_documents(
    conn: &Connection,
    department_id: i64,
    compound_id: i64,
) -> AppResult<Vec<Document>> {
    let sql = format!(
        "SELECT {} FROM documents d
         JOIN department_documents dd ON d.id = dd.document_id
         WHERE dd.department_id = ?1 AND dd.compound_id = ?2
         ORDER BY d.id",
        DOCUMENT_COLUMNS
    );
    query_documents(conn, &sql, params![department_id, compound_id])
}

/// Ids of the documents assigned to a department.
pub fn department_document_ids(
    conn: &Connection,
    department_id: i64,
    compound_id: i64,
) -> AppResult<BTreeSet<i64>> {
    let mut stmt = conn
        .prepare(
            "SELECT document_id FROM department_documents
             WHERE department_id = ?1 AND compound_id = ?2",
        )
        .map_err(|e| AppError::Catalog(format!("Failed to prepare query: {}", e)))?;

    let ids = stmt
        .query_map(params![department_id, compound_id], |row| row.get(0))
        .map_err(|e| AppError::Catalog(format!("Failed to query assignments: {}", e)))?
        .collect::<Result<BTreeSet<i64>, _>>()
        .map_err(|e| AppError::Catalog(format!("Failed to read assignment: {}", e)))?;

    Ok(ids)
}

/// Check that a department exists in a compound and that every id is
/// assigned to it.
pub fn verify_document_scope(
    conn: &Connection,
    compound_id: i64,
    department_id: i64,
    document_ids: &[i64],
) -> AppResult<()> {
    if get_department(conn, department_id, compound_id)?.is_none() {
        return Err(AppError::Scope(format!(
            "Department {} not found in compound {}",
            department_id, compound_id
        )));
    }

    let assigned = department_document_ids(conn, department_id, compound_id)?;
    let unassigned: BTreeSet<i64> = document_ids
        .iter()
        .copied()
        .filter(|id| !assigned.contains(id))
        .collect();

    if !unassigned.is_empty() {
        let ids: Vec<String> = unassigned.iter().map(|id| id.to_string()).collect();
        return Err(AppError::Scope(format!(
            "Documents not assigned to department {}: {}",
            department_id,
            ids.join(", ")
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compounds::create_compound;
    use crate::departments::create_department;
    use crate::schema::init_catalog;
    use tempfile::TempDir;

    struct Fixture {
        _temp: TempDir,
        conn: Connection,
        north: i64,
        south: i64,
        finance: i64,
    }

    fn fixture() -> Fixture {
        let temp = TempDir::new().unwrap();
        let conn = init_catalog(&temp.path().join("catalog.db")).unwrap();
        let north = create_compound(&conn, "North").unwrap().id;
        let south = create_compound(&conn, "South").unwrap().id;
        let finance = create_department(&conn, north, "Finance").unwrap().id;
        Fixture {
            _temp: temp,
            conn,
            north,
            south,
            finance,
        }
    }

    #[test]
    fn test_add_and_list_documents() {
        let f = fixture();
        let mut policy = NewDocument::new(9, "Refund policy");
        policy.url = Some("https://files.example/refunds.pdf".to_string());
        policy.size = 2048;
        add_document(&f.conn, f.north, policy).unwrap();
        add_document(&f.conn, f.north, NewDocument::new(5, "Leave policy")).unwrap();
        add_document(&f.conn, f.south, NewDocument::new(7, "Other")).unwrap();

        let docs = list_documents(&f.conn, f.north).unwrap();
        assert_eq!(docs.iter().map(|d| d.id).collect::<Vec<_>>(), vec![5, 9]);
        assert_eq!(docs[1].size, 2048);
        assert_eq!(docs[1].url.as_deref(), Some("https://files.example/refunds.pdf"));
    }

    #[test]
    fn test_add_document_validation() {
        let f = fixture();
        assert!(add_document(&f.conn, f.north, NewDocument::new(0, "Zero")).is_err());
        assert!(add_document(&f.conn, f.north, NewDocument::new(1, " ")).is_err());
        assert!(add_document(&f.conn, f.south + 5, NewDocument::new(1, "Lost")).is_err());

        add_document(&f.conn, f.north, NewDocument::new(1, "Once")).unwrap();
        assert!(add_document(&f.conn, f.north, NewDocument::new(1, "Twice")).is_err());
    }

    #[test]
    fn test_assign_and_list() {
        let f = fixture();
        add_document(&f.conn, f.north, NewDocument::new(9, "B")).unwrap();
        add_document(&f.conn, f.north, NewDocument::new(5, "A")).unwrap();
        add_document(&f.conn, f.north, NewDocument::new(6, "Unassigned")).unwrap();

        assert!(assign_document(&f.conn, f.finance, 9).unwrap());
        assert!(assign_document(&f.conn, f.finance, 5).unwrap());
        assert!(!assign_document(&f.conn, f.finance, 5).unwrap());

        let docs = list_department_documents(&f.conn, f.finance, f.north).unwrap();
        assert_eq!(docs.iter().map(|d| d.id).collect::<Vec<_>>(), vec![5, 9]);

        let ids = department_document_ids(&f.conn, f.finance, f.north).unwrap();
        assert_eq!(ids.into_iter().collect::<Vec<_>>(), vec![5, 9]);

        assert!(list_department_documents(&f.conn, f.finance, f.south)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_assign_rejects_other_compound() {
        let f = fixture();
        add_document(&f.conn, f.south, NewDocument::new(3, "Elsewhere")).unwrap();

        let err = assign_document(&f.conn, f.finance, 3).unwrap_err();
        assert!(err.to_string().contains("belongs to compound"));
        assert!(assign_document(&f.conn, f.finance, 99).is_err());
        assert!(assign_document(&f.conn, f.finance + 10, 3).is_err());
    }

    #[test]
    fn test_verify_document_scope() {
        let f = fixture();
        add_document(&f.conn, f.north, NewDocument::new(5, "A")).unwrap();
        add_document(&f.conn, f.north, NewDocument::new(9, "B")).unwrap();
        assign_document(&f.conn, f.finance, 5).unwrap();

        assert!(verify_document_scope(&f.conn, f.north, f.finance, &[]).is_ok());
        assert!(verify_document_scope(&f.conn, f.north, f.finance, &[5]).is_ok());

        let err = verify_document_scope(&f.conn, f.north, f.finance, &[12, 5, 9]).unwrap_err();
        assert!(matches!(err, AppError::Scope(_)));
        assert!(err.to_string().contains("9, 12"));

        let err = verify_document_scope(&f.conn, f.south, f.finance, &[5]).unwrap_err();
        assert!(matches!(err, AppError::Scope(_)));
    }
}
