//! Record management for compounds, departments and documents.
//!
//! The catalog decides which documents a department may search. It is a
//! local SQLite database; the search index itself lives elsewhere.

pub mod compounds;
pub mod departments;
pub mod documents;
pub mod schema;
pub mod types;

pub use compounds::{create_compound, list_compounds};
pub use departments::{create_department, get_department, list_departments};
pub use documents::{
    add_document, assign_document, department_document_ids, list_department_documents,
    list_documents, verify_document_scope,
};
pub use rusqlite::Connection;
pub use schema::init_catalog;
pub use types::{Compound, Department, Document, NewDocument};
