//! Department command handler.

use super::{open_catalog, print_json};
use clap::{Args, Subcommand};
use deptrag_core::{config::AppConfig, AppError, AppResult};

/// Manage departments
#[derive(Args, Debug)]
pub struct DepartmentCommand {
    #[command(subcommand)]
    pub action: DepartmentAction,
}

#[derive(Subcommand, Debug)]
pub enum DepartmentAction {
    /// List the departments of a compound
    List {
        #[arg(long)]
        compound: i64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create a department
    Create {
        /// Department title
        title: String,

        #[arg(long)]
        compound: i64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show a department and its assigned documents
    Show {
        /// Department id
        id: i64,

        #[arg(long)]
        compound: i64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

impl DepartmentCommand {
    pub fn execute(&self, config: &AppConfig) -> AppResult<()> {
        let conn = open_catalog(config)?;

        match &self.action {
            DepartmentAction::List { compound, json } => {
                let departments = deptrag_catalog::list_departments(&conn, *compound)?;
                if *json {
                    return print_json(&departments);
                }
                if departments.is_empty() {
                    println!("No departments in compound {}.", compound);
                }
                for department in departments {
                    println!("{:>6}  {}", department.id, department.title);
                }
            }
            DepartmentAction::Create {
                title,
                compound,
                json,
            } => {
                let department = deptrag_catalog::create_department(&conn, *compound, title)?;
                if *json {
                    return print_json(&department);
                }
                println!(
                    "Created department {} ({}) in compound {}",
                    department.id, department.title, department.compound_id
                );
            }
            DepartmentAction::Show { id, compound, json } => {
                let department = deptrag_catalog::get_department(&conn, *id, *compound)?
                    .ok_or_else(|| {
                        AppError::Catalog(format!(
                            "Department {} not found in compound {}",
                            id, compound
                        ))
                    })?;
                let documents =
                    deptrag_catalog::list_department_documents(&conn, *id, *compound)?;

                if *json {
                    let output = serde_json::json!({
                        "department": department,
                        "documents": documents,
                    });
                    return print_json(&output);
                }

                println!("Department {}: {}", department.id, department.title);
                println!("Compound:   {}", department.compound_id);
                println!("Documents:  {}", documents.len());
                for document in documents {
                    println!("  {:>6}  {}", document.id, document.title);
                }
            }
        }

        Ok(())
    }
}
