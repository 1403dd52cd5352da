//! Document command handler.

use super::{open_catalog, print_json};
use clap::{Args, Subcommand};
use deptrag_catalog::{Document, NewDocument};
use deptrag_core::{config::AppConfig, AppResult};

/// Manage documents and department assignments
#[derive(Args, Debug)]
pub struct DocumentCommand {
    #[command(subcommand)]
    pub action: DocumentAction,
}

#[derive(Subcommand, Debug)]
pub enum DocumentAction {
    /// List the documents of a compound
    List {
        #[arg(long)]
        compound: i64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Register a document that exists in the search index
    Add(DocumentAddCommand),
    /// Assign a document to a department
    Assign {
        #[arg(long)]
        department: i64,

        #[arg(long)]
        document: i64,
    },
    /// List the documents assigned to a department
    Assigned {
        #[arg(long)]
        department: i64,

        #[arg(long)]
        compound: i64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Register a document
#[derive(Args, Debug)]
pub struct DocumentAddCommand {
    /// Document id as stored in the search index
    #[arg(long)]
    pub id: i64,

    #[arg(long)]
    pub compound: i64,

    #[arg(long)]
    pub title: String,

    #[arg(long)]
    pub url: Option<String>,

    /// Size in bytes
    #[arg(long, default_value = "0")]
    pub size: i64,

    #[arg(long)]
    pub sha256: Option<String>,

    #[arg(long)]
    pub status: Option<String>,

    /// Search index holding the document
    #[arg(long)]
    pub index_name: Option<String>,

    /// Indexer that ingested the document
    #[arg(long)]
    pub indexer_name: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl DocumentAddCommand {
    fn to_new_document(&self) -> NewDocument {
        NewDocument {
            id: self.id,
            title: self.title.clone(),
            url: self.url.clone(),
            size: self.size,
            sha256: self.sha256.clone(),
            status: self.status.clone(),
            index_name: self.index_name.clone(),
            indexer_name: self.indexer_name.clone(),
        }
    }
}

fn print_documents(documents: &[Document]) {
    if documents.is_empty() {
        println!("No documents found.");
    }
    for document in documents {
        println!(
            "{:>6}  {}  {}",
            document.id,
            document.title,
            document.status.as_deref().unwrap_or("-")
        );
    }
}

impl DocumentCommand {
    pub fn execute(&self, config: &AppConfig) -> AppResult<()> {
        let conn = open_catalog(config)?;

        match &self.action {
            DocumentAction::List { compound, json } => {
                let documents = deptrag_catalog::list_documents(&conn, *compound)?;
                if *json {
                    return print_json(&documents);
                }
                print_documents(&documents);
            }
            DocumentAction::Add(cmd) => {
                let document =
                    deptrag_catalog::add_document(&conn, cmd.compound, cmd.to_new_document())?;
                if cmd.json {
                    return print_json(&document);
                }
                println!("Added document {} ({})", document.id, document.title);
            }
            DocumentAction::Assign {
                department,
                document,
            } => {
                if deptrag_catalog::assign_document(&conn, *department, *document)? {
                    println!("Assigned document {} to department {}", document, department);
                } else {
                    println!(
                        "Document {} was already assigned to department {}",
                        document, department
                    );
                }
            }
            DocumentAction::Assigned {
                department,
                compound,
                json,
            } => {
                let documents =
                    deptrag_catalog::list_department_documents(&conn, *department, *compound)?;
                if *json {
                    return print_json(&documents);
                }
                print_documents(&documents);
            }
        }

        Ok(())
    }
}
