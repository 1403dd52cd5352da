//! Search command handler.
//!
//! Answers a question from the documents a department may see.

use super::{open_catalog, print_json};
use clap::Args;
use deptrag_core::{config::AppConfig, AppError, AppResult};
use deptrag_knowledge::SearchOrchestrator;

/// Answer a question from a department's documents
#[derive(Args, Debug)]
pub struct SearchCommand {
    /// The question to ask
    pub query: String,

    /// Compound the department belongs to
    #[arg(long)]
    pub compound: i64,

    /// Department to search as
    #[arg(long)]
    pub department: i64,

    /// Restrict the search to these document ids (repeat or comma-separate)
    #[arg(long = "document", value_delimiter = ',')]
    pub documents: Vec<i64>,

    /// Restrict the search to every document assigned to the department
    #[arg(long, conflicts_with = "documents")]
    pub department_only: bool,

    /// Skip checking the document ids against the catalog
    #[arg(long)]
    pub skip_verify: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl SearchCommand {
    /// Execute the search command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!(
            compound = self.compound,
            department = self.department,
            "Executing search command"
        );

        config.validate()?;

        let document_ids = self.resolve_documents(config)?;
        let orchestrator = SearchOrchestrator::from_config(config)?;

        let search = orchestrator.search_department(
            self.department,
            self.compound,
            &self.query,
            &document_ids,
        );

        let result = tokio::select! {
            result = search => result?,
            _ = tokio::signal::ctrl_c() => {
                tracing::warn!("Search cancelled by user");
                return Err(AppError::Other("Search cancelled".to_string()));
            }
        };

        if self.json {
            print_json(&result)?;
        } else {
            println!("{}", result.answer);
        }

        Ok(())
    }

    /// Work out the allow-list for this request.
    ///
    /// Explicit ids are checked against the catalog when one exists.
    fn resolve_documents(&self, config: &AppConfig) -> AppResult<Vec<i64>> {
        if self.department_only {
            let conn = open_catalog(config)?;
            deptrag_catalog::verify_document_scope(&conn, self.compound, self.department, &[])?;

            let ids = deptrag_catalog::department_document_ids(&conn, self.department, self.compound)?;
            if ids.is_empty() {
                return Err(AppError::Scope(format!(
                    "Department {} has no assigned documents",
                    self.department
                )));
            }
            tracing::debug!("Using {} assigned documents", ids.len());
            return Ok(ids.into_iter().collect());
        }

        if self.skip_verify || self.documents.is_empty() {
            return Ok(self.documents.clone());
        }

        if config.catalog_db_path().exists() {
            let conn = open_catalog(config)?;
            deptrag_catalog::verify_document_scope(
                &conn,
                self.compound,
                self.department,
                &self.documents,
            )?;
        } else {
            tracing::debug!("No catalog found; document ids are not verified");
        }

        Ok(self.documents.clone())
    }
}
