//! Compound command handler.

use super::{open_catalog, print_json};
use clap::{Args, Subcommand};
use deptrag_core::{config::AppConfig, AppResult};

/// Manage compounds
#[derive(Args, Debug)]
pub struct CompoundCommand {
    #[command(subcommand)]
    pub action: CompoundAction,
}

#[derive(Subcommand, Debug)]
pub enum CompoundAction {
    /// List all compounds
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create a compound
    Create {
        /// Compound title
        title: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

impl CompoundCommand {
    pub fn execute(&self, config: &AppConfig) -> AppResult<()> {
        let conn = open_catalog(config)?;

        match &self.action {
            CompoundAction::List { json } => {
                let compounds = deptrag_catalog::list_compounds(&conn)?;
                if *json {
                    return print_json(&compounds);
                }
                if compounds.is_empty() {
                    println!("No compounds found.");
                }
                for compound in compounds {
                    println!("{:>6}  {}", compound.id, compound.title);
                }
            }
            CompoundAction::Create { title, json } => {
                let compound = deptrag_catalog::create_compound(&conn, title)?;
                if *json {
                    return print_json(&compound);
                }
                println!("Created compound {} ({})", compound.id, compound.title);
            }
        }

        Ok(())
    }
}
