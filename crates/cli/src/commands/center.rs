//! Center command for managing work centers
//!
//! Implements `sgrid center add|list|delete`.

use crate::id::{IdGenerator, WORK_CENTER_PREFIX};
use crate::output;
use clap::{Args, Subcommand};
use schedgrid_db::{Database, DbError};

/// Manage work centers
#[derive(Debug, Args)]
pub struct CenterCommand {
    #[command(subcommand)]
    pub action: CenterAction,
}

/// Work center subcommands
#[derive(Debug, Subcommand)]
pub enum CenterAction {
    /// Create a work center
    Add {
        /// Display name of the work center
        #[arg(required = true)]
        name: String,
    },
    /// List work centers
    List,
    /// Delete a work center with no work orders
    Delete {
        /// Work center ID
        id: String,
    },
}

impl CenterCommand {
    /// Execute the center command.
    ///
    /// # Errors
    ///
    /// Returns `DbError` if:
    /// - The name is empty
    /// - The work center to delete doesn't exist or still has work orders
    /// - Database operations fail
    pub async fn execute(&self, db: &Database) -> Result<String, DbError> {
        match &self.action {
            CenterAction::Add { name } => {
                let id = generate_unique_id(db, name).await?;
                let center = db.work_centers().create(&id, name).await?;
                Ok(format!("Created work center: {}", center.id))
            }
            CenterAction::List => {
                let centers = db.work_centers().list().await?;
                Ok(output::format_center_table(&centers))
            }
            CenterAction::Delete { id } => {
                db.work_centers().delete(id).await?;
                Ok(format!("Deleted work center: {}", id))
            }
        }
    }
}

/// Generate a work center ID that doesn't collide with existing ones.
async fn generate_unique_id(db: &Database, name: &str) -> Result<String, DbError> {
    let mut generator = IdGenerator::new(WORK_CENTER_PREFIX, name);

    while let Some(id) = generator.next_id() {
        if !db.work_centers().exists(&id).await? {
            return Ok(id);
        }
    }

    Err(DbError::validation(
        "Failed to generate a unique work center ID after maximum retries",
    ))
}
