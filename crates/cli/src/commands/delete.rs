//! Delete command for removing work orders

use clap::Args;
use schedgrid_db::{Database, DbError};

/// Remove a work order
#[derive(Debug, Args)]
pub struct DeleteCommand {
    /// Work order ID
    pub id: String,
}

impl DeleteCommand {
    /// Execute the delete command.
    ///
    /// # Errors
    ///
    /// Returns `DbError::NotFound` if the work order doesn't exist.
    pub async fn execute(&self, db: &Database) -> Result<String, DbError> {
        db.work_orders().delete(&self.id).await?;
        Ok(format!("Deleted work order: {}", self.id))
    }
}
