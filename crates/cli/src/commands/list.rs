//! List command for displaying work orders
//!
//! Implements the `sgrid list` command with work center and status filters.

use super::parse_status;
use clap::Args;
use schedgrid_db::{Database, DbError, WorkOrder, WorkOrderFilter, WorkOrderStatus};

/// List work orders with optional filters
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Only orders on this work center
    #[arg(short, long)]
    pub center: Option<String>,

    /// Filter by status (can be specified multiple times)
    #[arg(short, long = "status", value_parser = parse_status)]
    pub statuses: Vec<WorkOrderStatus>,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl ListCommand {
    /// Execute the list command, returning matching orders ordered by start date.
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the work center filter names an unknown center or
    /// the query fails.
    pub async fn execute(&self, db: &Database) -> Result<Vec<WorkOrder>, DbError> {
        if let Some(center) = &self.center
            && !db.work_centers().exists(center).await?
        {
            return Err(DbError::NotFound {
                entity: "Work center",
                id: center.clone(),
            });
        }

        db.work_orders().list(&self.build_filter()).await
    }

    /// Convert the CLI arguments into a repository filter.
    fn build_filter(&self) -> WorkOrderFilter {
        let mut filter = WorkOrderFilter::new();
        if let Some(center) = &self.center {
            filter = filter.with_work_center(center);
        }
        if !self.statuses.is_empty() {
            filter = filter.with_statuses(self.statuses.iter().copied());
        }
        filter
    }
}
