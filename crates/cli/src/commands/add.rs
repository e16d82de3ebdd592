//! Add command for scheduling new work orders
//!
//! Implements the `sgrid add` command. The store rejects blank names,
//! inverted spans, unknown work centers and overlaps.

use super::{parse_date, parse_status};
use crate::id::{IdGenerator, WORK_ORDER_PREFIX};
use chrono::NaiveDate;
use clap::Args;
use schedgrid_db::{Database, DbError, NewWorkOrder, WorkOrderStatus};

/// Schedule a new work order
#[derive(Debug, Args)]
pub struct AddCommand {
    /// Name of the work order
    #[arg(required = true)]
    pub name: String,

    /// Work center ID to book the order on
    #[arg(short, long)]
    pub center: String,

    /// First day of the order (YYYY-MM-DD)
    #[arg(short, long, value_parser = parse_date)]
    pub start: NaiveDate,

    /// Day the work center becomes free again (YYYY-MM-DD, exclusive)
    #[arg(short, long, value_parser = parse_date)]
    pub end: NaiveDate,

    /// Initial status (open, in_progress, complete, blocked)
    #[arg(long, value_parser = parse_status)]
    pub status: Option<WorkOrderStatus>,
}

impl AddCommand {
    /// Execute the add command, returning the new work order's ID.
    ///
    /// # Errors
    ///
    /// Returns `DbError` if:
    /// - The name is empty or the dates are not strictly increasing
    /// - The work center doesn't exist
    /// - The span overlaps another order on the work center
    /// - Database operations fail
    pub async fn execute(&self, db: &Database) -> Result<String, DbError> {
        let id = self.generate_unique_id(db).await?;

        let mut order = NewWorkOrder::new(&self.name, &self.center, self.start, self.end);
        if let Some(status) = self.status {
            order = order.with_status(status);
        }

        db.work_orders().create(&id, &order).await?;
        Ok(id)
    }

    /// Generate a unique ID that doesn't collide with existing work orders.
    async fn generate_unique_id(&self, db: &Database) -> Result<String, DbError> {
        let mut generator = IdGenerator::new(WORK_ORDER_PREFIX, &self.name);

        while let Some(id) = generator.next_id() {
            if !db.work_orders().exists(&id).await? {
                return Ok(id);
            }
        }

        Err(DbError::validation(
            "Failed to generate a unique work order ID after maximum retries",
        ))
    }
}
