//! Update command for changing work orders
//!
//! Implements `sgrid update`. Rescheduling is overlap-checked against the
//! other orders on the target work center; the order never conflicts with
//! its own previous span.

use super::{parse_date, parse_status};
use chrono::NaiveDate;
use clap::Args;
use schedgrid_db::{Database, DbError, WorkOrderStatus, WorkOrderUpdate};

/// Change a work order
#[derive(Debug, Args)]
pub struct UpdateCommand {
    /// Work order ID
    pub id: String,

    /// New name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Move to another work center
    #[arg(short, long)]
    pub center: Option<String>,

    /// New first day (YYYY-MM-DD)
    #[arg(short, long, value_parser = parse_date)]
    pub start: Option<NaiveDate>,

    /// New end day (YYYY-MM-DD, exclusive)
    #[arg(short, long, value_parser = parse_date)]
    pub end: Option<NaiveDate>,

    /// New status (open, in_progress, complete, blocked)
    #[arg(long, value_parser = parse_status)]
    pub status: Option<WorkOrderStatus>,
}

impl UpdateCommand {
    /// Execute the update command.
    ///
    /// # Errors
    ///
    /// Returns `DbError` if:
    /// - No changes were given
    /// - The work order or target work center doesn't exist
    /// - The new span is inverted or overlaps another order
    /// - Database operations fail
    pub async fn execute(&self, db: &Database) -> Result<String, DbError> {
        let update = self.build_update();
        let order = db.work_orders().update(&self.id, &update).await?;
        Ok(format!(
            "Updated work order: {} ({} on {}, {} to {})",
            order.id, order.status, order.work_center, order.start_date, order.end_date
        ))
    }

    fn build_update(&self) -> WorkOrderUpdate {
        let mut update = WorkOrderUpdate::new();
        if let Some(name) = &self.name {
            update = update.with_name(name);
        }
        if let Some(center) = &self.center {
            update = update.with_work_center(center);
        }
        if let Some(start) = self.start {
            update = update.with_start_date(start);
        }
        if let Some(end) = self.end {
            update = update.with_end_date(end);
        }
        if let Some(status) = self.status {
            update = update.with_status(status);
        }
        update
    }
}
