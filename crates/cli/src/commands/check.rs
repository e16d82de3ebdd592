//! Check command for conflict detection
//!
//! Implements `sgrid check`: reports whether a span would overlap an
//! existing order on a work center, without scheduling anything.

use super::parse_date;
use chrono::NaiveDate;
use clap::Args;
use schedgrid_db::{Database, DbError};

/// Check a span for conflicts on a work center
#[derive(Debug, Args)]
pub struct CheckCommand {
    /// Work center ID
    #[arg(short, long)]
    pub center: String,

    /// First day of the candidate span (YYYY-MM-DD)
    #[arg(short, long, value_parser = parse_date)]
    pub start: NaiveDate,

    /// End of the candidate span (YYYY-MM-DD, exclusive)
    #[arg(short, long, value_parser = parse_date)]
    pub end: NaiveDate,

    /// Work order to ignore, e.g. the one being rescheduled
    #[arg(long)]
    pub exclude: Option<String>,
}

impl CheckCommand {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the span is inverted, the work center doesn't
    /// exist, or the query fails.
    pub async fn execute(&self, db: &Database) -> Result<String, DbError> {
        if self.start >= self.end {
            return Err(DbError::validation(format!(
                "Start date ({}) must be before end date ({})",
                self.start, self.end
            )));
        }

        if !db.work_centers().exists(&self.center).await? {
            return Err(DbError::NotFound {
                entity: "Work center",
                id: self.center.clone(),
            });
        }

        let conflict = db
            .work_orders()
            .find_conflict(&self.center, self.start, self.end, self.exclude.as_deref())
            .await?;

        Ok(match conflict {
            Some(order) => format!(
                "Conflict: '{}' ({}) occupies {} to {} on {}",
                order.id, order.name, order.start_date, order.end_date, self.center
            ),
            None => format!(
                "No conflict: {} to {} is free on {}",
                self.start, self.end, self.center
            ),
        })
    }
}
