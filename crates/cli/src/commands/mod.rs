//! CLI commands for Schedgrid
//!
//! Each subcommand is a clap `Args` struct with an async `execute` that runs
//! against an initialized [`Database`] and returns the text to print.

pub mod add;
pub mod center;
pub mod check;
pub mod delete;
pub mod list;
pub mod timeline;
pub mod update;

pub use add::AddCommand;
pub use center::{CenterAction, CenterCommand};
pub use check::CheckCommand;
pub use delete::DeleteCommand;
pub use list::ListCommand;
pub use timeline::TimelineCommand;
pub use update::UpdateCommand;

use crate::output;
use chrono::NaiveDate;
use clap::Subcommand;
use schedgrid_db::{Database, DbError, WorkOrderStatus};
use schedgrid_timeline::{Granularity, parse_calendar_date};

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage work centers
    Center(CenterCommand),
    /// Schedule a new work order
    Add(AddCommand),
    /// Change a work order
    Update(UpdateCommand),
    /// Remove a work order
    Delete(DeleteCommand),
    /// List work orders
    List(ListCommand),
    /// Check a span for conflicts on a work center
    Check(CheckCommand),
    /// Show the schedule on a timeline
    Timeline(TimelineCommand),
}

impl Command {
    /// Execute the command and return its printable output.
    pub async fn execute(&self, db: &Database) -> Result<String, DbError> {
        match self {
            Command::Center(cmd) => cmd.execute(db).await,
            Command::Add(cmd) => {
                let id = cmd.execute(db).await?;
                Ok(format!("Created work order: {}", id))
            }
            Command::Update(cmd) => cmd.execute(db).await,
            Command::Delete(cmd) => cmd.execute(db).await,
            Command::List(cmd) => {
                let orders = cmd.execute(db).await?;
                if cmd.json {
                    output::format_json(&orders)
                } else {
                    Ok(output::format_order_table(&orders))
                }
            }
            Command::Check(cmd) => cmd.execute(db).await,
            Command::Timeline(cmd) => cmd.execute(db).await,
        }
    }
}

/// Parse a calendar date (`YYYY-MM-DD` or an ISO 8601 timestamp)
pub(crate) fn parse_date(s: &str) -> Result<NaiveDate, String> {
    parse_calendar_date(s).map_err(|e| e.to_string())
}

/// Parse a work order status
pub(crate) fn parse_status(s: &str) -> Result<WorkOrderStatus, String> {
    WorkOrderStatus::parse(&s.to_lowercase()).ok_or_else(|| {
        format!(
            "invalid status '{}'. Valid values: open, in_progress, complete, blocked",
            s
        )
    })
}

/// Parse a timeline zoom level
pub(crate) fn parse_granularity(s: &str) -> Result<Granularity, String> {
    s.parse::<Granularity>().map_err(|e| e.to_string())
}
