//! Data models for Schedgrid
//!
//! Defines Rust types for work centers (the schedulable resources) and the
//! work orders booked on them.

use chrono::{DateTime, NaiveDate, Utc};
use schedgrid_timeline::Interval;
use serde::{Deserialize, Serialize};

/// Work order lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkOrderStatus {
    Open,
    InProgress,
    Complete,
    Blocked,
}

impl WorkOrderStatus {
    /// All statuses in display order
    pub const ALL: [WorkOrderStatus; 4] = [
        WorkOrderStatus::Open,
        WorkOrderStatus::InProgress,
        WorkOrderStatus::Complete,
        WorkOrderStatus::Blocked,
    ];

    /// Returns the string representation used in the database
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkOrderStatus::Open => "open",
            WorkOrderStatus::InProgress => "in_progress",
            WorkOrderStatus::Complete => "complete",
            WorkOrderStatus::Blocked => "blocked",
        }
    }

    /// Parse the database representation (also accepts `in-progress`).
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "open" => Some(WorkOrderStatus::Open),
            "in_progress" | "in-progress" => Some(WorkOrderStatus::InProgress),
            "complete" => Some(WorkOrderStatus::Complete),
            "blocked" => Some(WorkOrderStatus::Blocked),
            _ => None,
        }
    }
}

impl std::fmt::Display for WorkOrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A machine, line or crew that work orders are scheduled on
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkCenter {
    /// Record key (without the table prefix)
    pub id: String,
    /// Display name
    pub name: String,
    /// Creation timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// A scheduled block of work on one work center
///
/// Dates are calendar dates and the span is half-open: the order occupies
/// its work center from `start_date` up to, not including, `end_date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkOrder {
    /// Record key (without the table prefix)
    pub id: String,
    /// Display name
    pub name: String,
    /// Key of the work center this order is booked on
    pub work_center: String,
    /// Current status
    pub status: WorkOrderStatus,
    /// First scheduled day
    pub start_date: NaiveDate,
    /// Day the work center becomes free again
    pub end_date: NaiveDate,
    /// Creation timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Interval for WorkOrder {
    fn interval_id(&self) -> &str {
        &self.id
    }

    fn resource_id(&self) -> &str {
        &self.work_center
    }

    fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    fn end_date(&self) -> NaiveDate {
        self.end_date
    }
}

/// Input for creating a work order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWorkOrder {
    pub name: String,
    pub work_center: String,
    pub status: WorkOrderStatus,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl NewWorkOrder {
    /// Create a new open work order
    pub fn new(
        name: impl Into<String>,
        work_center: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            name: name.into(),
            work_center: work_center.into(),
            status: WorkOrderStatus::Open,
            start_date,
            end_date,
        }
    }

    /// Set the initial status
    pub fn with_status(mut self, status: WorkOrderStatus) -> Self {
        self.status = status;
        self
    }
}
