//! Test infrastructure for integration tests
//!
//! Provides isolated database setup/teardown and CLI command execution helpers.
//! Each test gets its own database instance to ensure no shared state.

use chrono::NaiveDate;
use schedgrid_cli::commands::{
    AddCommand, CenterAction, CenterCommand, CheckCommand, ListCommand, TimelineCommand,
    UpdateCommand,
};
use schedgrid_db::{Database, WorkOrderStatus};
use schedgrid_timeline::Granularity;
use std::path::PathBuf;

/// Test context containing an isolated database and temp directory
pub struct TestContext {
    pub db: Database,
    pub temp_dir: PathBuf,
}

impl TestContext {
    /// Create a new test context with an isolated database.
    ///
    /// Each call creates a uniquely named temp directory using process ID,
    /// thread ID, and nanosecond timestamp to guarantee isolation.
    pub async fn new() -> Self {
        let temp_dir = std::env::temp_dir().join(format!(
            "sgrid-integration-test-{}-{:?}-{}",
            std::process::id(),
            std::thread::current().id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));

        let db = Database::connect(&temp_dir).await.unwrap();
        db.init().await.unwrap();

        Self { db, temp_dir }
    }

    /// Create a work center through the CLI and return its ID.
    pub async fn add_center(&self, name: &str) -> String {
        let output = center_cmd(CenterAction::Add {
            name: name.to_string(),
        })
        .execute(&self.db)
        .await
        .unwrap();
        output
            .strip_prefix("Created work center: ")
            .unwrap()
            .to_string()
    }

    /// Schedule an open work order through the CLI and return its ID.
    pub async fn add_order(&self, name: &str, center: &str, start: &str, end: &str) -> String {
        add_cmd(name, center, start, end)
            .execute(&self.db)
            .await
            .unwrap()
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.temp_dir);
    }
}

// =============================================================================
// Command Builder Helpers
// =============================================================================

/// Parse a `YYYY-MM-DD` literal.
pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn center_cmd(action: CenterAction) -> CenterCommand {
    CenterCommand { action }
}

/// Create an AddCommand for an open work order.
pub fn add_cmd(name: &str, center: &str, start: &str, end: &str) -> AddCommand {
    AddCommand {
        name: name.to_string(),
        center: center.to_string(),
        start: date(start),
        end: date(end),
        status: None,
    }
}

/// Create an AddCommand with an explicit status.
pub fn add_cmd_with_status(
    name: &str,
    center: &str,
    start: &str,
    end: &str,
    status: WorkOrderStatus,
) -> AddCommand {
    AddCommand {
        status: Some(status),
        ..add_cmd(name, center, start, end)
    }
}

/// Create an UpdateCommand that changes nothing.
pub fn update_cmd(id: &str) -> UpdateCommand {
    UpdateCommand {
        id: id.to_string(),
        name: None,
        center: None,
        start: None,
        end: None,
        status: None,
    }
}

pub fn list_cmd(center: Option<&str>, statuses: Vec<WorkOrderStatus>) -> ListCommand {
    ListCommand {
        center: center.map(String::from),
        statuses,
        json: false,
    }
}

pub fn check_cmd(center: &str, start: &str, end: &str, exclude: Option<&str>) -> CheckCommand {
    CheckCommand {
        center: center.to_string(),
        start: date(start),
        end: date(end),
        exclude: exclude.map(String::from),
    }
}

/// Create a TimelineCommand over an explicit range with a pinned today.
pub fn timeline_cmd(zoom: Granularity, from: &str, to: &str, today: &str) -> TimelineCommand {
    TimelineCommand {
        zoom,
        from: Some(date(from)),
        to: Some(date(to)),
        extend_left: 0,
        extend_right: 0,
        center: None,
        width: 50,
        today: Some(date(today)),
    }
}
