//! Work center repository
//!
//! Work centers are the resource directory of the schedule: every work
//! order is booked on exactly one of them.

use crate::error::{DbError, DbResult};
use crate::models::WorkCenter;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tracing::debug;

/// Repository for work center operations
pub struct WorkCenterRepository<'a> {
    client: &'a Surreal<Db>,
}

/// Internal row type for deserializing from SurrealDB
#[derive(Debug, Deserialize)]
struct WorkCenterRow {
    id: surrealdb::sql::Thing,
    name: String,
    created_at: Option<DateTime<Utc>>,
}

impl WorkCenterRow {
    fn into_work_center(self) -> WorkCenter {
        WorkCenter {
            id: self.id.id.to_raw(),
            name: self.name,
            created_at: self.created_at,
        }
    }
}

/// Row for counting records
#[derive(Debug, Deserialize)]
struct CountRow {
    count: usize,
}

impl<'a> WorkCenterRepository<'a> {
    /// Create a new WorkCenterRepository with the given database client
    pub fn new(client: &'a Surreal<Db>) -> Self {
        Self { client }
    }

    /// Check if a work center with the given ID exists.
    pub async fn exists(&self, id: &str) -> DbResult<bool> {
        Ok(self.get(id).await?.is_some())
    }

    /// Create a new work center with the specified ID.
    ///
    /// # Errors
    ///
    /// Returns `DbError::ValidationError` if the name is blank.
    /// Returns `DbError::Query` if the database operation fails.
    pub async fn create(&self, id: &str, name: &str) -> DbResult<WorkCenter> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DbError::validation("Work center name cannot be empty"));
        }

        debug!("Creating work center: {} with name: {}", id, name);
        self.client
            .query(r#"CREATE type::thing("work_center", $id) SET name = $name"#)
            .bind(("id", id.to_string()))
            .bind(("name", name.to_string()))
            .await?
            .check()?;

        self.get(id).await?.ok_or_else(|| DbError::NotFound {
            entity: "Work center",
            id: id.to_string(),
        })
    }

    /// Get a work center by ID.
    ///
    /// # Returns
    ///
    /// `Some(WorkCenter)` if found, `None` otherwise.
    pub async fn get(&self, id: &str) -> DbResult<Option<WorkCenter>> {
        let row: Option<WorkCenterRow> = self
            .client
            .select(("work_center", id))
            .await
            .map_err(|e| DbError::Query(Box::new(e)))?;
        Ok(row.map(WorkCenterRow::into_work_center))
    }

    /// List all work centers ordered by name.
    pub async fn list(&self) -> DbResult<Vec<WorkCenter>> {
        let mut result = self
            .client
            .query("SELECT * FROM work_center ORDER BY name ASC")
            .await?;
        let rows: Vec<WorkCenterRow> = result.take(0)?;
        debug!("Listed {} work centers", rows.len());
        Ok(rows.into_iter().map(WorkCenterRow::into_work_center).collect())
    }

    /// Count the work orders booked on a work center.
    pub async fn order_count(&self, id: &str) -> DbResult<usize> {
        let mut result = self
            .client
            .query("SELECT count() AS count FROM work_order WHERE work_center = $id GROUP ALL")
            .bind(("id", id.to_string()))
            .await?;
        let rows: Vec<CountRow> = result.take(0)?;
        Ok(rows.first().map(|r| r.count).unwrap_or(0))
    }

    /// Delete a work center.
    ///
    /// # Errors
    ///
    /// Returns `DbError::NotFound` if the work center does not exist.
    /// Returns `DbError::WorkCenterInUse` if work orders are still booked on it.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        if !self.exists(id).await? {
            return Err(DbError::NotFound {
                entity: "Work center",
                id: id.to_string(),
            });
        }

        let order_count = self.order_count(id).await?;
        if order_count > 0 {
            return Err(DbError::WorkCenterInUse {
                id: id.to_string(),
                order_count,
            });
        }

        debug!("Deleting work center: {}", id);
        self.client
            .query(r#"DELETE type::thing("work_center", $id)"#)
            .bind(("id", id.to_string()))
            .await?
            .check()?;
        Ok(())
    }
}
