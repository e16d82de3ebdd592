//! Work order repository
//!
//! CRUD for work orders plus the scheduling rules every write goes through:
//! a non-empty name, `start_date < end_date`, an existing work center, and
//! no overlap with another order on that work center.

use crate::error::{DbError, DbResult};
use crate::models::{NewWorkOrder, WorkOrder, WorkOrderStatus};
use crate::repository::WorkCenterRepository;
use chrono::{DateTime, NaiveDate, Utc};
use schedgrid_timeline::find_overlap;
use serde::Deserialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tracing::{debug, trace};

/// Storage format for calendar dates
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Repository for work order operations
pub struct WorkOrderRepository<'a> {
    client: &'a Surreal<Db>,
}

/// Partial update for a work order
///
/// Unset fields keep their stored value.
#[derive(Debug, Default, Clone)]
pub struct WorkOrderUpdate {
    pub name: Option<String>,
    pub work_center: Option<String>,
    pub status: Option<WorkOrderStatus>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl WorkOrderUpdate {
    /// Create a new empty update
    pub fn new() -> Self {
        Self::default()
    }

    /// Rename the order
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Move the order to another work center
    pub fn with_work_center(mut self, work_center: impl Into<String>) -> Self {
        self.work_center = Some(work_center.into());
        self
    }

    /// Set the status
    pub fn with_status(mut self, status: WorkOrderStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Set the start date
    pub fn with_start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    /// Set the end date
    pub fn with_end_date(mut self, date: NaiveDate) -> Self {
        self.end_date = Some(date);
        self
    }

    /// Check if any updates are specified
    pub fn has_updates(&self) -> bool {
        self.name.is_some()
            || self.work_center.is_some()
            || self.status.is_some()
            || self.start_date.is_some()
            || self.end_date.is_some()
    }

    /// Whether the update can move the order in time or across work centers
    fn reschedules(&self) -> bool {
        self.work_center.is_some() || self.start_date.is_some() || self.end_date.is_some()
    }

    fn apply_to(&self, order: &mut WorkOrder) {
        if let Some(name) = &self.name {
            order.name = name.trim().to_string();
        }
        if let Some(work_center) = &self.work_center {
            order.work_center = work_center.clone();
        }
        if let Some(status) = self.status {
            order.status = status;
        }
        if let Some(start) = self.start_date {
            order.start_date = start;
        }
        if let Some(end) = self.end_date {
            order.end_date = end;
        }
    }
}

/// Filter criteria for listing work orders
///
/// Criteria combine with AND; multiple statuses combine with OR.
#[derive(Debug, Default, Clone)]
pub struct WorkOrderFilter {
    /// Only orders on this work center
    pub work_center: Option<String>,
    /// Only orders in one of these statuses
    pub statuses: Vec<WorkOrderStatus>,
    /// Only orders still occupying their work center on or after this date
    pub from: Option<NaiveDate>,
    /// Only orders starting on or before this date
    pub to: Option<NaiveDate>,
}

impl WorkOrderFilter {
    /// Create a new empty filter (matches all orders)
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by work center
    pub fn with_work_center(mut self, work_center: impl Into<String>) -> Self {
        self.work_center = Some(work_center.into());
        self
    }

    /// Add a status to the filter
    pub fn with_status(mut self, status: WorkOrderStatus) -> Self {
        self.statuses.push(status);
        self
    }

    /// Add multiple statuses to the filter
    pub fn with_statuses(mut self, statuses: impl IntoIterator<Item = WorkOrderStatus>) -> Self {
        self.statuses.extend(statuses);
        self
    }

    /// Only orders intersecting the inclusive date window `[from, to]`
    pub fn within(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.from = Some(from);
        self.to = Some(to);
        self
    }

    /// WHERE conditions referencing the parameters bound by `list`
    fn conditions(&self) -> Vec<&'static str> {
        let mut conditions = Vec::new();
        if self.work_center.is_some() {
            conditions.push("work_center = $work_center");
        }
        if !self.statuses.is_empty() {
            conditions.push("status IN $statuses");
        }
        if self.from.is_some() {
            conditions.push("end_date > $from");
        }
        if self.to.is_some() {
            conditions.push("start_date <= $to");
        }
        conditions
    }
}

/// Internal row type for deserializing from SurrealDB
#[derive(Debug, Deserialize)]
struct WorkOrderRow {
    id: surrealdb::sql::Thing,
    name: String,
    work_center: String,
    status: String,
    start_date: String,
    end_date: String,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
}

impl WorkOrderRow {
    fn into_work_order(self) -> DbResult<WorkOrder> {
        let id = self.id.id.to_raw();
        let corrupt = |reason: String| DbError::CorruptRecord {
            entity: "work_order",
            id: id.clone(),
            reason,
        };

        let status = WorkOrderStatus::parse(&self.status)
            .ok_or_else(|| corrupt(format!("unknown status '{}'", self.status)))?;
        let start_date = NaiveDate::parse_from_str(&self.start_date, DATE_FORMAT)
            .map_err(|e| corrupt(format!("bad start_date '{}': {}", self.start_date, e)))?;
        let end_date = NaiveDate::parse_from_str(&self.end_date, DATE_FORMAT)
            .map_err(|e| corrupt(format!("bad end_date '{}': {}", self.end_date, e)))?;

        Ok(WorkOrder {
            id,
            name: self.name,
            work_center: self.work_center,
            status,
            start_date,
            end_date,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

impl<'a> WorkOrderRepository<'a> {
    /// Create a new WorkOrderRepository with the given database client
    pub fn new(client: &'a Surreal<Db>) -> Self {
        Self { client }
    }

    /// Create a new work order with the specified ID.
    ///
    /// # Errors
    ///
    /// Returns `DbError::ValidationError` if the name is blank or the dates are
    /// not strictly increasing.
    /// Returns `DbError::NotFound` if the work center does not exist.
    /// Returns `DbError::ScheduleConflict` if the span overlaps another order.
    pub async fn create(&self, id: &str, order: &NewWorkOrder) -> DbResult<WorkOrder> {
        let name = order.name.trim();
        self.validate_schedule(
            None,
            name,
            &order.work_center,
            order.start_date,
            order.end_date,
        )
        .await?;

        debug!(
            "Creating work order: {} on {} ({}..{})",
            id, order.work_center, order.start_date, order.end_date
        );
        self.client
            .query(
                r#"CREATE type::thing("work_order", $id) SET
                    name = $name,
                    work_center = $work_center,
                    status = $status,
                    start_date = $start_date,
                    end_date = $end_date"#,
            )
            .bind(("id", id.to_string()))
            .bind(("name", name.to_string()))
            .bind(("work_center", order.work_center.clone()))
            .bind(("status", order.status.as_str()))
            .bind(("start_date", format_date(order.start_date)))
            .bind(("end_date", format_date(order.end_date)))
            .await?
            .check()?;

        self.require(id).await
    }

    /// Check if a work order with the given ID exists.
    pub async fn exists(&self, id: &str) -> DbResult<bool> {
        Ok(self.get(id).await?.is_some())
    }

    /// Get a work order by ID.
    ///
    /// # Errors
    ///
    /// Returns `DbError::CorruptRecord` if the stored row cannot be decoded.
    pub async fn get(&self, id: &str) -> DbResult<Option<WorkOrder>> {
        let row: Option<WorkOrderRow> = self
            .client
            .select(("work_order", id))
            .await
            .map_err(|e| DbError::Query(Box::new(e)))?;
        row.map(WorkOrderRow::into_work_order).transpose()
    }

    async fn require(&self, id: &str) -> DbResult<WorkOrder> {
        self.get(id).await?.ok_or_else(|| DbError::NotFound {
            entity: "Work order",
            id: id.to_string(),
        })
    }

    /// List work orders matching the filter, ordered by start date then name.
    pub async fn list(&self, filter: &WorkOrderFilter) -> DbResult<Vec<WorkOrder>> {
        let conditions = filter.conditions();
        let sql = if conditions.is_empty() {
            "SELECT * FROM work_order ORDER BY start_date ASC, name ASC".to_string()
        } else {
            format!(
                "SELECT * FROM work_order WHERE {} ORDER BY start_date ASC, name ASC",
                conditions.join(" AND ")
            )
        };
        trace!("Work order query: {}", sql);

        let mut query = self.client.query(sql);
        if let Some(work_center) = &filter.work_center {
            query = query.bind(("work_center", work_center.clone()));
        }
        if !filter.statuses.is_empty() {
            let statuses: Vec<&'static str> = filter.statuses.iter().map(|s| s.as_str()).collect();
            query = query.bind(("statuses", statuses));
        }
        if let Some(from) = filter.from {
            query = query.bind(("from", format_date(from)));
        }
        if let Some(to) = filter.to {
            query = query.bind(("to", format_date(to)));
        }

        let mut result = query.await?;
        let rows: Vec<WorkOrderRow> = result.take(0)?;
        debug!("Listed {} work orders", rows.len());
        rows.into_iter().map(WorkOrderRow::into_work_order).collect()
    }

    /// All work orders booked on a work center, ordered by start date.
    pub async fn list_by_work_center(&self, work_center: &str) -> DbResult<Vec<WorkOrder>> {
        self.list(&WorkOrderFilter::new().with_work_center(work_center))
            .await
    }

    /// Apply a partial update to a work order.
    ///
    /// Rescheduling updates (dates or work center) are re-validated against
    /// the other orders on the target work center; the order's own previous
    /// span never conflicts with itself.
    ///
    /// # Errors
    ///
    /// Returns `DbError::NotFound` if the order does not exist.
    /// Returns `DbError::ValidationError` if nothing is updated or the merged
    /// order is invalid.
    /// Returns `DbError::ScheduleConflict` if the new span overlaps another order.
    pub async fn update(&self, id: &str, update: &WorkOrderUpdate) -> DbResult<WorkOrder> {
        if !update.has_updates() {
            return Err(DbError::validation("No updates specified"));
        }

        let mut order = self.require(id).await?;
        update.apply_to(&mut order);

        if update.reschedules() || update.name.is_some() {
            self.validate_schedule(
                Some(id),
                &order.name,
                &order.work_center,
                order.start_date,
                order.end_date,
            )
            .await?;
        }

        debug!("Updating work order: {}", id);
        self.client
            .query(
                r#"UPDATE type::thing("work_order", $id) SET
                    name = $name,
                    work_center = $work_center,
                    status = $status,
                    start_date = $start_date,
                    end_date = $end_date,
                    updated_at = time::now()"#,
            )
            .bind(("id", id.to_string()))
            .bind(("name", order.name.clone()))
            .bind(("work_center", order.work_center.clone()))
            .bind(("status", order.status.as_str()))
            .bind(("start_date", format_date(order.start_date)))
            .bind(("end_date", format_date(order.end_date)))
            .await?
            .check()?;

        self.require(id).await
    }

    /// Delete a work order.
    ///
    /// # Errors
    ///
    /// Returns `DbError::NotFound` if the order does not exist.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        if !self.exists(id).await? {
            return Err(DbError::NotFound {
                entity: "Work order",
                id: id.to_string(),
            });
        }

        debug!("Deleting work order: {}", id);
        self.client
            .query(r#"DELETE type::thing("work_order", $id)"#)
            .bind(("id", id.to_string()))
            .await?
            .check()?;
        Ok(())
    }

    /// Whether `[start, end)` overlaps an order on the work center.
    ///
    /// `exclude` names an order to ignore, normally the one being edited.
    pub async fn has_overlap(
        &self,
        work_center: &str,
        start: NaiveDate,
        end: NaiveDate,
        exclude: Option<&str>,
    ) -> DbResult<bool> {
        let orders = self.list_by_work_center(work_center).await?;
        let Ok(overlaps) =
            schedgrid_timeline::has_overlap(orders.as_slice(), work_center, start, end, exclude);
        Ok(overlaps)
    }

    /// First order on the work center that overlaps `[start, end)`.
    pub async fn find_conflict(
        &self,
        work_center: &str,
        start: NaiveDate,
        end: NaiveDate,
        exclude: Option<&str>,
    ) -> DbResult<Option<WorkOrder>> {
        let orders = self.list_by_work_center(work_center).await?;
        Ok(find_overlap(orders, start, end, exclude))
    }

    /// Enforce the scheduling rules for a prospective order.
    async fn validate_schedule(
        &self,
        exclude: Option<&str>,
        name: &str,
        work_center: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DbResult<()> {
        if name.trim().is_empty() {
            return Err(DbError::validation("Work order name cannot be empty"));
        }

        if start >= end {
            return Err(DbError::validation(format!(
                "Start date ({}) must be before end date ({})",
                start, end
            )));
        }

        if !WorkCenterRepository::new(self.client)
            .exists(work_center)
            .await?
        {
            return Err(DbError::NotFound {
                entity: "Work center",
                id: work_center.to_string(),
            });
        }

        if let Some(conflict) = self.find_conflict(work_center, start, end, exclude).await? {
            debug!(
                "Rejecting {}..{} on {}: overlaps {}",
                start, end, work_center, conflict.id
            );
            return Err(DbError::ScheduleConflict {
                work_center: work_center.to_string(),
                conflicting_id: conflict.id,
                conflicting_start: conflict.start_date,
                conflicting_end: conflict.end_date,
            });
        }

        Ok(())
    }
}
