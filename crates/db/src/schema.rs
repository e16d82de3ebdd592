//! Database schema initialization for Schedgrid
//!
//! Defines the SurrealDB schema for work centers and the work orders
//! scheduled on them.

use crate::error::DbError;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

/// SQL statements for schema initialization
mod sql {
    /// Define the work_center table
    pub const DEFINE_WORK_CENTER_TABLE: &str = r#"
        DEFINE TABLE IF NOT EXISTS work_center SCHEMAFULL;

        DEFINE FIELD IF NOT EXISTS name ON work_center TYPE string
            ASSERT string::len($value) > 0;

        DEFINE FIELD IF NOT EXISTS created_at ON work_center TYPE datetime DEFAULT time::now();
    "#;

    /// Define the work_order table
    ///
    /// Dates are stored as `YYYY-MM-DD` strings so they compare and sort as
    /// calendar dates with no time-of-day component.
    pub const DEFINE_WORK_ORDER_TABLE: &str = r#"
        DEFINE TABLE IF NOT EXISTS work_order SCHEMAFULL;

        DEFINE FIELD IF NOT EXISTS name ON work_order TYPE string
            ASSERT string::len($value) > 0;

        DEFINE FIELD IF NOT EXISTS work_center ON work_order TYPE string;

        DEFINE FIELD IF NOT EXISTS status ON work_order TYPE string
            ASSERT $value IN ["open", "in_progress", "complete", "blocked"];

        DEFINE FIELD IF NOT EXISTS start_date ON work_order TYPE string
            ASSERT string::len($value) == 10;

        DEFINE FIELD IF NOT EXISTS end_date ON work_order TYPE string
            ASSERT string::len($value) == 10;

        DEFINE FIELD IF NOT EXISTS created_at ON work_order TYPE datetime DEFAULT time::now();

        DEFINE FIELD IF NOT EXISTS updated_at ON work_order TYPE datetime DEFAULT time::now();
    "#;

    /// Index work orders by work center for overlap checks
    pub const DEFINE_WORK_ORDER_INDEXES: &str = r#"
        DEFINE INDEX IF NOT EXISTS work_order_center ON work_order FIELDS work_center;
    "#;
}

/// Initialize the database schema.
///
/// Creates the work_center and work_order tables with their fields,
/// constraints and indexes.
///
/// This function is idempotent - it can be called multiple times safely
/// as it uses `IF NOT EXISTS` clauses.
///
/// # Errors
///
/// Returns `DbError::Schema` if any schema definition fails.
pub async fn init_schema(client: &Surreal<Db>) -> Result<(), DbError> {
    for statement in [
        sql::DEFINE_WORK_CENTER_TABLE,
        sql::DEFINE_WORK_ORDER_TABLE,
        sql::DEFINE_WORK_ORDER_INDEXES,
    ] {
        client
            .query(statement)
            .await
            .map_err(|e| DbError::Schema(Box::new(e)))?
            .check()
            .map_err(|e| DbError::Schema(Box::new(e)))?;
    }

    Ok(())
}
