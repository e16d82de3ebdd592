//! Database module for Schedgrid
//!
//! Provides SurrealDB connection management with embedded RocksDB backend,
//! schema initialization, and the work center and work order stores.

pub mod error;
pub mod models;
pub mod repository;
pub mod schema;

pub use error::{DbError, DbResult};
pub use models::{NewWorkOrder, WorkCenter, WorkOrder, WorkOrderStatus};
pub use repository::{WorkCenterRepository, WorkOrderFilter, WorkOrderRepository, WorkOrderUpdate};

use std::path::{Path, PathBuf};
use std::process::Command;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};
use tracing::debug;

/// Default database path relative to project root or current working directory
pub const DEFAULT_DB_PATH: &str = ".schedgrid/data";

/// SurrealDB namespace holding the schedule
const NAMESPACE: &str = "schedgrid";

/// SurrealDB database name within the namespace
const DATABASE: &str = "main";

/// Database wrapper providing connection management for SurrealDB
pub struct Database {
    /// The underlying SurrealDB client
    client: Surreal<Db>,
    /// Path where the database is stored
    path: PathBuf,
}

impl Database {
    /// Connect to a SurrealDB database at the specified path.
    ///
    /// Creates the database directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns `DbError::InvalidPath` if the path exists but is not a directory.
    /// Returns `DbError::CreateDirectory` if directory creation fails.
    /// Returns `DbError::Connection` if database connection fails.
    pub async fn connect(path: &Path) -> DbResult<Self> {
        let path = Self::prepare_path(path)?;

        debug!("Opening database at {}", path.display());
        let client =
            Surreal::new::<RocksDb>(path.clone())
                .await
                .map_err(|e| DbError::Connection {
                    path: path.clone(),
                    source: Box::new(e),
                })?;

        Ok(Self { client, path })
    }

    /// Initialize the database schema.
    ///
    /// Selects the Schedgrid namespace and database, then defines the
    /// work_center and work_order tables.
    ///
    /// # Errors
    ///
    /// Returns `DbError::Schema` if schema initialization fails.
    pub async fn init(&self) -> DbResult<()> {
        self.client
            .use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| DbError::Schema(Box::new(e)))?;

        schema::init_schema(&self.client).await
    }

    /// Get a reference to the underlying SurrealDB client.
    pub fn client(&self) -> &Surreal<Db> {
        &self.client
    }

    /// Get the path where the database is stored.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Work center store backed by this database
    pub fn work_centers(&self) -> WorkCenterRepository<'_> {
        WorkCenterRepository::new(&self.client)
    }

    /// Work order store backed by this database
    pub fn work_orders(&self) -> WorkOrderRepository<'_> {
        WorkOrderRepository::new(&self.client)
    }

    /// Get the default database path based on project root.
    ///
    /// Uses `git rev-parse --show-toplevel` to find the project root and
    /// returns `<project_root>/.schedgrid/data`. If not in a git repository,
    /// falls back to `.schedgrid/data` relative to the current working directory.
    pub fn default_path() -> PathBuf {
        let base_path = find_project_root().unwrap_or_else(|| PathBuf::from("."));
        base_path.join(DEFAULT_DB_PATH)
    }

    /// Prepare the database path by validating and creating directories.
    fn prepare_path(path: &Path) -> DbResult<PathBuf> {
        let path = path.to_path_buf();

        if path.exists() && !path.is_dir() {
            return Err(DbError::InvalidPath {
                path,
                reason: "Path exists and is not a directory".to_string(),
            });
        }

        if !path.exists() {
            std::fs::create_dir_all(&path).map_err(|e| DbError::CreateDirectory {
                path: path.clone(),
                source: e,
            })?;
        }

        Ok(path)
    }
}

// Ensure Database is Send + Sync for async compatibility
static_assertions::assert_impl_all!(Database: Send, Sync);

/// Find the project root by running `git rev-parse --show-toplevel`.
///
/// Returns `Some(PathBuf)` with the absolute path to the git repository root,
/// or `None` if not in a git repository or the command fails.
pub fn find_project_root() -> Option<PathBuf> {
    let output = Command::new("git")
        .args(["rev-parse", "--show-toplevel"])
        .output()
        .ok()?;

    if output.status.success() {
        let path_str = String::from_utf8(output.stdout).ok()?;
        Some(PathBuf::from(path_str.trim()))
    } else {
        None
    }
}
