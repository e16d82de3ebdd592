//! Repository modules for database operations
//!
//! Provides repository pattern implementations for work centers and work
//! orders, encapsulating database queries.

mod work_center;
mod work_order;

pub use work_center::WorkCenterRepository;
pub use work_order::{WorkOrderFilter, WorkOrderRepository, WorkOrderUpdate};
