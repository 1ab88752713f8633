//! Service layer for matte resolution and reconciliation.
//!
//! The resolver is a pure function over requests and current state; the
//! reconcile loop drives it across the device inventory.

pub mod reconcile;
pub mod resolver;

// Re-export commonly used types and functions
pub use reconcile::{
    plan_item, reconcile, ItemOutcome, ItemPlan, ItemReport, ReconcileOptions, ReconcileReport,
    ReportSummary,
};
pub use resolver::{resolve_target, MatteWarning, Resolution, WarningReason};
