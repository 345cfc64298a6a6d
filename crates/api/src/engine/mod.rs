//! Server-side engines that orchestrate domain logic over the database.

pub mod reconciliation;

pub use reconciliation::{reconcile_range, ReconcileError, ReconcileErrorKind, ReconcileSummary};
