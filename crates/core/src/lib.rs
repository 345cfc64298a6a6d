//! Domain logic for the SIGRH payroll reconciliation engine.
//!
//! Pure types and rules only — no I/O. The `db` and `api` crates depend on
//! this crate for the daily classifier, shift topologies, and the payroll
//! status state machine.

pub mod error;
pub mod payroll;
pub mod shift;
pub mod types;
