//! Route definitions.

pub mod health;
pub mod payroll;
