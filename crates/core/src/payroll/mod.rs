//! Payroll domain: hour-record classification and status lifecycle.

pub mod classifier;
pub mod concept;
pub mod status;

pub use classifier::{classify_day, ClassifyError, DayRecord, Punch, PunchDirection};
pub use concept::ConceptCode;
pub use status::{PayrollStatus, RegisterType};
