//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that take
//! `&PgPool` (reads) or a `Transaction` (writes that must share a
//! transactional boundary with their neighbors).

pub mod clock_event_repo;
pub mod concept_repo;
pub mod employee_repo;
pub mod hour_record_repo;

pub use clock_event_repo::ClockEventRepo;
pub use concept_repo::ConceptRepo;
pub use employee_repo::EmployeeRepo;
pub use hour_record_repo::HourRecordRepo;
