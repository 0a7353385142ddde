//! Domain types and pure derivation logic.

pub mod alert;
pub mod concept;
pub mod study_plan;

pub use alert::{Alert, Severity};
pub use concept::{Concept, Student};
pub use study_plan::{Priority, StudyPlanItem, build_study_plan};
