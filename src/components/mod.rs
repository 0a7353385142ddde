//! UI components.

pub mod alerts;
pub mod concept_graph;
pub mod study_plan;
