//! Concept and student domain types.
//!
//! These are the inputs to the study-plan derivation and the legacy
//! fallback path of the graph view-model. Both arrive as bootstrap JSON
//! embedded in the host page, so they derive `Deserialize`.

use std::collections::HashMap;

use serde::Deserialize;

/// A concept in the prerequisite graph.
///
/// `depth` is the topological distance from a root concept. The data is
/// assumed to form a DAG but nothing here enforces acyclicity; consumers
/// tolerate prerequisite ids that resolve to no known concept.
#[derive(Clone, Debug, Deserialize)]
pub struct Concept {
	/// Unique, stable identifier.
	pub id: String,
	/// Human-readable name.
	pub name: String,
	/// Topological distance from a root concept.
	#[serde(default)]
	pub depth: u32,
	/// Ids of concepts that must be mastered first.
	#[serde(default)]
	pub prerequisites: Vec<String>,
	/// Class-level readiness estimate in [0, 1], absent when un-observed.
	#[serde(default)]
	pub readiness: Option<f64>,
}

/// A student with per-concept readiness measurements.
#[derive(Clone, Debug, Deserialize)]
pub struct Student {
	pub id: String,
	pub name: String,
	/// Concept id -> readiness in [0, 1]. Absent entries are treated as 0
	/// by consumers, which is distinct from "never measured" at the graph
	/// level but is the contract for study-plan derivation.
	#[serde(default)]
	pub concept_readiness: HashMap<String, f64>,
}

impl Student {
	/// Effective readiness for a concept, defaulting absent entries to 0.
	pub fn readiness_for(&self, concept_id: &str) -> f64 {
		self.concept_readiness
			.get(concept_id)
			.copied()
			.unwrap_or(0.0)
	}
}
