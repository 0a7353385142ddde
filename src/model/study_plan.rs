//! Study-plan derivation.
//!
//! Pure functions mapping a student's per-concept readiness and the
//! concept prerequisite list into an ordered, prioritized remediation
//! plan. No ambient state: the concept and student lists are explicit
//! inputs, so the derivation is memoizable per (student, concepts) pair.

use super::concept::{Concept, Student};

/// Concepts below this effective readiness enter the study plan.
pub const MASTERY_CUTOFF: f64 = 0.6;

/// Fixed target readiness for every plan item.
pub const TARGET_LEVEL: f64 = 0.8;

/// Remediation priority, derived from current readiness.
///
/// The bucket thresholds (0.45 / 0.55) are fixed and intentionally NOT
/// tied to the configurable readiness threshold used elsewhere in the
/// dashboard. See DESIGN.md for the open question on unifying them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Priority {
	High,
	Medium,
	Low,
}

impl Priority {
	/// Bucket a readiness level: `< 0.45` high, `< 0.55` medium, else low.
	pub fn for_level(level: f64) -> Self {
		if level < 0.45 {
			Priority::High
		} else if level < 0.55 {
			Priority::Medium
		} else {
			Priority::Low
		}
	}

	pub fn as_str(self) -> &'static str {
		match self {
			Priority::High => "high",
			Priority::Medium => "medium",
			Priority::Low => "low",
		}
	}
}

/// One entry of a derived study plan.
#[derive(Clone, Debug, PartialEq)]
pub struct StudyPlanItem {
	pub concept_id: String,
	pub name: String,
	pub current_level: f64,
	pub target_level: f64,
	pub priority: Priority,
	/// Names of the concept's prerequisites, in the concept's own order.
	/// Ids that resolve to no known concept are skipped.
	pub prerequisite_names: Vec<String>,
}

/// Derive the study plan for `student_id`.
///
/// Selects concepts whose effective readiness (absent entries count as 0)
/// is below [`MASTERY_CUTOFF`], ordered by ascending depth with concept id
/// as an explicit tiebreak so the output is deterministic. An unknown
/// student id yields an empty plan rather than an error.
pub fn build_study_plan(
	student_id: &str,
	students: &[Student],
	concepts: &[Concept],
) -> Vec<StudyPlanItem> {
	let Some(student) = students.iter().find(|s| s.id == student_id) else {
		return Vec::new();
	};
	plan_for_student(student, concepts)
}

/// Derive the study plan for an already-resolved student.
pub fn plan_for_student(student: &Student, concepts: &[Concept]) -> Vec<StudyPlanItem> {
	let mut items: Vec<StudyPlanItem> = concepts
		.iter()
		.filter_map(|concept| {
			let level = student.readiness_for(&concept.id);
			if level >= MASTERY_CUTOFF {
				return None;
			}
			Some(StudyPlanItem {
				concept_id: concept.id.clone(),
				name: concept.name.clone(),
				current_level: level,
				target_level: TARGET_LEVEL,
				priority: Priority::for_level(level),
				prerequisite_names: prerequisite_names(concept, concepts),
			})
		})
		.collect();

	// Shallower prerequisite concepts surface first; id breaks ties.
	items.sort_by(|a, b| {
		let da = depth_of(&a.concept_id, concepts);
		let db = depth_of(&b.concept_id, concepts);
		da.cmp(&db).then_with(|| a.concept_id.cmp(&b.concept_id))
	});
	items
}

fn depth_of(concept_id: &str, concepts: &[Concept]) -> u32 {
	concepts
		.iter()
		.find(|c| c.id == concept_id)
		.map(|c| c.depth)
		.unwrap_or(0)
}

fn prerequisite_names(concept: &Concept, concepts: &[Concept]) -> Vec<String> {
	concept
		.prerequisites
		.iter()
		.filter_map(|pid| {
			concepts
				.iter()
				.find(|c| &c.id == pid)
				.map(|c| c.name.clone())
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use std::collections::HashMap;

	use super::*;

	fn concept(id: &str, depth: u32, prereqs: &[&str]) -> Concept {
		Concept {
			id: id.to_string(),
			name: format!("Concept {id}"),
			depth,
			prerequisites: prereqs.iter().map(|s| s.to_string()).collect(),
			readiness: None,
		}
	}

	fn student(id: &str, readiness: &[(&str, f64)]) -> Student {
		Student {
			id: id.to_string(),
			name: id.to_string(),
			concept_readiness: readiness
				.iter()
				.map(|(k, v)| (k.to_string(), *v))
				.collect(),
		}
	}

	#[test]
	fn mastered_student_gets_empty_plan() {
		let concepts = vec![concept("c1", 0, &[]), concept("c2", 1, &["c1"])];
		let students = vec![student("s1", &[("c1", 0.9), ("c2", 0.61)])];
		assert!(build_study_plan("s1", &students, &concepts).is_empty());
	}

	#[test]
	fn unknown_student_gets_empty_plan() {
		let concepts = vec![concept("c1", 0, &[])];
		let students = vec![student("s1", &[("c1", 0.1)])];
		assert!(build_study_plan("nobody", &students, &concepts).is_empty());
	}

	#[test]
	fn absent_readiness_counts_as_zero() {
		let concepts = vec![concept("c1", 0, &[])];
		let students = vec![student("s1", &[])];
		let plan = build_study_plan("s1", &students, &concepts);
		assert_eq!(plan.len(), 1);
		assert_eq!(plan[0].current_level, 0.0);
		assert_eq!(plan[0].priority, Priority::High);
	}

	#[test]
	fn priority_buckets_at_exact_boundaries() {
		assert_eq!(Priority::for_level(0.44), Priority::High);
		assert_eq!(Priority::for_level(0.45), Priority::Medium);
		assert_eq!(Priority::for_level(0.54), Priority::Medium);
		assert_eq!(Priority::for_level(0.55), Priority::Low);
		assert_eq!(Priority::for_level(0.59), Priority::Low);
	}

	#[test]
	fn plan_ordered_by_depth_then_id() {
		let concepts = vec![
			concept("c3", 2, &[]),
			concept("c1", 0, &[]),
			concept("c2b", 1, &[]),
			concept("c2a", 1, &[]),
		];
		let students = vec![student("s1", &[])];
		let plan = build_study_plan("s1", &students, &concepts);
		let ids: Vec<&str> = plan.iter().map(|i| i.concept_id.as_str()).collect();
		assert_eq!(ids, ["c1", "c2a", "c2b", "c3"]);
		for pair in plan.windows(2) {
			let d0 = concepts.iter().find(|c| c.id == pair[0].concept_id).unwrap().depth;
			let d1 = concepts.iter().find(|c| c.id == pair[1].concept_id).unwrap().depth;
			assert!(d0 <= d1);
		}
	}

	#[test]
	fn target_level_is_fixed() {
		let concepts = vec![concept("c1", 0, &[])];
		let students = vec![student("s1", &[("c1", 0.2)])];
		let plan = build_study_plan("s1", &students, &concepts);
		assert_eq!(plan[0].target_level, TARGET_LEVEL);
	}

	#[test]
	fn prerequisite_names_resolve_and_skip_unknown() {
		let concepts = vec![
			concept("c1", 0, &[]),
			concept("c2", 1, &["c1", "ghost"]),
		];
		let students = vec![Student {
			id: "s1".into(),
			name: "s1".into(),
			concept_readiness: HashMap::from([("c1".to_string(), 0.9)]),
		}];
		let plan = build_study_plan("s1", &students, &concepts);
		assert_eq!(plan.len(), 1);
		assert_eq!(plan[0].concept_id, "c2");
		assert_eq!(plan[0].prerequisite_names, vec!["Concept c1".to_string()]);
	}

	#[test]
	fn no_prerequisites_yields_empty_name_list() {
		let concepts = vec![concept("c1", 0, &[])];
		let students = vec![student("s1", &[])];
		let plan = build_study_plan("s1", &students, &concepts);
		assert!(plan[0].prerequisite_names.is_empty());
	}
}
