//! Intervention alerts surfaced on the instructor dashboard.

use serde::Deserialize;

/// Alert severity. Ordered so that `High > Medium > Low`.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
	Low,
	Medium,
	High,
}

impl Severity {
	pub fn as_str(self) -> &'static str {
		match self {
			Severity::High => "high",
			Severity::Medium => "medium",
			Severity::Low => "low",
		}
	}
}

/// A class-level intervention alert for a weak concept.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Alert {
	pub id: String,
	pub concept_id: String,
	pub concept_name: String,
	pub severity: Severity,
	/// Estimated downstream impact of the weakness, in [0, 1].
	pub impact: f64,
	pub students_affected: u32,
	pub message: String,
}

/// Order alerts for display: severity descending, then impact descending.
pub fn sort_for_display(alerts: &mut [Alert]) {
	alerts.sort_by(|a, b| {
		b.severity
			.cmp(&a.severity)
			.then_with(|| b.impact.partial_cmp(&a.impact).unwrap_or(std::cmp::Ordering::Equal))
	});
}

#[cfg(test)]
mod tests {
	use super::*;

	fn alert(id: &str, severity: Severity, impact: f64) -> Alert {
		Alert {
			id: id.to_string(),
			concept_id: "c".into(),
			concept_name: "c".into(),
			severity,
			impact,
			students_affected: 1,
			message: String::new(),
		}
	}

	#[test]
	fn severity_orders_high_above_low() {
		assert!(Severity::High > Severity::Medium);
		assert!(Severity::Medium > Severity::Low);
	}

	#[test]
	fn display_order_is_severity_then_impact() {
		let mut alerts = vec![
			alert("a", Severity::Low, 0.9),
			alert("b", Severity::High, 0.2),
			alert("c", Severity::High, 0.8),
			alert("d", Severity::Medium, 0.5),
		];
		sort_for_display(&mut alerts);
		let ids: Vec<&str> = alerts.iter().map(|a| a.id.as_str()).collect();
		assert_eq!(ids, ["c", "b", "d", "a"]);
	}
}
