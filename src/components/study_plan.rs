//! Study-plan side panel.

use leptos::prelude::*;

use crate::model::{Concept, Student, study_plan};

/// Renders the derived study plan for one student.
///
/// Pure presentation over [`study_plan::plan_for_student`]; recomputes
/// when the student or concept signals change.
#[component]
pub fn StudyPlanPanel(
	#[prop(into)] student: Signal<Option<Student>>,
	#[prop(into)] concepts: Signal<Vec<Concept>>,
) -> impl IntoView {
	let items = Memo::new(move |_| {
		student
			.get()
			.map(|s| study_plan::plan_for_student(&s, &concepts.get()))
			.unwrap_or_default()
	});

	view! {
		<div class="study-plan-panel">
			<h2>"Study plan"</h2>
			{move || {
				let plan = items.get();
				if plan.is_empty() {
					view! { <p class="study-plan-empty">"All concepts at mastery. Nothing to review."</p> }
						.into_any()
				} else {
					view! {
						<ol class="study-plan-list">
							{plan
								.into_iter()
								.map(|item| {
									let priority = item.priority.as_str();
									let prereqs = if item.prerequisite_names.is_empty() {
										String::new()
									} else {
										format!("after {}", item.prerequisite_names.join(", "))
									};
									view! {
										<li class=format!("study-plan-item priority-{priority}")>
											<span class="study-plan-name">{item.name}</span>
											<span class="study-plan-level">
												{format!(
													"{:.0}% → {:.0}%",
													item.current_level * 100.0,
													item.target_level * 100.0,
												)}
											</span>
											<span class="study-plan-priority">{priority}</span>
											<span class="study-plan-prereqs">{prereqs}</span>
										</li>
									}
								})
								.collect_view()}
						</ol>
					}
						.into_any()
				}
			}}
		</div>
	}
}
