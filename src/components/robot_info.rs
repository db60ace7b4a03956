use leptos::prelude::*;

use crate::dataset::RobotRecord;

/// Identity, spec grid and module breakdown of one robot.
#[component]
pub fn RobotInfo(robot: RobotRecord) -> impl IntoView {
	let specs = robot
		.specs
		.iter()
		.map(|(label, value)| {
			view! {
				<div class="spec-item" class:missing={!value.is_available()}>
					<strong>{label.clone()}</strong>
					<span>{value.to_string()}</span>
				</div>
			}
		})
		.collect_view();

	let modules = robot
		.modules
		.iter()
		.map(|(name, info)| {
			view! {
				<div class="module-item">
					<h4>{name.clone()}</h4>
					<p>
						<strong>"Key components: "</strong>
						{info.components.join(", ")}
					</p>
					<p>
						<strong>"Main suppliers: "</strong>
						{info.suppliers.join(", ")}
					</p>
				</div>
			}
		})
		.collect_view();

	view! {
		<div class="robot-info">
			<h2>{robot.name.clone()}</h2>
			<p>
				<strong>"Manufacturer: "</strong>
				{robot.manufacturer.to_string()}
				" | "
				<strong>"Type: "</strong>
				{robot.kind.to_string()}
			</p>
			<div class="spec-grid">{specs}</div>
			<div class="module-section">
				<h3>"Core modules"</h3>
				{modules}
			</div>
		</div>
	}
}
