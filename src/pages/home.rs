use leptos::ev::KeyboardEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::flow_diagram::FlowDiagram;
use crate::components::robot_info::RobotInfo;
use crate::config::AppConfig;
use crate::controller::{LoadState, QueryResponse, Status, run_query};
use crate::dataset::loader::fetch_store;

/// Search page: loads the dataset once, then answers queries.
#[component]
pub fn Home() -> impl IntoView {
	let config = use_context::<AppConfig>().unwrap_or_default();
	let load_state = RwSignal::new(LoadState::Loading);
	let query = RwSignal::new(String::new());
	let response = RwSignal::new(None::<QueryResponse>);

	let fetch_config = config.clone();
	spawn_local(async move {
		let result = fetch_store(&fetch_config).await;
		load_state.set(LoadState::from_result(result));
	});

	let search = move || {
		let Some(store) = load_state.with_untracked(LoadState::store) else {
			return;
		};
		let raw = query.get_untracked();
		response.set(Some(run_query(&store, &raw)));
	};
	let clear = move || {
		query.set(String::new());
		response.set(None);
	};

	let status = Memo::new(move |_| {
		match response.with(|r| r.as_ref().map(|r| r.status.clone())) {
			Some(status) => status,
			None => load_state.with(LoadState::status),
		}
	});
	let ready = move || load_state.with(LoadState::accepts_input);
	let ready_placeholder = config.ready_placeholder();
	let placeholder = move || {
		load_state.with(|state| match state {
			LoadState::Loading => "Loading data...".to_string(),
			LoadState::Ready(_) => ready_placeholder.clone(),
			LoadState::Failed(_) => "Data failed to load".to_string(),
		})
	};

	let selected_robot = move || {
		response.with(|r| {
			r.as_ref()
				.and_then(|r| r.selection.as_ref())
				.map(|s| s.robot.clone())
		})
	};
	let graph = Signal::derive(move || {
		response.with(|r| {
			r.as_ref()
				.and_then(|r| r.selection.as_ref())
				.map(|s| s.graph.clone())
		})
	});
	let has_selection =
		move || response.with(|r| r.as_ref().is_some_and(|r| r.selection.is_some()));

	view! {
		<div class="robot-atlas">
			<header>
				<h1>"Robot Atlas"</h1>
				<p class="subtitle">"Specs, core modules and supplier flows of well-known robots."</p>
			</header>

			<div class="search-bar">
				<input
					type="text"
					id="robotInput"
					placeholder=placeholder
					prop:disabled=move || !ready()
					prop:value=move || query.get()
					on:input=move |ev| query.set(event_target_value(&ev))
					on:keydown=move |ev: KeyboardEvent| {
						if ev.key() == "Enter" {
							search();
						}
					}
				/>
				<button on:click=move |_| search() prop:disabled=move || !ready()>
					"Search"
				</button>
				<button on:click=move |_| clear()>"Clear"</button>
			</div>

			<div
				class="status"
				class:error=move || status.with(Status::is_error)
				style:display=move || if status.with(Status::is_visible) { "block" } else { "none" }
			>
				{move || status.get().to_string()}
			</div>

			<div class="results-container" class:visible=has_selection>
				<div class="robot-info-panel">
					{move || selected_robot().map(|robot| view! { <RobotInfo robot=robot /> })}
				</div>
				<div class="sankey-diagram">
					<FlowDiagram graph=graph />
				</div>
			</div>
		</div>
	}
}
