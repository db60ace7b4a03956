use leptos::prelude::*;

/// Fallback for unknown routes.
#[component]
pub fn NotFound() -> impl IntoView {
	view! {
		<div class="robot-atlas">
			<h1>"Page not found"</h1>
			<p>
				<a href="/">"Back to the robot search"</a>
			</p>
		</div>
	}
}
