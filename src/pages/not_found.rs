use leptos::prelude::*;

/// Router fallback for unknown paths.
#[component]
pub fn NotFound() -> impl IntoView {
	view! {
		<div class="page-state not-found">
			<h1>"Page not found"</h1>
			<p class="empty-hint">"The page you are looking for does not exist."</p>
			<a href="/">"Back to upload"</a>
		</div>
	}
}
