use leptos::prelude::*;
use leptos_router::hooks::use_params_map;
use log::error;
use wasm_bindgen_futures::spawn_local;

use crate::api;
use crate::components::{
	AudioOverview, Chat, ConceptMapCanvas, Flashcards, Quiz, VideoOverview,
};
use crate::types::GeneratedContent;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Tab {
	MindMap,
	Audio,
	Video,
	Flashcards,
	Quiz,
}

impl Tab {
	const ALL: [Tab; 5] = [
		Tab::MindMap,
		Tab::Audio,
		Tab::Video,
		Tab::Flashcards,
		Tab::Quiz,
	];

	fn label(self) -> &'static str {
		match self {
			Tab::MindMap => "Mind Map",
			Tab::Audio => "Audio",
			Tab::Video => "Video",
			Tab::Flashcards => "Flashcards",
			Tab::Quiz => "Quiz",
		}
	}
}

/// Study view for one document: the generated bundle behind a tab bar,
/// with a chat drawer on top.
#[component]
pub fn DocumentPage() -> impl IntoView {
	let params = use_params_map();
	let document_id = move || params.with(|p| p.get("id")).unwrap_or_default();

	let content = RwSignal::new(None::<GeneratedContent>);
	let loading = RwSignal::new(true);
	let active = RwSignal::new(Tab::MindMap);
	let show_chat = RwSignal::new(false);

	// Reload whenever the id changes; a new bundle replaces the old view
	// state wholesale.
	Effect::new(move |_| {
		let id = document_id();
		if id.is_empty() {
			return;
		}
		loading.set(true);
		content.set(None);
		active.set(Tab::MindMap);
		show_chat.set(false);
		spawn_local(async move {
			match api::get_generated_content(&id).await {
				Ok(bundle) => content.set(Some(bundle)),
				Err(err) => error!("failed to load generated content: {err}"),
			}
			loading.set(false);
		});
	});

	view! {
		<div class="document-page">
			{move || {
				if loading.get() {
					return view! {
						<div class="page-state">
							<p class="empty-title">"Loading your content\u{2026}"</p>
						</div>
					}
						.into_any();
				}
				let Some(bundle) = content.get() else {
					return view! {
						<div class="page-state">
							<p class="empty-title">"Content not found"</p>
							<p class="empty-hint">"Please try uploading your document again"</p>
							<a href="/">"Back to upload"</a>
						</div>
					}
						.into_any();
				};
				view! {
					<div class="document-card">
						<nav class="tab-bar">
							<div class="tabs">
								{Tab::ALL
									.iter()
									.map(|&tab| {
										view! {
											<button
												class="tab"
												class:active=move || active.get() == tab
												on:click=move |_| active.set(tab)
											>
												{tab.label()}
											</button>
										}
									})
									.collect_view()}
							</div>
							<button class="chat-open" on:click=move |_| show_chat.set(true)>
								"Chat"
							</button>
						</nav>

						<div class="tab-content">
							{move || {
								let bundle = bundle.clone();
								match active.get() {
									Tab::MindMap => {
										let tree = bundle.mind_map;
										view! {
											<ConceptMapCanvas tree=Signal::derive(move || {
												tree.clone()
											}) />
										}
											.into_any()
									}
									Tab::Audio => {
										view! { <AudioOverview text=bundle.audio_overview /> }
											.into_any()
									}
									Tab::Video => {
										view! { <VideoOverview text=bundle.video_overview /> }
											.into_any()
									}
									Tab::Flashcards => {
										view! { <Flashcards cards=bundle.flashcards /> }.into_any()
									}
									Tab::Quiz => {
										view! { <Quiz questions=bundle.quiz /> }.into_any()
									}
								}
							}}
						</div>
					</div>
				}
					.into_any()
			}}

			<Show when=move || show_chat.get()>
				<div class="chat-modal">
					<div class="chat-panel">
						<div class="chat-header">
							<div>
								<h2>"AI Chat"</h2>
								<p class="empty-hint">"Ask anything about your document"</p>
							</div>
							<button class="chat-close" on:click=move |_| show_chat.set(false)>
								"\u{00D7}"
							</button>
						</div>
						<Chat document_id=document_id() />
					</div>
				</div>
			</Show>
		</div>
	}
}
