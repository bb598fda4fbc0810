use leptos::prelude::*;
use log::warn;
use web_sys::MouseEvent;

use super::speech::Narrator;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PlayState {
	Ready,
	Playing,
	Done,
}

/// Narrated summary of the document, spoken through the browser's
/// text-to-speech. One button toggles play/stop; restart rewinds.
#[component]
pub fn AudioOverview(#[prop(into)] text: String) -> impl IntoView {
	let state = RwSignal::new(PlayState::Ready);
	let narrator = StoredValue::new_local(Narrator::new());

	let text_play = text.clone();
	let on_play = move |_: MouseEvent| {
		narrator.with_value(|n| {
			let Some(n) = n else {
				warn!("speech synthesis unavailable in this browser");
				return;
			};
			if state.get_untracked() == PlayState::Playing {
				n.cancel();
				state.set(PlayState::Ready);
			} else {
				n.speak(
					&text_play,
					1.0,
					move || state.set(PlayState::Playing),
					move || state.set(PlayState::Done),
				);
			}
		});
	};

	let on_restart = move |_: MouseEvent| {
		narrator.with_value(|n| {
			if let Some(n) = n {
				n.cancel();
			}
		});
		state.set(PlayState::Ready);
	};

	on_cleanup(move || {
		let _ = narrator.try_with_value(|n| {
			if let Some(n) = n {
				n.cancel();
			}
		});
	});

	view! {
		<div class="overview audio-overview">
			<div class="overview-header">
				<h2>"Audio Overview"</h2>
				<p class="overview-subtitle">"AI-narrated summary with text-to-speech"</p>
			</div>

			<div class="overview-stage">
				<p class="overview-text">{text.clone()}</p>
			</div>

			<div class="overview-controls">
				<button class="control" on:click=on_restart title="Restart">
					"\u{21BA}"
				</button>
				<button class="control primary" on:click=on_play>
					{move || {
						if state.get() == PlayState::Playing { "Stop" } else { "Play" }
					}}
				</button>
			</div>

			<p class="overview-status">
				{move || match state.get() {
					PlayState::Ready => "Ready to play",
					PlayState::Playing => "Narrating\u{2026}",
					PlayState::Done => "Completed",
				}}
			</p>

			<p class="overview-hint">
				"Narration uses your browser's built-in text-to-speech. Nothing is downloaded."
			</p>
		</div>
	}
}
