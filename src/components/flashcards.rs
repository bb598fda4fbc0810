use std::collections::HashSet;

use leptos::prelude::*;
use web_sys::MouseEvent;

use crate::types::Flashcard;

/// Flashcard deck: flip to reveal, step through with wraparound, jump to
/// a random card, and mark cards as mastered for the progress bar.
#[component]
pub fn Flashcards(cards: Vec<Flashcard>) -> impl IntoView {
	if cards.is_empty() {
		return view! {
			<div class="empty-state">
				<p class="empty-title">"No flashcards available"</p>
				<p class="empty-hint">"Upload a document to generate flashcards"</p>
			</div>
		}
		.into_any();
	}

	let len = cards.len();
	let index = RwSignal::new(0usize);
	let flipped = RwSignal::new(false);
	let mastered = RwSignal::new(HashSet::<usize>::new());

	let on_prev = move |_: MouseEvent| {
		flipped.set(false);
		index.update(|i| *i = (*i + len - 1) % len);
	};
	let on_next = move |_: MouseEvent| {
		flipped.set(false);
		index.update(|i| *i = (*i + 1) % len);
	};
	let on_shuffle = move |_: MouseEvent| {
		flipped.set(false);
		let jump = (js_sys::Math::random() * len as f64) as usize;
		index.set(jump.min(len - 1));
	};
	let on_flip_back = move |_: MouseEvent| flipped.set(false);
	let on_mastered = move |_: MouseEvent| {
		let i = index.get_untracked();
		mastered.update(|m| {
			if !m.insert(i) {
				m.remove(&i);
			}
		});
	};

	let cards_view = cards.clone();
	view! {
		<div class="flashcards">
			<div class="deck-progress">
				<div class="deck-progress-label">
					<span>"Progress"</span>
					<span>
						{move || format!("{} / {len} mastered", mastered.with(HashSet::len))}
					</span>
				</div>
				<div class="progress-bar">
					<div
						class="progress-fill"
						style:width=move || {
							format!("{}%", mastered.with(HashSet::len) * 100 / len)
						}
					></div>
				</div>
			</div>

			<div
				class="flashcard"
				class:flipped=move || flipped.get()
				on:click=move |_| flipped.update(|f| *f = !*f)
			>
				<div class="flashcard-tag">
					<span>{move || if flipped.get() { "Answer" } else { "Question" }}</span>
					<Show when=move || mastered.with(|m| m.contains(&index.get()))>
						<span class="mastered-mark">"\u{2713}"</span>
					</Show>
				</div>
				<p class="flashcard-text">
					{move || {
						let card = &cards_view[index.get()];
						if flipped.get() { card.answer.clone() } else { card.question.clone() }
					}}
				</p>
				<p class="flashcard-hint">
					{move || {
						if flipped.get() { "Tap to see question" } else { "Tap to reveal answer" }
					}}
				</p>
			</div>

			<div class="deck-controls">
				<div class="deck-nav">
					<button on:click=on_prev disabled=len == 1>
						"\u{2039}"
					</button>
					<span class="deck-counter">
						{move || format!("{} / {len}", index.get() + 1)}
					</span>
					<button on:click=on_next disabled=len == 1>
						"\u{203A}"
					</button>
				</div>
				<div class="deck-actions">
					<button class="wide" on:click=on_mastered>
						{move || {
							if mastered.with(|m| m.contains(&index.get())) {
								"Mastered"
							} else {
								"Mark as mastered"
							}
						}}
					</button>
					<button on:click=on_shuffle disabled=len == 1 title="Shuffle">
						"\u{21C4}"
					</button>
					<button on:click=on_flip_back title="Reset card">
						"\u{21BA}"
					</button>
				</div>
			</div>
		</div>
	}
	.into_any()
}
