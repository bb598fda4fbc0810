use leptos::prelude::*;
use web_sys::MouseEvent;

use crate::types::QuizQuestion;

/// One question at a time. The first pick locks the answer in, marks it
/// right or wrong, and reveals the explanation; the last answer swaps
/// the question card for a score screen.
#[component]
pub fn Quiz(questions: Vec<QuizQuestion>) -> impl IntoView {
	if questions.is_empty() {
		return view! {
			<div class="empty-state">
				<p class="empty-title">"No quiz questions available"</p>
			</div>
		}
		.into_any();
	}

	let total = questions.len();
	let questions = StoredValue::new(questions);
	let index = RwSignal::new(0usize);
	let selected = RwSignal::new(None::<usize>);
	let score = RwSignal::new(0usize);

	let on_answer = move |choice: usize| {
		if selected.get_untracked().is_some() {
			return;
		}
		selected.set(Some(choice));
		let correct =
			questions.with_value(|q| q[index.get_untracked()].correct_answer) == choice;
		if correct {
			score.update(|s| *s += 1);
		}
	};

	let on_next = move |_: MouseEvent| {
		if index.get_untracked() + 1 < total {
			index.update(|i| *i += 1);
			selected.set(None);
		}
	};

	let on_restart = move |_: MouseEvent| {
		index.set(0);
		selected.set(None);
		score.set(0);
	};

	let finished = move || index.get() + 1 == total && selected.get().is_some();

	view! {
		<div class="quiz">
			<Show
				when=move || !finished()
				fallback=move || {
					view! {
						<div class="quiz-complete">
							<h3>"Quiz Complete!"</h3>
							<p class="quiz-final">
								{move || {
									let s = score.get();
									format!("Your score: {s} / {total} ({}%)", s * 100 / total)
								}}
							</p>
							<button class="wide" on:click=on_restart>
								"Restart Quiz"
							</button>
						</div>
					}
				}
			>
				<div class="quiz-card">
					<div class="quiz-meta">
						<span>{move || format!("Question {} of {total}", index.get() + 1)}</span>
						<span class="quiz-score">
							{move || format!("Score: {}/{total}", score.get())}
						</span>
					</div>
					<h3 class="quiz-question">
						{move || questions.with_value(|q| q[index.get()].question.clone())}
					</h3>

					<div class="quiz-options">
						{move || {
							let q = questions.with_value(|q| q[index.get()].clone());
							let picked = selected.get();
							q.options
								.iter()
								.enumerate()
								.map(|(i, option)| {
									let class = match picked {
										Some(_) if i == q.correct_answer => "option correct",
										Some(p) if i == p => "option incorrect",
										Some(_) => "option locked",
										None => "option",
									};
									view! {
										<button class=class on:click=move |_| on_answer(i)>
											{option.clone()}
										</button>
									}
								})
								.collect_view()
						}}
					</div>

					<Show when=move || selected.get().is_some()>
						<p class="quiz-explanation">
							{move || questions.with_value(|q| q[index.get()].explanation.clone())}
						</p>
						<button class="wide" on:click=on_next>
							{move || {
								if index.get() + 1 < total { "Next Question" } else { "Finish Quiz" }
							}}
						</button>
					</Show>
				</div>
			</Show>
		</div>
	}
	.into_any()
}
