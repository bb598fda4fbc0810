use leptos::prelude::*;
use log::error;
use wasm_bindgen_futures::spawn_local;
use web_sys::{KeyboardEvent, MouseEvent};

use crate::api;
use crate::types::{ChatMessage, ChatRole};

const SUGGESTIONS: &[&str] = &[
	"What is this document about?",
	"Summarize the key points",
	"What are the main topics covered?",
];

/// Question-and-answer panel over the document. Each send attaches the
/// prior exchange as history; a failed request degrades to an apology
/// row instead of losing the conversation.
#[component]
pub fn Chat(#[prop(into)] document_id: String) -> impl IntoView {
	let messages = RwSignal::new(Vec::<ChatMessage>::new());
	let input = RwSignal::new(String::new());
	let busy = RwSignal::new(false);

	let document_id = StoredValue::new(document_id);
	let send = move || {
		let question = input.get_untracked().trim().to_string();
		if question.is_empty() || busy.get_untracked() {
			return;
		}
		let history = messages.get_untracked();
		messages.update(|m| {
			m.push(ChatMessage {
				role: ChatRole::User,
				content: question.clone(),
			})
		});
		input.set(String::new());
		busy.set(true);

		let doc_id = document_id.with_value(String::clone);
		spawn_local(async move {
			let content = match api::chat(&doc_id, &question, &history).await {
				Ok(answer) => answer,
				Err(err) => {
					error!("chat request failed: {err}");
					"Sorry, I encountered an error. Please try again.".to_string()
				}
			};
			messages.update(|m| {
				m.push(ChatMessage {
					role: ChatRole::Assistant,
					content,
				})
			});
			busy.set(false);
		});
	};

	let on_send = move |_: MouseEvent| send();
	let on_key = move |ev: KeyboardEvent| {
		if ev.key() == "Enter" && !ev.shift_key() {
			send();
		}
	};

	view! {
		<div class="chat">
			<div class="chat-history">
				<Show
					when=move || !messages.with(Vec::is_empty)
					fallback=move || {
						view! {
							<div class="chat-empty">
								<p class="empty-title">"Ask me anything about this document"</p>
								<p class="empty-hint">
									"I can help you understand, summarize, or answer questions"
								</p>
								<div class="chat-suggestions">
									{SUGGESTIONS
										.iter()
										.map(|suggestion| {
											view! {
												<button
													class="suggestion"
													on:click=move |_| input.set((*suggestion).to_string())
												>
													{*suggestion}
												</button>
											}
										})
										.collect_view()}
								</div>
							</div>
						}
					}
				>
					{move || {
						messages
							.get()
							.into_iter()
							.map(|message| {
								let row = match message.role {
									ChatRole::User => "chat-row user",
									ChatRole::Assistant => "chat-row assistant",
								};
								view! {
									<div class=row>
										<p class="chat-bubble">{message.content}</p>
									</div>
								}
							})
							.collect_view()
					}}
				</Show>
				<Show when=move || busy.get()>
					<div class="chat-row assistant">
						<p class="chat-bubble pending">"\u{2026}"</p>
					</div>
				</Show>
			</div>

			<div class="chat-input-row">
				<input
					type="text"
					placeholder="Ask a question about the document..."
					prop:value=move || input.get()
					on:input=move |ev| input.set(event_target_value(&ev))
					on:keydown=on_key
					prop:disabled=move || busy.get()
				/>
				<button
					class="wide"
					on:click=on_send
					prop:disabled=move || busy.get() || input.with(|v| v.trim().is_empty())
				>
					"Send"
				</button>
			</div>
		</div>
	}
}
