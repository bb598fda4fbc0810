use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;
use log::error;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{File, HtmlInputElement, SubmitEvent};

use crate::api::{self, ApiError};

#[derive(Clone, Copy, PartialEq, Eq)]
enum InputMode {
	Pdf,
	Topic,
}

/// Uploads a PDF, waits for the extracted text, and triggers generation.
/// Returns the document id to navigate to.
async fn run_pdf_flow(
	file: File,
	uploading: RwSignal<bool>,
	processing: RwSignal<bool>,
	progress: RwSignal<u8>,
) -> Result<String, ApiError> {
	uploading.set(true);
	progress.set(20);
	let uploaded = api::upload_document(&file).await?;

	uploading.set(false);
	processing.set(true);
	progress.set(40);
	let doc = api::get_document(&uploaded.id).await?;
	progress.set(60);
	api::process_document(&doc.id, &doc.text).await?;
	progress.set(100);
	Ok(doc.id)
}

/// Topic flow: the service writes a document from the topic string, then
/// generation runs over that text.
async fn run_topic_flow(
	topic: String,
	processing: RwSignal<bool>,
	progress: RwSignal<u8>,
) -> Result<String, ApiError> {
	processing.set(true);
	progress.set(20);
	let doc = api::create_topic_document(&topic).await?;
	progress.set(60);
	api::process_document(&doc.id, &doc.text).await?;
	progress.set(100);
	Ok(doc.id)
}

/// Landing page: turn a PDF or a bare topic into study material.
#[component]
pub fn Upload() -> impl IntoView {
	let mode = RwSignal::new(InputMode::Pdf);
	let uploading = RwSignal::new(false);
	let processing = RwSignal::new(false);
	let progress = RwSignal::new(0u8);
	let topic = RwSignal::new(String::new());
	let failure = RwSignal::new(None::<String>);
	// Document id to open once a flow finishes; the effect below owns the
	// router handle so the async flows only touch signals.
	let ready = RwSignal::new(None::<String>);

	let busy = move || uploading.get() || processing.get();

	let navigate = use_navigate();
	Effect::new(move |_| {
		if let Some(id) = ready.get() {
			navigate(&format!("/document/{id}"), NavigateOptions::default());
		}
	});

	let on_file = move |ev: web_sys::Event| {
		let Some(input) = ev
			.target()
			.and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
		else {
			return;
		};
		let Some(file) = input.files().and_then(|list| list.get(0)) else {
			return;
		};
		failure.set(None);
		spawn_local(async move {
			match run_pdf_flow(file, uploading, processing, progress).await {
				Ok(id) => ready.set(Some(id)),
				Err(err) => {
					error!("upload failed: {err}");
					failure.set(Some("Failed to upload and process document".into()));
				}
			}
			uploading.set(false);
			processing.set(false);
			progress.set(0);
		});
	};

	let on_topic = move |ev: SubmitEvent| {
		ev.prevent_default();
		let requested = topic.get_untracked().trim().to_string();
		if requested.is_empty() || uploading.get_untracked() || processing.get_untracked() {
			return;
		}
		failure.set(None);
		spawn_local(async move {
			match run_topic_flow(requested, processing, progress).await {
				Ok(id) => ready.set(Some(id)),
				Err(err) => {
					error!("topic processing failed: {err}");
					failure.set(Some("Failed to process topic".into()));
				}
			}
			processing.set(false);
			progress.set(0);
		});
	};

	view! {
		<div class="upload-page">
			<div class="hero">
				<h1>"Transform Your Documents"</h1>
				<p class="hero-subtitle">
					"Upload a PDF and let AI generate mind maps, flashcards, quizzes, and more"
				</p>
				<div class="feature-grid">
					<div class="feature">"Mind Maps"</div>
					<div class="feature">"Flashcards"</div>
					<div class="feature">"Quizzes"</div>
					<div class="feature">"AI Chat"</div>
				</div>
			</div>

			<div class="mode-toggle">
				<button
					class:active=move || mode.get() == InputMode::Pdf
					on:click=move |_| mode.set(InputMode::Pdf)
				>
					"Upload PDF"
				</button>
				<button
					class:active=move || mode.get() == InputMode::Topic
					on:click=move |_| mode.set(InputMode::Topic)
				>
					"Enter Topic"
				</button>
			</div>

			<div class="upload-panel">
				<Show when=move || !busy()>
					<Show
						when=move || mode.get() == InputMode::Pdf
						fallback=move || {
							view! {
								<form class="topic-form" on:submit=on_topic>
									<p class="panel-title">"Enter Any Topic"</p>
									<input
										type="text"
										placeholder="e.g., Photosynthesis, Machine Learning, World War II..."
										prop:value=move || topic.get()
										on:input=move |ev| topic.set(event_target_value(&ev))
									/>
									<button
										type="submit"
										class="wide"
										prop:disabled=move || topic.with(|t| t.trim().is_empty())
									>
										"Generate Learning Materials"
									</button>
								</form>
							}
						}
					>
						<label class="drop-zone">
							<p class="panel-title">"Drop your PDF here"</p>
							<p class="panel-hint">"or click to browse"</p>
							<p class="panel-note">"PDF files only \u{2022} Max 50MB"</p>
							<input type="file" accept=".pdf" class="file-input" on:change=on_file />
						</label>
					</Show>
				</Show>

				<Show when=busy>
					<div class="progress-block">
						<p class="panel-title">
							{move || {
								if uploading.get() {
									"Uploading Document\u{2026}"
								} else {
									"AI Processing\u{2026}"
								}
							}}
						</p>
						<p class="panel-hint">
							"Generating mind map, flashcards, quiz, and more..."
						</p>
						<div class="progress-bar">
							<div
								class="progress-fill"
								style:width=move || format!("{}%", progress.get())
							></div>
						</div>
						<p class="panel-note">{move || format!("{}% Complete", progress.get())}</p>
					</div>
				</Show>

				{move || {
					failure.get().map(|message| view! { <p class="error-row">{message}</p> })
				}}
			</div>
		</div>
	}
}
