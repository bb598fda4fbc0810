//! HTTP client for the study service.
//!
//! The service is an opaque collaborator: it ingests documents, runs the
//! AI generation, and answers chat questions. Everything here is a thin
//! fetch wrapper around its JSON endpoints.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FormData, Headers, Request, RequestInit, Response};

use crate::types::{ChatMessage, GeneratedContent};

const API_URL: &str = "http://localhost:3001/api";

/// Client-side view of a request failure.
#[derive(Clone, Debug, Error)]
pub enum ApiError {
	#[error("network error: {0}")]
	Network(String),
	#[error("service returned HTTP {0}")]
	Http(u16),
	#[error("malformed response: {0}")]
	Decode(String),
}

/// A stored document: its id plus the extracted text the AI pipeline
/// consumes.
#[derive(Clone, Debug, Deserialize)]
pub struct DocumentRecord {
	pub id: String,
	#[serde(default)]
	pub text: String,
}

#[derive(Serialize)]
struct TopicRequest<'a> {
	topic: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProcessRequest<'a> {
	document_id: &'a str,
	text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ChatRequest<'a> {
	document_id: &'a str,
	question: &'a str,
	history: &'a [ChatMessage],
}

#[derive(Deserialize)]
struct ChatReply {
	answer: String,
}

/// Uploads a PDF and returns the stored document record.
pub async fn upload_document(file: &File) -> Result<DocumentRecord, ApiError> {
	let form = FormData::new().map_err(js_error)?;
	form.append_with_blob("file", file).map_err(js_error)?;

	let opts = RequestInit::new();
	opts.set_method("POST");
	opts.set_body(form.as_ref());
	let request = Request::new_with_str_and_init(&format!("{API_URL}/documents/upload"), &opts)
		.map_err(js_error)?;
	fetch_json(request).await
}

/// Asks the service to synthesize a document from a bare topic string.
pub async fn create_topic_document(topic: &str) -> Result<DocumentRecord, ApiError> {
	fetch_json(post_json("/documents/topic", &TopicRequest { topic })?).await
}

/// Kicks off AI generation for a stored document. The call returns once
/// the content bundle is ready to fetch.
pub async fn process_document(document_id: &str, text: &str) -> Result<(), ApiError> {
	let request = post_json("/ai/process", &ProcessRequest { document_id, text })?;
	fetch_ok(request).await?;
	Ok(())
}

pub async fn get_document(id: &str) -> Result<DocumentRecord, ApiError> {
	fetch_json(get(&format!("/documents/{id}"))?).await
}

/// Fetches the generated study bundle for a document.
pub async fn get_generated_content(document_id: &str) -> Result<GeneratedContent, ApiError> {
	fetch_json(get(&format!("/ai/content/{document_id}"))?).await
}

/// Asks a question about the document, sending prior messages as context.
pub async fn chat(
	document_id: &str,
	question: &str,
	history: &[ChatMessage],
) -> Result<String, ApiError> {
	let request = post_json(
		"/ai/chat",
		&ChatRequest {
			document_id,
			question,
			history,
		},
	)?;
	let reply: ChatReply = fetch_json(request).await?;
	Ok(reply.answer)
}

fn get(path: &str) -> Result<Request, ApiError> {
	Request::new_with_str(&format!("{API_URL}{path}")).map_err(js_error)
}

fn post_json(path: &str, body: &impl Serialize) -> Result<Request, ApiError> {
	let body = serde_json::to_string(body).map_err(|e| ApiError::Decode(e.to_string()))?;
	let opts = RequestInit::new();
	opts.set_method("POST");
	opts.set_body(&JsValue::from_str(&body));
	let headers = Headers::new().map_err(js_error)?;
	headers
		.set("Content-Type", "application/json")
		.map_err(js_error)?;
	opts.set_headers(&headers);
	Request::new_with_str_and_init(&format!("{API_URL}{path}"), &opts).map_err(js_error)
}

async fn fetch_ok(request: Request) -> Result<Response, ApiError> {
	let window = web_sys::window().ok_or_else(|| ApiError::Network("no window".into()))?;
	let value = JsFuture::from(window.fetch_with_request(&request))
		.await
		.map_err(js_error)?;
	let response: Response = value.dyn_into().map_err(js_error)?;
	if !response.ok() {
		return Err(ApiError::Http(response.status()));
	}
	Ok(response)
}

async fn fetch_json<T: DeserializeOwned>(request: Request) -> Result<T, ApiError> {
	let response = fetch_ok(request).await?;
	let text = JsFuture::from(response.text().map_err(js_error)?)
		.await
		.map_err(js_error)?;
	serde_json::from_str(&text.as_string().unwrap_or_default())
		.map_err(|e| ApiError::Decode(e.to_string()))
}

fn js_error(value: JsValue) -> ApiError {
	ApiError::Network(value.as_string().unwrap_or_else(|| format!("{value:?}")))
}
