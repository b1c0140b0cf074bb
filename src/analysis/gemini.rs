//! `generateContent` transport over HTTPS.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Backend, GenerateRequest};
use crate::error::AnalysisError;

/// Client for a Gemini-style `models/{model}:generateContent` endpoint.
#[derive(Clone, Debug)]
pub struct GeminiClient {
	http: reqwest::Client,
	endpoint: String,
	model: String,
	api_key: String,
}

impl GeminiClient {
	pub fn new(endpoint: &str, model: &str, api_key: &str) -> Self {
		Self {
			http: reqwest::Client::new(),
			endpoint: endpoint.trim_end_matches('/').to_string(),
			model: model.to_string(),
			api_key: api_key.to_string(),
		}
	}

	fn url(&self) -> String {
		format!("{}/models/{}:generateContent", self.endpoint, self.model)
	}
}

impl Backend for GeminiClient {
	async fn generate(&self, request: GenerateRequest) -> Result<String, AnalysisError> {
		let body = RequestBody::from_request(&request);
		let response = self
			.http
			.post(self.url())
			.header("x-goog-api-key", &self.api_key)
			.json(&body)
			.send()
			.await?;

		let status = response.status();
		if !status.is_success() {
			return Err(AnalysisError::Status(status.as_u16()));
		}

		let raw = response.text().await?;
		let reply: ResponseBody = serde_json::from_str(&raw)?;
		reply.into_text().ok_or(AnalysisError::EmptyResponse)
	}
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RequestBody<'a> {
	contents: Vec<Content<'a>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	generation_config: Option<GenerationConfig<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
	parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
	text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
	response_mime_type: &'static str,
	response_schema: &'a Value,
}

impl<'a> RequestBody<'a> {
	fn from_request(request: &'a GenerateRequest) -> Self {
		Self {
			contents: vec![Content {
				parts: vec![Part {
					text: &request.prompt,
				}],
			}],
			generation_config: request.schema.as_ref().map(|schema| GenerationConfig {
				response_mime_type: "application/json",
				response_schema: schema,
			}),
		}
	}
}

#[derive(Deserialize)]
struct ResponseBody {
	#[serde(default)]
	candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
	content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
	#[serde(default)]
	parts: Vec<ReplyPart>,
}

#[derive(Deserialize)]
struct ReplyPart {
	text: Option<String>,
}

impl ResponseBody {
	/// Concatenated text of the first candidate, if it has any.
	fn into_text(self) -> Option<String> {
		let content = self.candidates.into_iter().next()?.content?;
		let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
		(!text.is_empty()).then_some(text)
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[test]
	fn structured_request_carries_schema() {
		let request = GenerateRequest {
			prompt: "p".into(),
			schema: Some(json!({ "type": "ARRAY" })),
		};
		let body = serde_json::to_value(RequestBody::from_request(&request)).unwrap();
		assert_eq!(body["contents"][0]["parts"][0]["text"], "p");
		assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
		assert_eq!(body["generationConfig"]["responseSchema"]["type"], "ARRAY");
	}

	#[test]
	fn plain_request_omits_generation_config() {
		let request = GenerateRequest {
			prompt: "p".into(),
			schema: None,
		};
		let body = serde_json::to_value(RequestBody::from_request(&request)).unwrap();
		assert!(body.get("generationConfig").is_none());
	}

	#[test]
	fn reply_text_joins_first_candidate_parts() {
		let reply: ResponseBody = serde_json::from_value(json!({
			"candidates": [
				{ "content": { "parts": [{ "text": "[\"a\"," }, { "text": "\"b\"]" }] } },
				{ "content": { "parts": [{ "text": "ignored" }] } }
			]
		}))
		.unwrap();
		assert_eq!(reply.into_text().as_deref(), Some("[\"a\",\"b\"]"));
	}

	#[test]
	fn reply_without_candidates_is_empty() {
		let reply: ResponseBody = serde_json::from_value(json!({})).unwrap();
		assert!(reply.into_text().is_none());
	}

	#[test]
	fn url_joins_endpoint_and_model() {
		let client = GeminiClient::new("https://example.test/v1beta/", "m-1", "k");
		assert_eq!(client.url(), "https://example.test/v1beta/models/m-1:generateContent");
	}
}
