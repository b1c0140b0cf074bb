//! Hosted language-model collaborator.
//!
//! [`Analyst`] owns the fallback policy: with no backend configured it
//! answers from fixed mocks, and any backend error is logged and replaced by
//! a neutral default. Callers never see an error.

mod gemini;

use log::{debug, warn};
use serde::Deserialize;
use serde_json::{Value, json};

pub use gemini::GeminiClient;

use crate::config::AnalysisConfig;
use crate::error::AnalysisError;
use crate::journal::{Mood, dedup_preserving_order};

/// Upper bound on concepts taken from one brainstorm reply.
pub const MAX_CANDIDATES: usize = 3;

/// Expansion text when no backend is configured.
pub const MOCK_EXPANSION: &str = "月影沉入水底，静谧而深邃。 (模拟扩写)";
/// Expansion text when the backend fails.
pub const FAILED_EXPANSION: &str = "暂时无法进行扩写。";
/// Brainstorm concepts when no backend is configured.
pub const MOCK_CONCEPTS: [&str; 3] = ["雨落无声", "光影斑驳", "随风而逝的记忆"];
/// Brainstorm concepts when the backend fails.
pub const FALLBACK_CONCEPTS: [&str; 2] = ["思维的桥梁", "往日的回响"];

/// One generation call: a prompt and, for structured replies, a JSON schema.
#[derive(Clone, Debug, PartialEq)]
pub struct GenerateRequest {
	pub prompt: String,
	pub schema: Option<Value>,
}

/// Transport to a text-generation service.
#[allow(async_fn_in_trait)]
pub trait Backend {
	/// Run one prompt and return the raw reply text.
	async fn generate(&self, request: GenerateRequest) -> Result<String, AnalysisError>;
}

/// Mood, imagery and tags extracted from captured text.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Analysis {
	pub mood: Mood,
	pub imagery: Vec<String>,
	pub tags: Vec<String>,
}

impl Analysis {
	/// Canned result used while unconfigured.
	pub fn mock() -> Self {
		Self {
			mood: Mood::Peaceful,
			imagery: vec!["风".into(), "云".into()],
			tags: vec!["静谧".into(), "思考".into()],
		}
	}

	/// Result used after a failed call.
	pub fn neutral() -> Self {
		Self::default()
	}
}

#[derive(Deserialize)]
struct RawAnalysis {
	#[serde(default)]
	mood: String,
	#[serde(default)]
	imagery: Vec<String>,
	#[serde(default)]
	tags: Vec<String>,
}

impl From<RawAnalysis> for Analysis {
	fn from(raw: RawAnalysis) -> Self {
		Self {
			mood: Mood::parse_lenient(&raw.mood),
			imagery: dedup_preserving_order(raw.imagery),
			tags: dedup_preserving_order(raw.tags),
		}
	}
}

/// Fallback-wrapping front for a [`Backend`].
#[derive(Clone, Debug)]
pub struct Analyst<B = GeminiClient> {
	backend: Option<B>,
}

impl Analyst<GeminiClient> {
	/// Build from config. A blank or missing API key means unconfigured.
	pub fn from_config(config: &AnalysisConfig) -> Self {
		match config.api_key() {
			Some(key) => Self::new(GeminiClient::new(&config.endpoint, &config.model, key)),
			None => {
				debug!("analysis: no API key, using mock responses");
				Self::offline()
			}
		}
	}
}

impl<B: Backend> Analyst<B> {
	pub fn new(backend: B) -> Self {
		Self {
			backend: Some(backend),
		}
	}

	/// An analyst that only ever returns the mocks.
	pub fn offline() -> Self {
		Self { backend: None }
	}

	pub fn is_configured(&self) -> bool {
		self.backend.is_some()
	}

	/// Classify captured text.
	pub async fn analyze(&self, text: &str) -> Analysis {
		let Some(backend) = &self.backend else {
			return Analysis::mock();
		};
		match Self::try_analyze(backend, text).await {
			Ok(analysis) => analysis,
			Err(e) => {
				warn!("analysis: analyze failed: {e}");
				Analysis::neutral()
			}
		}
	}

	/// Elaborate a note into a short prose poem.
	pub async fn expand(&self, text: &str) -> String {
		let Some(backend) = &self.backend else {
			return MOCK_EXPANSION.to_string();
		};
		let request = GenerateRequest {
			prompt: expand_prompt(text),
			schema: None,
		};
		match backend.generate(request).await {
			Ok(reply) if !reply.trim().is_empty() => reply.trim().to_string(),
			Ok(_) => {
				warn!("analysis: expand returned blank text");
				FAILED_EXPANSION.to_string()
			}
			Err(e) => {
				warn!("analysis: expand failed: {e}");
				FAILED_EXPANSION.to_string()
			}
		}
	}

	/// Propose up to [`MAX_CANDIDATES`] concepts bridging the given notes.
	pub async fn brainstorm(&self, contents: &[String]) -> Vec<String> {
		let Some(backend) = &self.backend else {
			return MOCK_CONCEPTS.iter().map(|s| s.to_string()).collect();
		};
		match Self::try_brainstorm(backend, contents).await {
			Ok(concepts) => concepts,
			Err(e) => {
				warn!("analysis: brainstorm failed: {e}");
				FALLBACK_CONCEPTS.iter().map(|s| s.to_string()).collect()
			}
		}
	}

	async fn try_analyze(backend: &B, text: &str) -> Result<Analysis, AnalysisError> {
		let reply = backend
			.generate(GenerateRequest {
				prompt: analyze_prompt(text),
				schema: Some(analysis_schema()),
			})
			.await?;
		let raw: RawAnalysis = serde_json::from_str(strip_code_fence(&reply))?;
		Ok(raw.into())
	}

	async fn try_brainstorm(backend: &B, contents: &[String]) -> Result<Vec<String>, AnalysisError> {
		let reply = backend
			.generate(GenerateRequest {
				prompt: brainstorm_prompt(&contents.join(" | ")),
				schema: Some(json!({ "type": "ARRAY", "items": { "type": "STRING" } })),
			})
			.await?;
		let concepts: Vec<String> = serde_json::from_str(strip_code_fence(&reply))?;
		Ok(concepts
			.into_iter()
			.map(|c| c.trim().to_string())
			.filter(|c| !c.is_empty())
			.take(MAX_CANDIDATES)
			.collect())
	}
}

fn analysis_schema() -> Value {
	json!({
		"type": "OBJECT",
		"properties": {
			"mood": { "type": "STRING" },
			"imagery": { "type": "ARRAY", "items": { "type": "STRING" } },
			"tags": { "type": "ARRAY", "items": { "type": "STRING" } }
		}
	})
}

fn analyze_prompt(text: &str) -> String {
	format!(
		"分析以下文本的情绪基调（mood）和自然意象（imagery，如风、花、雪、月）。\n\
		 文本: \"{text}\"\n\
		 返回一个JSON，包含 mood (只能是: peaceful, melancholic, joyful, anxious, neutral 之一), \
		 imagery (字符串数组, 中文), 和 tags (字符串数组, 抽象关键词, 中文)."
	)
}

fn expand_prompt(text: &str) -> String {
	format!(
		"请将这段灵感扩写成一段简短、充满中国古典美学意境的散文诗。保持空灵、雅致。\n文本: \"{text}\""
	)
}

fn brainstorm_prompt(summary: &str) -> String {
	format!(
		"这里有一些充满诗意的灵感片段: \"{summary}\"。\n\
		 请生成 {MAX_CANDIDATES} 个 新的、简短的、充满创造力的概念，用来连接这些想法，或者探索它们之间的“留白”。\n\
		 要求：中文，富有诗意，简短（10字以内）。\n\
		 返回 JSON 字符串数组。"
	)
}

/// Models occasionally wrap JSON in a markdown fence even when asked not to.
fn strip_code_fence(reply: &str) -> &str {
	let trimmed = reply.trim();
	let Some(body) = trimmed.strip_prefix("```") else {
		return trimmed;
	};
	let body = body.strip_prefix("json").unwrap_or(body);
	body.strip_suffix("```").unwrap_or(body).trim()
}

#[cfg(test)]
mod tests {
	use std::cell::RefCell;
	use std::collections::VecDeque;

	use super::*;

	/// Replays canned replies and records the prompts it was sent.
	#[derive(Default)]
	struct ScriptedBackend {
		replies: RefCell<VecDeque<Result<String, AnalysisError>>>,
		seen: RefCell<Vec<GenerateRequest>>,
	}

	impl ScriptedBackend {
		fn replying(replies: Vec<Result<String, AnalysisError>>) -> Self {
			Self {
				replies: RefCell::new(replies.into()),
				seen: RefCell::default(),
			}
		}
	}

	impl Backend for &ScriptedBackend {
		async fn generate(&self, request: GenerateRequest) -> Result<String, AnalysisError> {
			self.seen.borrow_mut().push(request);
			self.replies
				.borrow_mut()
				.pop_front()
				.unwrap_or(Err(AnalysisError::EmptyResponse))
		}
	}

	#[tokio::test]
	async fn offline_analyst_returns_mocks() {
		let analyst: Analyst<&ScriptedBackend> = Analyst::offline();
		assert!(!analyst.is_configured());
		assert_eq!(analyst.analyze("雨").await, Analysis::mock());
		assert_eq!(analyst.expand("雨").await, MOCK_EXPANSION);
		assert_eq!(analyst.brainstorm(&[]).await, MOCK_CONCEPTS.to_vec());
	}

	#[tokio::test]
	async fn analyze_parses_and_coerces_mood() {
		let backend = ScriptedBackend::replying(vec![Ok(
			r#"{"mood":"wistful","imagery":["月","月","水"],"tags":["夜"]}"#.into(),
		)]);
		let analyst = Analyst::new(&backend);
		let analysis = analyst.analyze("月下独酌").await;
		assert_eq!(analysis.mood, Mood::Neutral);
		assert_eq!(analysis.imagery, vec!["月", "水"]);
		assert_eq!(analysis.tags, vec!["夜"]);

		let seen = backend.seen.borrow();
		assert!(seen[0].prompt.contains("月下独酌"));
		assert!(seen[0].schema.is_some());
	}

	#[tokio::test]
	async fn analyze_failure_is_neutral() {
		let backend = ScriptedBackend::replying(vec![Err(AnalysisError::Status(503))]);
		let analyst = Analyst::new(&backend);
		assert_eq!(analyst.analyze("x").await, Analysis::neutral());

		let backend = ScriptedBackend::replying(vec![Ok("not json".into())]);
		let analyst = Analyst::new(&backend);
		assert_eq!(analyst.analyze("x").await, Analysis::neutral());
	}

	#[tokio::test]
	async fn expand_failure_apologises() {
		let backend = ScriptedBackend::replying(vec![
			Ok("  山色空蒙雨亦奇。 ".into()),
			Err(AnalysisError::EmptyResponse),
			Ok("   ".into()),
		]);
		let analyst = Analyst::new(&backend);
		assert_eq!(analyst.expand("山").await, "山色空蒙雨亦奇。");
		assert_eq!(analyst.expand("山").await, FAILED_EXPANSION);
		assert_eq!(analyst.expand("山").await, FAILED_EXPANSION);
	}

	#[tokio::test]
	async fn brainstorm_joins_contents_and_caps_candidates() {
		let backend = ScriptedBackend::replying(vec![Ok(
			"```json\n[\"一\", \" \", \"二\", \"三\", \"四\"]\n```".into(),
		)]);
		let analyst = Analyst::new(&backend);
		let contents = vec!["听雨".to_string(), "观云".to_string()];
		let concepts = analyst.brainstorm(&contents).await;
		assert_eq!(concepts, vec!["一", "二", "三"]);
		assert!(backend.seen.borrow()[0].prompt.contains("听雨 | 观云"));
	}

	#[tokio::test]
	async fn brainstorm_failure_uses_fallback_pair() {
		let backend = ScriptedBackend::replying(vec![Err(AnalysisError::Unconfigured)]);
		let analyst = Analyst::new(&backend);
		assert_eq!(analyst.brainstorm(&[]).await, FALLBACK_CONCEPTS.to_vec());
	}

	#[test]
	fn fences_are_stripped() {
		assert_eq!(strip_code_fence("```json\n[1]\n```"), "[1]");
		assert_eq!(strip_code_fence("  {\"a\":1} "), "{\"a\":1}");
	}
}
