//! Application configuration embedded in the host page.
//!
//! The page may carry a `<script id="app-config" type="application/json">`
//! element. Every section is optional; missing fields take their defaults.

use log::Level;
use serde::Deserialize;

use crate::components::force_graph::LayoutConfig;
use crate::error::ConfigError;

/// Top-level config.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct AppConfig {
	pub log_level: String,
	/// Graph theme name, `ink` or `inkstone`.
	pub theme: String,
	pub analysis: AnalysisConfig,
	pub layout: LayoutConfig,
}

/// Language-model service settings.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
	pub api_key: Option<String>,
	pub model: String,
	pub endpoint: String,
}

impl Default for AppConfig {
	fn default() -> Self {
		Self {
			log_level: "info".into(),
			theme: "ink".into(),
			analysis: AnalysisConfig::default(),
			layout: LayoutConfig::default(),
		}
	}
}

impl Default for AnalysisConfig {
	fn default() -> Self {
		Self {
			api_key: None,
			model: "gemini-2.5-flash".into(),
			endpoint: "https://generativelanguage.googleapis.com/v1beta".into(),
		}
	}
}

impl AnalysisConfig {
	/// The key, if one is set and not blank.
	pub fn api_key(&self) -> Option<&str> {
		self.api_key
			.as_deref()
			.map(str::trim)
			.filter(|key| !key.is_empty())
	}
}

impl AppConfig {
	pub fn from_json(text: &str) -> Result<Self, ConfigError> {
		Ok(serde_json::from_str(text)?)
	}

	/// Parsed log level, `None` when the name is unknown. Called before the
	/// logger exists, so it does not log.
	pub fn log_level(&self) -> Option<Level> {
		self.log_level.parse().ok()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_object_is_all_defaults() {
		let config = AppConfig::from_json("{}").unwrap();
		assert_eq!(config.analysis.model, "gemini-2.5-flash");
		assert!(config.analysis.api_key().is_none());
		assert_eq!(config.layout.link_distance, 120.0);
		assert_eq!(config.log_level(), Some(Level::Info));
		assert_eq!(config.theme, "ink");
	}

	#[test]
	fn partial_sections_merge_with_defaults() {
		let config = AppConfig::from_json(
			r#"{ "log_level": "debug", "analysis": { "api_key": "abc" }, "layout": { "charge_strength": -80 } }"#,
		)
		.unwrap();
		assert_eq!(config.log_level(), Some(Level::Debug));
		assert_eq!(config.analysis.api_key(), Some("abc"));
		assert_eq!(config.layout.charge_strength, -80.0);
		assert_eq!(config.layout.collide_radius, 40.0);
	}

	#[test]
	fn blank_key_counts_as_unconfigured() {
		let config = AppConfig::from_json(r#"{ "analysis": { "api_key": "   " } }"#).unwrap();
		assert!(config.analysis.api_key().is_none());
	}

	#[test]
	fn bad_json_is_a_parse_error() {
		assert!(matches!(AppConfig::from_json("{"), Err(ConfigError::Parse(_))));
	}

	#[test]
	fn unknown_level_is_reported_as_none() {
		let config = AppConfig {
			log_level: "loud".into(),
			..AppConfig::default()
		};
		assert_eq!(config.log_level(), None);
	}
}
