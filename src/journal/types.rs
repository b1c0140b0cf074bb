//! Journal entities: inspirations, moods, and daily challenges.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Emotional tone attached to an inspiration by the analysis step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
	Peaceful,
	Melancholic,
	Joyful,
	Anxious,
	#[default]
	Neutral,
}

impl Mood {
	/// All moods in display order.
	pub const ALL: [Mood; 5] = [
		Mood::Peaceful,
		Mood::Melancholic,
		Mood::Joyful,
		Mood::Anxious,
		Mood::Neutral,
	];

	/// Lenient parse used on model output. Anything unrecognised is neutral.
	pub fn parse_lenient(raw: &str) -> Self {
		match raw.trim().to_ascii_lowercase().as_str() {
			"peaceful" => Mood::Peaceful,
			"melancholic" => Mood::Melancholic,
			"joyful" => Mood::Joyful,
			"anxious" => Mood::Anxious,
			_ => Mood::Neutral,
		}
	}

	pub fn as_str(self) -> &'static str {
		match self {
			Mood::Peaceful => "peaceful",
			Mood::Melancholic => "melancholic",
			Mood::Joyful => "joyful",
			Mood::Anxious => "anxious",
			Mood::Neutral => "neutral",
		}
	}

	/// Short Chinese caption shown on cards.
	pub fn caption(self) -> &'static str {
		match self {
			Mood::Peaceful => "静",
			Mood::Melancholic => "愁",
			Mood::Joyful => "喜",
			Mood::Anxious => "惘",
			Mood::Neutral => "平",
		}
	}
}

impl fmt::Display for Mood {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A captured note. Owned by [`super::store::InspirationStore`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inspiration {
	pub id: String,
	pub content: String,
	pub date: NaiveDate,
	#[serde(default)]
	pub tags: Vec<String>,
	#[serde(default)]
	pub mood: Mood,
	#[serde(default)]
	pub imagery: Vec<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub image_url: Option<String>,
	/// Ids of related inspirations. May name ids that no longer exist.
	#[serde(default)]
	pub connections: Vec<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub challenge_id: Option<String>,
}

impl Inspiration {
	/// First tag, used as the folder key.
	pub fn primary_tag(&self) -> Option<&str> {
		self.tags.first().map(String::as_str)
	}
}

/// Daily writing prompt a capture can be attached to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Challenge {
	pub id: String,
	pub date: NaiveDate,
	pub title: String,
	pub prompt: String,
	pub theme: String,
	pub completed: bool,
}

/// Drop duplicates, keeping the first occurrence of each value.
pub fn dedup_preserving_order(values: Vec<String>) -> Vec<String> {
	let mut out: Vec<String> = Vec::with_capacity(values.len());
	for value in values {
		if !out.contains(&value) {
			out.push(value);
		}
	}
	out
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn unknown_mood_is_neutral() {
		assert_eq!(Mood::parse_lenient("Joyful "), Mood::Joyful);
		assert_eq!(Mood::parse_lenient("ecstatic"), Mood::Neutral);
		assert_eq!(Mood::parse_lenient(""), Mood::Neutral);
	}

	#[test]
	fn dedup_keeps_first_occurrence() {
		let tags = vec!["雨".into(), "夜".into(), "雨".into(), "水".into(), "夜".into()];
		assert_eq!(dedup_preserving_order(tags), vec!["雨", "夜", "水"]);
	}

	#[test]
	fn inspiration_reads_camel_case_json() {
		let json = r#"{
			"id": "7",
			"content": "茶烟轻飏落花风。",
			"date": "2023-10-13",
			"tags": ["日常"],
			"mood": "peaceful",
			"imageUrl": "https://example.com/a.png",
			"connections": ["2"]
		}"#;
		let item: Inspiration = serde_json::from_str(json).unwrap();
		assert_eq!(item.mood, Mood::Peaceful);
		assert_eq!(item.image_url.as_deref(), Some("https://example.com/a.png"));
		assert!(item.imagery.is_empty());
		assert_eq!(item.date, NaiveDate::from_ymd_opt(2023, 10, 13).unwrap());
	}
}
