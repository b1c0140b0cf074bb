//! Built-in starting collection and daily challenges.

use chrono::NaiveDate;

use super::types::{Challenge, Inspiration, Mood};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
	NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn strings(values: &[&str]) -> Vec<String> {
	values.iter().map(|s| s.to_string()).collect()
}

struct SeedNote {
	id: &'static str,
	content: &'static str,
	day: u32,
	tags: &'static [&'static str],
	mood: Mood,
	imagery: &'static [&'static str],
	image_url: Option<&'static str>,
	connections: &'static [&'static str],
}

const SEED: &[SeedNote] = &[
	SeedNote {
		id: "1",
		content: "竹影扫阶尘不动，月轮穿沼水无痕。",
		day: 1,
		tags: &["禅意", "静谧", "自然"],
		mood: Mood::Peaceful,
		imagery: &["竹", "台阶", "尘埃"],
		image_url: None,
		connections: &["2", "3", "6"],
	},
	SeedNote {
		id: "2",
		content: "月光如积水空明，水中藻、荇交横，盖竹柏影也。",
		day: 2,
		tags: &["清澈", "夜", "水"],
		mood: Mood::Melancholic,
		imagery: &["月", "水", "竹影"],
		image_url: Some("https://picsum.photos/400/300"),
		connections: &["1", "7", "8"],
	},
	SeedNote {
		id: "3",
		content: "听雨入孤舟，点滴在心头。",
		day: 5,
		tags: &["孤独", "声", "雨"],
		mood: Mood::Melancholic,
		imagery: &["雨", "舟"],
		image_url: None,
		connections: &["1", "9"],
	},
	SeedNote {
		id: "4",
		content: "春风又绿江南岸，明月何时照我还。",
		day: 8,
		tags: &["希望", "新生", "春"],
		mood: Mood::Joyful,
		imagery: &["风", "江", "草"],
		image_url: None,
		connections: &["10", "11"],
	},
	SeedNote {
		id: "5",
		content: "云深不知处，只在此山中。",
		day: 10,
		tags: &["神秘", "远方", "山"],
		mood: Mood::Anxious,
		imagery: &["云", "山"],
		image_url: None,
		connections: &["6"],
	},
	SeedNote {
		id: "6",
		content: "晴空一鹤排云上，便引诗情到碧霄。",
		day: 12,
		tags: &["自由", "自然", "禅"],
		mood: Mood::Peaceful,
		imagery: &["鹤", "天"],
		image_url: None,
		connections: &["1", "5"],
	},
	SeedNote {
		id: "7",
		content: "茶烟轻飏落花风。",
		day: 13,
		tags: &["日常", "水", "静"],
		mood: Mood::Peaceful,
		imagery: &["茶", "花"],
		image_url: None,
		connections: &["2"],
	},
	SeedNote {
		id: "8",
		content: "夜深风竹敲秋韵，万叶千声皆是恨。",
		day: 14,
		tags: &["夜", "路", "光"],
		mood: Mood::Melancholic,
		imagery: &["灯", "径"],
		image_url: None,
		connections: &["2", "9"],
	},
	SeedNote {
		id: "9",
		content: "清泉石上流。",
		day: 15,
		tags: &["雨", "质感", "自然"],
		mood: Mood::Neutral,
		imagery: &["石", "暴风雨"],
		image_url: None,
		connections: &["3", "8"],
	},
	SeedNote {
		id: "10",
		content: "人面桃花相映红。",
		day: 16,
		tags: &["春", "喜悦", "花"],
		mood: Mood::Joyful,
		imagery: &["桃花", "风"],
		image_url: None,
		connections: &["4"],
	},
	SeedNote {
		id: "11",
		content: "万条垂下绿丝绦。",
		day: 17,
		tags: &["春", "动感", "树"],
		mood: Mood::Joyful,
		imagery: &["柳", "丝"],
		image_url: None,
		connections: &["4", "10"],
	},
	SeedNote {
		id: "12",
		content: "闲敲棋子落灯花。",
		day: 18,
		tags: &["记忆", "物", "书房"],
		mood: Mood::Neutral,
		imagery: &["书", "桌"],
		image_url: None,
		connections: &["1"],
	},
	SeedNote {
		id: "13",
		content: "姑苏城外寒山寺，夜半钟声到客船。",
		day: 19,
		tags: &["声", "禅", "远方"],
		mood: Mood::Peaceful,
		imagery: &["钟", "寺"],
		image_url: None,
		connections: &["1", "3", "5"],
	},
];

/// The thirteen classical-verse notes the journal opens with.
pub fn seed_inspirations() -> Vec<Inspiration> {
	SEED.iter()
		.map(|seed| Inspiration {
			id: seed.id.to_string(),
			content: seed.content.to_string(),
			date: date(2023, 10, seed.day),
			tags: strings(seed.tags),
			mood: seed.mood,
			imagery: strings(seed.imagery),
			image_url: seed.image_url.map(str::to_string),
			connections: strings(seed.connections),
			challenge_id: None,
		})
		.collect()
}

/// Challenge history; the first one is always dated `today`.
pub fn seed_challenges(today: NaiveDate) -> Vec<Challenge> {
	let challenge = |id: &str, date, title: &str, prompt: &str, theme: &str, completed| Challenge {
		id: id.into(),
		date,
		title: title.into(),
		prompt: prompt.into(),
		theme: theme.into(),
		completed,
	};
	vec![
		challenge(
			"c1",
			today,
			"须臾",
			"描述一个只持续了五秒钟，却让你感觉永恒的瞬间。",
			"观察",
			false,
		),
		challenge(
			"c2",
			date(2023, 10, 24),
			"风语",
			"当冷风拂面时，你想起了什么往事？",
			"记忆",
			true,
		),
		challenge(
			"c3",
			date(2023, 10, 23),
			"光影",
			"观察此刻房间里的光影，它们构成了什么形状？",
			"观察",
			true,
		),
		challenge(
			"c4",
			date(2023, 10, 22),
			"寂声",
			"描述你今天听到过的最安静的声音。",
			"感官",
			false,
		),
		challenge(
			"c5",
			date(2023, 10, 21),
			"心色",
			"如果你此刻的心情是一种兑了水的颜色，那会是什么？",
			"想象",
			true,
		),
	]
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn seed_ids_are_unique() {
		let items = seed_inspirations();
		let mut ids: Vec<_> = items.iter().map(|i| i.id.as_str()).collect();
		ids.sort_unstable();
		ids.dedup();
		assert_eq!(ids.len(), items.len());
		assert_eq!(items.len(), 13);
	}

	#[test]
	fn todays_challenge_comes_first() {
		let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
		let challenges = seed_challenges(today);
		assert_eq!(challenges[0].date, today);
		assert!(!challenges[0].completed);
	}
}
