//! Ordering and grouping behind the wall's three layouts.

use super::types::Inspiration;

/// Folder key for notes without tags.
pub const UNSORTED_FOLDER: &str = "未分类";

/// How the wall presents the store.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViewMode {
	#[default]
	Masonry,
	Timeline,
	Folder,
}

impl ViewMode {
	/// masonry -> timeline -> folder -> masonry
	pub fn next(self) -> Self {
		match self {
			ViewMode::Masonry => ViewMode::Timeline,
			ViewMode::Timeline => ViewMode::Folder,
			ViewMode::Folder => ViewMode::Masonry,
		}
	}

	pub fn label(self) -> &'static str {
		match self {
			ViewMode::Masonry => "瀑布",
			ViewMode::Timeline => "时间",
			ViewMode::Folder => "归档",
		}
	}
}

/// Newest date first. Stable, so same-day notes keep store order.
pub fn timeline(items: &[Inspiration]) -> Vec<Inspiration> {
	let mut sorted = items.to_vec();
	sorted.sort_by(|a, b| b.date.cmp(&a.date));
	sorted
}

/// A folder of notes sharing a first tag.
#[derive(Clone, Debug, PartialEq)]
pub struct Folder {
	pub tag: String,
	pub items: Vec<Inspiration>,
}

/// Group by first tag. Folders appear in order of first appearance.
pub fn folders(items: &[Inspiration]) -> Vec<Folder> {
	let mut out: Vec<Folder> = Vec::new();
	for item in items {
		let tag = item.primary_tag().unwrap_or(UNSORTED_FOLDER);
		match out.iter_mut().find(|folder| folder.tag == tag) {
			Some(folder) => folder.items.push(item.clone()),
			None => out.push(Folder {
				tag: tag.to_string(),
				items: vec![item.clone()],
			}),
		}
	}
	out
}

#[cfg(test)]
mod tests {
	use chrono::NaiveDate;

	use super::*;
	use crate::journal::types::Mood;

	fn note(id: &str, day: u32, tags: &[&str]) -> Inspiration {
		Inspiration {
			id: id.into(),
			content: id.into(),
			date: NaiveDate::from_ymd_opt(2023, 10, day).unwrap(),
			tags: tags.iter().map(|t| t.to_string()).collect(),
			mood: Mood::Neutral,
			imagery: vec![],
			image_url: None,
			connections: vec![],
			challenge_id: None,
		}
	}

	#[test]
	fn view_mode_cycles() {
		let mode = ViewMode::default();
		assert_eq!(mode.next(), ViewMode::Timeline);
		assert_eq!(mode.next().next(), ViewMode::Folder);
		assert_eq!(mode.next().next().next(), ViewMode::Masonry);
	}

	#[test]
	fn timeline_is_newest_first_and_stable() {
		let items = vec![note("a", 1, &[]), note("b", 5, &[]), note("c", 1, &[])];
		let ids: Vec<_> = timeline(&items).into_iter().map(|i| i.id).collect();
		assert_eq!(ids, vec!["b", "a", "c"]);
	}

	#[test]
	fn folders_group_by_first_tag() {
		let items = vec![
			note("a", 1, &["春", "花"]),
			note("b", 2, &[]),
			note("c", 3, &["春"]),
			note("d", 4, &["夜"]),
		];
		let groups = folders(&items);
		let tags: Vec<_> = groups.iter().map(|f| f.tag.as_str()).collect();
		assert_eq!(tags, vec!["春", UNSORTED_FOLDER, "夜"]);
		assert_eq!(groups[0].items.len(), 2);
	}
}
