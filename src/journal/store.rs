//! In-memory, ordered inspiration collection.
//!
//! Newest captures go to the front. Nothing is persisted; a reload starts
//! again from the seed data.

use std::collections::HashSet;

use log::warn;

use super::types::Inspiration;

/// Ordered set of inspirations keyed by id.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InspirationStore {
	items: Vec<Inspiration>,
}

impl InspirationStore {
	/// Build from `items`. Ids must be unique, so later repeats of an id
	/// are dropped.
	pub fn new(items: Vec<Inspiration>) -> Self {
		let mut seen = HashSet::new();
		let items = items
			.into_iter()
			.filter(|item| {
				let fresh = seen.insert(item.id.clone());
				if !fresh {
					warn!("journal: dropping inspiration with duplicate id {}", item.id);
				}
				fresh
			})
			.collect();
		Self { items }
	}

	pub fn items(&self) -> &[Inspiration] {
		&self.items
	}

	pub fn len(&self) -> usize {
		self.items.len()
	}

	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	pub fn get(&self, id: &str) -> Option<&Inspiration> {
		self.items.iter().find(|item| item.id == id)
	}

	pub fn contains(&self, id: &str) -> bool {
		self.get(id).is_some()
	}

	/// Ids in store order.
	pub fn ids(&self) -> Vec<String> {
		self.items.iter().map(|item| item.id.clone()).collect()
	}

	pub fn id_set(&self) -> HashSet<&str> {
		self.items.iter().map(|item| item.id.as_str()).collect()
	}

	/// Every content string, in store order. Fed to brainstorming.
	pub fn contents(&self) -> Vec<String> {
		self.items.iter().map(|item| item.content.clone()).collect()
	}

	/// Insert at the front.
	pub fn prepend(&mut self, item: Inspiration) {
		self.items.insert(0, item);
	}

	/// Remove by id. Connections elsewhere that name it are left dangling;
	/// the graph builder filters them out.
	pub fn remove(&mut self, id: &str) -> Option<Inspiration> {
		let pos = self.items.iter().position(|item| item.id == id)?;
		Some(self.items.remove(pos))
	}

	/// Allocate an id derived from a millisecond timestamp, bumped until it
	/// is not already taken.
	pub fn allocate_id(&self, now_millis: u64) -> String {
		let taken = self.id_set();
		let mut candidate = now_millis;
		loop {
			let id = candidate.to_string();
			if !taken.contains(id.as_str()) {
				return id;
			}
			candidate += 1;
		}
	}
}

#[cfg(test)]
mod tests {
	use chrono::NaiveDate;

	use super::*;
	use crate::journal::types::Mood;

	fn note(id: &str) -> Inspiration {
		Inspiration {
			id: id.into(),
			content: format!("note {id}"),
			date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
			tags: vec![],
			mood: Mood::Neutral,
			imagery: vec![],
			image_url: None,
			connections: vec![],
			challenge_id: None,
		}
	}

	#[test]
	fn prepend_puts_newest_first() {
		let mut store = InspirationStore::new(vec![note("1")]);
		store.prepend(note("2"));
		assert_eq!(store.ids(), vec!["2", "1"]);
	}

	#[test]
	fn repeated_ids_keep_the_first_entry() {
		let mut late = note("2");
		late.content = "impostor".into();
		let store = InspirationStore::new(vec![note("1"), note("2"), late, note("3")]);
		assert_eq!(store.ids(), vec!["1", "2", "3"]);
		assert_eq!(store.get("2").map(|n| n.content.as_str()), Some("note 2"));
	}

	#[test]
	fn remove_missing_id_is_none() {
		let mut store = InspirationStore::new(vec![note("1")]);
		assert!(store.remove("9").is_none());
		assert_eq!(store.remove("1").map(|n| n.id), Some("1".to_string()));
		assert!(store.is_empty());
	}

	#[test]
	fn allocate_id_skips_taken_timestamps() {
		let store = InspirationStore::new(vec![note("1000"), note("1001")]);
		assert_eq!(store.allocate_id(1000), "1002");
		assert_eq!(store.allocate_id(5), "5");
	}
}
