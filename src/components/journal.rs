//! Journal state shared through the Leptos context.

use chrono::Local;
use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{debug, info, warn};

use crate::analysis::Analyst;
use crate::components::force_graph::{LayoutConfig, Theme};
use crate::journal::{Challenge, CaptureRequest, InspirationStore, PendingCaptures, analyze_capture};
use crate::task::TaskScope;

/// The analyst lives in local storage: its HTTP client is not `Send` on wasm.
pub type AnalystHandle = StoredValue<Analyst, LocalStorage>;

#[derive(Clone)]
pub struct JournalContext {
	pub store: RwSignal<InspirationStore>,
	pub analyst: AnalystHandle,
	pub challenges: StoredValue<Vec<Challenge>>,
	/// Challenge the next capture answers, if the user accepted one.
	pub active_challenge: RwSignal<Option<Challenge>>,
	pub sheet_open: RwSignal<bool>,
	/// Captures still being analyzed.
	pub capturing: RwSignal<PendingCaptures>,
	pub layout: StoredValue<LayoutConfig>,
	pub theme: StoredValue<Theme>,
	scope: TaskScope,
}

impl JournalContext {
	/// Create and provide the context. Pending captures are dropped when the
	/// calling owner is cleaned up.
	pub fn provide(
		store: InspirationStore,
		analyst: Analyst,
		challenges: Vec<Challenge>,
		layout: LayoutConfig,
		theme: Theme,
	) -> Self {
		let context = Self {
			store: RwSignal::new(store),
			analyst: StoredValue::new_local(analyst),
			challenges: StoredValue::new(challenges),
			active_challenge: RwSignal::new(None),
			sheet_open: RwSignal::new(false),
			capturing: RwSignal::new(PendingCaptures::default()),
			layout: StoredValue::new(layout),
			theme: StoredValue::new(theme),
			scope: TaskScope::for_current_owner(),
		};
		provide_context(context.clone());
		context
	}

	/// Open the capture sheet answering `challenge`.
	pub fn accept_challenge(&self, challenge: Challenge) {
		info!("journal: accepted challenge {}", challenge.id);
		self.active_challenge.set(Some(challenge));
		self.sheet_open.set(true);
	}

	/// Analyze `request` in the background and prepend the result to the
	/// store. The active challenge is attached and then cleared.
	pub fn capture(&self, mut request: CaptureRequest) {
		if request.challenge_id.is_none() {
			request.challenge_id = self
				.active_challenge
				.with_untracked(|c| c.as_ref().map(|c| c.id.clone()));
		}
		if let Err(err) = request.validate() {
			debug!("journal: capture rejected: {err}");
			return;
		}

		let analyst = self.analyst.get_value();
		let (store, active_challenge, capturing) = (self.store, self.active_challenge, self.capturing);
		let scope = self.scope.clone();
		capturing.update(PendingCaptures::start);
		spawn_local(async move {
			let Some(result) = scope.guard(analyze_capture(&analyst, request)).await else {
				debug!("journal: capture finished after teardown, dropping");
				return;
			};
			match result {
				Ok(analyzed) => {
					let now = js_sys::Date::now() as u64;
					let today = Local::now().date_naive();
					store.update(|store| {
						analyzed.commit(store, now, today);
					});
					active_challenge.set(None);
				}
				Err(err) => warn!("journal: capture failed: {err}"),
			}
			capturing.update(PendingCaptures::finish);
		});
	}

	pub fn delete(&self, id: &str) {
		let removed = self.store.try_update(|store| store.remove(id)).flatten();
		match removed {
			Some(_) => info!("journal: deleted inspiration {id}"),
			None => debug!("journal: delete of unknown inspiration {id}"),
		}
	}
}

pub fn use_journal() -> JournalContext {
	expect_context::<JournalContext>()
}
