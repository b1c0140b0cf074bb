//! xinjian: an idea journal with a live connection graph.
//!
//! Notes are captured as text, voice or photo, classified by a hosted
//! language model, and shown on a wall or as a force-directed graph where
//! the model can suggest new concepts bridging existing notes.

use chrono::Local;
use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod analysis;
pub mod components;
pub mod config;
pub mod error;
pub mod graph;
pub mod journal;
pub mod task;

use analysis::Analyst;
use components::force_graph::Theme;
use components::{CaptureSheet, ConnectionGraph, JournalContext, Wall};
use config::AppConfig;
use error::ConfigError;
use journal::seed::{seed_challenges, seed_inspirations};
use journal::{Inspiration, InspirationStore};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging(level: Level) {
	let _ = console_log::init_with_level(level);
	console_error_panic_hook::set_once();
	info!("xinjian: logging initialized at {level}");
}

/// Text of the `<script>` element with the given id, if present.
fn script_text(id: &str) -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id(id)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

/// Read the `app-config` script element. Missing means defaults.
pub fn load_config() -> Result<AppConfig, ConfigError> {
	match script_text("app-config") {
		Some(text) => AppConfig::from_json(&text),
		None => Ok(AppConfig::default()),
	}
}

/// Seed notes from a `journal-data` script element, if present and valid.
fn load_seed() -> Option<Vec<Inspiration>> {
	let json_text = script_text("journal-data")?;
	match serde_json::from_str::<Vec<Inspiration>>(&json_text) {
		Ok(items) => {
			info!("xinjian: loaded {} inspirations from page", items.len());
			Some(items)
		}
		Err(e) => {
			warn!("xinjian: failed to parse journal data: {}", e);
			None
		}
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum Tab {
	#[default]
	Wall,
	Connections,
}

/// Main application component.
#[component]
pub fn App(config: AppConfig) -> impl IntoView {
	provide_meta_context();

	let analyst = Analyst::from_config(&config.analysis);
	info!(
		"xinjian: analysis {}",
		if analyst.is_configured() { "configured" } else { "offline, using mock responses" }
	);
	let store = InspirationStore::new(load_seed().unwrap_or_else(seed_inspirations));
	let challenges = seed_challenges(Local::now().date_naive());
	let theme = Theme::named(&config.theme);
	let theme_name = theme.name;
	let journal = JournalContext::provide(store, analyst, challenges, config.layout, theme);

	let tab = RwSignal::new(Tab::default());
	let sheet_open = journal.sheet_open;
	let capturing = journal.capturing;

	view! {
		<Html attr:lang="zh-CN" attr:dir="ltr" attr:data-theme=theme_name />
		<Title text="心笺" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<main class="app">
			{move || match tab.get() {
				Tab::Wall => view! { <Wall /> }.into_any(),
				Tab::Connections => view! { <ConnectionGraph /> }.into_any(),
			}}
			<Show when=move || capturing.get().is_active()>
				<div class="capturing-toast">"封存中..."</div>
			</Show>
			<nav class="bottom-nav">
				<button class:active=move || tab.get() == Tab::Wall on:click=move |_| tab.set(Tab::Wall)>
					"灵感"
				</button>
				<button class="capture-fab" on:click=move |_| sheet_open.set(true)>
					"+"
				</button>
				<button
					class:active=move || tab.get() == Tab::Connections
					on:click=move |_| tab.set(Tab::Connections)
				>
					"关系"
				</button>
			</nav>
			<Show when=move || sheet_open.get()>
				<CaptureSheet />
			</Show>
		</main>
	}
}
