//! Client entrypoint for the CSR build.

// Bin target reuses lib deps, silence noisy lint.
#![allow(unused_crate_dependencies)]

use leptos::prelude::*;
use log::{Level, warn};
use xinjian::{App, init_logging, load_config};

fn main() {
	let loaded = load_config();
	let config = loaded.as_ref().cloned().unwrap_or_default();
	let level = config.log_level();
	init_logging(level.unwrap_or(Level::Info));
	if level.is_none() {
		warn!("xinjian: unknown log level {:?}, using info", config.log_level);
	}
	if let Err(e) = loaded {
		warn!("xinjian: ignoring page config: {e}");
	}

	mount_to_body(move || {
		view! { <App config=config.clone() /> }
	})
}
