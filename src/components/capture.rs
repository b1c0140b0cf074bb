//! Full-screen capture sheet.
//!
//! Voice, camera and album input are simulated: listening fills in a fixed
//! transcript after three seconds, and both image sources pick from
//! placeholder photos.

use std::time::Duration;

use leptos::prelude::*;
use log::debug;

use super::journal::use_journal;
use crate::journal::capture::{MOCK_IMAGES, MOCK_TRANSCRIPT};
use crate::journal::{CaptureMode, CaptureRequest};
use crate::task::TaskScope;

const LISTEN_DURATION: Duration = Duration::from_secs(3);

#[component]
pub fn CaptureSheet() -> impl IntoView {
	let journal = use_journal();
	let mode = RwSignal::new(CaptureMode::Text);
	let text = RwSignal::new(String::new());
	let image = RwSignal::new(Option::<String>::None);
	let listening = RwSignal::new(false);
	let scope = TaskScope::for_current_owner();

	let start_listening = move || {
		mode.set(CaptureMode::Voice);
		listening.set(true);
		let scope = scope.clone();
		set_timeout(
			move || {
				if scope.is_live() && listening.get_untracked() {
					debug!("capture: simulated transcript ready");
					text.set(MOCK_TRANSCRIPT.to_string());
					listening.set(false);
					mode.set(CaptureMode::Text);
				}
			},
			LISTEN_DURATION,
		);
	};

	let pick_image = move |src: &str| {
		image.set(Some(src.to_string()));
		mode.set(CaptureMode::Text);
	};

	let can_submit = move || {
		let request = CaptureRequest {
			text: text.get(),
			image_url: image.get(),
			challenge_id: None,
		};
		request.validate().is_ok()
	};

	let submit = {
		let journal = journal.clone();
		move |_| {
			let request = CaptureRequest {
				text: text.get_untracked(),
				image_url: image.get_untracked(),
				challenge_id: None,
			};
			if request.validate().is_err() {
				return;
			}
			journal.capture(request);
			journal.sheet_open.set(false);
		}
	};

	let close = {
		let journal = journal.clone();
		move |_| {
			journal.active_challenge.set(None);
			journal.sheet_open.set(false);
		}
	};

	let active_challenge = journal.active_challenge;

	let body = move || match mode.get() {
		CaptureMode::Voice if listening.get() => view! {
			<div class="capture-listening">
				<div class="listening-orb"></div>
				<p>"聆听风的声音..."</p>
				<button
					class="link-button"
					on:click=move |_| {
						listening.set(false);
						mode.set(CaptureMode::Text);
					}
				>
					"停止"
				</button>
			</div>
		}
		.into_any(),
		CaptureMode::Camera => view! {
			<div class="capture-camera">
				<div class="viewfinder">
					<span>{CaptureMode::Camera.label()}</span>
				</div>
				<button class="shutter" on:click=move |_| pick_image(MOCK_IMAGES[0])></button>
			</div>
		}
		.into_any(),
		CaptureMode::Album => view! {
			<div class="capture-album">
				<h3>"往日记忆"</h3>
				<div class="album-grid">
					{MOCK_IMAGES
						.into_iter()
						.map(|src| {
							view! {
								<img src=src alt="album" on:click=move |_| pick_image(src) />
							}
						})
						.collect_view()}
				</div>
			</div>
		}
		.into_any(),
		_ => view! {
			<div class="capture-text">
				{move || {
					active_challenge
						.get()
						.map(|challenge| {
							view! {
								<div class="challenge-prompt">
									<span class="eyebrow">"每日修习"</span>
									<p>"\u{201c}" {challenge.prompt} "\u{201d}"</p>
								</div>
							}
						})
				}}
				{move || {
					image
						.get()
						.map(|src| {
							view! {
								<div class="capture-image">
									<img src=src alt="captured" />
									<button on:click=move |_| image.set(None)>"×"</button>
								</div>
							}
						})
				}}
				<textarea
					placeholder=move || {
						if active_challenge.with(Option::is_some) { "回应此刻..." } else { "捕捉一闪而过的念头..." }
					}
					prop:value=move || text.get()
					on:input=move |ev| text.set(event_target_value(&ev))
				></textarea>
			</div>
		}
		.into_any(),
	};

	let mode_button = move |target: CaptureMode| {
		let start_listening = start_listening.clone();
		view! {
			<button
				class="mode-button"
				class:active=move || mode.get() == target
				on:click=move |_| match target {
					CaptureMode::Voice => start_listening(),
					other => {
						listening.set(false);
						mode.set(other);
					}
				}
			>
				{target.label()}
			</button>
		}
	};

	view! {
		<div class="capture-sheet">
			<div class="sheet-header">
				<button class="icon-button" on:click=close>"×"</button>
			</div>
			<div class="sheet-body">{body}</div>
			<div class="mode-bar">
				{[CaptureMode::Text, CaptureMode::Voice, CaptureMode::Album, CaptureMode::Camera]
					.into_iter()
					.map(mode_button)
					.collect_view()}
			</div>
			<div class="sheet-footer">
				<button class="seal-button" disabled=move || !can_submit() on:click=submit>
					"落笔封存"
				</button>
			</div>
		</div>
	}
}
