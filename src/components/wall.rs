//! The inspiration wall: masonry, timeline and folder layouts of the store.

use leptos::prelude::*;

use super::detail::InspirationDetail;
use super::journal::use_journal;
use crate::journal::views::{Folder, folders, timeline};
use crate::journal::{Inspiration, ViewMode};

/// `MM-DD`, as shown on cards.
fn short_date(item: &Inspiration) -> String {
	item.date.format("%m-%d").to_string()
}

#[component]
fn MasonryCard(item: Inspiration, on_open: Callback<String>) -> impl IntoView {
	let id = item.id.clone();
	let date = short_date(&item);
	view! {
		<div class="card masonry-card" on:click=move |_| on_open.run(id.clone())>
			{item.challenge_id.is_some().then(|| view! { <span class="badge">"修习"</span> })}
			{item.image_url.map(|src| view! { <img class="card-image" src=src alt="visual" /> })}
			<p class="card-content">{item.content}</p>
			<div class="chip-row">
				{item.imagery.into_iter().take(2).map(|tag| view! { <span class="chip">{tag}</span> }).collect_view()}
			</div>
			<div class="card-meta">
				<span>{date}</span>
				<span class=format!("mood mood-{}", item.mood)>{item.mood.caption()}</span>
			</div>
		</div>
	}
}

#[component]
fn TimelineEntry(item: Inspiration, on_open: Callback<String>) -> impl IntoView {
	let id = item.id.clone();
	let date = short_date(&item);
	let tag = item.primary_tag().unwrap_or("随想").to_string();
	view! {
		<div class="timeline-entry" on:click=move |_| on_open.run(id.clone())>
			<div class="time-node">
				<span class="dot"></span>
				<span class="time">{date}</span>
			</div>
			<div class="card timeline-card">
				{item.image_url.map(|src| view! { <img class="card-image" src=src alt="visual" /> })}
				<p class="card-content">{item.content}</p>
				<div class="card-meta">
					<span>{tag}</span>
					{item.challenge_id.is_some().then(|| view! { <span class="badge">"修习"</span> })}
				</div>
			</div>
		</div>
	}
}

#[component]
fn FolderSection(folder: Folder, on_open: Callback<String>) -> impl IntoView {
	let count = folder.items.len();
	view! {
		<section class="folder">
			<h3>
				{folder.tag} <span class="count">{count}</span>
			</h3>
			<ul>
				{folder
					.items
					.into_iter()
					.map(|item| {
						let id = item.id.clone();
						let date = short_date(&item);
						view! {
							<li on:click=move |_| on_open.run(id.clone())>
								<span class="folder-content">{item.content}</span>
								<time>{date}</time>
							</li>
						}
					})
					.collect_view()}
			</ul>
		</section>
	}
}

/// Today's prompt, shown above the wall until answered.
#[component]
fn ChallengeBanner() -> impl IntoView {
	let journal = use_journal();
	let today = journal.challenges.with_value(|all| all.first().filter(|c| !c.completed).cloned());

	today.map(|challenge| {
		let title = challenge.title.clone();
		let prompt = challenge.prompt.clone();
		view! {
			<div class="challenge-banner">
				<span class="eyebrow">"每日修习 · " {title}</span>
				<p>{prompt}</p>
				<button class="text-button" on:click=move |_| journal.accept_challenge(challenge.clone())>
					"应答"
				</button>
			</div>
		}
	})
}

#[component]
pub fn Wall() -> impl IntoView {
	let journal = use_journal();
	let store = journal.store;
	let view_mode = RwSignal::new(ViewMode::default());
	let open_id = RwSignal::new(Option::<String>::None);
	let on_open = Callback::new(move |id: String| open_id.set(Some(id)));
	let on_close = Callback::new(move |()| open_id.set(None));

	let items = move || match view_mode.get() {
		ViewMode::Masonry => {
			let items = store.with(|store| store.items().to_vec());
			view! {
				<div class="masonry">
					{items.into_iter().map(|item| view! { <MasonryCard item=item on_open=on_open /> }).collect_view()}
				</div>
			}
			.into_any()
		}
		ViewMode::Timeline => {
			let items = store.with(|store| timeline(store.items()));
			view! {
				<div class="timeline">
					{items.into_iter().map(|item| view! { <TimelineEntry item=item on_open=on_open /> }).collect_view()}
					<p class="wall-end">"岁月如流"</p>
				</div>
			}
			.into_any()
		}
		ViewMode::Folder => {
			let groups = store.with(|store| folders(store.items()));
			view! {
				<div class="folders">
					{groups.into_iter().map(|folder| view! { <FolderSection folder=folder on_open=on_open /> }).collect_view()}
				</div>
			}
			.into_any()
		}
	};

	view! {
		<div class="wall">
			<header class="wall-header">
				<h1>"心笺"</h1>
				<button class="text-button" on:click=move |_| view_mode.update(|mode| *mode = mode.next())>
					{move || view_mode.get().label()}
				</button>
			</header>
			<ChallengeBanner />
			<Show when=move || store.with(|store| store.is_empty())>
				<p class="wall-empty">"尚无灵感，落笔记下第一念。"</p>
			</Show>
			{items}
			<p class="wall-end">{move || if view_mode.get() == ViewMode::Folder { "分类尽头" } else { "到底了" }}</p>
			{move || open_id.get().map(|id| view! { <InspirationDetail id=id on_close=on_close /> })}
		</div>
	}
}
