//! Detail overlay for one inspiration: full text, analysis, expansion and
//! delete.

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::debug;

use super::journal::use_journal;
use crate::task::TaskScope;

#[component]
pub fn InspirationDetail(#[prop(into)] id: String, on_close: Callback<()>) -> impl IntoView {
	let journal = use_journal();
	let store = journal.store;
	let expansion = RwSignal::new(Option::<String>::None);
	let expanding = RwSignal::new(false);
	let scope = TaskScope::for_current_owner();

	let item = {
		let id = id.clone();
		Memo::new(move |_| store.with(|store| store.get(&id).cloned()))
	};

	let expand = {
		let analyst = journal.analyst;
		move |_| {
			if expanding.get_untracked() {
				return;
			}
			let Some(content) = item.with_untracked(|item| item.as_ref().map(|i| i.content.clone())) else {
				return;
			};
			expanding.set(true);
			let analyst = analyst.get_value();
			let scope = scope.clone();
			spawn_local(async move {
				match scope.guard(analyst.expand(&content)).await {
					Some(text) => {
						expansion.set(Some(text));
						expanding.set(false);
					}
					None => debug!("detail: expansion finished after close, dropping"),
				}
			});
		}
	};

	let delete = {
		let journal = journal.clone();
		move |_| {
			journal.delete(&id);
			on_close.run(());
		}
	};

	move || {
		let Some(item) = item.get() else {
			return ().into_any();
		};
		let expand = expand.clone();
		let delete = delete.clone();
		view! {
			<div class="detail-overlay" on:click=move |_| on_close.run(())>
				<article class="detail-card" on:click=|ev| ev.stop_propagation()>
					<header>
						<time>{item.date.format("%Y-%m-%d").to_string()}</time>
						<span class=format!("mood mood-{}", item.mood)>{item.mood.caption()}</span>
						<button class="icon-button" on:click=move |_| on_close.run(())>"×"</button>
					</header>
					{item.image_url.clone().map(|src| view! { <img class="detail-image" src=src alt="" /> })}
					<p class="detail-content">{item.content.clone()}</p>
					<ul class="tag-list">
						{item.tags.iter().map(|tag| view! { <li class="tag">"#" {tag.clone()}</li> }).collect_view()}
					</ul>
					<ul class="imagery-list">
						{item.imagery.iter().map(|img| view! { <li>{img.clone()}</li> }).collect_view()}
					</ul>
					<section class="expansion">
						{move || match expansion.get() {
							Some(text) => view! { <p class="expansion-text">{text}</p> }.into_any(),
							None => view! {
								<button class="text-button" disabled=move || expanding.get() on:click=expand.clone()>
									{move || if expanding.get() { "研墨中..." } else { "意境扩写" }}
								</button>
							}
							.into_any(),
						}}
					</section>
					<footer>
						<button class="danger-button" on:click=delete>"焚毁"</button>
					</footer>
				</article>
			</div>
		}
		.into_any()
	}
}
