//! The connection graph view: saved notes, AI suggestions, brainstorming
//! and the node detail panel.

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::debug;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::force_graph::{ForceGraphCanvas, GraphNode, NodeKind};
use super::journal::use_journal;
use crate::graph::GraphSession;
use crate::journal::InspirationStore;
use crate::task::TaskScope;

#[component]
fn NodePanel(node: GraphNode, session: RwSignal<GraphSession>) -> impl IntoView {
	let journal = use_journal();
	let close = move |_| session.update(GraphSession::clear_selection);

	let (badge, body) = match &node.kind {
		NodeKind::Ephemeral => {
			let promote = move |_| {
				if let Some(request) = session.try_update(GraphSession::promote_selected).flatten() {
					journal.capture(request);
				}
			};
			(
				"稍纵即逝",
				view! {
					<p class="panel-hint">"一缕回响，尚未落笔。"</p>
					<button class="seal-button" on:click=promote>"捕捉此念"</button>
				}
				.into_any(),
			)
		}
		NodeKind::Permanent { inspiration_id, .. } => {
			let tags = journal
				.store
				.with_untracked(|store| store.get(inspiration_id).map(|item| item.tags.clone()))
				.unwrap_or_default();
			(
				"已封存",
				view! {
					<ul class="tag-list">
						{tags.into_iter().map(|tag| view! { <li class="tag">"#" {tag}</li> }).collect_view()}
					</ul>
				}
				.into_any(),
			)
		}
	};

	view! {
		<aside class="node-panel" class:ephemeral=node.is_ephemeral() on:click=|ev| ev.stop_propagation()>
			<header>
				<span class="badge">{badge}</span>
				<button class="icon-button" on:click=close>"×"</button>
			</header>
			<p class="panel-label">{node.label.clone()}</p>
			{body}
		</aside>
	}
}

#[component]
pub fn ConnectionGraph() -> impl IntoView {
	let journal = use_journal();
	let store = journal.store;
	let session = RwSignal::new(GraphSession::new(store.with_untracked(InspirationStore::len)));
	let scope = TaskScope::for_current_owner();

	Effect::new(move |_| {
		store.with(|store| session.update(|session| session.sync_store(store)));
	});

	let graph = Memo::new(move |_| store.with(|store| session.with(|session| session.build(store))));
	let selected = Signal::derive(move || {
		session.with(|session| session.selection().node().map(|node| node.id.clone()))
	});

	let on_select = Callback::new(move |id: Option<String>| match id {
		Some(id) => {
			if let Some(node) = graph.with_untracked(|graph| graph.node(&id).cloned()) {
				session.update(|session| session.select(node));
			}
		}
		None => session.update(GraphSession::clear_selection),
	});

	let analyst = journal.analyst;
	let brainstorm = move |_| {
		let Some(ticket) = session.try_update(GraphSession::begin_brainstorm).flatten() else {
			return;
		};
		let contents = store.with_untracked(InspirationStore::contents);
		let analyst = analyst.get_value();
		let scope = scope.clone();
		spawn_local(async move {
			let Some(candidates) = scope.guard(analyst.brainstorm(&contents)).await else {
				debug!("graph: brainstorm #{} finished after teardown, dropping", ticket.generation());
				return;
			};
			let permanent_ids = store.with_untracked(InspirationStore::ids);
			let mut rng = SmallRng::seed_from_u64(js_sys::Date::now() as u64);
			session.update(|session| {
				session.finish_brainstorm(ticket, candidates, &permanent_ids, &mut rng);
			});
		});
	};

	let brainstorming = move || session.with(GraphSession::is_brainstorming);
	let layout = journal.layout.get_value();
	let theme = journal.theme.get_value();

	view! {
		<div class="connection-graph">
			<div class="graph-overlay">
				<h2>"思维星图"</h2>
				<p class="subtitle">
					{move || store.with(InspirationStore::len)} " 个灵感 • "
					{move || match session.with(|session| session.ephemeral().len()) {
						0 => "静谧".to_string(),
						n => format!("{n} 个回响"),
					}}
				</p>
			</div>
			<button class="brainstorm-button" disabled=brainstorming on:click=brainstorm>
				{move || if brainstorming() { "联想中..." } else { "灵感联想" }}
			</button>
			<ForceGraphCanvas data=graph selected=selected on_select=on_select layout=layout theme=theme />
			{move || {
				session
					.with(|session| session.selection().node().cloned())
					.map(|node| view! { <NodePanel node=node session=session /> })
			}}
		</div>
	}
}
