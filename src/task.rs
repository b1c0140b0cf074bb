//! Liveness scopes for fire-and-forget async work.
//!
//! External calls cannot be aborted once sent, so instead each one is tied
//! to the view that asked for it. When that view is torn down the scope is
//! cancelled and any late completion is dropped instead of applied.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use leptos::prelude::on_cleanup;

/// Shared flag marking whether results may still be applied.
#[derive(Clone, Debug)]
pub struct TaskScope {
	live: Arc<AtomicBool>,
}

impl Default for TaskScope {
	fn default() -> Self {
		Self::new()
	}
}

impl TaskScope {
	pub fn new() -> Self {
		Self {
			live: Arc::new(AtomicBool::new(true)),
		}
	}

	/// A scope cancelled when the current reactive owner is cleaned up.
	pub fn for_current_owner() -> Self {
		let scope = Self::new();
		let handle = scope.clone();
		on_cleanup(move || handle.cancel());
		scope
	}

	pub fn cancel(&self) {
		self.live.store(false, Ordering::Release);
	}

	pub fn is_live(&self) -> bool {
		self.live.load(Ordering::Acquire)
	}

	/// Await `fut`, then yield its output only if the scope is still live.
	pub async fn guard<F: Future>(&self, fut: F) -> Option<F::Output> {
		let output = fut.await;
		self.is_live().then_some(output)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn live_scope_passes_output_through() {
		let scope = TaskScope::new();
		assert_eq!(scope.guard(async { 7 }).await, Some(7));
	}

	#[tokio::test]
	async fn cancel_during_flight_discards_output() {
		let scope = TaskScope::new();
		let view = scope.clone();
		let result = scope
			.guard(async move {
				view.cancel();
				"late"
			})
			.await;
		assert_eq!(result, None);
	}

	#[test]
	fn clones_share_the_flag() {
		let scope = TaskScope::default();
		let other = scope.clone();
		other.cancel();
		assert!(!scope.is_live());
	}
}
