//! Re-entrancy guarded brainstorm lifecycle.
//!
//! `Idle -> Brainstorming -> ResultsReady -> Idle`. While a request is
//! outstanding, further requests are refused.

use std::mem;

/// Identifies one outstanding brainstorm request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BrainstormTicket(u64);

impl BrainstormTicket {
	/// Monotonic sequence number, also used to namespace ephemeral ids.
	pub fn generation(self) -> u64 {
		self.0
	}
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum BrainstormPhase {
	#[default]
	Idle,
	Brainstorming(BrainstormTicket),
	ResultsReady {
		ticket: BrainstormTicket,
		candidates: Vec<String>,
	},
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Brainstorm {
	phase: BrainstormPhase,
	issued: u64,
}

impl Brainstorm {
	pub fn phase(&self) -> &BrainstormPhase {
		&self.phase
	}

	pub fn in_flight(&self) -> bool {
		matches!(self.phase, BrainstormPhase::Brainstorming(_))
	}

	/// Start a request. `None` while one is already outstanding.
	pub fn begin(&mut self) -> Option<BrainstormTicket> {
		if self.in_flight() {
			return None;
		}
		self.issued += 1;
		let ticket = BrainstormTicket(self.issued);
		self.phase = BrainstormPhase::Brainstorming(ticket);
		Some(ticket)
	}

	/// Record results for the outstanding request. Stale tickets are refused.
	pub fn complete(&mut self, ticket: BrainstormTicket, candidates: Vec<String>) -> bool {
		match self.phase {
			BrainstormPhase::Brainstorming(outstanding) if outstanding == ticket => {
				self.phase = BrainstormPhase::ResultsReady { ticket, candidates };
				true
			}
			_ => false,
		}
	}

	/// Hand over ready results and return to idle.
	pub fn take_results(&mut self) -> Option<(BrainstormTicket, Vec<String>)> {
		if !matches!(self.phase, BrainstormPhase::ResultsReady { .. }) {
			return None;
		}
		match mem::take(&mut self.phase) {
			BrainstormPhase::ResultsReady { ticket, candidates } => Some((ticket, candidates)),
			_ => None,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn second_begin_while_in_flight_is_refused() {
		let mut brainstorm = Brainstorm::default();
		let ticket = brainstorm.begin().unwrap();
		assert!(brainstorm.in_flight());
		assert_eq!(brainstorm.begin(), None);
		assert_eq!(brainstorm.phase(), &BrainstormPhase::Brainstorming(ticket));
	}

	#[test]
	fn full_cycle_returns_to_idle() {
		let mut brainstorm = Brainstorm::default();
		let ticket = brainstorm.begin().unwrap();
		assert!(brainstorm.complete(ticket, vec!["雨落无声".into()]));
		assert!(!brainstorm.in_flight());

		let (done, candidates) = brainstorm.take_results().unwrap();
		assert_eq!(done, ticket);
		assert_eq!(candidates, vec!["雨落无声"]);
		assert_eq!(brainstorm.phase(), &BrainstormPhase::Idle);
		assert!(brainstorm.take_results().is_none());
	}

	#[test]
	fn stale_ticket_is_ignored() {
		let mut brainstorm = Brainstorm::default();
		let first = brainstorm.begin().unwrap();
		assert!(brainstorm.complete(first, vec![]));
		brainstorm.take_results();

		let second = brainstorm.begin().unwrap();
		assert_ne!(first, second);
		assert!(!brainstorm.complete(first, vec!["late".into()]));
		assert!(brainstorm.in_flight());
		assert!(second.generation() > first.generation());
	}
}
