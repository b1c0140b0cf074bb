//! Capture pipeline: raw input -> analysis -> new inspiration in the store.
//!
//! Voice and camera input are mocked; only the text path is real.

use chrono::NaiveDate;
use log::info;

use super::store::InspirationStore;
use super::types::{Inspiration, dedup_preserving_order};
use crate::analysis::{Analysis, Analyst, Backend};
use crate::error::CaptureError;

/// Transcript produced by the simulated voice recorder.
pub const MOCK_TRANSCRIPT: &str = "竹窗听雨，一任平生...";

/// Placeholder photos offered by the simulated camera and album.
pub const MOCK_IMAGES: [&str; 4] = [
	"https://picsum.photos/400/500?random=1",
	"https://picsum.photos/400/500?random=2",
	"https://picsum.photos/400/500?random=3",
	"https://picsum.photos/400/500?random=4",
];

/// How the user is entering a capture.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CaptureMode {
	#[default]
	Text,
	Voice,
	Camera,
	Album,
}

impl CaptureMode {
	pub fn label(self) -> &'static str {
		match self {
			CaptureMode::Text => "书写",
			CaptureMode::Voice => "聆听",
			CaptureMode::Camera => "取景",
			CaptureMode::Album => "相册",
		}
	}
}

/// Raw input for one capture.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CaptureRequest {
	pub text: String,
	pub image_url: Option<String>,
	pub challenge_id: Option<String>,
}

impl CaptureRequest {
	/// Plain text capture, as used when promoting a suggested concept.
	pub fn text(text: impl Into<String>) -> Self {
		Self {
			text: text.into(),
			..Self::default()
		}
	}

	pub fn validate(&self) -> Result<(), CaptureError> {
		if self.text.trim().is_empty() && self.image_url.is_none() {
			return Err(CaptureError::Empty);
		}
		Ok(())
	}
}

/// Number of captures still being analyzed. Captures may overlap, so the
/// "sealing" indicator stays up until the last one finishes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PendingCaptures(usize);

impl PendingCaptures {
	pub fn start(&mut self) {
		self.0 += 1;
	}

	pub fn finish(&mut self) {
		self.0 = self.0.saturating_sub(1);
	}

	pub fn is_active(self) -> bool {
		self.0 > 0
	}
}

/// A capture whose analysis has completed.
#[derive(Clone, Debug, PartialEq)]
pub struct AnalyzedCapture {
	pub request: CaptureRequest,
	pub analysis: Analysis,
}

/// Run analysis for a capture. Analysis itself never fails; only empty
/// input is rejected.
pub async fn analyze_capture<B: Backend>(
	analyst: &Analyst<B>,
	request: CaptureRequest,
) -> Result<AnalyzedCapture, CaptureError> {
	request.validate()?;
	let analysis = analyst.analyze(request.text.trim()).await;
	Ok(AnalyzedCapture { request, analysis })
}

impl AnalyzedCapture {
	/// Turn into an inspiration and prepend it to the store. Returns the new id.
	pub fn commit(self, store: &mut InspirationStore, now_millis: u64, today: NaiveDate) -> String {
		let id = store.allocate_id(now_millis);
		let inspiration = Inspiration {
			id: id.clone(),
			content: self.request.text.trim().to_string(),
			date: today,
			tags: dedup_preserving_order(self.analysis.tags),
			mood: self.analysis.mood,
			imagery: dedup_preserving_order(self.analysis.imagery),
			image_url: self.request.image_url,
			connections: Vec::new(),
			challenge_id: self.request.challenge_id,
		};
		store.prepend(inspiration);
		info!("journal: captured inspiration {id} ({} total)", store.len());
		id
	}
}
