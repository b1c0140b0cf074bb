//! The inspiration journal: entities, the in-memory store, capture, and the
//! orderings behind the wall views.

pub mod capture;
pub mod seed;
pub mod store;
pub mod types;
pub mod views;

pub use capture::{AnalyzedCapture, CaptureMode, CaptureRequest, PendingCaptures, analyze_capture};
pub use store::InspirationStore;
pub use types::{Challenge, Inspiration, Mood, dedup_preserving_order};
pub use views::ViewMode;
