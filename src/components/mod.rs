//! Leptos views.

pub mod capture;
pub mod connections;
pub mod detail;
pub mod force_graph;
pub mod journal;
pub mod wall;

pub use capture::CaptureSheet;
pub use connections::ConnectionGraph;
pub use detail::InspirationDetail;
pub use journal::{AnalystHandle, JournalContext, use_journal};
pub use wall::Wall;
