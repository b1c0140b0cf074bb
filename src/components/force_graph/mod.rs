//! Force-directed connection graph.
//!
//! Renders notes and AI suggestions on an HTML canvas with:
//! - A d3-style force layout (links, repulsion, centering, collision, radial)
//! - Pan, zoom, node dragging with pin/unpin, and click selection
//! - Smooth highlight transitions on hover
//! - Mood-colored notes and glowing dashed suggestion links
//!
//! # Example
//!
//! ```ignore
//! use xinjian::components::force_graph::{ForceGraphCanvas, GraphData, GraphLink, GraphNode, LinkKind};
//!
//! let data = GraphData {
//!     nodes: vec![GraphNode::ephemeral("a", "雨落无声"), GraphNode::ephemeral("b", "光影斑驳")],
//!     links: vec![GraphLink::new("a", "b", LinkKind::Ephemeral)],
//! };
//!
//! view! {
//!     <ForceGraphCanvas
//!         data=Signal::stored(data)
//!         selected=Signal::stored(None)
//!         on_select=Callback::new(|_| {})
//!     />
//! }
//! ```

mod component;
mod render;
pub mod scale;
pub mod simulation;
mod state;
pub mod theme;
mod types;

pub use component::ForceGraphCanvas;
pub use simulation::{LayoutConfig, Simulation};
pub use theme::Theme;
pub use types::{GraphData, GraphLink, GraphNode, LABEL_MAX_CHARS, LinkKind, NodeKind, truncate_label};
