//! Connection-graph model: snapshot building, AI suggestions, brainstorm
//! lifecycle and selection. Rendering lives in
//! [`crate::components::force_graph`].

pub mod brainstorm;
pub mod builder;
pub mod ephemeral;
pub mod selection;
pub mod session;

pub use brainstorm::{Brainstorm, BrainstormPhase, BrainstormTicket};
pub use builder::build_graph;
pub use ephemeral::EphemeralGraph;
pub use selection::Selection;
pub use session::GraphSession;
