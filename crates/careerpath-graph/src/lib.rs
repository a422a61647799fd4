pub mod drag;
pub mod engine;
pub mod index;
pub mod layout;
pub mod search;
pub mod snapshot;
pub mod style;
pub mod visibility;
pub mod width;

pub use drag::DragSession;
pub use engine::CareerGraphEngine;
pub use index::GraphIndex;
pub use layout::{Layouter, PositionTable, StreamBandLayouter, TreeLayouter};
pub use search::{SearchOutcome, hit_bounds, locate};
pub use snapshot::{AnnotatedEdge, AnnotatedVertex, GraphSnapshot};
pub use style::{
    Color, EdgeStyle, NodeStyle, accent_for, category_style, edge_style, highlight_ring,
};
pub use visibility::{CategoryFilter, compute_hidden, suppressed_by_collapse, visible_edges};
pub use width::SubtreeWidths;
