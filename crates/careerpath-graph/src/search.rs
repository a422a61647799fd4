use careerpath_core::{LayoutConfig, Rect, Vec2, Vertex, VertexId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SearchOutcome {
    /// Empty or whitespace-only query; highlight cleared.
    Cleared,
    Found {
        id: VertexId,
        /// Bounding box handed to the viewport fit.
        bounds: Rect,
    },
    /// No visible label matched; highlight cleared.
    NoMatch { query: String },
}

/// First vertex, in the given order, whose label contains `query`
/// case-insensitively. A blank query matches nothing; otherwise the query is
/// matched as typed, surrounding spaces included.
///
/// Ties are resolved purely by order; there is no ranking.
pub fn locate<'a, I>(query: &str, visible: I) -> Option<&'a Vertex>
where
    I: IntoIterator<Item = &'a Vertex>,
{
    if query.trim().is_empty() {
        return None;
    }
    let needle = query.to_lowercase();
    visible
        .into_iter()
        .find(|v| v.label.to_lowercase().contains(&needle))
}

/// Node box at `position`, grown by `search_margin` on every side.
pub fn hit_bounds(position: Vec2, config: &LayoutConfig) -> Rect {
    Rect::from_pos_size(position, config.node_size()).expand(config.search_margin)
}
