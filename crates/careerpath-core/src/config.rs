use serde::{Deserialize, Serialize};

/// How a parent's subtree width accounts for the gaps between its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum WidthMode {
    /// `max(min_width, sum(child widths))`. Sibling gaps are added only while
    /// placing, so the rendered span of a wide subtree can exceed its width.
    #[default]
    Observed,
    /// Adds `sibling_gap * (children - 1)` to the sum, so placement never
    /// spills outside the reserved span.
    GapAware,
}

/// Layout and viewport constants, all in layout units unless noted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Rendered node width.
    pub node_width: f32,
    /// Rendered node height, only used for bounding boxes.
    pub node_height: f32,
    /// Footprint reserved for a leaf (node width plus margin).
    pub min_width: f32,
    /// Vertical distance between a parent row and its children row.
    pub level_gap: f32,
    /// Horizontal gap between sibling subtrees.
    pub sibling_gap: f32,
    /// Horizontal gap between consecutive root subtrees.
    pub root_gap: f32,
    pub width_mode: WidthMode,

    /// Margin added around a search hit's bounding box.
    pub search_margin: f32,
    pub search_fit_padding: f32,
    pub search_fit_duration_ms: u64,

    pub initial_fit_padding: f32,
    pub initial_fit_duration_ms: u64,

    /// Margin around the visible content when computing export bounds.
    pub export_margin: f32,
}

impl LayoutConfig {
    pub const DEFAULT_NODE_WIDTH: f32 = 160.0;
    pub const DEFAULT_NODE_HEIGHT: f32 = 48.0;

    pub fn node_size(&self) -> crate::Vec2 {
        crate::Vec2::new(self.node_width, self.node_height)
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_width: Self::DEFAULT_NODE_WIDTH,
            node_height: Self::DEFAULT_NODE_HEIGHT,
            min_width: Self::DEFAULT_NODE_WIDTH + 40.0,
            level_gap: 120.0,
            sibling_gap: 40.0,
            root_gap: 200.0,
            width_mode: WidthMode::Observed,
            search_margin: 20.0,
            search_fit_padding: 0.3,
            search_fit_duration_ms: 800,
            initial_fit_padding: 0.1,
            initial_fit_duration_ms: 600,
            export_margin: 80.0,
        }
    }
}
