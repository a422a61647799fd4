use crate::index::GraphIndex;
use crate::visibility::CategoryFilter;
use crate::width::SubtreeWidths;
use careerpath_core::{Category, GraphError, LayoutConfig, Vec2, Vertex, VertexId};
use std::collections::{BTreeMap, HashMap};

/// `id -> top-left position` for every vertex, hidden ones included.
pub type PositionTable = HashMap<VertexId, Vec2>;

pub trait Layouter {
    /// `filter` is the active category filter. Layouters that position every
    /// vertex regardless of stream ignore it.
    fn execute(
        &self,
        vertices: &[Vertex],
        index: &GraphIndex,
        filter: &CategoryFilter,
    ) -> Result<PositionTable, GraphError>;
}

/// Family-tree layout.
///
/// Each subtree owns a contiguous horizontal band as wide as its computed
/// width, and every vertex is centered inside its own band. Roots are laid out
/// left to right in index order, separated by `root_gap`.
pub struct TreeLayouter {
    pub config: LayoutConfig,
}

impl TreeLayouter {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    fn place_subtree(
        &self,
        index: &GraphIndex,
        widths: &SubtreeWidths,
        root: &VertexId,
        x_start: f32,
        positions: &mut PositionTable,
    ) {
        let mut pending = vec![(root, x_start, 0.0f32)];

        while let Some((id, x, y)) = pending.pop() {
            let width = widths.width(id, &self.config);
            positions.insert(
                id.clone(),
                Vec2::new(x + width / 2.0 - self.config.node_width / 2.0, y),
            );

            let children = index.children(id);
            if children.is_empty() {
                continue;
            }

            let mut cursor = x;
            let mut placed = Vec::with_capacity(children.len());
            for child in children {
                placed.push((child, cursor, y + self.config.level_gap));
                cursor += widths.width(child, &self.config) + self.config.sibling_gap;
            }
            // Reversed so the leftmost child is placed first.
            pending.extend(placed.into_iter().rev());
        }
    }
}

impl Layouter for TreeLayouter {
    fn execute(
        &self,
        vertices: &[Vertex],
        index: &GraphIndex,
        _filter: &CategoryFilter,
    ) -> Result<PositionTable, GraphError> {
        let widths = SubtreeWidths::compute(index, &self.config)?;
        let mut positions = PositionTable::with_capacity(index.vertex_ids().len());

        let mut cursor = 0.0;
        let mut root_count = 0usize;
        for root in index.roots() {
            self.place_subtree(index, &widths, root, cursor, &mut positions);
            cursor += widths.width(root, &self.config) + self.config.root_gap;
            root_count += 1;
        }

        for vertex in vertices {
            positions.entry(vertex.id.clone()).or_insert(Vec2::ZERO);
        }

        tracing::debug!(
            "Tree layout placed {} vertices under {} roots",
            positions.len(),
            root_count
        );
        Ok(positions)
    }
}

/// Compact preview layout: one horizontal band per allowed stream.
///
/// Only vertices the filter allows take part, and a vertex counts as a root
/// when none of its parents is allowed. Roots of a band sit on the band line,
/// sorted by id; every other vertex of the band sits on a second line below,
/// also sorted by id. Bands follow ascending category. Filtered-out vertices
/// stay at the origin.
#[derive(Debug, Clone, Copy, Default)]
pub struct StreamBandLayouter;

impl StreamBandLayouter {
    pub const ORIGIN_X: f32 = 80.0;
    pub const ORIGIN_Y: f32 = 80.0;
    pub const COLUMN_STEP: f32 = 190.0;
    pub const CHILD_INDENT: f32 = 50.0;
    pub const CHILD_ROW_OFFSET: f32 = 60.0;
    pub const BAND_STEP: f32 = 140.0;

    fn bands<'a>(
        index: &'a GraphIndex,
        filter: &CategoryFilter,
    ) -> BTreeMap<Category, Vec<&'a VertexId>> {
        let mut bands: BTreeMap<Category, Vec<&VertexId>> = BTreeMap::new();
        for id in index.vertex_ids() {
            if let Some(category) = id.category().filter(|c| filter.allows(Some(*c))) {
                bands.entry(category).or_default().push(id);
            }
        }
        bands
    }

    fn is_band_root(index: &GraphIndex, id: &VertexId, filter: &CategoryFilter) -> bool {
        index
            .parents(id)
            .iter()
            .all(|parent| !filter.allows(parent.category()))
    }
}

impl Layouter for StreamBandLayouter {
    fn execute(
        &self,
        _vertices: &[Vertex],
        index: &GraphIndex,
        filter: &CategoryFilter,
    ) -> Result<PositionTable, GraphError> {
        let mut positions = PositionTable::with_capacity(index.vertex_ids().len());
        let mut band_y = Self::ORIGIN_Y;

        for members in Self::bands(index, filter).into_values() {
            let (mut roots, mut others): (Vec<&VertexId>, Vec<&VertexId>) = members
                .into_iter()
                .partition(|id| Self::is_band_root(index, id, filter));
            roots.sort();
            others.sort();

            let mut x = Self::ORIGIN_X;
            for id in &roots {
                positions.insert((*id).clone(), Vec2::new(x, band_y));
                x += Self::COLUMN_STEP;
            }

            let mut child_x = if roots.is_empty() {
                Self::ORIGIN_X
            } else {
                x + Self::CHILD_INDENT
            };
            for id in &others {
                positions.insert(
                    (*id).clone(),
                    Vec2::new(child_x, band_y + Self::CHILD_ROW_OFFSET),
                );
                child_x += Self::COLUMN_STEP;
            }

            band_y += Self::BAND_STEP;
        }

        for id in index.vertex_ids() {
            positions.entry(id.clone()).or_insert(Vec2::ZERO);
        }

        Ok(positions)
    }
}
