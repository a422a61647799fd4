use crate::index::GraphIndex;
use crate::layout::PositionTable;
use careerpath_core::{Vec2, VertexId};
use std::collections::HashSet;

/// Rigid-body drag of one vertex and its visible subtree.
///
/// The descendant list is captured once at drag start; visibility is checked
/// on every move so a collapse in the middle of a drag is respected.
#[derive(Debug, Clone)]
pub struct DragSession {
    vertex: VertexId,
    snapshot: Vec2,
    descendants: Vec<VertexId>,
}

impl DragSession {
    /// `None` when the vertex has no position.
    pub fn start(index: &GraphIndex, positions: &PositionTable, id: &VertexId) -> Option<Self> {
        let snapshot = *positions.get(id)?;
        let descendants = index
            .descendants(id)
            .into_iter()
            .filter(|d| d != id)
            .collect();

        Some(Self {
            vertex: id.clone(),
            snapshot,
            descendants,
        })
    }

    pub fn vertex(&self) -> &VertexId {
        &self.vertex
    }

    pub fn snapshot(&self) -> Vec2 {
        self.snapshot
    }

    /// Move the dragged vertex to `target` and shift its visible descendants by
    /// the same delta. Returns the applied delta.
    pub fn move_to(
        &mut self,
        target: Vec2,
        positions: &mut PositionTable,
        hidden: &HashSet<VertexId>,
    ) -> Vec2 {
        let delta = target - self.snapshot;

        if let Some(position) = positions.get_mut(&self.vertex) {
            *position = target;
        }
        for id in &self.descendants {
            if hidden.contains(id) {
                continue;
            }
            if let Some(position) = positions.get_mut(id) {
                *position += delta;
            }
        }

        self.snapshot = target;
        delta
    }
}
