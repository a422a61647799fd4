//! Bottom-up subtree width pass.
//!
//! Widths are computed with an explicit stack instead of recursion so that
//! deep chains cannot overflow the call stack, and a vertex reached again
//! while it is still on the stack aborts the pass with
//! [`GraphError::CycleDetected`].

use crate::index::GraphIndex;
use careerpath_core::{GraphError, LayoutConfig, VertexId, WidthMode};
use std::collections::{HashMap, HashSet};

/// Memoized `id -> width` table for one layout pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubtreeWidths {
    widths: HashMap<VertexId, f32>,
}

struct Frame<'a> {
    id: &'a VertexId,
    next_child: usize,
}

impl SubtreeWidths {
    pub fn compute(index: &GraphIndex, config: &LayoutConfig) -> Result<Self, GraphError> {
        let mut widths: HashMap<VertexId, f32> = HashMap::with_capacity(index.vertex_ids().len());

        for start in index.vertex_ids() {
            if widths.contains_key(start) {
                continue;
            }

            let mut stack = vec![Frame {
                id: start,
                next_child: 0,
            }];
            let mut on_path: HashSet<&VertexId> = HashSet::from([start]);

            while let Some(frame) = stack.last_mut() {
                let children = index.children(frame.id);

                if let Some(child) = children.get(frame.next_child) {
                    frame.next_child += 1;
                    if widths.contains_key(child) {
                        continue;
                    }
                    if on_path.contains(child) {
                        return Err(GraphError::CycleDetected {
                            vertex: child.clone(),
                            path: stack.iter().map(|f| f.id.clone()).collect(),
                        });
                    }
                    on_path.insert(child);
                    stack.push(Frame {
                        id: child,
                        next_child: 0,
                    });
                    continue;
                }

                let width = Self::width_from_children(children, &widths, config);
                let id = frame.id;
                widths.insert(id.clone(), width);
                on_path.remove(id);
                stack.pop();
            }
        }

        tracing::debug!("Computed subtree widths for {} vertices", widths.len());
        Ok(Self { widths })
    }

    fn width_from_children(
        children: &[VertexId],
        widths: &HashMap<VertexId, f32>,
        config: &LayoutConfig,
    ) -> f32 {
        if children.is_empty() {
            return config.min_width;
        }

        let sum: f32 = children
            .iter()
            .map(|c| widths.get(c).copied().unwrap_or(config.min_width))
            .sum();
        let gaps = match config.width_mode {
            WidthMode::Observed => 0.0,
            WidthMode::GapAware => config.sibling_gap * (children.len() - 1) as f32,
        };

        (sum + gaps).max(config.min_width)
    }

    /// Width of `id`, or `min_width` for a vertex outside the pass.
    pub fn width(&self, id: &VertexId, config: &LayoutConfig) -> f32 {
        self.widths.get(id).copied().unwrap_or(config.min_width)
    }

    pub fn get(&self, id: &VertexId) -> Option<f32> {
        self.widths.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.widths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }
}
