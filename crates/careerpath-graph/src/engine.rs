use crate::drag::DragSession;
use crate::index::GraphIndex;
use crate::layout::{Layouter, PositionTable, TreeLayouter};
use crate::search::{SearchOutcome, hit_bounds, locate};
use crate::snapshot::{AnnotatedEdge, AnnotatedVertex, GraphSnapshot};
use crate::visibility::{CategoryFilter, compute_hidden};
use careerpath_core::{Edge, GraphError, LayoutConfig, Rect, Vec2, Vertex, VertexId};
use careerpath_events::{Event, EventBus, FitReason, ViewportFit};
use std::collections::HashSet;

/// Owns the layout and interaction state of one career graph.
///
/// Relayout happens only when the vertex/edge set or the category filter
/// changes. Collapse, highlight and drag operate on the existing Position
/// Table.
pub struct CareerGraphEngine {
    config: LayoutConfig,
    layouter: Box<dyn Layouter>,
    bus: EventBus,

    vertices: Vec<Vertex>,
    index: GraphIndex,
    positions: PositionTable,

    filter: CategoryFilter,
    collapsed: HashSet<VertexId>,
    hidden: HashSet<VertexId>,
    highlight: Option<VertexId>,
    drag: Option<DragSession>,

    fit_sequence: u64,
    initial_fit_sent: bool,
}

impl CareerGraphEngine {
    pub fn new(config: LayoutConfig, bus: EventBus) -> Self {
        let layouter = Box::new(TreeLayouter::new(config.clone()));
        Self::with_layouter(config, bus, layouter)
    }

    pub fn with_layouter(config: LayoutConfig, bus: EventBus, layouter: Box<dyn Layouter>) -> Self {
        Self {
            config,
            layouter,
            bus,
            vertices: Vec::new(),
            index: GraphIndex::default(),
            positions: PositionTable::new(),
            filter: CategoryFilter::default(),
            collapsed: HashSet::new(),
            hidden: HashSet::new(),
            highlight: None,
            drag: None,
            fit_sequence: 0,
            initial_fit_sent: false,
        }
    }

    // ------------------------------------------------------------------
    // Graph and filter changes (relayout)
    // ------------------------------------------------------------------

    /// Replace the vertex/edge set and lay it out.
    ///
    /// On a malformed graph the previous graph, positions and visibility stay
    /// in place and the error is returned.
    pub fn set_graph(&mut self, vertices: &[Vertex], edges: &[Edge]) -> Result<(), GraphError> {
        let index = GraphIndex::build(vertices, edges);
        let positions = match self.layouter.execute(vertices, &index, &self.filter) {
            Ok(positions) => positions,
            Err(err) => {
                tracing::warn!("Layout aborted, keeping previous output: {}", err);
                self.bus.publish(Event::LayoutFailed {
                    error: err.to_string(),
                });
                return Err(err);
            }
        };

        let mut seen = HashSet::with_capacity(vertices.len());
        self.vertices = vertices
            .iter()
            .filter(|v| seen.insert(&v.id))
            .cloned()
            .collect();
        self.index = index;
        self.positions = positions;
        self.drag = None;

        if self
            .highlight
            .as_ref()
            .is_some_and(|id| !self.index.contains(id))
        {
            self.set_highlight(None);
        }

        self.apply_visibility();
        self.bus.publish(Event::LayoutCompleted {
            vertex_count: self.vertices.len(),
            edge_count: self.index.edges().len(),
        });
        self.request_initial_fit();
        Ok(())
    }

    /// Replace the category filter. Triggers a relayout; the collapse set and
    /// highlight are kept.
    pub fn set_category_filter(&mut self, filter: CategoryFilter) {
        self.filter = filter;
        self.relayout();
        self.apply_visibility();
        self.request_initial_fit();
    }

    pub fn category_filter(&self) -> &CategoryFilter {
        &self.filter
    }

    fn relayout(&mut self) {
        match self.layouter.execute(&self.vertices, &self.index, &self.filter) {
            Ok(positions) => {
                self.positions = positions;
                self.drag = None;
            }
            Err(err) => {
                tracing::warn!("Relayout aborted, keeping previous positions: {}", err);
                self.bus.publish(Event::LayoutFailed {
                    error: err.to_string(),
                });
            }
        }
    }

    // ------------------------------------------------------------------
    // Visibility (no relayout)
    // ------------------------------------------------------------------

    fn apply_visibility(&mut self) {
        self.hidden = compute_hidden(&self.index, &self.filter, &self.collapsed);
    }

    /// Flip `id` in the collapse set. Returns whether it is now collapsed.
    /// Unknown ids are ignored.
    pub fn toggle_collapse(&mut self, id: &VertexId) -> bool {
        if !self.index.contains(id) {
            tracing::debug!("Ignoring collapse toggle for unknown vertex {}", id);
            return false;
        }

        let collapsed = if self.collapsed.remove(id) {
            false
        } else {
            self.collapsed.insert(id.clone());
            true
        };

        self.apply_visibility();
        self.bus.publish(Event::CollapseToggled {
            id: id.clone(),
            collapsed,
        });
        collapsed
    }

    pub fn clear_collapsed(&mut self) {
        if self.collapsed.is_empty() {
            return;
        }
        self.collapsed.clear();
        self.apply_visibility();
    }

    pub fn collapsed(&self) -> &HashSet<VertexId> {
        &self.collapsed
    }

    pub fn is_hidden(&self, id: &VertexId) -> bool {
        self.hidden.contains(id)
    }

    pub fn is_visible(&self, id: &VertexId) -> bool {
        self.index.contains(id) && !self.hidden.contains(id)
    }

    // ------------------------------------------------------------------
    // Drag
    // ------------------------------------------------------------------

    pub fn start_drag(&mut self, id: &VertexId) {
        match DragSession::start(&self.index, &self.positions, id) {
            Some(session) => self.drag = Some(session),
            None => tracing::debug!("Ignoring drag start for unknown vertex {}", id),
        }
    }

    /// Move `id` to `(x, y)` and carry its visible descendants along.
    pub fn drag_to(&mut self, id: &VertexId, x: f32, y: f32) {
        if !self.positions.contains_key(id) {
            tracing::debug!("Ignoring drag move for unknown vertex {}", id);
            return;
        }

        if self.drag.as_ref().is_none_or(|s| s.vertex() != id) {
            self.start_drag(id);
        }
        if let Some(session) = self.drag.as_mut() {
            session.move_to(Vec2::new(x, y), &mut self.positions, &self.hidden);
        }
    }

    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    // ------------------------------------------------------------------
    // Search
    // ------------------------------------------------------------------

    /// Highlight the first visible vertex whose label contains `query` and
    /// ask the rendering surface to fit it.
    pub fn search(&mut self, query: &str) -> SearchOutcome {
        if query.trim().is_empty() {
            self.set_highlight(None);
            return SearchOutcome::Cleared;
        }

        let visible = self
            .vertices
            .iter()
            .filter(|v| !self.hidden.contains(&v.id));
        let Some(found) = locate(query, visible).map(|v| v.id.clone()) else {
            tracing::info!("No career found for {:?}", query);
            self.set_highlight(None);
            self.bus.publish(Event::SearchNoMatch {
                query: query.to_string(),
            });
            return SearchOutcome::NoMatch {
                query: query.to_string(),
            };
        };

        let position = self.positions.get(&found).copied().unwrap_or_default();
        let bounds = hit_bounds(position, &self.config);
        self.set_highlight(Some(found.clone()));
        self.request_fit(
            bounds,
            self.config.search_fit_padding,
            self.config.search_fit_duration_ms,
            FitReason::Search,
        );

        SearchOutcome::Found { id: found, bounds }
    }

    pub fn highlight(&self) -> Option<&VertexId> {
        self.highlight.as_ref()
    }

    fn set_highlight(&mut self, id: Option<VertexId>) {
        if self.highlight == id {
            return;
        }
        self.highlight = id.clone();
        self.bus.publish(Event::HighlightChanged { id });
    }

    // ------------------------------------------------------------------
    // Viewport
    // ------------------------------------------------------------------

    fn request_fit(&mut self, bounds: Rect, padding_ratio: f32, duration_ms: u64, reason: FitReason) {
        self.fit_sequence += 1;
        self.bus.publish(Event::RequestViewportFit(ViewportFit {
            sequence: self.fit_sequence,
            bounds,
            padding_ratio,
            duration_ms,
            reason,
        }));
    }

    fn request_initial_fit(&mut self) {
        if self.initial_fit_sent {
            return;
        }
        if let Some(bounds) = self.content_bounds() {
            self.request_fit(
                bounds,
                self.config.initial_fit_padding,
                self.config.initial_fit_duration_ms,
                FitReason::InitialLayout,
            );
            self.initial_fit_sent = true;
        }
    }

    /// Union of the node boxes of all visible vertices.
    fn content_bounds(&self) -> Option<Rect> {
        let size = self.config.node_size();
        self.vertices
            .iter()
            .filter(|v| !self.hidden.contains(&v.id))
            .filter_map(|v| self.positions.get(&v.id))
            .map(|&pos| Rect::from_pos_size(pos, size))
            .reduce(|acc, rect| acc.union(&rect))
    }

    /// Visible content plus `export_margin`, or `None` when nothing is visible.
    pub fn visible_bounds(&self) -> Option<Rect> {
        self.content_bounds()
            .map(|rect| rect.expand(self.config.export_margin))
    }

    // ------------------------------------------------------------------
    // Output
    // ------------------------------------------------------------------

    pub fn snapshot(&self) -> GraphSnapshot {
        let vertices = self
            .vertices
            .iter()
            .map(|v| {
                let position = self.positions.get(&v.id).copied().unwrap_or_default();
                AnnotatedVertex {
                    id: v.id.clone(),
                    label: v.label.clone(),
                    category: v.category(),
                    x: position.x,
                    y: position.y,
                    hidden: self.hidden.contains(&v.id),
                    highlighted: self.highlight.as_ref() == Some(&v.id),
                    collapsed: self.collapsed.contains(&v.id),
                }
            })
            .collect();

        let edges = self
            .index
            .edges()
            .iter()
            .map(|e| AnnotatedEdge {
                source: e.source.clone(),
                target: e.target.clone(),
                hidden: self.hidden.contains(&e.source) || self.hidden.contains(&e.target),
            })
            .collect();

        GraphSnapshot { vertices, edges }
    }

    pub fn position(&self, id: &VertexId) -> Option<Vec2> {
        self.positions.get(id).copied()
    }

    pub fn positions(&self) -> &PositionTable {
        &self.positions
    }

    pub fn index(&self) -> &GraphIndex {
        &self.index
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }
}
