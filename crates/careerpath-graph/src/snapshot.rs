use careerpath_core::{Category, VertexId};
use serde::{Deserialize, Serialize};

/// One vertex as handed to the rendering surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedVertex {
    pub id: VertexId,
    pub label: String,
    pub category: Option<Category>,
    pub x: f32,
    pub y: f32,
    pub hidden: bool,
    pub highlighted: bool,
    pub collapsed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedEdge {
    pub source: VertexId,
    pub target: VertexId,
    pub hidden: bool,
}

/// Output of one render cycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub vertices: Vec<AnnotatedVertex>,
    pub edges: Vec<AnnotatedEdge>,
}

impl GraphSnapshot {
    pub fn visible_vertices(&self) -> impl Iterator<Item = &AnnotatedVertex> {
        self.vertices.iter().filter(|v| !v.hidden)
    }

    pub fn visible_edges(&self) -> impl Iterator<Item = &AnnotatedEdge> {
        self.edges.iter().filter(|e| !e.hidden)
    }

    pub fn vertex(&self, id: &VertexId) -> Option<&AnnotatedVertex> {
        self.vertices.iter().find(|v| &v.id == id)
    }

    pub fn highlighted(&self) -> Option<&AnnotatedVertex> {
        self.vertices.iter().find(|v| v.highlighted)
    }
}
