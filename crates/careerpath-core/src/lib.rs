use serde::{Deserialize, Serialize};
use std::fmt;

pub mod config;
pub mod error;
pub mod geometry;
pub mod stream;

pub use config::{LayoutConfig, WidthMode};
pub use error::GraphError;
pub use geometry::{Rect, Vec2};
pub use stream::{STREAM_CATALOG, StreamInfo};

/// Identifier of a career/stream/course vertex.
///
/// The first character of the id encodes the stream the vertex belongs to
/// (`"1A"` and `"12B"` are both stream 1). Ids without a leading digit
/// carry no category.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VertexId(pub String);

impl VertexId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn category(&self) -> Option<Category> {
        Category::from_id(&self.0)
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for VertexId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for VertexId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Stream tag parsed from a vertex id prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(pub u32);

impl Category {
    pub fn from_id(id: &str) -> Option<Self> {
        id.chars().next()?.to_digit(10).map(Category)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vertex {
    pub id: VertexId,
    pub label: String,
}

impl Vertex {
    pub fn new(id: impl Into<VertexId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }

    pub fn category(&self) -> Option<Category> {
        self.id.category()
    }
}

/// `source` is the parent of `target`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub source: VertexId,
    pub target: VertexId,
}

impl Edge {
    pub fn new(source: impl Into<VertexId>, target: impl Into<VertexId>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}
