//! Graph view style tokens.
//!
//! The engine itself never looks at styles; the rendering surface resolves a
//! vertex's category to colors through these functions.

use careerpath_core::{Category, StreamInfo};
use serde::{Deserialize, Serialize};

/// RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// `#rrggbb`, or `#rrggbbaa` when not opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeStyle {
    /// Left border accent.
    pub accent: Color,
    pub fill: Color,
    pub border: Color,
    pub text: Color,
    pub corner_radius: f32,
    pub font_size: f32,
    /// Stream name shown in legends, if the category is a known stream.
    pub legend: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeStyle {
    pub color: Color,
    pub width: f32,
    pub dashed: bool,
    pub arrow_head: bool,
}

// ============================================================================
// Stream accents
// ============================================================================

pub const COLOR_SCIENCE: Color = Color::rgb(0x3b, 0x82, 0xf6);
pub const COLOR_COMMERCE: Color = Color::rgb(0xf5, 0x9e, 0x0b);
pub const COLOR_ARTS: Color = Color::rgb(0x10, 0xb9, 0x81);
pub const COLOR_VOCATIONAL: Color = Color::rgb(0x8b, 0x5c, 0xf6);
pub const COLOR_NEW_AGE: Color = Color::rgb(0xef, 0x44, 0x44);
pub const COLOR_DEFAULT_ACCENT: Color = Color::rgb(0x63, 0x66, 0xf1);

pub const COLOR_NODE_FILL: Color = Color::rgb(0xff, 0xff, 0xff);
pub const COLOR_NODE_BORDER: Color = Color::rgba(0, 0, 0, 20);
pub const COLOR_NODE_TEXT: Color = Color::rgb(0x0f, 0x17, 0x2a);
pub const COLOR_EDGE: Color = Color::rgba(71, 85, 105, 89);
pub const COLOR_HIGHLIGHT_RING: Color = Color::rgba(99, 102, 241, 128);

pub fn accent_for(category: Option<Category>) -> Color {
    match category.map(|c| c.0) {
        Some(1) => COLOR_SCIENCE,
        Some(2) => COLOR_COMMERCE,
        Some(3) => COLOR_ARTS,
        Some(4) => COLOR_VOCATIONAL,
        Some(5) => COLOR_NEW_AGE,
        _ => COLOR_DEFAULT_ACCENT,
    }
}

pub fn category_style(category: Option<Category>) -> NodeStyle {
    NodeStyle {
        accent: accent_for(category),
        fill: COLOR_NODE_FILL,
        border: COLOR_NODE_BORDER,
        text: COLOR_NODE_TEXT,
        corner_radius: 10.0,
        font_size: 12.0,
        legend: category
            .and_then(StreamInfo::lookup)
            .map(|stream| stream.label_en),
    }
}

pub fn edge_style() -> EdgeStyle {
    EdgeStyle {
        color: COLOR_EDGE,
        width: 1.8,
        dashed: false,
        arrow_head: true,
    }
}

pub fn highlight_ring() -> Color {
    COLOR_HIGHLIGHT_RING
}
