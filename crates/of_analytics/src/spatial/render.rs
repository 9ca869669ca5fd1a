//! Render instructions handed to the drawing surface.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Style hint the rendering surface maps to a palette entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ColorClass {
    /// Raw point beneath a heatmap
    Point,
    /// Heatmap bin
    Density,
    Goal,
    OnTarget,
    OffTarget,
    Completed,
    Incomplete,
}

/// A circle in output space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RenderPoint {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub opacity: f64,
    pub color_class: ColorClass,
    /// Index of the source event, for marker tooltips
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_index: Option<usize>,
}

/// A directed segment in output space (pass map arrow).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PassVector {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub color_class: ColorClass,
    pub is_cross: bool,
    pub is_forward: bool,
    pub event_index: usize,
}
