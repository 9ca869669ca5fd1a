//! # Spatial Module
//!
//! Pitch geometry for heatmaps, shot maps and pass maps.
//!
//! - `projector` - normalized pitch -> output rectangle, optional X mirror
//! - `density` - grid binning and heatmap layers
//! - `maps` - shot markers and pass vectors
//! - `render` - render instruction types

pub mod density;
pub mod maps;
pub mod projector;
pub mod render;

pub use density::{
    render_heatmap, DensityBinner, DensityCell, DensityGrid, HeatmapLayers, HeatmapStyle,
    DEFAULT_BIN_SIZE,
};
pub use maps::{pass_map, shot_map};
pub use projector::{ScreenPoint, SpatialProjector};
pub use render::{ColorClass, PassVector, RenderPoint};
