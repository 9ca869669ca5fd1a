//! # Density Binner
//!
//! Quantizes event start points into a square grid for heatmaps.
//!
//! ## Algorithm
//! 1. `gridX = floor(startX / binSize) * binSize` (same for Y)
//! 2. Count events per cell; events without a start point are skipped
//! 3. `intensity = count / max count`
//! 4. Radius/opacity follow `sqrt(intensity)` between configured bounds,
//!    so sparse cells stay visible and dense cells never saturate

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use super::projector::SpatialProjector;
use super::render::{ColorClass, RenderPoint};
use crate::config::HeatmapConfig;
use crate::error::{ensure_positive, Result};
use crate::models::{MatchEvent, PitchPoint, PITCH_DOMAIN_MAX};

pub const DEFAULT_BIN_SIZE: f64 = 5.0;

/// One occupied grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DensityCell {
    /// Cell origin in normalized units
    pub grid_x: f64,
    pub grid_y: f64,
    pub count: u32,
    /// `count / max_count`, in `(0, 1]`
    pub intensity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DensityGrid {
    pub bin_size: f64,
    pub max_count: u32,
    /// Sorted by (grid_x, grid_y)
    pub cells: Vec<DensityCell>,
}

impl DensityGrid {
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cell_at(&self, grid_x: f64, grid_y: f64) -> Option<&DensityCell> {
        self.cells.iter().find(|c| c.grid_x == grid_x && c.grid_y == grid_y)
    }

    pub fn total_count(&self) -> u32 {
        self.cells.iter().map(|c| c.count).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DensityBinner {
    bin_size: f64,
}

impl Default for DensityBinner {
    fn default() -> Self {
        Self { bin_size: DEFAULT_BIN_SIZE }
    }
}

impl DensityBinner {
    pub fn new(bin_size: f64) -> Result<Self> {
        Ok(Self { bin_size: ensure_positive("bin_size", bin_size)? })
    }

    pub fn bin_size(&self) -> f64 {
        self.bin_size
    }

    #[inline]
    fn cell_index(&self, v: f64) -> i64 {
        (v / self.bin_size).floor() as i64
    }

    /// Cell origin for a point.
    pub fn cell_of(&self, point: PitchPoint) -> (f64, f64) {
        (
            self.cell_index(point.x) as f64 * self.bin_size,
            self.cell_index(point.y) as f64 * self.bin_size,
        )
    }

    /// Raw counts keyed by cell index.
    pub fn counts<'a>(&self, events: impl IntoIterator<Item = &'a MatchEvent>) -> BTreeMap<(i64, i64), u32> {
        let mut counts = BTreeMap::new();
        for point in events.into_iter().filter_map(|e| e.start) {
            *counts.entry((self.cell_index(point.x), self.cell_index(point.y))).or_insert(0) += 1;
        }
        counts
    }

    pub fn bin<'a>(&self, events: impl IntoIterator<Item = &'a MatchEvent>) -> DensityGrid {
        let counts = self.counts(events);
        let max_count = counts.values().copied().max().unwrap_or(0);

        let cells = counts
            .into_iter()
            .map(|((gx, gy), count)| DensityCell {
                grid_x: gx as f64 * self.bin_size,
                grid_y: gy as f64 * self.bin_size,
                count,
                intensity: count as f64 / max_count as f64,
            })
            .collect::<Vec<_>>();

        debug!(cells = cells.len(), max_count, bin_size = self.bin_size, "density grid");
        DensityGrid { bin_size: self.bin_size, max_count, cells }
    }
}

/// Maps intensity to radius/opacity within fixed bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatmapStyle {
    pub min_radius: f64,
    pub max_radius: f64,
    pub min_opacity: f64,
    pub max_opacity: f64,
    pub point_radius: f64,
    pub point_opacity: f64,
}

impl From<&HeatmapConfig> for HeatmapStyle {
    fn from(c: &HeatmapConfig) -> Self {
        Self {
            min_radius: c.min_radius,
            max_radius: c.max_radius,
            min_opacity: c.min_opacity,
            max_opacity: c.max_opacity,
            point_radius: c.point_radius,
            point_opacity: c.point_opacity,
        }
    }
}

impl Default for HeatmapStyle {
    fn default() -> Self {
        Self::from(&HeatmapConfig::default())
    }
}

impl HeatmapStyle {
    #[inline]
    fn curve(intensity: f64) -> f64 {
        if intensity.is_finite() {
            intensity.clamp(0.0, 1.0).sqrt()
        } else {
            0.0
        }
    }

    pub fn radius(&self, intensity: f64) -> f64 {
        self.min_radius + (self.max_radius - self.min_radius) * Self::curve(intensity)
    }

    pub fn opacity(&self, intensity: f64) -> f64 {
        self.min_opacity + (self.max_opacity - self.min_opacity) * Self::curve(intensity)
    }
}

/// Heatmap render instructions: raw points first, binned cells on top.
///
/// Cells are drawn at their centre, clamped to the pitch so the edge cell
/// at origin 100 stays inside the output rectangle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapLayers {
    pub points: Vec<RenderPoint>,
    pub cells: Vec<RenderPoint>,
}

pub fn render_heatmap(
    events: &[MatchEvent],
    binner: &DensityBinner,
    projector: &SpatialProjector,
    style: &HeatmapStyle,
) -> HeatmapLayers {
    let points = events
        .iter()
        .enumerate()
        .filter_map(|(i, e)| e.start.map(|p| (i, p)))
        .map(|(i, p)| {
            let s = projector.project(p);
            RenderPoint {
                x: s.x,
                y: s.y,
                radius: style.point_radius,
                opacity: style.point_opacity,
                color_class: ColorClass::Point,
                event_index: Some(i),
            }
        })
        .collect();

    let grid = binner.bin(events);
    let half = grid.bin_size / 2.0;
    let cells = grid
        .cells
        .iter()
        .map(|cell| {
            let centre = projector.project(PitchPoint::new(
                (cell.grid_x + half).min(PITCH_DOMAIN_MAX),
                (cell.grid_y + half).min(PITCH_DOMAIN_MAX),
            ));
            RenderPoint {
                x: centre.x,
                y: centre.y,
                radius: style.radius(cell.intensity),
                opacity: style.opacity(cell.intensity),
                color_class: ColorClass::Density,
                event_index: None,
            }
        })
        .collect();

    HeatmapLayers { points, cells }
}
