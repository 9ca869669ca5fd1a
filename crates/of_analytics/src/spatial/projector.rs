//! Pitch projection
//!
//! Maps normalized `[0,100] x [0,100]` pitch coordinates into an output
//! rectangle `[0,W] x [0,H]`. With `flip` the X axis is mirrored so either
//! team can be drawn attacking the same way; Y is never flipped.

use serde::{Deserialize, Serialize};

use crate::error::{ensure_positive, Result};
use crate::models::{PitchPoint, PITCH_DOMAIN_MAX};

/// Point in output (render) space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

/// Stateless projector, fully defined by `(width, height, flip)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpatialProjector {
    width: f64,
    height: f64,
    flip: bool,
}

impl SpatialProjector {
    pub fn new(width: f64, height: f64, flip: bool) -> Result<Self> {
        Ok(Self {
            width: ensure_positive("width", width)?,
            height: ensure_positive("height", height)?,
            flip,
        })
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn flip(&self) -> bool {
        self.flip
    }

    #[inline]
    pub fn scale_x(&self, x: f64) -> f64 {
        x / PITCH_DOMAIN_MAX * self.width
    }

    #[inline]
    pub fn scale_y(&self, y: f64) -> f64 {
        y / PITCH_DOMAIN_MAX * self.height
    }

    /// Output-space X, mirrored when `flip` is set.
    #[inline]
    pub fn project_x(&self, x: f64) -> f64 {
        if self.flip {
            self.width - self.scale_x(x)
        } else {
            self.scale_x(x)
        }
    }

    #[inline]
    pub fn project_y(&self, y: f64) -> f64 {
        self.scale_y(y)
    }

    pub fn project(&self, point: PitchPoint) -> ScreenPoint {
        ScreenPoint { x: self.project_x(point.x), y: self.project_y(point.y) }
    }
}
