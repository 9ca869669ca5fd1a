//! Analytics configuration
//!
//! Every field has a default, so a YAML file only needs the keys it
//! overrides:
//!
//! ```yaml
//! timeline:
//!   match_threshold_s: 45
//! heatmap:
//!   bin_size: 10
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{ensure_non_negative, ensure_positive, AnalyticsError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AnalyticsConfig {
    pub timeline: TimelineConfig,
    pub heatmap: HeatmapConfig,
    pub shot_map: ShotMapConfig,
    pub pitch: PitchConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    /// Cluster threshold for whole-match timelines (seconds)
    pub match_threshold_s: f64,
    /// Cluster threshold for single-subject timelines (seconds)
    pub subject_threshold_s: f64,
    pub lane_spacing: f64,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self { match_threshold_s: 60.0, subject_threshold_s: 30.0, lane_spacing: 12.0 }
    }
}

/// Heatmap binning and style bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeatmapConfig {
    pub bin_size: f64,
    pub min_radius: f64,
    pub max_radius: f64,
    pub min_opacity: f64,
    pub max_opacity: f64,
    /// Raw point layer drawn beneath the bins
    pub point_radius: f64,
    pub point_opacity: f64,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            bin_size: 5.0,
            min_radius: 4.0,
            max_radius: 18.0,
            min_opacity: 0.25,
            max_opacity: 0.85,
            point_radius: 2.0,
            point_opacity: 0.15,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShotMapConfig {
    pub shot_radius: f64,
    pub goal_radius: f64,
    pub opacity: f64,
}

impl Default for ShotMapConfig {
    fn default() -> Self {
        Self { shot_radius: 6.0, goal_radius: 10.0, opacity: 0.9 }
    }
}

/// Output rectangle for pitch views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PitchConfig {
    pub width: f64,
    pub height: f64,
    pub flip: bool,
}

impl Default for PitchConfig {
    fn default() -> Self {
        Self { width: 525.0, height: 340.0, flip: false }
    }
}

fn ensure_unit(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(AnalyticsError::Config(format!("{name}={value} must be within [0, 1]")))
    }
}

fn ensure_ordered(min_name: &str, min: f64, max_name: &str, max: f64) -> Result<()> {
    if min <= max {
        Ok(())
    } else {
        Err(AnalyticsError::Config(format!("{min_name}={min} exceeds {max_name}={max}")))
    }
}

impl AnalyticsConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: AnalyticsConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let t = &self.timeline;
        ensure_non_negative("timeline.match_threshold_s", t.match_threshold_s)?;
        ensure_non_negative("timeline.subject_threshold_s", t.subject_threshold_s)?;
        ensure_positive("timeline.lane_spacing", t.lane_spacing)?;

        let h = &self.heatmap;
        ensure_positive("heatmap.bin_size", h.bin_size)?;
        ensure_non_negative("heatmap.min_radius", h.min_radius)?;
        ensure_non_negative("heatmap.max_radius", h.max_radius)?;
        ensure_non_negative("heatmap.point_radius", h.point_radius)?;
        ensure_ordered("heatmap.min_radius", h.min_radius, "heatmap.max_radius", h.max_radius)?;
        ensure_unit("heatmap.min_opacity", h.min_opacity)?;
        ensure_unit("heatmap.max_opacity", h.max_opacity)?;
        ensure_unit("heatmap.point_opacity", h.point_opacity)?;
        ensure_ordered("heatmap.min_opacity", h.min_opacity, "heatmap.max_opacity", h.max_opacity)?;

        let s = &self.shot_map;
        ensure_non_negative("shot_map.shot_radius", s.shot_radius)?;
        ensure_non_negative("shot_map.goal_radius", s.goal_radius)?;
        ensure_unit("shot_map.opacity", s.opacity)?;

        ensure_positive("pitch.width", self.pitch.width)?;
        ensure_positive("pitch.height", self.pitch.height)?;
        Ok(())
    }
}
