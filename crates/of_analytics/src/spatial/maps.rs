//! Shot and pass maps
//!
//! Both read facts from [`ClassifiedEvent`]s and skip events missing the
//! coordinates they need.

use tracing::debug;

use super::projector::SpatialProjector;
use super::render::{ColorClass, PassVector, RenderPoint};
use crate::analysis::classifier::ClassifiedEvent;
use crate::config::ShotMapConfig;
use crate::models::EventCategory;

/// One marker per shot or goal with a start point.
///
/// `classified` must be in input order; marker `event_index` is the
/// position in that slice.
pub fn shot_map(
    classified: &[ClassifiedEvent<'_>],
    projector: &SpatialProjector,
    config: &ShotMapConfig,
) -> Vec<RenderPoint> {
    let markers: Vec<RenderPoint> = classified
        .iter()
        .enumerate()
        .filter(|(_, c)| c.category().is_shot())
        .filter_map(|(i, c)| c.event.start.map(|p| (i, c, projector.project(p))))
        .map(|(i, c, s)| {
            let (color_class, radius) = if c.category() == EventCategory::Goal {
                (ColorClass::Goal, config.goal_radius)
            } else if c.facts.is_on_target {
                (ColorClass::OnTarget, config.shot_radius)
            } else {
                (ColorClass::OffTarget, config.shot_radius)
            };
            RenderPoint {
                x: s.x,
                y: s.y,
                radius,
                opacity: config.opacity,
                color_class,
                event_index: Some(i),
            }
        })
        .collect();

    debug!(markers = markers.len(), "shot map");
    markers
}

/// One vector per pass with both start and end points.
pub fn pass_map(classified: &[ClassifiedEvent<'_>], projector: &SpatialProjector) -> Vec<PassVector> {
    let vectors: Vec<PassVector> = classified
        .iter()
        .enumerate()
        .filter(|(_, c)| c.category() == EventCategory::Pass)
        .filter_map(|(i, c)| match (c.event.start, c.event.end) {
            (Some(from), Some(to)) => Some((i, c, projector.project(from), projector.project(to))),
            _ => None,
        })
        .map(|(i, c, from, to)| PassVector {
            x1: from.x,
            y1: from.y,
            x2: to.x,
            y2: to.y,
            color_class: if c.facts.is_successful {
                ColorClass::Completed
            } else {
                ColorClass::Incomplete
            },
            is_cross: c.facts.is_cross,
            is_forward: c.facts.is_forward,
            event_index: i,
        })
        .collect();

    debug!(vectors = vectors.len(), "pass map");
    vectors
}
