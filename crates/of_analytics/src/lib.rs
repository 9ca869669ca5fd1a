//! # of_analytics - Match Event Analytics Engine
//!
//! Turns a match's raw event stream into per-period statistics, a
//! collision-free timeline layout and pitch render instructions
//! (heatmaps, shot maps, pass maps).
//!
//! ## Features
//! - Keyword/tag event classification driven by an embedded taxonomy
//! - `1H` / `2H` / `total` stat buckets with derived rates
//! - Greedy clustering for symmetric and home/away timelines
//! - Normalized pitch projection with optional attacking-direction mirror
//! - JSON API for rendering surfaces

// Doc formatting lints - purely cosmetic
#![allow(clippy::doc_lazy_continuation)]
// Struct initialization pattern used intentionally in tests
#![allow(clippy::field_reassign_with_default)]

pub mod analysis;
pub mod api;
pub mod config;
pub mod data;
pub mod error;
pub mod models;
pub mod spatial;
pub mod timeline;

// Re-export main API
pub use api::{analyze_json, AnalyticsRequest, AnalyticsResponse, MatchAnalytics};
pub use config::AnalyticsConfig;
pub use error::{AnalyticsError, Result};

// Re-export analysis types
pub use analysis::{
    AggregateReport, ClassifiedEvent, EventClassifier, EventFacts, PeriodAggregator,
    SubjectContext, TeamSide,
};

// Re-export data model
pub use models::{
    parse_events_json, EventCategory, MatchEvent, MatchPeriod, PeriodBreakdown, PeriodBucket,
    PeriodStats, PitchPoint, PlayerId, Rate, TeamId,
};

// Re-export timeline and spatial engines
pub use spatial::{DensityBinner, SpatialProjector};
pub use timeline::{TimelineEntry, TimelineLayoutEngine, TimelineMapper};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Version of the JSON payloads produced by [`api`]
pub const SCHEMA_VERSION: u8 = 1;
