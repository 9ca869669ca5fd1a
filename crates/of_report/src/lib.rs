//! Report Builder Library
//!
//! Event JSON file → analytics engine → render payload JSON
//! (stats, timeline, heatmap, shot map, pass map, JSON schemas)

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::info;

use of_analytics::data::{default_taxonomy, EventTaxonomy};
use of_analytics::{
    parse_events_json, AnalyticsConfig, MatchAnalytics, MatchEvent, PeriodBreakdown, PlayerId,
    SubjectContext, SCHEMA_VERSION,
};

/// Which view to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ReportKind {
    Stats,
    Timeline,
    Heatmap,
    Shots,
    Passes,
}

impl ReportKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ReportKind::Stats => "stats",
            ReportKind::Timeline => "timeline",
            ReportKind::Heatmap => "heatmap",
            ReportKind::Shots => "shots",
            ReportKind::Passes => "passes",
        }
    }
}

/// Exportable JSON schemas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum SchemaTarget {
    /// Input event record
    Event,
    /// `1H` / `2H` / `total` stats output
    Stats,
}

#[derive(Debug, Clone)]
pub struct ReportRequest {
    pub kind: ReportKind,
    pub context: SubjectContext,
    pub minutes_played: Option<u32>,
    /// Overrides `pitch.flip`
    pub flip: Option<bool>,
}

/// Command-line overrides layered over the YAML config.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ConfigOverrides {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub bin_size: Option<f64>,
    /// Applied to both match and single-subject thresholds
    pub threshold: Option<f64>,
}

impl ConfigOverrides {
    pub fn apply(self, mut config: AnalyticsConfig) -> Result<AnalyticsConfig> {
        if let Some(width) = self.width {
            config.pitch.width = width;
        }
        if let Some(height) = self.height {
            config.pitch.height = height;
        }
        if let Some(bin_size) = self.bin_size {
            config.heatmap.bin_size = bin_size;
        }
        if let Some(threshold) = self.threshold {
            config.timeline.match_threshold_s = threshold;
            config.timeline.subject_threshold_s = threshold;
        }
        config.validate().context("Invalid command-line override")?;
        Ok(config)
    }
}

/// Output envelope shared by every report.
#[derive(Debug, Serialize)]
pub struct ReportEnvelope<T: Serialize> {
    pub schema_version: u8,
    pub report: &'static str,
    /// RFC3339 build time
    pub generated_at: String,
    pub match_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player_id: Option<PlayerId>,
    pub event_count: usize,
    pub data: T,
}

pub fn load_events(path: &Path) -> Result<Vec<MatchEvent>> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read events file: {}", path.display()))?;
    let events = parse_events_json(&json)
        .with_context(|| format!("Invalid event data in {}", path.display()))?;
    info!(path = %path.display(), events = events.len(), "loaded events");
    Ok(events)
}

/// Defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<AnalyticsConfig> {
    let Some(path) = path else {
        return Ok(AnalyticsConfig::default());
    };
    let yaml = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    AnalyticsConfig::from_yaml_str(&yaml)
        .with_context(|| format!("Invalid config in {}", path.display()))
}

pub fn load_taxonomy(path: &Path) -> Result<EventTaxonomy> {
    let yaml = fs::read_to_string(path)
        .with_context(|| format!("Failed to read taxonomy file: {}", path.display()))?;
    EventTaxonomy::from_yaml_str(&yaml)
        .with_context(|| format!("Invalid taxonomy in {}", path.display()))
}

/// Engine over a custom taxonomy, or the embedded one.
pub fn analytics_for<'t>(
    config: AnalyticsConfig,
    taxonomy: Option<&'t EventTaxonomy>,
) -> Result<MatchAnalytics<'t>> {
    let taxonomy = taxonomy.unwrap_or(default_taxonomy());
    Ok(MatchAnalytics::with_taxonomy(config, taxonomy)?)
}

/// Select the subject's events and render one view.
pub fn build_report(
    analytics: &MatchAnalytics<'_>,
    events: &[MatchEvent],
    request: &ReportRequest,
) -> Result<Value> {
    let ctx = &request.context;
    let selected = ctx.select(events);
    info!(
        report = request.kind.as_str(),
        match_id = ctx.match_id,
        selected = selected.len(),
        "building report"
    );

    let data = match request.kind {
        ReportKind::Stats => {
            serde_json::to_value(analytics.stats(&selected, request.minutes_played))?
        }
        ReportKind::Timeline => serde_json::to_value(analytics.timeline(&selected, ctx)?)?,
        ReportKind::Heatmap => serde_json::to_value(analytics.heatmap(&selected, request.flip)?)?,
        ReportKind::Shots => serde_json::to_value(analytics.shots(&selected, request.flip)?)?,
        ReportKind::Passes => serde_json::to_value(analytics.passes(&selected, request.flip)?)?,
    };

    let envelope = ReportEnvelope {
        schema_version: SCHEMA_VERSION,
        report: request.kind.as_str(),
        generated_at: chrono::Utc::now().to_rfc3339(),
        match_id: ctx.match_id,
        player_id: ctx.player_id,
        event_count: selected.len(),
        data,
    };
    Ok(serde_json::to_value(envelope)?)
}

pub fn schema_json(target: SchemaTarget) -> Result<Value> {
    let schema = match target {
        SchemaTarget::Event => MatchEvent::json_schema(),
        SchemaTarget::Stats => PeriodBreakdown::json_schema(),
    };
    Ok(serde_json::to_value(schema)?)
}

/// Pretty JSON to `out`, or stdout when `None`.
pub fn write_output(out: Option<&Path>, value: &Value) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    match out {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create output directory: {}", parent.display())
                })?;
            }
            fs::write(path, json)
                .with_context(|| format!("Failed to write output file: {}", path.display()))?;
            info!(path = %path.display(), "report written");
        }
        None => println!("{json}"),
    }
    Ok(())
}
