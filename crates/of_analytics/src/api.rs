//! JSON API
//!
//! One-call entry point for rendering surfaces: takes the subject context
//! and its events, returns stats, timeline and pitch layers in one payload.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analysis::{AggregateReport, EventClassifier, PeriodAggregator, SubjectContext};
use crate::config::AnalyticsConfig;
use crate::data::taxonomy::EventTaxonomy;
use crate::error::Result;
use crate::models::MatchEvent;
use crate::spatial::{
    pass_map, render_heatmap, shot_map, DensityBinner, HeatmapLayers, HeatmapStyle, PassVector,
    RenderPoint, SpatialProjector,
};
use crate::timeline::{TimelineEntry, TimelineLayoutEngine};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsRequest {
    pub context: SubjectContext,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minutes_played: Option<u32>,
    /// Overrides `pitch.flip` from the config
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flip: Option<bool>,
    pub events: Vec<MatchEvent>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsResponse<'a> {
    pub schema_version: u8,
    pub match_id: u64,
    pub report: AggregateReport,
    pub timeline: Vec<TimelineEntry<'a>>,
    pub heatmap: HeatmapLayers,
    pub shots: Vec<RenderPoint>,
    pub passes: Vec<PassVector>,
}

/// Config + classifier bundle behind every view.
#[derive(Debug, Clone)]
pub struct MatchAnalytics<'t> {
    config: AnalyticsConfig,
    classifier: EventClassifier<'t>,
}

impl MatchAnalytics<'static> {
    pub fn new(config: AnalyticsConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, classifier: EventClassifier::new() })
    }
}

impl<'t> MatchAnalytics<'t> {
    pub fn with_taxonomy(config: AnalyticsConfig, taxonomy: &'t EventTaxonomy) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, classifier: EventClassifier::with_taxonomy(taxonomy) })
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    pub fn classifier(&self) -> EventClassifier<'t> {
        self.classifier
    }

    pub fn projector(&self, flip: Option<bool>) -> Result<SpatialProjector> {
        let pitch = &self.config.pitch;
        SpatialProjector::new(pitch.width, pitch.height, flip.unwrap_or(pitch.flip))
    }

    pub fn stats(&self, events: &[MatchEvent], minutes_played: Option<u32>) -> AggregateReport {
        PeriodAggregator::with_classifier(self.classifier).aggregate_with_rates(events, minutes_played)
    }

    pub fn timeline<'a>(&self, events: &'a [MatchEvent], ctx: &SubjectContext) -> Result<Vec<TimelineEntry<'a>>> {
        Ok(TimelineLayoutEngine::for_subject(&self.config.timeline, ctx)?.layout(events))
    }

    pub fn heatmap(&self, events: &[MatchEvent], flip: Option<bool>) -> Result<HeatmapLayers> {
        let binner = DensityBinner::new(self.config.heatmap.bin_size)?;
        let style = HeatmapStyle::from(&self.config.heatmap);
        Ok(render_heatmap(events, &binner, &self.projector(flip)?, &style))
    }

    pub fn shots(&self, events: &[MatchEvent], flip: Option<bool>) -> Result<Vec<RenderPoint>> {
        let classified = self.classifier.classify_all(events);
        Ok(shot_map(&classified, &self.projector(flip)?, &self.config.shot_map))
    }

    pub fn passes(&self, events: &[MatchEvent], flip: Option<bool>) -> Result<Vec<PassVector>> {
        let classified = self.classifier.classify_all(events);
        Ok(pass_map(&classified, &self.projector(flip)?))
    }

    /// Every view for the subject's events. `events` must already be
    /// filtered with [`SubjectContext::select`].
    pub fn analyze<'a>(
        &self,
        ctx: &SubjectContext,
        events: &'a [MatchEvent],
        minutes_played: Option<u32>,
        flip: Option<bool>,
    ) -> Result<AnalyticsResponse<'a>> {
        Ok(AnalyticsResponse {
            schema_version: crate::SCHEMA_VERSION,
            match_id: ctx.match_id,
            report: self.stats(events, minutes_played),
            timeline: self.timeline(events, ctx)?,
            heatmap: self.heatmap(events, flip)?,
            shots: self.shots(events, flip)?,
            passes: self.passes(events, flip)?,
        })
    }
}

/// Parse an [`AnalyticsRequest`], run every view, return the JSON payload.
pub fn analyze_json(request_json: &str, config: &AnalyticsConfig) -> Result<String> {
    let request: AnalyticsRequest = serde_json::from_str(request_json)?;
    let analytics = MatchAnalytics::new(config.clone())?;
    let events = request.context.select(&request.events);

    info!(
        match_id = request.context.match_id,
        received = request.events.len(),
        selected = events.len(),
        "analyzing match events"
    );

    let response = analytics.analyze(&request.context, &events, request.minutes_played, request.flip)?;
    Ok(serde_json::to_string(&response)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn request() -> Value {
        json!({
            "context": { "match_id": 5, "home_team": 1, "away_team": 2 },
            "minutes_played": 90,
            "events": [
                { "eventName": "Pass", "matchPeriod": "1H", "eventSecond": 10.0,
                  "startX": 20.0, "startY": 30.0, "endX": 40.0, "endY": 30.0,
                  "teamId": 1, "tags": [1801] },
                { "eventName": "Shot", "matchPeriod": "1H", "eventSecond": 30.0,
                  "startX": 85.0, "startY": 50.0, "teamId": 2, "tags": [101] },
                { "eventName": "Foul", "matchPeriod": "2H", "eventSecond": 5.0,
                  "teamId": 2, "tags": [] }
            ]
        })
    }

    #[test]
    fn test_analyze_json_payload() {
        let out = analyze_json(&request().to_string(), &AnalyticsConfig::default()).unwrap();
        let parsed: Value = serde_json::from_str(&out).unwrap();

        assert_eq!(parsed["schema_version"], 1);
        assert_eq!(parsed["match_id"], 5);
        assert_eq!(parsed["report"]["stats"]["total"]["totalEvents"], 3);
        assert_eq!(parsed["report"]["stats"]["1H"]["passes"], 1);
        assert_eq!(parsed["report"]["stats"]["2H"]["fouls"], 1);
        assert!(parsed["report"]["rates"]["total"].is_number());

        let timeline = parsed["timeline"].as_array().unwrap();
        assert_eq!(timeline.len(), 3);
        // home above, away below
        assert!(timeline[0]["lane_offset"].as_f64().unwrap() > 0.0);
        assert!(timeline[1]["lane_offset"].as_f64().unwrap() < 0.0);
        assert_eq!(timeline[2]["clock"], "46'");

        assert_eq!(parsed["heatmap"]["points"].as_array().unwrap().len(), 2);
        assert_eq!(parsed["shots"].as_array().unwrap().len(), 1);
        assert_eq!(parsed["passes"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_player_filter_applies() {
        let mut value = request();
        value["context"]["player_id"] = json!(44);
        value["events"][0]["playerId"] = json!(44);
        let out = analyze_json(&value.to_string(), &AnalyticsConfig::default()).unwrap();
        let parsed: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["report"]["stats"]["total"]["totalEvents"], 1);
        // single-subject layout carries no side
        assert!(parsed["timeline"][0].get("side").is_none());
    }

    #[test]
    fn test_invalid_event_rejected() {
        let mut value = request();
        value["events"][0]["endY"] = Value::Null;
        assert!(analyze_json(&value.to_string(), &AnalyticsConfig::default()).is_err());
    }

    #[test]
    fn test_flip_override() {
        let analytics = MatchAnalytics::new(AnalyticsConfig::default()).unwrap();
        assert!(!analytics.projector(None).unwrap().flip());
        assert!(analytics.projector(Some(true)).unwrap().flip());
    }
}
