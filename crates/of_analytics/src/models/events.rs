use std::collections::BTreeSet;
use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{AnalyticsError, Result};

/// Upper bound of the normalized pitch domain on both axes.
pub const PITCH_DOMAIN_MAX: f64 = 100.0;

/// One of the five temporal segments of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
pub enum MatchPeriod {
    #[serde(rename = "1H")]
    FirstHalf,
    #[serde(rename = "2H")]
    SecondHalf,
    #[serde(rename = "ET1")]
    ExtraTimeFirst,
    #[serde(rename = "ET2")]
    ExtraTimeSecond,
    /// Penalty shoot-out
    #[serde(rename = "P")]
    Penalties,
}

impl MatchPeriod {
    /// Wire code of the period (`1H`, `2H`, `ET1`, `ET2`, `P`).
    pub const fn code(self) -> &'static str {
        match self {
            MatchPeriod::FirstHalf => "1H",
            MatchPeriod::SecondHalf => "2H",
            MatchPeriod::ExtraTimeFirst => "ET1",
            MatchPeriod::ExtraTimeSecond => "ET2",
            MatchPeriod::Penalties => "P",
        }
    }
}

impl fmt::Display for MatchPeriod {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct TeamId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct PlayerId(pub u64);

/// Position in normalized pitch coordinates, both axes in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PitchPoint {
    pub x: f64,
    pub y: f64,
}

impl PitchPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn in_domain(v: f64) -> bool {
        v.is_finite() && (0.0..=PITCH_DOMAIN_MAX).contains(&v)
    }
}

/// A single tagged match event as received from the query layer.
///
/// Coordinates are stored as `Option<PitchPoint>` so a half-present pair
/// cannot exist in memory. The flat wire form is [`MatchEventRecord`];
/// deserialization goes through it and rejects records that break the
/// invariants (see [`MatchEvent::validate`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MatchEventRecord", into = "MatchEventRecord")]
pub struct MatchEvent {
    pub match_id: Option<u64>,
    pub event_type_code: i32,
    pub event_name: String,
    pub sub_event_name: Option<String>,
    pub period: MatchPeriod,
    /// Seconds elapsed within `period`
    pub event_second: f64,
    pub start: Option<PitchPoint>,
    pub end: Option<PitchPoint>,
    pub team_id: TeamId,
    pub player_id: Option<PlayerId>,
    pub tags: BTreeSet<u32>,
}

impl MatchEvent {
    pub fn new(
        event_name: impl Into<String>,
        period: MatchPeriod,
        event_second: f64,
        team_id: TeamId,
    ) -> Self {
        Self {
            match_id: None,
            event_type_code: 0,
            event_name: event_name.into(),
            sub_event_name: None,
            period,
            event_second,
            start: None,
            end: None,
            team_id,
            player_id: None,
            tags: BTreeSet::new(),
        }
    }

    pub fn with_type_code(mut self, code: i32) -> Self {
        self.event_type_code = code;
        self
    }

    pub fn with_sub_event(mut self, name: impl Into<String>) -> Self {
        self.sub_event_name = Some(name.into());
        self
    }

    pub fn with_start(mut self, x: f64, y: f64) -> Self {
        self.start = Some(PitchPoint::new(x, y));
        self
    }

    pub fn with_end(mut self, x: f64, y: f64) -> Self {
        self.end = Some(PitchPoint::new(x, y));
        self
    }

    pub fn with_player(mut self, player_id: PlayerId) -> Self {
        self.player_id = Some(player_id);
        self
    }

    pub fn with_match(mut self, match_id: u64) -> Self {
        self.match_id = Some(match_id);
        self
    }

    pub fn with_tags(mut self, tags: impl IntoIterator<Item = u32>) -> Self {
        self.tags.extend(tags);
        self
    }

    #[inline]
    pub fn has_tag(&self, code: u32) -> bool {
        self.tags.contains(&code)
    }

    /// Event names in lookup order: `eventName` then `subEventName`.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.event_name.as_str()).chain(self.sub_event_name.as_deref())
    }

    /// Check the invariants a deserialized event is guaranteed to hold.
    pub fn validate(&self) -> Result<()> {
        if !self.event_second.is_finite() || self.event_second < 0.0 {
            return Err(AnalyticsError::InvalidEvent(format!(
                "eventSecond must be finite and >= 0, got {}",
                self.event_second
            )));
        }
        for (label, point) in [("start", self.start), ("end", self.end)] {
            if let Some(p) = point {
                if !PitchPoint::in_domain(p.x) || !PitchPoint::in_domain(p.y) {
                    return Err(AnalyticsError::InvalidEvent(format!(
                        "{label} coordinate ({}, {}) outside [0, {PITCH_DOMAIN_MAX}]",
                        p.x, p.y
                    )));
                }
            }
        }
        Ok(())
    }

    /// JSON schema of the wire record.
    pub fn json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(MatchEventRecord)
    }
}

/// Flat wire form of [`MatchEvent`].
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MatchEventRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_id: Option<u64>,
    #[serde(default)]
    pub event_type_code: i32,
    pub event_name: String,
    #[serde(default)]
    pub sub_event_name: Option<String>,
    pub match_period: MatchPeriod,
    pub event_second: f64,
    #[serde(default)]
    pub start_x: Option<f64>,
    #[serde(default)]
    pub start_y: Option<f64>,
    #[serde(default)]
    pub end_x: Option<f64>,
    #[serde(default)]
    pub end_y: Option<f64>,
    pub team_id: TeamId,
    #[serde(default)]
    pub player_id: Option<PlayerId>,
    #[serde(default)]
    pub tags: BTreeSet<u32>,
}

fn coordinate_pair(label: &str, x: Option<f64>, y: Option<f64>) -> Result<Option<PitchPoint>> {
    match (x, y) {
        (Some(x), Some(y)) => Ok(Some(PitchPoint::new(x, y))),
        (None, None) => Ok(None),
        _ => Err(AnalyticsError::InvalidEvent(format!(
            "{label}X/{label}Y must be present together or both null"
        ))),
    }
}

impl TryFrom<MatchEventRecord> for MatchEvent {
    type Error = AnalyticsError;

    fn try_from(record: MatchEventRecord) -> Result<Self> {
        let event = MatchEvent {
            match_id: record.match_id,
            event_type_code: record.event_type_code,
            event_name: record.event_name,
            sub_event_name: record.sub_event_name,
            period: record.match_period,
            event_second: record.event_second,
            start: coordinate_pair("start", record.start_x, record.start_y)?,
            end: coordinate_pair("end", record.end_x, record.end_y)?,
            team_id: record.team_id,
            player_id: record.player_id,
            tags: record.tags,
        };
        event.validate()?;
        Ok(event)
    }
}

impl From<MatchEvent> for MatchEventRecord {
    fn from(event: MatchEvent) -> Self {
        Self {
            match_id: event.match_id,
            event_type_code: event.event_type_code,
            event_name: event.event_name,
            sub_event_name: event.sub_event_name,
            match_period: event.period,
            event_second: event.event_second,
            start_x: event.start.map(|p| p.x),
            start_y: event.start.map(|p| p.y),
            end_x: event.end.map(|p| p.x),
            end_y: event.end.map(|p| p.y),
            team_id: event.team_id,
            player_id: event.player_id,
            tags: event.tags,
        }
    }
}

/// Parse a JSON array of event records.
pub fn parse_events_json(json: &str) -> Result<Vec<MatchEvent>> {
    Ok(serde_json::from_str(json)?)
}
