use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Integer counters for one aggregation bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PeriodStats {
    pub total_events: u32,
    /// Shots including goals
    pub shots: u32,
    pub shots_on_target: u32,
    pub shots_from_box: u32,
    pub shots_from_outside: u32,
    pub passes: u32,
    pub successful_passes: u32,
    pub crosses: u32,
    pub forward_passes: u32,
    pub backward_passes: u32,
    pub goals: u32,
    pub assists: u32,
    pub fouls: u32,
    pub fouls_suffered: u32,
    pub duels: u32,
    pub successful_duels: u32,
    pub aerial_duels: u32,
    pub ground_duels: u32,
    pub tackles: u32,
    pub dribbles: u32,
    pub successful_dribbles: u32,
    pub interceptions: u32,
    pub recoveries: u32,
}

impl PeriodStats {
    pub fn pass_accuracy(&self) -> Rate {
        Rate::ratio(self.successful_passes, self.passes)
    }

    pub fn duel_success(&self) -> Rate {
        Rate::ratio(self.successful_duels, self.duels)
    }

    pub fn dribble_success(&self) -> Rate {
        Rate::ratio(self.successful_dribbles, self.dribbles)
    }

    pub fn shot_accuracy(&self) -> Rate {
        Rate::ratio(self.shots_on_target, self.shots)
    }
}

/// Result of a division that may have no meaningful denominator.
///
/// Serialized as a number or the string `"unavailable"`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum Rate {
    Value(f64),
    Unavailable(Unavailable),
}

/// Marker serialized as `"unavailable"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Unavailable {
    Unavailable,
}

impl Rate {
    pub const UNAVAILABLE: Rate = Rate::Unavailable(Unavailable::Unavailable);

    /// `numerator / denominator`, or unavailable when the denominator is zero.
    pub fn ratio(numerator: u32, denominator: u32) -> Rate {
        if denominator == 0 {
            Rate::UNAVAILABLE
        } else {
            Rate::Value(numerator as f64 / denominator as f64)
        }
    }

    pub fn value(self) -> Option<f64> {
        match self {
            Rate::Value(v) => Some(v),
            Rate::Unavailable(_) => None,
        }
    }

    pub fn is_available(self) -> bool {
        matches!(self, Rate::Value(_))
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Rate::Value(v) => write!(f, "{v:.2}"),
            Rate::Unavailable(_) => f.write_str("unavailable"),
        }
    }
}

/// Aggregation bucket key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
pub enum PeriodBucket {
    #[serde(rename = "1H")]
    FirstHalf,
    #[serde(rename = "2H")]
    SecondHalf,
    #[serde(rename = "total")]
    Total,
}

impl PeriodBucket {
    pub const ALL: [PeriodBucket; 3] =
        [PeriodBucket::FirstHalf, PeriodBucket::SecondHalf, PeriodBucket::Total];

    pub const fn key(self) -> &'static str {
        match self {
            PeriodBucket::FirstHalf => "1H",
            PeriodBucket::SecondHalf => "2H",
            PeriodBucket::Total => "total",
        }
    }

    /// Minutes attributed to this bucket out of `minutes_played`.
    ///
    /// First half takes the floor of half, second half the ceiling.
    pub const fn minutes_for(self, minutes_played: u32) -> u32 {
        match self {
            PeriodBucket::FirstHalf => minutes_played / 2,
            PeriodBucket::SecondHalf => minutes_played.div_ceil(2),
            PeriodBucket::Total => minutes_played,
        }
    }
}

/// Stats keyed by `1H`, `2H` and `total`.
///
/// `total` covers every input event, including extra time and penalties,
/// so it is not necessarily the sum of the two halves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct PeriodBreakdown {
    #[serde(rename = "1H")]
    pub first_half: PeriodStats,
    #[serde(rename = "2H")]
    pub second_half: PeriodStats,
    pub total: PeriodStats,
}

impl PeriodBreakdown {
    pub fn get(&self, bucket: PeriodBucket) -> &PeriodStats {
        match bucket {
            PeriodBucket::FirstHalf => &self.first_half,
            PeriodBucket::SecondHalf => &self.second_half,
            PeriodBucket::Total => &self.total,
        }
    }

    /// Events per minute for one bucket.
    pub fn rate(&self, bucket: PeriodBucket, minutes_played: u32) -> Rate {
        Rate::ratio(self.get(bucket).total_events, bucket.minutes_for(minutes_played))
    }

    pub fn rates(&self, minutes_played: u32) -> PeriodRates {
        PeriodRates {
            first_half: self.rate(PeriodBucket::FirstHalf, minutes_played),
            second_half: self.rate(PeriodBucket::SecondHalf, minutes_played),
            total: self.rate(PeriodBucket::Total, minutes_played),
        }
    }

    pub fn json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(PeriodBreakdown)
    }
}

/// Events-per-minute per bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PeriodRates {
    #[serde(rename = "1H")]
    pub first_half: Rate,
    #[serde(rename = "2H")]
    pub second_half: Rate,
    pub total: Rate,
}
