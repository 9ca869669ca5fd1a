use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Event category assigned by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    Goal,
    Shot,
    Pass,
    Foul,
    Duel,
    Dribble,
    Tackle,
    Interception,
    Recovery,
    Assist,
    /// No keyword matched; counts toward `totalEvents` only
    Other,
}

impl EventCategory {
    /// Goals count as shots for aggregate purposes.
    #[inline]
    pub const fn is_shot(self) -> bool {
        matches!(self, EventCategory::Shot | EventCategory::Goal)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            EventCategory::Goal => "goal",
            EventCategory::Shot => "shot",
            EventCategory::Pass => "pass",
            EventCategory::Foul => "foul",
            EventCategory::Duel => "duel",
            EventCategory::Dribble => "dribble",
            EventCategory::Tackle => "tackle",
            EventCategory::Interception => "interception",
            EventCategory::Recovery => "recovery",
            EventCategory::Assist => "assist",
            EventCategory::Other => "other",
        }
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
