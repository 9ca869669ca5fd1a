pub mod category;
pub mod events;
pub mod period_stats;

pub use category::EventCategory;
pub use events::{
    parse_events_json, MatchEvent, MatchEventRecord, MatchPeriod, PitchPoint, PlayerId, TeamId,
    PITCH_DOMAIN_MAX,
};
pub use period_stats::{PeriodBreakdown, PeriodBucket, PeriodRates, PeriodStats, Rate};
