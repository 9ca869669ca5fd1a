//! Match clock: period offsets and minute labels

use crate::models::{MatchEvent, MatchPeriod};

/// Length of a regulation half in seconds.
pub const HALF_SECONDS: f64 = 2700.0;
/// End of regulation time in seconds.
pub const REGULATION_SECONDS: f64 = 5400.0;

/// Absolute offset of each period on the match clock (seconds).
pub const fn period_offset(period: MatchPeriod) -> f64 {
    match period {
        MatchPeriod::FirstHalf => 0.0,
        MatchPeriod::SecondHalf => 2700.0,
        MatchPeriod::ExtraTimeFirst => 5400.0,
        MatchPeriod::ExtraTimeSecond => 6300.0,
        MatchPeriod::Penalties => 7200.0,
    }
}

/// Converts (period, in-period second) into one absolute match-clock second.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimelineMapper;

impl TimelineMapper {
    #[inline]
    pub fn absolute_second(event: &MatchEvent) -> f64 {
        Self::absolute(event.period, event.event_second)
    }

    #[inline]
    pub fn absolute(period: MatchPeriod, event_second: f64) -> f64 {
        period_offset(period) + event_second
    }

    /// Minute label such as `45'`.
    ///
    /// Hard cutoffs at 2700 s and 5400 s; no stoppage-time notation.
    /// Past a cutoff the elapsed minutes round up, so 2701 s reads `46'`
    /// while 5400 s still reads `90'`.
    pub fn format_clock(seconds: f64) -> String {
        let minute = if seconds <= HALF_SECONDS {
            (seconds / 60.0).floor()
        } else if seconds <= REGULATION_SECONDS {
            45.0 + ((seconds - HALF_SECONDS) / 60.0).ceil()
        } else {
            90.0 + ((seconds - REGULATION_SECONDS) / 60.0).ceil()
        };
        format!("{}'", minute as i64)
    }
}
