//! # Period Aggregator
//!
//! Counts classified facts into `1H`, `2H` and `total` buckets.
//!
//! Half buckets filter on `matchPeriod`. The `total` bucket takes every
//! input event, so ET1/ET2/P events show up in `total` but in neither half.

use tracing::debug;

use super::classifier::{ClassifiedEvent, EventClassifier};
use crate::models::{EventCategory, MatchEvent, MatchPeriod, PeriodBreakdown, PeriodRates, PeriodStats};

/// Aggregation output, with rates when minutes played is known.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct AggregateReport {
    pub stats: PeriodBreakdown,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rates: Option<PeriodRates>,
}

impl PeriodStats {
    /// Add one classified event to the counters.
    pub fn record(&mut self, item: &ClassifiedEvent<'_>) {
        let facts = &item.facts;
        self.total_events += 1;

        if facts.category.is_shot() {
            self.shots += 1;
            if facts.is_on_target {
                self.shots_on_target += 1;
            }
            if facts.is_from_box {
                self.shots_from_box += 1;
            } else if facts.is_from_outside(item.event) {
                self.shots_from_outside += 1;
            }
        }

        match facts.category {
            EventCategory::Goal => self.goals += 1,
            EventCategory::Assist => self.assists += 1,
            EventCategory::Pass => {
                self.passes += 1;
                if facts.is_successful {
                    self.successful_passes += 1;
                }
                if facts.is_cross {
                    self.crosses += 1;
                }
                if facts.is_forward {
                    self.forward_passes += 1;
                } else if facts.is_backward {
                    self.backward_passes += 1;
                }
            }
            EventCategory::Foul => {
                self.fouls += 1;
                if facts.is_foul_suffered {
                    self.fouls_suffered += 1;
                }
            }
            EventCategory::Duel => {
                self.duels += 1;
                if facts.is_successful {
                    self.successful_duels += 1;
                }
                if facts.is_aerial() {
                    self.aerial_duels += 1;
                } else {
                    self.ground_duels += 1;
                }
            }
            EventCategory::Tackle => self.tackles += 1,
            EventCategory::Dribble => {
                self.dribbles += 1;
                if facts.is_successful {
                    self.successful_dribbles += 1;
                }
            }
            EventCategory::Interception => self.interceptions += 1,
            EventCategory::Recovery => self.recoveries += 1,
            EventCategory::Shot | EventCategory::Other => {}
        }
    }

    pub fn from_classified<'r, 'a: 'r, I>(items: I) -> Self
    where
        I: IntoIterator<Item = &'r ClassifiedEvent<'a>>,
    {
        let mut stats = PeriodStats::default();
        for item in items {
            stats.record(item);
        }
        stats
    }
}

/// Builds [`PeriodBreakdown`]s from raw events.
#[derive(Debug, Clone, Copy)]
pub struct PeriodAggregator<'t> {
    classifier: EventClassifier<'t>,
}

impl Default for PeriodAggregator<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl PeriodAggregator<'static> {
    pub fn new() -> Self {
        Self { classifier: EventClassifier::new() }
    }
}

impl<'t> PeriodAggregator<'t> {
    pub fn with_classifier(classifier: EventClassifier<'t>) -> Self {
        Self { classifier }
    }

    pub fn aggregate(&self, events: &[MatchEvent]) -> PeriodBreakdown {
        let classified = self.classifier.classify_all(events);
        Self::aggregate_classified(&classified)
    }

    /// Aggregate events that were already classified.
    pub fn aggregate_classified(classified: &[ClassifiedEvent<'_>]) -> PeriodBreakdown {
        let in_period = |period: MatchPeriod| {
            PeriodStats::from_classified(classified.iter().filter(move |c| c.event.period == period))
        };

        let breakdown = PeriodBreakdown {
            first_half: in_period(MatchPeriod::FirstHalf),
            second_half: in_period(MatchPeriod::SecondHalf),
            total: PeriodStats::from_classified(classified.iter()),
        };

        debug!(
            first_half = breakdown.first_half.total_events,
            second_half = breakdown.second_half.total_events,
            total = breakdown.total.total_events,
            "aggregated period stats"
        );
        breakdown
    }

    /// `aggregate` plus events-per-minute rates when `minutes_played` is given.
    pub fn aggregate_with_rates(&self, events: &[MatchEvent], minutes_played: Option<u32>) -> AggregateReport {
        let stats = self.aggregate(events);
        AggregateReport { stats, rates: minutes_played.map(|m| stats.rates(m)) }
    }
}
