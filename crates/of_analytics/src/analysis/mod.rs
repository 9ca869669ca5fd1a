//! # Analysis Module
//!
//! Event classification and period statistics.
//!
//! - `classifier` - keyword/tag classification and derived facts
//! - `aggregator` - `1H` / `2H` / `total` stat buckets and rates
//! - `subject` - match/player/team context from the query layer

pub mod aggregator;
pub mod classifier;
pub mod subject;

pub use aggregator::{AggregateReport, PeriodAggregator};
pub use classifier::{
    is_backward, is_forward, is_from_box, ClassifiedEvent, DuelKind, EventClassifier, EventFacts,
};
pub use subject::{SubjectContext, TeamSide};
