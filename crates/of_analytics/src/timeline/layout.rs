//! # Timeline Layout Engine
//!
//! Clusters near-simultaneous events and assigns lane offsets so markers
//! on a single time axis do not collide.
//!
//! ## Algorithm
//! 1. Sort by absolute second (stable, ties keep input order)
//! 2. Greedy single pass: join the first open cluster whose anchor is less
//!    than `threshold` seconds behind, else open a new cluster anchored here
//! 3. Symmetric: member `j` of `N` gets `(j - (N-1)/2) * spacing`
//! 4. Sided: home above the axis, away below; clusters are per side and
//!    stacked outward, `sign * (j + 1) * spacing`. Events of any other
//!    team are labelled neutral and share the lower half with away
//!
//! Clusters whose anchor falls `threshold` behind the current event can
//! never be joined again and are closed, so the scan is O(n·k) with k the
//! number of open clusters.

use serde::Serialize;
use tracing::{debug, trace};

use super::clock::TimelineMapper;
use crate::analysis::subject::{SubjectContext, TeamSide};
use crate::config::TimelineConfig;
use crate::error::{ensure_non_negative, ensure_positive, Result};
use crate::models::{MatchEvent, TeamId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    /// Single-subject timeline, clusters centred on the axis
    Symmetric,
    /// Whole-match timeline, home above / away and neutral below
    Sided { home_team: TeamId, away_team: TeamId },
}

/// One positioned timeline marker.
#[derive(Debug, Clone, Serialize)]
pub struct TimelineEntry<'a> {
    pub event: &'a MatchEvent,
    /// Index of `event` in the input slice
    pub event_index: usize,
    pub absolute_second: f64,
    pub clock: String,
    pub cluster_id: usize,
    pub lane_offset: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side: Option<TeamSide>,
}

#[derive(Debug)]
struct Cluster {
    id: usize,
    anchor: f64,
    /// Sided layout: true for home. Always true in symmetric layout.
    upper: bool,
    /// Positions into the sorted order
    members: Vec<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimelineLayoutEngine {
    threshold_s: f64,
    lane_spacing: f64,
    mode: LayoutMode,
}

impl TimelineLayoutEngine {
    /// Symmetric layout with the given cluster threshold and lane spacing.
    pub fn new(threshold_s: f64, lane_spacing: f64) -> Result<Self> {
        Ok(Self {
            threshold_s: ensure_non_negative("threshold_s", threshold_s)?,
            lane_spacing: ensure_positive("lane_spacing", lane_spacing)?,
            mode: LayoutMode::Symmetric,
        })
    }

    pub fn sided(mut self, home_team: TeamId, away_team: TeamId) -> Self {
        self.mode = LayoutMode::Sided { home_team, away_team };
        self
    }

    /// Whole-match or single-subject engine depending on the context.
    pub fn for_subject(config: &TimelineConfig, ctx: &SubjectContext) -> Result<Self> {
        if ctx.is_single_subject() {
            Self::new(config.subject_threshold_s, config.lane_spacing)
        } else {
            Ok(Self::new(config.match_threshold_s, config.lane_spacing)?.sided(ctx.home_team, ctx.away_team))
        }
    }

    pub fn threshold_s(&self) -> f64 {
        self.threshold_s
    }

    pub fn lane_spacing(&self) -> f64 {
        self.lane_spacing
    }

    pub fn mode(&self) -> LayoutMode {
        self.mode
    }

    fn side(&self, event: &MatchEvent) -> Option<TeamSide> {
        match self.mode {
            LayoutMode::Symmetric => None,
            LayoutMode::Sided { home_team, away_team } => {
                Some(TeamSide::of(event.team_id, home_team, away_team))
            }
        }
    }

    fn lane_offset(&self, upper: bool, j: usize, n: usize) -> f64 {
        match self.mode {
            LayoutMode::Symmetric => (j as f64 - (n as f64 - 1.0) / 2.0) * self.lane_spacing,
            LayoutMode::Sided { .. } => {
                let sign = if upper { 1.0 } else { -1.0 };
                sign * (j as f64 + 1.0) * self.lane_spacing
            }
        }
    }

    /// Lay out `events` (any order). Output is sorted by absolute second.
    pub fn layout<'a>(&self, events: &'a [MatchEvent]) -> Vec<TimelineEntry<'a>> {
        let mut order: Vec<(usize, f64)> = events
            .iter()
            .enumerate()
            .map(|(i, e)| (i, TimelineMapper::absolute_second(e)))
            .collect();
        order.sort_by(|a, b| a.1.total_cmp(&b.1));

        let mut open: Vec<Cluster> = Vec::new();
        let mut closed: Vec<Cluster> = Vec::new();
        // (cluster id, position within cluster) per sorted position
        let mut slot: Vec<(usize, usize)> = Vec::with_capacity(order.len());

        for (pos, &(idx, t)) in order.iter().enumerate() {
            let upper = self.side(&events[idx]).map_or(true, |side| side == TeamSide::Home);

            let mut k = 0;
            while k < open.len() {
                if t - open[k].anchor >= self.threshold_s {
                    closed.push(open.remove(k));
                } else {
                    k += 1;
                }
            }

            match open.iter_mut().find(|c| c.upper == upper) {
                Some(cluster) => {
                    slot.push((cluster.id, cluster.members.len()));
                    cluster.members.push(pos);
                }
                None => {
                    let id = open.len() + closed.len();
                    slot.push((id, 0));
                    open.push(Cluster { id, anchor: t, upper, members: vec![pos] });
                }
            }
        }
        closed.append(&mut open);
        closed.sort_by_key(|c| c.id);

        for cluster in &closed {
            trace!(
                cluster_id = cluster.id,
                anchor = cluster.anchor,
                size = cluster.members.len(),
                "timeline cluster"
            );
        }
        debug!(events = events.len(), clusters = closed.len(), "timeline layout");

        order
            .iter()
            .zip(slot)
            .map(|(&(idx, t), (cluster_id, j))| {
                let cluster = &closed[cluster_id];
                let event = &events[idx];
                TimelineEntry {
                    event,
                    event_index: idx,
                    absolute_second: t,
                    clock: TimelineMapper::format_clock(t),
                    cluster_id,
                    lane_offset: self.lane_offset(cluster.upper, j, cluster.members.len()),
                    side: self.side(event),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MatchPeriod;

    const HOME: TeamId = TeamId(1);
    const AWAY: TeamId = TeamId(2);

    fn at(second: f64) -> MatchEvent {
        MatchEvent::new("Pass", MatchPeriod::FirstHalf, second, HOME)
    }

    fn engine(threshold: f64) -> TimelineLayoutEngine {
        TimelineLayoutEngine::new(threshold, 10.0).unwrap()
    }

    fn cluster_count(entries: &[TimelineEntry<'_>]) -> usize {
        entries.iter().map(|e| e.cluster_id).max().map_or(0, |m| m + 1)
    }

    #[test]
    fn test_close_events_share_cluster() {
        let events = vec![at(100.0), at(150.0)];
        let entries = engine(60.0).layout(&events);
        assert_eq!(cluster_count(&entries), 1);
    }

    #[test]
    fn test_distant_events_split() {
        let events = vec![at(100.0), at(200.0)];
        let entries = engine(60.0).layout(&events);
        assert_eq!(cluster_count(&entries), 2);
        assert!(entries.iter().all(|e| e.lane_offset == 0.0));
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let events = vec![at(100.0), at(160.0)];
        assert_eq!(cluster_count(&engine(60.0).layout(&events)), 2);
    }

    #[test]
    fn test_three_member_offsets() {
        let events = vec![at(10.0), at(20.0), at(30.0)];
        let entries = engine(60.0).layout(&events);
        let offsets: Vec<f64> = entries.iter().map(|e| e.lane_offset).collect();
        assert_eq!(offsets, vec![-10.0, 0.0, 10.0]);
    }

    #[test]
    fn test_two_member_offsets_centred() {
        let events = vec![at(10.0), at(20.0)];
        let offsets: Vec<f64> = engine(60.0).layout(&events).iter().map(|e| e.lane_offset).collect();
        assert_eq!(offsets, vec![-5.0, 5.0]);
    }

    #[test]
    fn test_anchor_is_first_member() {
        // 50 joins 0, 100 is measured against the anchor (0), not against 50
        let events = vec![at(0.0), at(50.0), at(100.0)];
        let entries = engine(60.0).layout(&events);
        let ids: Vec<usize> = entries.iter().map(|e| e.cluster_id).collect();
        assert_eq!(ids, vec![0, 0, 1]);
    }

    #[test]
    fn test_unsorted_input_is_sorted() {
        let events = vec![at(200.0), at(100.0), at(150.0)];
        let entries = engine(60.0).layout(&events);
        let seconds: Vec<f64> = entries.iter().map(|e| e.absolute_second).collect();
        assert_eq!(seconds, vec![100.0, 150.0, 200.0]);
        let indices: Vec<usize> = entries.iter().map(|e| e.event_index).collect();
        assert_eq!(indices, vec![1, 2, 0]);
        assert_eq!(entries[0].cluster_id, entries[1].cluster_id);
        assert_ne!(entries[1].cluster_id, entries[2].cluster_id);
    }

    #[test]
    fn test_layout_independent_of_arrival_order() {
        let forward = vec![at(10.0), at(40.0), at(95.0), at(130.0)];
        let mut reversed = forward.clone();
        reversed.reverse();

        let a: Vec<(f64, usize, f64)> = engine(60.0)
            .layout(&forward)
            .iter()
            .map(|e| (e.absolute_second, e.cluster_id, e.lane_offset))
            .collect();
        let b: Vec<(f64, usize, f64)> = engine(60.0)
            .layout(&reversed)
            .iter()
            .map(|e| (e.absolute_second, e.cluster_id, e.lane_offset))
            .collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_periods_resolve_to_absolute_time() {
        let events = vec![
            MatchEvent::new("Shot", MatchPeriod::SecondHalf, 10.0, HOME),
            MatchEvent::new("Shot", MatchPeriod::FirstHalf, 2690.0, HOME),
        ];
        let entries = engine(60.0).layout(&events);
        assert_eq!(entries[0].absolute_second, 2690.0);
        assert_eq!(entries[1].absolute_second, 2710.0);
        assert_eq!(entries[0].cluster_id, entries[1].cluster_id);
        assert_eq!(entries[1].clock, "46'");
    }

    #[test]
    fn test_sided_layout() {
        let events = vec![
            MatchEvent::new("Pass", MatchPeriod::FirstHalf, 10.0, HOME),
            MatchEvent::new("Pass", MatchPeriod::FirstHalf, 12.0, AWAY),
            MatchEvent::new("Pass", MatchPeriod::FirstHalf, 14.0, HOME),
        ];
        let entries = engine(60.0).sided(HOME, AWAY).layout(&events);

        assert_eq!(entries[0].lane_offset, 10.0);
        assert_eq!(entries[1].lane_offset, -10.0);
        assert_eq!(entries[2].lane_offset, 20.0);
        assert_eq!(entries[0].cluster_id, entries[2].cluster_id);
        assert_ne!(entries[0].cluster_id, entries[1].cluster_id);
        assert_eq!(entries[0].side, Some(TeamSide::Home));
        assert_eq!(entries[1].side, Some(TeamSide::Away));
    }

    #[test]
    fn test_third_team_is_neutral_below_axis() {
        let third = TeamId(3);
        let events = vec![
            MatchEvent::new("Pass", MatchPeriod::FirstHalf, 10.0, third),
            MatchEvent::new("Pass", MatchPeriod::FirstHalf, 12.0, AWAY),
            MatchEvent::new("Pass", MatchPeriod::FirstHalf, 14.0, HOME),
        ];
        let entries = engine(60.0).sided(HOME, AWAY).layout(&events);

        assert_eq!(entries[0].side, Some(TeamSide::Neutral));
        assert_eq!(entries[0].lane_offset, -10.0);
        // shares the lower cluster with away, so no overlap
        assert_eq!(entries[1].side, Some(TeamSide::Away));
        assert_eq!(entries[1].cluster_id, entries[0].cluster_id);
        assert_eq!(entries[1].lane_offset, -20.0);
        assert_eq!(entries[2].side, Some(TeamSide::Home));
        assert_eq!(entries[2].lane_offset, 10.0);
    }

    #[test]
    fn test_for_subject_picks_thresholds() {
        let config = TimelineConfig::default();
        let ctx = SubjectContext::new(1, HOME, AWAY);
        let whole = TimelineLayoutEngine::for_subject(&config, &ctx).unwrap();
        assert_eq!(whole.threshold_s(), 60.0);
        assert_eq!(whole.mode(), LayoutMode::Sided { home_team: HOME, away_team: AWAY });

        let single = TimelineLayoutEngine::for_subject(&config, &ctx.for_player(crate::models::PlayerId(9))).unwrap();
        assert_eq!(single.threshold_s(), 30.0);
        assert_eq!(single.mode(), LayoutMode::Symmetric);
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(TimelineLayoutEngine::new(-1.0, 10.0).is_err());
        assert!(TimelineLayoutEngine::new(60.0, 0.0).is_err());
        assert!(TimelineLayoutEngine::new(f64::NAN, 10.0).is_err());
    }

    #[test]
    fn test_empty_input() {
        assert!(engine(60.0).layout(&[]).is_empty());
    }

    #[cfg(all(test, feature = "proptest"))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: symmetric offsets of each cluster sum to zero
            #[test]
            fn prop_symmetric_clusters_centred(
                seconds in proptest::collection::vec(0.0f64..5400.0, 0..80),
                threshold in 0.0f64..120.0
            ) {
                let events: Vec<MatchEvent> = seconds.iter().map(|&s| at(s)).collect();
                let entries = TimelineLayoutEngine::new(threshold, 10.0).unwrap().layout(&events);
                let clusters = cluster_count(&entries);
                for id in 0..clusters {
                    let sum: f64 = entries.iter().filter(|e| e.cluster_id == id).map(|e| e.lane_offset).sum();
                    prop_assert!(sum.abs() < 1e-6);
                }
            }

            /// Property: output is sorted and members of a cluster lie within threshold of the first
            #[test]
            fn prop_clusters_within_threshold(
                seconds in proptest::collection::vec(0.0f64..5400.0, 1..80),
                threshold in 1.0f64..120.0
            ) {
                let events: Vec<MatchEvent> = seconds.iter().map(|&s| at(s)).collect();
                let entries = TimelineLayoutEngine::new(threshold, 10.0).unwrap().layout(&events);
                for pair in entries.windows(2) {
                    prop_assert!(pair[0].absolute_second <= pair[1].absolute_second);
                }
                for id in 0..cluster_count(&entries) {
                    let times: Vec<f64> = entries.iter().filter(|e| e.cluster_id == id).map(|e| e.absolute_second).collect();
                    prop_assert!(times[times.len() - 1] - times[0] < threshold);
                }
            }

            /// Property: sided layout never puts home below or away above the axis
            #[test]
            fn prop_sided_signs(
                items in proptest::collection::vec((0.0f64..2700.0, any::<bool>()), 0..60)
            ) {
                let events: Vec<MatchEvent> = items
                    .iter()
                    .map(|&(s, home)| MatchEvent::new("Pass", MatchPeriod::FirstHalf, s, if home { HOME } else { AWAY }))
                    .collect();
                let entries = engine(60.0).sided(HOME, AWAY).layout(&events);
                for entry in &entries {
                    if entry.event.team_id == HOME {
                        prop_assert!(entry.lane_offset > 0.0);
                    } else {
                        prop_assert!(entry.lane_offset < 0.0);
                    }
                }
            }
        }
    }
}
