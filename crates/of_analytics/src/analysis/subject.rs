//! Subject context supplied by the query layer.

use serde::{Deserialize, Serialize};

use crate::models::{MatchEvent, PlayerId, TeamId};

/// Which side of the timeline an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamSide {
    Home,
    Away,
    /// Team matches neither home nor away
    Neutral,
}

impl TeamSide {
    pub fn of(team_id: TeamId, home_team: TeamId, away_team: TeamId) -> TeamSide {
        if team_id == home_team {
            TeamSide::Home
        } else if team_id == away_team {
            TeamSide::Away
        } else {
            TeamSide::Neutral
        }
    }
}

/// Match identifier, optional player filter and home/away teams.
///
/// Inputs are assumed to be validated upstream; there is no "not found"
/// path here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectContext {
    pub match_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_id: Option<PlayerId>,
    pub home_team: TeamId,
    pub away_team: TeamId,
}

impl SubjectContext {
    pub fn new(match_id: u64, home_team: TeamId, away_team: TeamId) -> Self {
        Self { match_id, player_id: None, home_team, away_team }
    }

    pub fn for_player(mut self, player_id: PlayerId) -> Self {
        self.player_id = Some(player_id);
        self
    }

    /// Single-player view (uses the single-subject timeline layout).
    #[inline]
    pub fn is_single_subject(&self) -> bool {
        self.player_id.is_some()
    }

    /// Whether `event` belongs to this subject.
    ///
    /// Events without a match id are accepted; the player filter applies
    /// only when set.
    pub fn includes(&self, event: &MatchEvent) -> bool {
        let same_match = event.match_id.map_or(true, |id| id == self.match_id);
        let same_player = match self.player_id {
            Some(player) => event.player_id == Some(player),
            None => true,
        };
        same_match && same_player
    }

    pub fn select(&self, events: &[MatchEvent]) -> Vec<MatchEvent> {
        events.iter().filter(|e| self.includes(e)).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MatchPeriod;

    fn ctx() -> SubjectContext {
        SubjectContext::new(7, TeamId(1), TeamId(2))
    }

    #[test]
    fn test_team_side() {
        let ctx = ctx();
        let side = |team| TeamSide::of(team, ctx.home_team, ctx.away_team);
        assert_eq!(side(TeamId(1)), TeamSide::Home);
        assert_eq!(side(TeamId(2)), TeamSide::Away);
        assert_eq!(side(TeamId(3)), TeamSide::Neutral);
    }

    #[test]
    fn test_player_filter() {
        let ctx = ctx().for_player(PlayerId(10));
        let mine = MatchEvent::new("Pass", MatchPeriod::FirstHalf, 1.0, TeamId(1)).with_player(PlayerId(10));
        let other = MatchEvent::new("Pass", MatchPeriod::FirstHalf, 2.0, TeamId(1)).with_player(PlayerId(11));
        let anonymous = MatchEvent::new("Pass", MatchPeriod::FirstHalf, 3.0, TeamId(1));

        let selected = ctx.select(&[mine.clone(), other, anonymous]);
        assert_eq!(selected, vec![mine]);
        assert!(ctx.is_single_subject());
    }

    #[test]
    fn test_match_filter() {
        let ctx = ctx();
        let same = MatchEvent::new("Pass", MatchPeriod::FirstHalf, 1.0, TeamId(1)).with_match(7);
        let other = MatchEvent::new("Pass", MatchPeriod::FirstHalf, 1.0, TeamId(1)).with_match(8);
        let unknown = MatchEvent::new("Pass", MatchPeriod::FirstHalf, 1.0, TeamId(1));
        assert!(ctx.includes(&same));
        assert!(!ctx.includes(&other));
        assert!(ctx.includes(&unknown));
    }
}
