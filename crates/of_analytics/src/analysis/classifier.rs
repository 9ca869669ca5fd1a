//! # Event Classifier
//!
//! Assigns an [`EventCategory`] to each raw event and derives the boolean
//! facts every downstream consumer reads (success, on-target, aerial,
//! cross, direction, box origin).
//!
//! ## Algorithm
//! 1. Lowercase `eventName` / `subEventName`
//! 2. Walk the taxonomy categories in priority order, first keyword hit wins
//! 3. Derive tag facts from the taxonomy's tag codes
//! 4. Derive spatial facts from the start/end points when present
//!
//! Classification runs once per event ([`ClassifiedEvent`]); aggregation,
//! timeline and spatial code read the attached facts instead of
//! re-matching names.

use serde::Serialize;
use tracing::debug;

use crate::data::taxonomy::{default_taxonomy, EventTaxonomy};
use crate::models::{EventCategory, MatchEvent};

/// Penalty box x-range (attacking end) in normalized units.
pub const BOX_X_MIN: f64 = 50.0;
pub const BOX_X_MAX: f64 = 100.0;
/// Penalty box y-range in normalized units.
pub const BOX_Y_MIN: f64 = 20.0;
pub const BOX_Y_MAX: f64 = 80.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DuelKind {
    Aerial,
    Ground,
}

/// Facts derived from one event. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EventFacts {
    pub category: EventCategory,
    pub is_successful: bool,
    pub is_on_target: bool,
    /// Set for duels only
    pub duel_kind: Option<DuelKind>,
    /// Set for passes only
    pub is_cross: bool,
    pub is_forward: bool,
    pub is_backward: bool,
    pub is_from_box: bool,
    pub is_foul_suffered: bool,
}

impl EventFacts {
    #[inline]
    pub fn is_aerial(&self) -> bool {
        self.duel_kind == Some(DuelKind::Aerial)
    }

    /// Shot (or goal) with a known origin outside the box.
    pub fn is_from_outside(&self, event: &MatchEvent) -> bool {
        self.category.is_shot() && event.start.is_some() && !self.is_from_box
    }
}

/// An event with its category and facts attached.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ClassifiedEvent<'a> {
    pub event: &'a MatchEvent,
    #[serde(flatten)]
    pub facts: EventFacts,
}

impl ClassifiedEvent<'_> {
    #[inline]
    pub fn category(&self) -> EventCategory {
        self.facts.category
    }
}

/// `endX > startX`. Neither direction when a coordinate is missing.
pub fn is_forward(event: &MatchEvent) -> bool {
    matches!((event.start, event.end), (Some(s), Some(e)) if e.x > s.x)
}

/// `endX < startX`. Neither direction when a coordinate is missing.
pub fn is_backward(event: &MatchEvent) -> bool {
    matches!((event.start, event.end), (Some(s), Some(e)) if e.x < s.x)
}

/// Start point inside `[50,100] x [20,80]`.
pub fn is_from_box(event: &MatchEvent) -> bool {
    event.start.is_some_and(|p| {
        (BOX_X_MIN..=BOX_X_MAX).contains(&p.x) && (BOX_Y_MIN..=BOX_Y_MAX).contains(&p.y)
    })
}

/// Keyword/tag classifier backed by an [`EventTaxonomy`].
#[derive(Debug, Clone, Copy)]
pub struct EventClassifier<'t> {
    taxonomy: &'t EventTaxonomy,
}

impl Default for EventClassifier<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl EventClassifier<'static> {
    /// Classifier over the embedded default taxonomy.
    pub fn new() -> Self {
        Self { taxonomy: default_taxonomy() }
    }
}

impl<'t> EventClassifier<'t> {
    pub fn with_taxonomy(taxonomy: &'t EventTaxonomy) -> Self {
        Self { taxonomy }
    }

    pub fn taxonomy(&self) -> &'t EventTaxonomy {
        self.taxonomy
    }

    fn lowered_names(event: &MatchEvent) -> Vec<String> {
        event.names().map(str::to_lowercase).collect()
    }

    pub fn classify(&self, event: &MatchEvent) -> EventCategory {
        let names = Self::lowered_names(event);
        self.taxonomy.match_category(names.iter().map(String::as_str))
    }

    pub fn is_successful(&self, event: &MatchEvent) -> bool {
        event.has_tag(self.taxonomy.tag_codes.success)
    }

    pub fn is_on_target(&self, event: &MatchEvent) -> bool {
        event.has_tag(self.taxonomy.tag_codes.on_target) || self.is_successful(event)
    }

    /// Duels only; any other category is never aerial.
    pub fn is_aerial(&self, event: &MatchEvent) -> bool {
        self.classify(event) == EventCategory::Duel && event.has_tag(self.taxonomy.tag_codes.aerial)
    }

    /// Passes only: cross keyword in a name, or the cross tag.
    pub fn is_cross(&self, event: &MatchEvent) -> bool {
        self.classify(event) == EventCategory::Pass && self.cross_signal(event)
    }

    fn cross_signal(&self, event: &MatchEvent) -> bool {
        if event.has_tag(self.taxonomy.tag_codes.cross) {
            return true;
        }
        let names = Self::lowered_names(event);
        self.taxonomy.is_cross_name(names.iter().map(String::as_str))
    }

    /// Classify once and derive every fact.
    pub fn facts(&self, event: &MatchEvent) -> EventFacts {
        let category = self.classify(event);
        let tags = &self.taxonomy.tag_codes;

        let duel_kind = (category == EventCategory::Duel).then(|| {
            if event.has_tag(tags.aerial) {
                DuelKind::Aerial
            } else {
                DuelKind::Ground
            }
        });

        EventFacts {
            category,
            is_successful: self.is_successful(event),
            is_on_target: self.is_on_target(event),
            duel_kind,
            is_cross: category == EventCategory::Pass && self.cross_signal(event),
            is_forward: is_forward(event),
            is_backward: is_backward(event),
            is_from_box: is_from_box(event),
            is_foul_suffered: category == EventCategory::Foul && event.has_tag(tags.foul_suffered),
        }
    }

    pub fn attach<'a>(&self, event: &'a MatchEvent) -> ClassifiedEvent<'a> {
        ClassifiedEvent { event, facts: self.facts(event) }
    }

    pub fn classify_all<'a>(&self, events: &'a [MatchEvent]) -> Vec<ClassifiedEvent<'a>> {
        let classified: Vec<ClassifiedEvent<'a>> = events.iter().map(|e| self.attach(e)).collect();
        debug!(
            events = classified.len(),
            unmatched = classified.iter().filter(|c| c.category() == EventCategory::Other).count(),
            "classified events"
        );
        classified
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MatchPeriod, TeamId};

    fn event(name: &str) -> MatchEvent {
        MatchEvent::new(name, MatchPeriod::FirstHalf, 10.0, TeamId(1))
    }

    #[test]
    fn test_basic_categories() {
        let c = EventClassifier::new();
        assert_eq!(c.classify(&event("Shot")), EventCategory::Shot);
        assert_eq!(c.classify(&event("Pass")), EventCategory::Pass);
        assert_eq!(c.classify(&event("Foul")), EventCategory::Foul);
        assert_eq!(c.classify(&event("Duel")), EventCategory::Duel);
        assert_eq!(c.classify(&event("Sliding tackle")), EventCategory::Tackle);
        assert_eq!(c.classify(&event("Interception")), EventCategory::Interception);
        assert_eq!(c.classify(&event("Ball recovery")), EventCategory::Recovery);
        assert_eq!(c.classify(&event("Dribble")), EventCategory::Dribble);
        assert_eq!(c.classify(&event("Assist")), EventCategory::Assist);
        assert_eq!(c.classify(&event("Save attempt")), EventCategory::Other);
    }

    #[test]
    fn test_goal_wins_over_shot() {
        let c = EventClassifier::new();
        assert_eq!(c.classify(&event("Goal from shot")), EventCategory::Goal);
        assert_eq!(c.classify(&event("Shot").with_sub_event("Goal")), EventCategory::Goal);
    }

    #[test]
    fn test_case_insensitive_and_korean() {
        let c = EventClassifier::new();
        assert_eq!(c.classify(&event("SHOT")), EventCategory::Shot);
        assert_eq!(c.classify(&event("슈팅")), EventCategory::Shot);
        assert_eq!(c.classify(&event("골")), EventCategory::Goal);
        assert_eq!(c.classify(&event("전진 패스")), EventCategory::Pass);
        assert_eq!(c.classify(&event("공중 경합")), EventCategory::Duel);
    }

    #[test]
    fn test_sub_event_name_consulted() {
        let c = EventClassifier::new();
        let e = event("Others on the ball").with_sub_event("Simple pass");
        assert_eq!(c.classify(&e), EventCategory::Pass);
    }

    #[test]
    fn test_goal_kick_is_not_goal() {
        let c = EventClassifier::new();
        assert_eq!(c.classify(&event("Free Kick").with_sub_event("Goal kick")), EventCategory::Other);
        assert_eq!(c.classify(&event("Goalkeeper leaving line")), EventCategory::Other);
    }

    #[test]
    fn test_goal_area_words_are_not_goals() {
        let c = EventClassifier::new();
        assert_eq!(c.classify(&event("골문 앞 슈팅")), EventCategory::Shot);
        assert_eq!(c.classify(&event("골라인 클리어링")), EventCategory::Other);
        assert_eq!(c.classify(&event("Shot from goal area")), EventCategory::Shot);
        assert_eq!(c.classify(&event("Goal line clearance")), EventCategory::Other);
        assert_eq!(c.classify(&event("득점")), EventCategory::Goal);
    }

    #[test]
    fn test_classify_is_deterministic() {
        let c = EventClassifier::new();
        let e = event("Ground attacking duel").with_tags([1801]);
        let first = c.facts(&e);
        for _ in 0..10 {
            assert_eq!(c.facts(&e), first);
        }
    }

    #[test]
    fn test_success_and_on_target() {
        let c = EventClassifier::new();
        let plain = event("Shot");
        assert!(!c.is_successful(&plain));
        assert!(!c.is_on_target(&plain));

        let on_target = event("Shot").with_tags([101]);
        assert!(!c.is_successful(&on_target));
        assert!(c.is_on_target(&on_target));

        let successful = event("Shot").with_tags([1801]);
        assert!(c.is_successful(&successful));
        assert!(c.is_on_target(&successful));
    }

    #[test]
    fn test_aerial_only_for_duels() {
        let c = EventClassifier::new();
        let aerial = event("Air duel").with_tags([15]);
        let ground = event("Ground defending duel");
        let pass_with_tag = event("Pass").with_tags([15]);

        assert!(c.is_aerial(&aerial));
        assert_eq!(c.facts(&aerial).duel_kind, Some(DuelKind::Aerial));
        assert_eq!(c.facts(&ground).duel_kind, Some(DuelKind::Ground));
        assert!(!c.is_aerial(&pass_with_tag));
        assert_eq!(c.facts(&pass_with_tag).duel_kind, None);
    }

    #[test]
    fn test_cross_by_keyword_or_tag() {
        let c = EventClassifier::new();
        assert!(c.is_cross(&event("Pass").with_sub_event("Cross")));
        assert!(c.is_cross(&event("Pass").with_tags([2])));
        assert!(!c.is_cross(&event("Pass").with_sub_event("Simple pass")));
        // tag 2 on a non-pass is not a cross
        assert!(!c.is_cross(&event("Shot").with_tags([2])));
    }

    #[test]
    fn test_direction_requires_both_x() {
        let forward = event("Pass").with_start(30.0, 50.0).with_end(60.0, 50.0);
        let backward = event("Pass").with_start(60.0, 50.0).with_end(30.0, 50.0);
        let lateral = event("Pass").with_start(40.0, 10.0).with_end(40.0, 90.0);
        let no_end = event("Pass").with_start(40.0, 10.0);

        assert!(is_forward(&forward) && !is_backward(&forward));
        assert!(is_backward(&backward) && !is_forward(&backward));
        assert!(!is_forward(&lateral) && !is_backward(&lateral));
        assert!(!is_forward(&no_end) && !is_backward(&no_end));
    }

    #[test]
    fn test_box_boundaries_inclusive() {
        assert!(is_from_box(&event("Shot").with_start(50.0, 20.0)));
        assert!(is_from_box(&event("Shot").with_start(100.0, 80.0)));
        assert!(!is_from_box(&event("Shot").with_start(49.9, 50.0)));
        assert!(!is_from_box(&event("Shot").with_start(75.0, 80.1)));
        assert!(!is_from_box(&event("Shot")));
    }

    #[test]
    fn test_from_outside_excludes_missing_coordinates() {
        let c = EventClassifier::new();
        let outside = event("Shot").with_start(30.0, 50.0);
        let missing = event("Shot");
        let pass = event("Pass").with_start(30.0, 50.0);

        assert!(c.facts(&outside).is_from_outside(&outside));
        assert!(!c.facts(&missing).is_from_outside(&missing));
        assert!(!c.facts(&missing).is_from_box);
        assert!(!c.facts(&pass).is_from_outside(&pass));
    }

    #[test]
    fn test_foul_suffered() {
        let c = EventClassifier::new();
        assert!(c.facts(&event("Foul").with_tags([1701])).is_foul_suffered);
        assert!(!c.facts(&event("Foul")).is_foul_suffered);
        assert!(!c.facts(&event("Pass").with_tags([1701])).is_foul_suffered);
    }

    #[test]
    fn test_custom_taxonomy_codes() {
        let yaml = r#"
tag_codes: { success: 9, on_target: 8, foul_suffered: 7, aerial: 6, cross: 5 }
categories:
  - category: shot
    keywords: ["tiro"]
"#;
        let taxonomy = EventTaxonomy::from_yaml_str(yaml).unwrap();
        let c = EventClassifier::with_taxonomy(&taxonomy);
        let e = event("Tiro").with_tags([9]);
        assert_eq!(c.classify(&e), EventCategory::Shot);
        assert!(c.is_successful(&e));
        assert!(!c.is_successful(&event("Tiro").with_tags([1801])));
        assert_eq!(c.classify(&event("Shot")), EventCategory::Other);
    }
}
