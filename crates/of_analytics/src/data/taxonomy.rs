//! Event Taxonomy - tag codes and keyword table
//!
//! The classifier never hardcodes tag codes or keywords. Both come from an
//! `EventTaxonomy`, loaded from YAML.
//!
//! ## Usage
//!
//! ```rust
//! use of_analytics::data::taxonomy::default_taxonomy;
//!
//! let taxonomy = default_taxonomy();
//! assert_eq!(taxonomy.tag_codes.success, 1801);
//! ```

use std::collections::HashSet;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{AnalyticsError, Result};
use crate::models::EventCategory;

// =============================================================================
// Embedded YAML Data
// =============================================================================

/// Default taxonomy YAML (embedded at compile time)
pub const EVENT_TAXONOMY_YAML: &str =
    include_str!("../../../../data/taxonomy/event_taxonomy.yaml");

static DEFAULT_TAXONOMY: OnceLock<EventTaxonomy> = OnceLock::new();

// =============================================================================
// Types
// =============================================================================

/// Integer codes from the external event-tagging feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagCodes {
    pub success: u32,
    pub on_target: u32,
    pub foul_suffered: u32,
    pub aerial: u32,
    pub cross: u32,
}

/// Keyword list for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryKeywords {
    pub category: EventCategory,
    pub keywords: Vec<String>,
    /// Phrases that veto a keyword hit for this category
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,
}

impl CategoryKeywords {
    /// `name` must already be lowercased.
    fn matches(&self, name: &str) -> bool {
        self.keywords.iter().any(|k| name.contains(k.as_str()))
            && !self.exclude.iter().any(|x| name.contains(x.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventTaxonomy {
    #[serde(default = "default_version")]
    pub version: u32,
    pub tag_codes: TagCodes,
    #[serde(default)]
    pub cross_keywords: Vec<String>,
    /// Categories in priority order; first match wins
    pub categories: Vec<CategoryKeywords>,
}

fn default_version() -> u32 {
    1
}

impl EventTaxonomy {
    /// Parse and validate a taxonomy. Keywords are lowercased on load.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let mut taxonomy: EventTaxonomy = serde_yaml::from_str(yaml)?;
        taxonomy.normalize();
        if let Err(err) = taxonomy.validate() {
            warn!(%err, "rejected event taxonomy");
            return Err(err);
        }
        debug!(
            version = taxonomy.version,
            categories = taxonomy.categories.len(),
            "loaded event taxonomy"
        );
        Ok(taxonomy)
    }

    fn normalize(&mut self) {
        let lower = |list: &mut Vec<String>| {
            for s in list.iter_mut() {
                *s = s.trim().to_lowercase();
            }
        };
        lower(&mut self.cross_keywords);
        for entry in &mut self.categories {
            lower(&mut entry.keywords);
            lower(&mut entry.exclude);
        }
    }

    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for entry in &self.categories {
            if entry.category == EventCategory::Other {
                return Err(AnalyticsError::Taxonomy(
                    "`other` is the fallback and cannot carry keywords".to_string(),
                ));
            }
            if !seen.insert(entry.category) {
                return Err(AnalyticsError::Taxonomy(format!(
                    "category `{}` listed more than once",
                    entry.category
                )));
            }
            if entry.keywords.is_empty() {
                return Err(AnalyticsError::Taxonomy(format!(
                    "category `{}` has no keywords",
                    entry.category
                )));
            }
            // An empty substring matches every name.
            if entry.keywords.iter().chain(&entry.exclude).any(String::is_empty) {
                return Err(AnalyticsError::Taxonomy(format!(
                    "category `{}` contains an empty keyword",
                    entry.category
                )));
            }
        }
        if self.cross_keywords.iter().any(String::is_empty) {
            return Err(AnalyticsError::Taxonomy("empty cross keyword".to_string()));
        }
        Ok(())
    }

    /// Category lookup over already-lowercased names, in priority order.
    pub fn match_category<'a>(&self, names: impl IntoIterator<Item = &'a str> + Clone) -> EventCategory {
        self.categories
            .iter()
            .find(|entry| names.clone().into_iter().any(|name| entry.matches(name)))
            .map(|entry| entry.category)
            .unwrap_or(EventCategory::Other)
    }

    /// Whether any lowercased name contains a cross keyword.
    pub fn is_cross_name<'a>(&self, mut names: impl Iterator<Item = &'a str>) -> bool {
        names.any(|name| self.cross_keywords.iter().any(|k| name.contains(k.as_str())))
    }

    pub fn priority(&self) -> impl Iterator<Item = EventCategory> + '_ {
        self.categories.iter().map(|entry| entry.category)
    }
}

// =============================================================================
// Public API
// =============================================================================

/// Embedded default taxonomy.
///
/// Parsed on first call, cached afterwards.
///
/// # Panics
///
/// Panics if the embedded YAML is invalid (compile-time data, so only a
/// broken build can trigger it).
pub fn default_taxonomy() -> &'static EventTaxonomy {
    DEFAULT_TAXONOMY.get_or_init(|| {
        EventTaxonomy::from_yaml_str(EVENT_TAXONOMY_YAML)
            .expect("Failed to parse event_taxonomy.yaml")
    })
}
