//! Embedded reference data

pub mod taxonomy;

pub use taxonomy::{default_taxonomy, CategoryKeywords, EventTaxonomy, TagCodes};
