//! # Timeline Module
//!
//! - `clock` - period offsets, absolute match second, minute labels
//! - `layout` - clustering and lane offsets for 1-D timelines

pub mod clock;
pub mod layout;

pub use clock::{period_offset, TimelineMapper, HALF_SECONDS, REGULATION_SECONDS};
pub use layout::{LayoutMode, TimelineEntry, TimelineLayoutEngine};
