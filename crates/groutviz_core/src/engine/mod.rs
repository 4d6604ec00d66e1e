//! Pure geometry/data engines behind the plan and profile views.
//!
//! # Responsibility
//! - Filter points by hole-type/category selection.
//! - Aggregate summary statistics over the visible set.
//! - Maintain the plan-view pan/zoom transform.
//! - Size grout bulbs for the profile view.
//!
//! # Invariants
//! - Every operation is total: out-of-range input clamps or falls back.
//! - Nothing here caches derived results between calls.

pub mod bulb;
pub mod filter;
pub mod stats;
pub mod viewport;
