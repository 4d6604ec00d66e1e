//! Render-ready geometry for the plan and profile views.
//!
//! The presentation layer draws exactly what these functions return; it never
//! re-derives colors, sizes or label text.

pub mod plan;
pub mod profile;
