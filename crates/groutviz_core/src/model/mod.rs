//! Grout record domain model.
//!
//! # Responsibility
//! - Define canonical point/stage records consumed by every engine.
//! - Own the closed label sets (hole types, installation categories) and
//!   their total classification/color functions.
//!
//! # Invariants
//! - Records are read-only reference data inside core.
//! - Derived classification is a pure function of the record id.

pub mod classify;
pub mod geometry;
pub mod point;
pub mod sample;
