//! Record source layer.
//!
//! # Responsibility
//! - Define read-only repository contracts for grout point records.
//! - Host source implementations (static sample set, SQLite survey file).

pub mod point_repo;
