//! Flutter-facing bridge over `groutviz_core`.

pub mod api;
