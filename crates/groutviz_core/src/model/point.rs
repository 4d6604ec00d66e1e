//! Grout point domain model.
//!
//! # Responsibility
//! - Define the drill/grout hole record and its injection stages.
//! - Provide record-level consistency checks used by ingestion.
//!
//! # Invariants
//! - Records are immutable inputs; no method here mutates a point.
//! - `hole_type()` is always derived from `id`, never stored.
//! - `total_grout` should equal the stage sum; mismatches are reported by
//!   `issues()`, not corrected.

use crate::model::classify::{classify, Category, HoleType};
use crate::model::geometry::Vec2;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Absolute tolerance (gallons) for the total-vs-stage-sum check.
pub const GROUT_SUM_TOLERANCE: f64 = 1e-6;

static DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-(0[1-9]|1[0-2])-(0[1-9]|[12]\d|3[01])$").expect("valid date regex")
});

/// One grout injection event along a hole.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    /// Depth below the collar, in feet.
    pub depth: f64,
    /// Injected quantity, in US gallons.
    pub grout_amount: f64,
}

impl Stage {
    pub const fn new(depth: f64, grout_amount: f64) -> Self {
        Self {
            depth,
            grout_amount,
        }
    }
}

/// Drill/grout hole record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Unique identifier; its prefix determines the hole type.
    pub id: String,
    /// Plan-view position in model units.
    pub position: Vec2,
    /// Feet. `0` means no installation data yet.
    #[serde(default)]
    pub total_depth: f64,
    /// Gallons. Expected to equal the sum of stage amounts.
    #[serde(default)]
    pub total_grout: f64,
    /// Feet, usually negative. Meaningful only when `total_depth > 0`.
    #[serde(default)]
    pub elevation_at_bottom: f64,
    /// Installation date (`YYYY-MM-DD`). Empty input deserializes to `None`.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub date: Option<String>,
    pub category: Category,
    /// Ordered by increasing depth by convention.
    #[serde(default)]
    pub stages: Vec<Stage>,
}

impl Point {
    /// Creates a record with no installation data.
    pub fn new(id: impl Into<String>, position: Vec2, category: Category) -> Self {
        Self {
            id: id.into(),
            position,
            total_depth: 0.0,
            total_grout: 0.0,
            elevation_at_bottom: 0.0,
            date: None,
            category,
            stages: Vec::new(),
        }
    }

    /// Derived hole type; recomputed on every call.
    pub fn hole_type(&self) -> HoleType {
        classify(&self.id)
    }

    /// Sum of stage grout amounts (non-finite amounts count as 0).
    pub fn staged_grout(&self) -> f64 {
        self.stages
            .iter()
            .map(|stage| finite_or_zero(stage.grout_amount))
            .sum()
    }

    /// Whether this record carries installation data to draw in profile.
    pub fn has_installation(&self) -> bool {
        self.total_depth > 0.0
    }

    pub fn is_planned(&self) -> bool {
        self.category.is_planned()
    }

    /// Returns every consistency issue found on this record.
    ///
    /// Order is stable: structural errors first, then warnings in field order.
    pub fn issues(&self) -> Vec<PointIssue> {
        let mut issues = Vec::new();

        if self.id.trim().is_empty() {
            issues.push(PointIssue::EmptyId);
        }
        if !self.position.is_finite() {
            issues.push(PointIssue::NonFinitePosition);
        }
        if !self.total_depth.is_finite() || self.total_depth < 0.0 {
            issues.push(PointIssue::InvalidTotalDepth(self.total_depth));
        }
        if !self.total_grout.is_finite() || self.total_grout < 0.0 {
            issues.push(PointIssue::InvalidTotalGrout(self.total_grout));
        }

        if let Some(date) = self.date.as_deref() {
            if !DATE_RE.is_match(date) {
                issues.push(PointIssue::MalformedDate(date.to_string()));
            }
        }

        for (index, stage) in self.stages.iter().enumerate() {
            if !stage.grout_amount.is_finite() || stage.grout_amount < 0.0 {
                issues.push(PointIssue::InvalidStageGrout {
                    index,
                    amount: stage.grout_amount,
                });
            }
        }
        if let Some(index) = self
            .stages
            .windows(2)
            .position(|pair| pair[1].depth < pair[0].depth)
        {
            issues.push(PointIssue::StagesOutOfOrder { index: index + 1 });
        }

        if self.stages.is_empty() {
            if self.has_installation() && self.total_grout > 0.0 {
                issues.push(PointIssue::MissingStages);
            }
        } else {
            let staged = self.staged_grout();
            if (staged - self.total_grout).abs() > GROUT_SUM_TOLERANCE {
                issues.push(PointIssue::GroutMismatch {
                    declared: self.total_grout,
                    staged,
                });
            }
        }

        issues
    }

    /// Validates structural invariants only.
    ///
    /// Warnings (see `Severity::Warning`) do not fail validation.
    pub fn validate(&self) -> Result<(), PointIssue> {
        match self
            .issues()
            .into_iter()
            .find(|issue| issue.severity() == Severity::Error)
        {
            Some(issue) => Err(issue),
            None => Ok(()),
        }
    }
}

/// How an ingestion pass should treat an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Record is kept and the issue reported.
    Warning,
    /// Record is dropped.
    Error,
}

/// Record-level consistency issue.
#[derive(Debug, Clone, PartialEq)]
pub enum PointIssue {
    EmptyId,
    DuplicateId(String),
    NonFinitePosition,
    InvalidTotalDepth(f64),
    InvalidTotalGrout(f64),
    MalformedDate(String),
    InvalidStageGrout { index: usize, amount: f64 },
    StagesOutOfOrder { index: usize },
    MissingStages,
    GroutMismatch { declared: f64, staged: f64 },
}

impl PointIssue {
    pub fn severity(&self) -> Severity {
        match self {
            Self::EmptyId
            | Self::DuplicateId(_)
            | Self::NonFinitePosition
            | Self::InvalidTotalDepth(_)
            | Self::InvalidTotalGrout(_) => Severity::Error,
            Self::MalformedDate(_)
            | Self::InvalidStageGrout { .. }
            | Self::StagesOutOfOrder { .. }
            | Self::MissingStages
            | Self::GroutMismatch { .. } => Severity::Warning,
        }
    }

    /// Stable machine-readable code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyId => "empty_id",
            Self::DuplicateId(_) => "duplicate_id",
            Self::NonFinitePosition => "non_finite_position",
            Self::InvalidTotalDepth(_) => "invalid_total_depth",
            Self::InvalidTotalGrout(_) => "invalid_total_grout",
            Self::MalformedDate(_) => "malformed_date",
            Self::InvalidStageGrout { .. } => "invalid_stage_grout",
            Self::StagesOutOfOrder { .. } => "stages_out_of_order",
            Self::MissingStages => "missing_stages",
            Self::GroutMismatch { .. } => "grout_mismatch",
        }
    }
}

impl Display for PointIssue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "point id must not be empty"),
            Self::DuplicateId(id) => write!(f, "point id is duplicated: {id}"),
            Self::NonFinitePosition => write!(f, "point position must be finite"),
            Self::InvalidTotalDepth(value) => {
                write!(f, "total_depth must be finite and >= 0, got {value}")
            }
            Self::InvalidTotalGrout(value) => {
                write!(f, "total_grout must be finite and >= 0, got {value}")
            }
            Self::MalformedDate(value) => {
                write!(f, "date is malformed: `{value}` (expected YYYY-MM-DD)")
            }
            Self::InvalidStageGrout { index, amount } => write!(
                f,
                "stage {index} grout_amount must be finite and >= 0, got {amount}"
            ),
            Self::StagesOutOfOrder { index } => {
                write!(f, "stage {index} is shallower than the stage before it")
            }
            Self::MissingStages => write!(f, "installed point with grout has no stages"),
            Self::GroutMismatch { declared, staged } => write!(
                f,
                "total_grout ({declared}) does not match stage sum ({staged})"
            ),
        }
    }
}

impl Error for PointIssue {}

pub(crate) fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }))
}
