//! Closed label sets and their derived classification/colors.
//!
//! # Responsibility
//! - Derive `HoleType` from a point identifier prefix.
//! - Map hole types and installation categories to display colors.
//!
//! # Invariants
//! - Every function here is total: unknown input degrades to a documented
//!   fallback variant/color, never an error.
//! - `HoleType` is never stored on a record; it is recomputed from `id`.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Fallback color for labels outside the category set.
pub const CATEGORY_FALLBACK_COLOR: Color = Color("#757575");
/// Fallback color for `HoleType::Unknown`.
pub const TYPE_FALLBACK_COLOR: Color = Color("#888888");

/// Hex RGB color string (`#rrggbb`) handed to the presentation layer as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Color(&'static str);

impl Color {
    pub const fn from_static(hex: &'static str) -> Self {
        Self(hex)
    }

    pub fn as_hex(&self) -> &'static str {
        self.0
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

/// Drilling purpose of a hole, derived from its id prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HoleType {
    Primary,
    Secondary,
    #[serde(rename = "Primary Shoring")]
    PrimaryShoring,
    #[serde(rename = "Secondary Shoring")]
    SecondaryShoring,
    Supplementary,
    /// Prefix did not match any known hole type.
    Unknown,
}

impl HoleType {
    /// Known hole types in filter-list display order.
    pub const ALL: [HoleType; 5] = [
        HoleType::Primary,
        HoleType::Secondary,
        HoleType::PrimaryShoring,
        HoleType::SecondaryShoring,
        HoleType::Supplementary,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Primary => "Primary",
            Self::Secondary => "Secondary",
            Self::PrimaryShoring => "Primary Shoring",
            Self::SecondaryShoring => "Secondary Shoring",
            Self::Supplementary => "Supplementary",
            Self::Unknown => "Unknown",
        }
    }

    /// Parses a display label; anything unrecognized maps to `Unknown`.
    pub fn from_label(label: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|kind| kind.label() == label.trim())
            .unwrap_or(Self::Unknown)
    }
}

impl Display for HoleType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Prefix table ordered longest-first so `PX`/`SX` win over `P`/`S`.
const HOLE_PREFIXES: &[(&str, HoleType)] = &[
    ("PX", HoleType::PrimaryShoring),
    ("SX", HoleType::SecondaryShoring),
    ("P", HoleType::Primary),
    ("S", HoleType::Secondary),
    ("U", HoleType::Supplementary),
];

/// Classifies a point identifier by its prefix.
///
/// Matching is case-sensitive and longest-prefix-first. Unrecognized or empty
/// identifiers yield `HoleType::Unknown`.
pub fn classify(id: &str) -> HoleType {
    HOLE_PREFIXES
        .iter()
        .find(|(prefix, _)| id.starts_with(prefix))
        .map_or(HoleType::Unknown, |(_, kind)| *kind)
}

/// Installation status of a point.
///
/// Serialized as its display label. Labels outside the fixed set are kept
/// verbatim in `Other` so future statuses survive a round trip.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    InstalledToDenseSoil,
    InstalledToTopOfFooting,
    ObstructionBelowNewMat,
    ObstructionAboveNewMat,
    NoPointAccessIssues,
    Planned,
    Other(String),
}

impl Category {
    /// Known categories in filter-list display order.
    pub const ALL: [Category; 6] = [
        Category::InstalledToDenseSoil,
        Category::InstalledToTopOfFooting,
        Category::ObstructionBelowNewMat,
        Category::ObstructionAboveNewMat,
        Category::NoPointAccessIssues,
        Category::Planned,
    ];

    pub fn label(&self) -> &str {
        match self {
            Self::InstalledToDenseSoil => "Installed to Dense Soil Layer",
            Self::InstalledToTopOfFooting => "Installed to Top of Footing",
            Self::ObstructionBelowNewMat => "Obstruction Below New Mat",
            Self::ObstructionAboveNewMat => "Obstruction Above New Mat (No Grout)",
            Self::NoPointAccessIssues => "No Point (Access Issues)",
            Self::Planned => "Planned (Not Yet Installed)",
            Self::Other(label) => label.as_str(),
        }
    }

    /// Parses a display label; anything unrecognized is kept as `Other`.
    pub fn from_label(label: &str) -> Self {
        let trimmed = label.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.label() == trimmed)
            .unwrap_or_else(|| Self::Other(trimmed.to_string()))
    }

    pub fn is_planned(&self) -> bool {
        matches!(self, Self::Planned)
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        Self::from_label(value.as_str())
    }
}

impl From<&str> for Category {
    fn from(value: &str) -> Self {
        Self::from_label(value)
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        match value {
            Category::Other(label) => label,
            known => known.label().to_string(),
        }
    }
}

/// Display color for an installation category.
pub fn category_color(category: &Category) -> Color {
    match category {
        Category::InstalledToDenseSoil => Color("#4CAF50"),
        Category::InstalledToTopOfFooting => Color("#2196F3"),
        Category::ObstructionBelowNewMat => Color("#FFC107"),
        Category::ObstructionAboveNewMat => Color("#FF5722"),
        Category::NoPointAccessIssues => Color("#9C27B0"),
        Category::Planned => Color("#9E9E9E"),
        Category::Other(_) => CATEGORY_FALLBACK_COLOR,
    }
}

/// Display color for a hole type.
pub fn type_color(kind: HoleType) -> Color {
    match kind {
        HoleType::Primary => Color("#4287f5"),
        HoleType::Secondary => Color("#42f5a7"),
        HoleType::PrimaryShoring => Color("#f5a742"),
        HoleType::SecondaryShoring => Color("#f542a7"),
        HoleType::Supplementary => Color("#42d7f5"),
        HoleType::Unknown => TYPE_FALLBACK_COLOR,
    }
}
