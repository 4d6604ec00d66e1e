//! Point visibility from hole-type and category selections.
//!
//! # Invariants
//! - Empty selection sets mean "no filtering" for that dimension.
//! - When both sets are non-empty a point must satisfy both (logical AND).
//! - Toggling is symmetric: a present member is removed, an absent one added.

use crate::model::classify::{Category, HoleType};
use crate::model::point::Point;
use std::collections::BTreeSet;

/// Active filter selection for one view session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    selected_types: BTreeSet<HoleType>,
    selected_categories: BTreeSet<Category>,
}

impl FilterSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `kind` when absent, removes it when present.
    ///
    /// Returns whether `kind` is selected after the toggle.
    pub fn toggle_type(&mut self, kind: HoleType) -> bool {
        if self.selected_types.remove(&kind) {
            false
        } else {
            self.selected_types.insert(kind);
            true
        }
    }

    /// Adds `category` when absent, removes it when present.
    ///
    /// Returns whether `category` is selected after the toggle.
    pub fn toggle_category(&mut self, category: Category) -> bool {
        if self.selected_categories.remove(&category) {
            false
        } else {
            self.selected_categories.insert(category);
            true
        }
    }

    pub fn clear(&mut self) {
        self.selected_types.clear();
        self.selected_categories.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.selected_types.is_empty() && self.selected_categories.is_empty()
    }

    pub fn selected_types(&self) -> &BTreeSet<HoleType> {
        &self.selected_types
    }

    pub fn selected_categories(&self) -> &BTreeSet<Category> {
        &self.selected_categories
    }

    pub fn is_type_selected(&self, kind: HoleType) -> bool {
        self.selected_types.contains(&kind)
    }

    pub fn is_category_selected(&self, category: &Category) -> bool {
        self.selected_categories.contains(category)
    }

    /// Shorthand for `is_visible` against this selection.
    pub fn is_visible(&self, point: &Point) -> bool {
        is_visible(point, &self.selected_types, &self.selected_categories)
    }
}

/// Returns whether `point` passes the given selection sets.
pub fn is_visible(
    point: &Point,
    selected_types: &BTreeSet<HoleType>,
    selected_categories: &BTreeSet<Category>,
) -> bool {
    let type_ok = selected_types.is_empty() || selected_types.contains(&point.hole_type());
    let category_ok =
        selected_categories.is_empty() || selected_categories.contains(&point.category);
    type_ok && category_ok
}

/// Returns the visible subset of `points`, preserving input order.
pub fn visible_points<'a>(points: &'a [Point], selection: &FilterSelection) -> Vec<&'a Point> {
    points
        .iter()
        .filter(|point| selection.is_visible(point))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{visible_points, FilterSelection};
    use crate::model::classify::{Category, HoleType};
    use crate::model::sample::sample_points;

    fn ids(points: &[&crate::model::point::Point]) -> Vec<String> {
        points.iter().map(|point| point.id.clone()).collect()
    }

    #[test]
    fn toggle_is_symmetric() {
        let mut selection = FilterSelection::new();
        assert!(selection.toggle_type(HoleType::Primary));
        assert!(selection.is_type_selected(HoleType::Primary));
        assert!(!selection.toggle_type(HoleType::Primary));
        assert!(selection.is_empty());

        assert!(selection.toggle_category(Category::Planned));
        assert!(!selection.toggle_category(Category::Planned));
        assert!(selection.is_empty());
    }

    #[test]
    fn category_only_selection_filters_by_category() {
        let points = sample_points();
        let mut selection = FilterSelection::new();
        selection.toggle_category(Category::InstalledToDenseSoil);

        assert_eq!(ids(&visible_points(&points, &selection)), vec!["P001", "U001"]);
    }

    #[test]
    fn both_sets_combine_with_and() {
        let points = sample_points();
        let mut selection = FilterSelection::new();
        selection.toggle_type(HoleType::Primary);
        selection.toggle_category(Category::InstalledToDenseSoil);

        assert_eq!(ids(&visible_points(&points, &selection)), vec!["P001"]);

        selection.toggle_category(Category::ObstructionBelowNewMat);
        assert_eq!(ids(&visible_points(&points, &selection)), vec!["P001"]);
    }

    #[test]
    fn clear_restores_full_visibility() {
        let points = sample_points();
        let mut selection = FilterSelection::new();
        selection.toggle_type(HoleType::Supplementary);
        selection.clear();

        assert_eq!(visible_points(&points, &selection).len(), points.len());
    }
}
