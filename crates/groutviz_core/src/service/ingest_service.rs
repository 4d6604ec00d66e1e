//! Record ingestion use-case.
//!
//! # Responsibility
//! - Load records from a repository and run the consistency pass.
//! - Report every issue instead of silently trusting stored fields.
//! - Start view sessions over the accepted record set.
//!
//! # Invariants
//! - Records with an error-severity issue are dropped; warnings are kept.
//! - For duplicated ids the first occurrence wins.
//! - Accepted records keep source order.

use crate::config::ViewConfig;
use crate::model::point::{Point, PointIssue, Severity};
use crate::repo::point_repo::{PointRepository, RepoResult};
use crate::session::ViewSession;
use log::{info, warn};
use std::collections::HashSet;

/// One issue tied to the record that raised it.
#[derive(Debug, Clone, PartialEq)]
pub struct IssueReport {
    pub point_id: String,
    pub issue: PointIssue,
}

impl IssueReport {
    pub fn severity(&self) -> Severity {
        self.issue.severity()
    }
}

/// Outcome of one ingestion pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IngestReport {
    /// Accepted records.
    pub points: Vec<Point>,
    /// All issues, in record order.
    pub issues: Vec<IssueReport>,
}

impl IngestReport {
    /// Issues whose records were dropped.
    pub fn errors(&self) -> impl Iterator<Item = &IssueReport> {
        self.issues
            .iter()
            .filter(|report| report.severity() == Severity::Error)
    }

    /// Issues on records that were kept.
    pub fn warnings(&self) -> impl Iterator<Item = &IssueReport> {
        self.issues
            .iter()
            .filter(|report| report.severity() == Severity::Warning)
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Use-case service wrapper for record loading.
pub struct IngestService<R: PointRepository> {
    repo: R,
}

impl<R: PointRepository> IngestService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Loads and validates all records.
    ///
    /// Returns repository errors unchanged; record issues go in the report.
    pub fn load(&self) -> RepoResult<IngestReport> {
        let loaded = self.repo.load_points()?;
        let loaded_count = loaded.len();
        let report = validate_records(loaded);

        info!(
            "event=ingest module=service status=ok source={} loaded={} accepted={} errors={} warnings={}",
            self.repo.source_name(),
            loaded_count,
            report.points.len(),
            report.errors().count(),
            report.warnings().count()
        );
        for entry in &report.issues {
            warn!(
                "event=ingest_issue module=service source={} point_id={} severity={:?} code={}",
                self.repo.source_name(),
                entry.point_id,
                entry.severity(),
                entry.issue.code()
            );
        }

        Ok(report)
    }

    /// Loads records and opens a session over the accepted set.
    pub fn open_session(&self, config: ViewConfig) -> RepoResult<(ViewSession, Vec<IssueReport>)> {
        let report = self.load()?;
        Ok((ViewSession::new(report.points, config), report.issues))
    }
}

/// Runs the consistency pass over `points`.
pub fn validate_records(points: Vec<Point>) -> IngestReport {
    let mut seen = HashSet::new();
    let mut report = IngestReport::default();

    for point in points {
        let mut issues = point.issues();
        if !point.id.trim().is_empty() && !seen.insert(point.id.clone()) {
            issues.insert(0, PointIssue::DuplicateId(point.id.clone()));
        }

        let rejected = issues
            .iter()
            .any(|issue| issue.severity() == Severity::Error);
        report
            .issues
            .extend(issues.into_iter().map(|issue| IssueReport {
                point_id: point.id.clone(),
                issue,
            }));
        if !rejected {
            report.points.push(point);
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::validate_records;
    use crate::model::geometry::Vec2;
    use crate::model::point::{PointIssue, Severity, Stage};
    use crate::model::sample::sample_points;

    #[test]
    fn sample_set_is_clean() {
        let report = validate_records(sample_points());
        assert!(report.is_clean());
        assert_eq!(report.points.len(), 7);
    }

    #[test]
    fn duplicate_ids_keep_first_occurrence() {
        let mut points = sample_points();
        let mut duplicate = points[1].clone();
        duplicate.position.x = 999.0;
        points.push(duplicate);

        let report = validate_records(points);
        assert_eq!(report.points.len(), 7);
        assert_eq!(report.points[1].position.x, 200.0);
        assert_eq!(
            report.errors().map(|entry| &entry.issue).collect::<Vec<_>>(),
            vec![&PointIssue::DuplicateId("S002".to_string())]
        );
    }

    #[test]
    fn warnings_keep_the_record() {
        let mut points = sample_points();
        points[0].total_grout = 200.0;

        let report = validate_records(points);
        assert_eq!(report.points.len(), 7);
        assert_eq!(report.warnings().count(), 1);
        assert_eq!(report.issues[0].point_id, "P001");
    }

    #[test]
    fn stage_warning_keeps_record_and_position_error_drops_it() {
        let mut points = sample_points();
        points[0].stages[0] = Stage::new(5.0, f64::NAN);
        points[2].position = Vec2::new(280.0, f64::INFINITY);

        let report = validate_records(points);
        let ids: Vec<_> = report.points.iter().map(|point| point.id.as_str()).collect();
        assert_eq!(ids, vec!["P001", "S002", "SX004", "U001", "P005", "P006"]);

        let issues: Vec<_> = report
            .issues
            .iter()
            .map(|entry| (entry.point_id.as_str(), entry.issue.code(), entry.severity()))
            .collect();
        assert_eq!(
            issues,
            vec![
                ("P001", "invalid_stage_grout", Severity::Warning),
                ("P001", "grout_mismatch", Severity::Warning),
                ("PX003", "non_finite_position", Severity::Error),
            ]
        );
        assert!(matches!(
            report.issues[0].issue,
            PointIssue::InvalidStageGrout { index: 0, .. }
        ));
    }
}
