//! Report assembly: the engine entry point.

use chrono::{DateTime, Utc};

use crate::domain::{AnalysisReport, DisplayMetrics, ProfileSource, RepositoryProfile};
use crate::grade::{grade, overall_score};
use crate::insights::insights;
use crate::profile::{RawRepository, normalize};
use crate::roadmap::roadmap;
use crate::scoring::{is_recently_active, score};

/// Analyze a raw metadata record against the reference instant `now`.
///
/// Identical arguments always yield identical reports.
pub fn assemble(raw: RawRepository, now: DateTime<Utc>) -> AnalysisReport {
    assemble_profile(normalize(raw, now), ProfileSource::Live, now)
}

/// Analyze an already-normalized profile.
pub fn assemble_profile(
    profile: RepositoryProfile,
    source: ProfileSource,
    now: DateTime<Utc>,
) -> AnalysisReport {
    let category_scores = score(&profile, now);
    let overall_score = overall_score(&profile, now);
    let grade = grade(overall_score, profile.star_count);
    let insights = insights(&profile, &category_scores);
    let roadmap = roadmap(&profile, &category_scores);
    let metrics = display_metrics(&profile, now);

    log::debug!(
        "assembled report for {}: {} ({}/100)",
        profile.full_name(),
        grade,
        overall_score
    );

    AnalysisReport {
        repository: profile,
        profile_source: source,
        overall_score,
        grade,
        category_scores,
        insights,
        roadmap,
        metrics,
        generated_at: now,
    }
}

/// Derive the display labels shown beside the scores.
pub fn display_metrics(profile: &RepositoryProfile, now: DateTime<Utc>) -> DisplayMetrics {
    let commit_frequency_label = if is_recently_active(profile, now) {
        "5-10 per week"
    } else {
        "1-2 per week"
    };
    let issue_response_label = if profile.open_issue_count < 10 {
        "< 24 hours"
    } else {
        "2-3 days"
    };
    DisplayMetrics {
        commit_frequency_label: commit_frequency_label.to_string(),
        contributor_estimate: (profile.star_count / 100 + 1).max(1),
        issue_response_label: issue_response_label.to_string(),
        complexity_label: "Medium".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Grade;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn contributor_estimate_scales_with_stars() {
        let mut profile = normalize(RawRepository::default(), now());
        assert_eq!(display_metrics(&profile, now()).contributor_estimate, 1);
        profile.star_count = 99;
        assert_eq!(display_metrics(&profile, now()).contributor_estimate, 1);
        profile.star_count = 250;
        assert_eq!(display_metrics(&profile, now()).contributor_estimate, 3);
    }

    #[test]
    fn issue_response_threshold() {
        let mut profile = normalize(RawRepository::default(), now());
        profile.open_issue_count = 9;
        assert_eq!(display_metrics(&profile, now()).issue_response_label, "< 24 hours");
        profile.open_issue_count = 10;
        assert_eq!(display_metrics(&profile, now()).issue_response_label, "2-3 days");
    }

    #[test]
    fn stale_repository_commit_frequency() {
        let raw = RawRepository {
            created_at: Some(now() - Duration::days(900)),
            updated_at: Some(now() - Duration::days(90)),
            ..RawRepository::default()
        };
        let report = assemble(raw, now());
        assert_eq!(report.metrics.commit_frequency_label, "1-2 per week");
        assert_eq!(report.metrics.complexity_label, "Medium");
    }

    #[test]
    fn assemble_records_source_and_reference_instant() {
        let report = assemble(RawRepository::default(), now());
        assert_eq!(report.profile_source, ProfileSource::Live);
        assert_eq!(report.generated_at, now());
        assert_eq!(report.grade, Grade::CPlus);
        assert_eq!(report.roadmap.len(), 5);
    }
}
