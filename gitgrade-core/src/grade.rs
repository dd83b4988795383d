//! Overall score and letter grade.

use chrono::{DateTime, Utc};

use crate::domain::{Grade, RepositoryProfile};
use crate::scoring::{clamp_score, is_recently_active};

const OVERALL_BASE: u64 = 65;
const OVERALL_CAP: u64 = 95;

/// Aggregate score for a profile, capped at 95.
pub fn overall_score(profile: &RepositoryProfile, now: DateTime<Utc>) -> u8 {
    let star_bonus = match profile.star_count {
        stars if stars > 100 => 15,
        stars if stars > 10 => 10,
        _ => 5,
    };
    let license_bonus = if profile.has_license { 10 } else { 0 };
    let activity_bonus = if is_recently_active(profile, now) { 5 } else { 0 };

    clamp_score((OVERALL_BASE + star_bonus + license_bonus + activity_bonus).min(OVERALL_CAP))
}

/// Map a repository to its letter grade.
///
/// The letter is keyed on the star count, not on `overall_score`; the score
/// is accepted so callers grade from the same inputs they report.
pub fn grade(overall_score: u8, star_count: u64) -> Grade {
    let grade = match star_count {
        stars if stars > 100 => Grade::A,
        stars if stars > 50 => Grade::BPlus,
        stars if stars > 10 => Grade::B,
        _ => Grade::CPlus,
    };
    log::trace!("graded {grade} (score {overall_score}, {star_count} stars)");
    grade
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{RawRepository, normalize};
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn profile(stars: u64, license: bool, days_since_update: i64) -> RepositoryProfile {
        let raw = RawRepository {
            stargazers_count: Some(stars),
            license: license.then(Default::default),
            created_at: Some(now() - Duration::days(1_000)),
            updated_at: Some(now() - Duration::days(days_since_update)),
            ..RawRepository::default()
        };
        normalize(raw, now())
    }

    #[test]
    fn grade_boundaries() {
        assert_eq!(grade(0, 101), Grade::A);
        assert_eq!(grade(0, 100), Grade::BPlus);
        assert_eq!(grade(0, 51), Grade::BPlus);
        assert_eq!(grade(0, 50), Grade::B);
        assert_eq!(grade(0, 11), Grade::B);
        assert_eq!(grade(0, 10), Grade::CPlus);
        assert_eq!(grade(0, 0), Grade::CPlus);
    }

    #[test]
    fn grade_ignores_score() {
        assert_eq!(grade(95, 0), Grade::CPlus);
        assert_eq!(grade(0, 5_000), Grade::A);
    }

    #[test]
    fn overall_score_is_capped() {
        // 65 + 15 + 10 + 5 = 95
        assert_eq!(overall_score(&profile(150, true, 5), now()), 95);
    }

    #[test]
    fn overall_score_minimum() {
        assert_eq!(overall_score(&profile(0, false, 400), now()), 70);
    }

    #[test]
    fn overall_score_star_tiers() {
        assert_eq!(overall_score(&profile(10, false, 400), now()), 70);
        assert_eq!(overall_score(&profile(11, false, 400), now()), 75);
        assert_eq!(overall_score(&profile(101, false, 400), now()), 80);
        assert_eq!(overall_score(&profile(11, true, 1), now()), 90);
    }
}
