//! Category scoring.

use chrono::{DateTime, Duration, Utc};

use crate::domain::{CategoryScores, RepositoryProfile};

/// Window within which a repository counts as recently active.
pub const RECENT_ACTIVITY_DAYS: i64 = 30;

const MAX_SCORE: u64 = 100;
const COMMUNITY_CAP: u64 = 90;
const BEST_PRACTICES_BASELINE: u8 = 78;

/// Whether the repository was updated within the recency window before `now`.
pub fn is_recently_active(profile: &RepositoryProfile, now: DateTime<Utc>) -> bool {
    now.signed_duration_since(profile.updated_at) <= Duration::days(RECENT_ACTIVITY_DAYS)
}

/// Compute the six category scores for a profile.
pub fn score(profile: &RepositoryProfile, now: DateTime<Utc>) -> CategoryScores {
    let recent = is_recently_active(profile, now);
    let stars = profile.star_count;

    CategoryScores {
        code_quality: clamp_score(70 + if stars > 100 { 20 } else { 10 }),
        documentation: if profile.has_license { 85 } else { 65 },
        activity: if recent { 88 } else { 55 },
        community: clamp_score((60 + stars / 50).min(COMMUNITY_CAP)),
        security: if profile.has_license { 82 } else { 60 },
        // No signal feeds best practices yet.
        best_practices: BEST_PRACTICES_BASELINE,
    }
}

pub(crate) fn clamp_score(value: u64) -> u8 {
    // Bounded by MAX_SCORE, so the narrowing cast is lossless.
    value.min(MAX_SCORE) as u8
}
