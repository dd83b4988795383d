//! Raw repository metadata and its normalization into a profile.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use crate::domain::RepositoryProfile;
use crate::error::{GitGradeError, Result};

/// Placeholder used when a repository has no description.
pub const MISSING_DESCRIPTION: &str = "No description available";
/// Placeholder used when a repository reports no primary language.
pub const UNKNOWN_LANGUAGE: &str = "Unknown";
/// Placeholder used when the owner or name is missing.
pub const UNKNOWN_IDENTITY: &str = "unknown";

/// Repository metadata as returned by the hosting provider.
///
/// Field names follow the GitHub `GET /repos/{owner}/{repo}` payload. Every
/// field may be absent or null; structurally wrong types are rejected when
/// parsing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RawRepository {
    /// Repository name.
    #[serde(default)]
    pub name: Option<String>,
    /// Repository owner.
    #[serde(default)]
    pub owner: Option<RawOwner>,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// Star count.
    #[serde(default, deserialize_with = "deserialize_count")]
    pub stargazers_count: Option<u64>,
    /// Fork count.
    #[serde(default, deserialize_with = "deserialize_count")]
    pub forks_count: Option<u64>,
    /// Watcher count.
    #[serde(default, deserialize_with = "deserialize_count")]
    pub watchers_count: Option<u64>,
    /// Open issue count.
    #[serde(default, deserialize_with = "deserialize_count")]
    pub open_issues_count: Option<u64>,
    /// Primary language.
    #[serde(default)]
    pub language: Option<String>,
    /// Topics.
    #[serde(default)]
    pub topics: Option<Vec<String>>,
    /// Creation timestamp (RFC 3339).
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp (RFC 3339).
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    /// License descriptor, null when the repository has none.
    #[serde(default)]
    pub license: Option<RawLicense>,
    /// Whether a README is present. Not part of the GitHub payload.
    #[serde(default)]
    pub has_readme: Option<bool>,
    /// Whether a contributing guide is present. Not part of the GitHub payload.
    #[serde(default)]
    pub has_contributing: Option<bool>,
}

/// Accept any JSON number as a count: negatives become zero and integral
/// floats are truncated.
fn deserialize_count<'de, D>(deserializer: D) -> std::result::Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let number: Option<serde_json::Number> = Option::deserialize(deserializer)?;
    Ok(number.map(|number| clamp_number(&number)))
}

fn clamp_number(number: &serde_json::Number) -> u64 {
    if let Some(count) = number.as_u64() {
        return count;
    }
    match number.as_f64() {
        Some(value) if value.is_finite() && value > 0.0 => value as u64,
        _ => 0,
    }
}

/// Owner section of the repository payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RawOwner {
    /// Owner login handle.
    #[serde(default)]
    pub login: Option<String>,
}

/// License section of the repository payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RawLicense {
    /// License key, e.g. `mit`.
    #[serde(default)]
    pub key: Option<String>,
    /// SPDX identifier.
    #[serde(default)]
    pub spdx_id: Option<String>,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
}

impl RawRepository {
    /// Parse a raw record from JSON, rejecting structurally wrong types.
    pub fn from_json(input: &str) -> Result<Self> {
        serde_json::from_str(input).map_err(|err| GitGradeError::InvalidInput(err.to_string()))
    }

    /// Parse a raw record from an already-decoded JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|err| GitGradeError::InvalidInput(err.to_string()))
    }

    /// Fill a missing owner or name from a known repository reference.
    pub fn with_identity_fallback(mut self, owner: &str, name: &str) -> Self {
        if non_blank(self.name.as_deref()).is_none() {
            self.name = Some(name.to_string());
        }
        let has_owner = self
            .owner
            .as_ref()
            .and_then(|owner| non_blank(owner.login.as_deref()))
            .is_some();
        if !has_owner {
            self.owner = Some(RawOwner {
                login: Some(owner.to_string()),
            });
        }
        self
    }
}

/// Normalize a raw record into a fully-populated profile.
///
/// Missing timestamps default to `now`; `updated_at` is clamped so it never
/// precedes `created_at`.
pub fn normalize(raw: RawRepository, now: DateTime<Utc>) -> RepositoryProfile {
    let created_at = raw.created_at.unwrap_or(now);
    let updated_at = raw.updated_at.unwrap_or(now).max(created_at);
    let owner = raw
        .owner
        .as_ref()
        .and_then(|owner| non_blank(owner.login.as_deref()))
        .unwrap_or(UNKNOWN_IDENTITY)
        .to_string();

    RepositoryProfile {
        owner,
        name: non_blank(raw.name.as_deref())
            .unwrap_or(UNKNOWN_IDENTITY)
            .to_string(),
        description: non_blank(raw.description.as_deref())
            .unwrap_or(MISSING_DESCRIPTION)
            .to_string(),
        star_count: raw.stargazers_count.unwrap_or(0),
        fork_count: raw.forks_count.unwrap_or(0),
        watcher_count: raw.watchers_count.unwrap_or(0),
        open_issue_count: raw.open_issues_count.unwrap_or(0),
        created_at,
        updated_at,
        primary_language: non_blank(raw.language.as_deref())
            .unwrap_or(UNKNOWN_LANGUAGE)
            .to_string(),
        topics: normalize_topics(raw.topics.unwrap_or_default()),
        has_readme: raw.has_readme.unwrap_or(true),
        has_license: raw.license.is_some(),
        has_contributing_guide: raw.has_contributing.unwrap_or(false),
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

fn normalize_topics(topics: Vec<String>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::with_capacity(topics.len());
    for topic in topics {
        let topic = topic.trim();
        if topic.is_empty() || seen.iter().any(|existing| existing == topic) {
            continue;
        }
        seen.push(topic.to_string());
    }
    seen
}
