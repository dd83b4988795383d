//! Repository references, metadata sources and the fallback policy.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::assembler::{assemble, assemble_profile};
use crate::domain::{AnalysisReport, ProfileSource, RepositoryProfile};
use crate::error::{GitGradeError, Result};
use crate::profile::{RawRepository, UNKNOWN_LANGUAGE};

/// Description carried by the fallback profile.
pub const FALLBACK_DESCRIPTION: &str = "Repository analysis";

const GITHUB_HOSTS: [&str; 2] = ["github.com", "www.github.com"];

/// An `owner/name` reference to a hosted repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoSlug {
    /// Owner login.
    pub owner: String,
    /// Repository name.
    pub name: String,
}

impl RepoSlug {
    /// Build a slug from already-split parts.
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Result<Self> {
        let owner = owner.into();
        let name = name.into();
        validate_segment("owner", &owner)?;
        validate_segment("repository", &name)?;
        if owner.contains('.') {
            return Err(GitGradeError::InvalidInput(format!(
                "invalid github owner: {owner}"
            )));
        }
        Ok(Self { owner, name })
    }

    /// Parse a repository URL or `owner/name` shorthand.
    ///
    /// Accepts `https://github.com/o/r`, `github.com/o/r`,
    /// `git@github.com:o/r.git` and bare `o/r`; trailing path segments,
    /// query strings and a `.git` suffix are ignored. URLs must name
    /// `github.com` (or `www.github.com`) as their host.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(GitGradeError::InvalidInput(
                "repository reference cannot be empty".to_string(),
            ));
        }
        let path = if let Some(rest) = trimmed.strip_prefix("git@") {
            let (host, path) = rest.split_once(':').unwrap_or((rest, ""));
            github_path(host, path, trimmed)?
        } else if let Some((_, rest)) = trimmed.split_once("://") {
            let (authority, path) = rest.split_once('/').unwrap_or((rest, ""));
            let host = authority.rsplit('@').next().unwrap_or(authority);
            github_path(host, path, trimmed)?
        } else {
            match trimmed.split_once('/') {
                Some((host, path)) if is_github_host(host) => path,
                _ if trimmed.contains('@') => {
                    return Err(GitGradeError::InvalidInput(format!(
                        "unsupported repository url: {trimmed}"
                    )));
                }
                _ => trimmed,
            }
        };
        let path = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default();
        let mut parts = path.split('/').filter(|part| !part.is_empty());
        let owner = parts.next().ok_or_else(|| {
            GitGradeError::InvalidInput(format!("missing github owner in {trimmed}"))
        })?;
        let name = parts.next().ok_or_else(|| {
            GitGradeError::InvalidInput(format!("missing github repo in {trimmed}"))
        })?;
        let name = name.strip_suffix(".git").unwrap_or(name);
        Self::new(owner, name)
    }
}

impl fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

fn is_github_host(host: &str) -> bool {
    GITHUB_HOSTS
        .iter()
        .any(|known| host.eq_ignore_ascii_case(known))
}

fn github_path<'a>(host: &str, path: &'a str, input: &str) -> Result<&'a str> {
    if is_github_host(host) {
        Ok(path)
    } else {
        Err(GitGradeError::InvalidInput(format!(
            "unsupported repository url: {input}"
        )))
    }
}

fn validate_segment(label: &str, value: &str) -> Result<()> {
    let valid = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if valid {
        Ok(())
    } else {
        Err(GitGradeError::InvalidInput(format!(
            "invalid {label} name: {value:?}"
        )))
    }
}

/// Retrieves raw repository metadata from a hosting provider.
#[cfg_attr(test, mockall::automock)]
pub trait MetadataSource {
    /// Fetch metadata for a repository.
    fn fetch(&self, slug: &RepoSlug) -> Result<RawRepository>;
}

/// The profile scored when metadata retrieval fails.
///
/// Counts are zero, there is no license, language and topics are unknown and
/// both timestamps are `now`.
pub fn fallback_profile(owner: &str, name: &str, now: DateTime<Utc>) -> RepositoryProfile {
    RepositoryProfile {
        owner: owner.to_string(),
        name: name.to_string(),
        description: FALLBACK_DESCRIPTION.to_string(),
        star_count: 0,
        fork_count: 0,
        watcher_count: 0,
        open_issue_count: 0,
        created_at: now,
        updated_at: now,
        primary_language: UNKNOWN_LANGUAGE.to_string(),
        topics: Vec::new(),
        has_readme: true,
        has_license: false,
        has_contributing_guide: false,
    }
}

/// Turn the outcome of a metadata fetch into a report.
///
/// Retrieval failures are answered with the fallback profile; any other error
/// is returned unchanged.
pub fn resolve_report(
    slug: &RepoSlug,
    fetched: Result<RawRepository>,
    now: DateTime<Utc>,
) -> Result<AnalysisReport> {
    match fetched {
        Ok(raw) => Ok(assemble(
            raw.with_identity_fallback(&slug.owner, &slug.name),
            now,
        )),
        Err(err) if err.is_retrieval() => {
            log::warn!("metadata for {slug} unavailable, using fallback profile: {err}");
            Ok(assemble_profile(
                fallback_profile(&slug.owner, &slug.name, now),
                ProfileSource::Fallback,
                now,
            ))
        }
        Err(err) => Err(err),
    }
}

/// Fetch metadata through `source` and analyze it.
pub fn analyze_from_source<S: MetadataSource + ?Sized>(
    source: &S,
    slug: &RepoSlug,
    now: DateTime<Utc>,
) -> Result<AnalysisReport> {
    resolve_report(slug, source.fetch(slug), now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Grade;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn parse_accepts_common_forms() {
        let expected = RepoSlug::new("gitgrade", "demo").expect("slug");
        for input in [
            "https://github.com/gitgrade/demo",
            "https://github.com/gitgrade/demo.git",
            "http://github.com/gitgrade/demo/tree/main",
            "github.com/gitgrade/demo",
            "git@github.com:gitgrade/demo.git",
            "https://www.github.com/gitgrade/demo?tab=readme",
            "  gitgrade/demo  ",
            "www.github.com/gitgrade/demo",
            "ssh://git@github.com/gitgrade/demo.git",
        ] {
            assert_eq!(RepoSlug::parse(input).expect(input), expected, "{input}");
        }
    }

    #[test]
    fn parse_keeps_dots_in_repository_names() {
        let slug = RepoSlug::parse("https://github.com/octo/octo.github.io").expect("slug");
        assert_eq!(slug.name, "octo.github.io");
        assert_eq!(slug.to_string(), "octo/octo.github.io");

        let shorthand = RepoSlug::parse("octo/octo.github.com").expect("shorthand");
        assert_eq!(shorthand, RepoSlug::new("octo", "octo.github.com").expect("slug"));
    }

    #[test]
    fn parse_rejects_invalid_references() {
        for input in [
            "",
            "https://example.com/other",
            "https://github.com/only-owner",
            "just-a-name",
            "example.com/other",
            "octo/bad name",
            "https://evilgithub.com/octo/demo",
            "https://github.com.evil.io/octo/demo",
            "git@gitlab.com:octo/demo.git",
            "ssh://git@evilgithub.com/octo/demo",
        ] {
            let err = RepoSlug::parse(input).unwrap_err();
            assert!(
                matches!(err, GitGradeError::InvalidInput(_)),
                "{input} should be invalid"
            );
        }
    }

    #[test]
    fn fallback_profile_is_neutral() {
        let profile = fallback_profile("octo", "demo", now());
        assert_eq!(profile.description, FALLBACK_DESCRIPTION);
        assert_eq!(profile.star_count, 0);
        assert_eq!(profile.primary_language, "Unknown");
        assert!(!profile.has_license);
        assert_eq!(profile.updated_at, now());
    }

    #[test]
    fn analyze_from_source_uses_fetched_metadata() {
        let mut source = MockMetadataSource::new();
        source
            .expect_fetch()
            .withf(|slug| slug.owner == "octo" && slug.name == "demo")
            .times(1)
            .returning(|_| {
                Ok(RawRepository {
                    stargazers_count: Some(150),
                    ..RawRepository::default()
                })
            });
        let slug = RepoSlug::new("octo", "demo").expect("slug");
        let report = analyze_from_source(&source, &slug, now()).expect("report");
        assert_eq!(report.profile_source, ProfileSource::Live);
        assert_eq!(report.grade, Grade::A);
        assert_eq!(report.repository.full_name(), "octo/demo");
    }

    #[test]
    fn analyze_from_source_falls_back_on_retrieval_failure() {
        let mut source = MockMetadataSource::new();
        source
            .expect_fetch()
            .returning(|_| Err(GitGradeError::Retrieval("timeout".to_string())));
        let slug = RepoSlug::new("octo", "demo").expect("slug");
        let report = analyze_from_source(&source, &slug, now()).expect("report");
        assert_eq!(report.profile_source, ProfileSource::Fallback);
        assert_eq!(report.repository.description, FALLBACK_DESCRIPTION);
        assert_eq!(report.grade, Grade::CPlus);
        assert_eq!(report.roadmap[0].title, "Add License");
        // The fallback profile is dated `now`, so it always counts as active.
        assert_eq!(report.category_scores.activity, 88);
    }

    #[test]
    fn analyze_from_source_propagates_invalid_input() {
        let mut source = MockMetadataSource::new();
        source
            .expect_fetch()
            .returning(|_| Err(GitGradeError::InvalidInput("bad count".to_string())));
        let slug = RepoSlug::new("octo", "demo").expect("slug");
        let err = analyze_from_source(&source, &slug, now()).unwrap_err();
        assert!(matches!(err, GitGradeError::InvalidInput(_)));
    }
}
