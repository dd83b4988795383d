//! Strength and improvement statements.
//!
//! Each list is a fixed sequence of slots. A slot holds ordered
//! `(predicate, statement)` branches and a fallback; the first branch whose
//! predicate holds fills the slot.

use crate::domain::{CategoryScores, Insights, RepositoryProfile};

type Predicate = fn(&RepositoryProfile, &CategoryScores) -> bool;

#[derive(Debug, Clone, Copy)]
enum Statement {
    Fixed(&'static str),
    PrimaryLanguage,
}

impl Statement {
    fn render(self, profile: &RepositoryProfile) -> String {
        match self {
            Self::Fixed(text) => text.to_string(),
            Self::PrimaryLanguage => format!("Primary language: {}", profile.primary_language),
        }
    }
}

struct Slot {
    branches: &'static [(Predicate, Statement)],
    fallback: Statement,
}

impl Slot {
    fn select(&self, profile: &RepositoryProfile, scores: &CategoryScores) -> String {
        self.branches
            .iter()
            .find(|(predicate, _)| predicate(profile, scores))
            .map(|(_, statement)| *statement)
            .unwrap_or(self.fallback)
            .render(profile)
    }
}

fn is_popular(profile: &RepositoryProfile, _: &CategoryScores) -> bool {
    profile.star_count > 100
}

fn is_licensed(profile: &RepositoryProfile, _: &CategoryScores) -> bool {
    profile.has_license
}

fn is_unlicensed(profile: &RepositoryProfile, _: &CategoryScores) -> bool {
    !profile.has_license
}

fn has_topics(profile: &RepositoryProfile, _: &CategoryScores) -> bool {
    !profile.topics.is_empty()
}

fn has_issue_backlog(profile: &RepositoryProfile, _: &CategoryScores) -> bool {
    profile.open_issue_count > 20
}

const STRENGTHS: [Slot; 4] = [
    Slot {
        branches: &[(
            is_popular,
            Statement::Fixed("Strong community engagement with significant stars"),
        )],
        fallback: Statement::Fixed("Active development and maintenance"),
    },
    Slot {
        branches: &[(is_licensed, Statement::Fixed("Proper licensing in place"))],
        fallback: Statement::Fixed("Clear repository structure"),
    },
    Slot {
        branches: &[],
        fallback: Statement::PrimaryLanguage,
    },
    Slot {
        branches: &[(
            has_topics,
            Statement::Fixed("Well-categorized with relevant topics"),
        )],
        fallback: Statement::Fixed("Regular commit activity"),
    },
];

const IMPROVEMENTS: [Slot; 4] = [
    Slot {
        branches: &[(
            is_unlicensed,
            Statement::Fixed("Add a LICENSE file to clarify usage rights"),
        )],
        fallback: Statement::Fixed("Consider adding more comprehensive documentation"),
    },
    Slot {
        branches: &[(
            has_issue_backlog,
            Statement::Fixed("High number of open issues - consider triaging"),
        )],
        fallback: Statement::Fixed("Improve test coverage"),
    },
    Slot {
        branches: &[],
        fallback: Statement::Fixed("Add CI/CD pipeline for automated testing"),
    },
    Slot {
        branches: &[],
        fallback: Statement::Fixed("Create CONTRIBUTING.md guidelines"),
    },
];

/// Derive the ordered strengths and improvements for a profile.
pub fn insights(profile: &RepositoryProfile, scores: &CategoryScores) -> Insights {
    Insights {
        strengths: STRENGTHS
            .iter()
            .map(|slot| slot.select(profile, scores))
            .collect(),
        improvements: IMPROVEMENTS
            .iter()
            .map(|slot| slot.select(profile, scores))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{RawRepository, normalize};
    use crate::scoring::score;
    use chrono::{TimeZone, Utc};

    fn run(raw: RawRepository) -> Insights {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let profile = normalize(raw, now);
        let scores = score(&profile, now);
        insights(&profile, &scores)
    }

    #[test]
    fn popular_licensed_repository_with_topics() {
        let result = run(RawRepository {
            stargazers_count: Some(500),
            language: Some("Rust".to_string()),
            topics: Some(vec!["cli".to_string()]),
            license: Some(Default::default()),
            open_issues_count: Some(3),
            ..RawRepository::default()
        });
        assert_eq!(
            result.strengths,
            vec![
                "Strong community engagement with significant stars",
                "Proper licensing in place",
                "Primary language: Rust",
                "Well-categorized with relevant topics",
            ]
        );
        assert_eq!(
            result.improvements,
            vec![
                "Consider adding more comprehensive documentation",
                "Improve test coverage",
                "Add CI/CD pipeline for automated testing",
                "Create CONTRIBUTING.md guidelines",
            ]
        );
    }

    #[test]
    fn small_unlicensed_repository_with_backlog() {
        let result = run(RawRepository {
            stargazers_count: Some(100),
            open_issues_count: Some(21),
            ..RawRepository::default()
        });
        assert_eq!(
            result.strengths,
            vec![
                "Active development and maintenance",
                "Clear repository structure",
                "Primary language: Unknown",
                "Regular commit activity",
            ]
        );
        assert_eq!(
            result.improvements[0],
            "Add a LICENSE file to clarify usage rights"
        );
        assert_eq!(
            result.improvements[1],
            "High number of open issues - consider triaging"
        );
    }

    #[test]
    fn issue_backlog_threshold_is_strict() {
        let result = run(RawRepository {
            open_issues_count: Some(20),
            ..RawRepository::default()
        });
        assert_eq!(result.improvements[1], "Improve test coverage");
    }

    #[test]
    fn lists_have_fixed_cardinality() {
        let result = run(RawRepository::default());
        assert_eq!(result.strengths.len(), 4);
        assert_eq!(result.improvements.len(), 4);
    }
}
