//! Domain entities for GitGrade.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Normalized snapshot of a repository used as scoring input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryProfile {
    /// Owner login.
    pub owner: String,
    /// Repository name.
    pub name: String,
    /// Repository description, never empty.
    pub description: String,
    /// Number of stargazers.
    pub star_count: u64,
    /// Number of forks.
    pub fork_count: u64,
    /// Number of watchers.
    pub watcher_count: u64,
    /// Number of open issues.
    pub open_issue_count: u64,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
    /// Last update instant, never earlier than `created_at`.
    pub updated_at: DateTime<Utc>,
    /// Primary language, or "Unknown".
    pub primary_language: String,
    /// Topics in first-seen order without duplicates.
    pub topics: Vec<String>,
    /// Whether the repository has a README.
    pub has_readme: bool,
    /// Whether the repository declares a license.
    pub has_license: bool,
    /// Whether the repository has a contributing guide.
    pub has_contributing_guide: bool,
}

impl RepositoryProfile {
    /// `owner/name` form of the repository identity.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

/// Where the profile behind a report came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ProfileSource {
    /// Metadata supplied by the caller or fetched from the hosting provider.
    Live,
    /// The fallback profile substituted after a retrieval failure.
    Fallback,
}

/// One of the six scored dimensions.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    /// Code quality.
    CodeQuality,
    /// Documentation.
    Documentation,
    /// Maintenance activity.
    Activity,
    /// Community engagement.
    Community,
    /// Security posture.
    Security,
    /// Best practices.
    BestPractices,
}

/// Static display attributes for a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDisplay {
    /// Category this row describes.
    pub category: Category,
    /// Serialized key, as used in `categoryScores`.
    pub key: &'static str,
    /// Human-readable label.
    pub label: &'static str,
    /// Compact label for narrow charts.
    pub short_label: &'static str,
    /// Icon identifier for UI renderers.
    pub icon: &'static str,
}

const CATEGORY_DISPLAY: [CategoryDisplay; 6] = [
    CategoryDisplay {
        category: Category::CodeQuality,
        key: "codeQuality",
        label: "Code Quality",
        short_label: "Code",
        icon: "file-code",
    },
    CategoryDisplay {
        category: Category::Documentation,
        key: "documentation",
        label: "Documentation",
        short_label: "Docs",
        icon: "book-open",
    },
    CategoryDisplay {
        category: Category::Activity,
        key: "activity",
        label: "Activity",
        short_label: "Activity",
        icon: "activity",
    },
    CategoryDisplay {
        category: Category::Community,
        key: "community",
        label: "Community",
        short_label: "Community",
        icon: "users",
    },
    CategoryDisplay {
        category: Category::Security,
        key: "security",
        label: "Security",
        short_label: "Security",
        icon: "shield",
    },
    CategoryDisplay {
        category: Category::BestPractices,
        key: "bestPractices",
        label: "Best Practices",
        short_label: "Practices",
        icon: "bar-chart-3",
    },
];

impl Category {
    /// All categories in canonical order.
    pub const ALL: [Category; 6] = [
        Category::CodeQuality,
        Category::Documentation,
        Category::Activity,
        Category::Community,
        Category::Security,
        Category::BestPractices,
    ];

    /// Display attributes for this category.
    pub fn display(self) -> &'static CategoryDisplay {
        // CATEGORY_DISPLAY is laid out in `Category::ALL` order.
        &CATEGORY_DISPLAY[self as usize]
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        self.display().label
    }

    /// Serialized key.
    pub fn key(self) -> &'static str {
        self.display().key
    }

    /// Icon identifier.
    pub fn icon(self) -> &'static str {
        self.display().icon
    }
}

/// The full category display table.
pub fn category_table() -> &'static [CategoryDisplay] {
    &CATEGORY_DISPLAY
}

/// Six named sub-scores, each in 0-100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryScores {
    /// Code quality score.
    pub code_quality: u8,
    /// Documentation score.
    pub documentation: u8,
    /// Activity score.
    pub activity: u8,
    /// Community score.
    pub community: u8,
    /// Security score.
    pub security: u8,
    /// Best practices score.
    pub best_practices: u8,
}

impl CategoryScores {
    /// Score for a single category.
    pub fn get(&self, category: Category) -> u8 {
        match category {
            Category::CodeQuality => self.code_quality,
            Category::Documentation => self.documentation,
            Category::Activity => self.activity,
            Category::Community => self.community,
            Category::Security => self.security,
            Category::BestPractices => self.best_practices,
        }
    }

    /// Scores paired with their category, in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, u8)> + '_ {
        Category::ALL
            .into_iter()
            .map(move |category| (category, self.get(category)))
    }
}

/// Letter grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Grade {
    /// Top grade.
    #[serde(rename = "A")]
    A,
    /// Above average.
    #[serde(rename = "B+")]
    BPlus,
    /// Average.
    #[serde(rename = "B")]
    B,
    /// Below average.
    #[serde(rename = "C+")]
    CPlus,
}

impl Grade {
    /// Letter form of the grade.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::BPlus => "B+",
            Self::B => "B",
            Self::CPlus => "C+",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Roadmap rank bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Priority {
    /// Do first.
    High,
    /// Do next.
    Medium,
    /// Do eventually.
    Low,
}

/// Expected effect of a roadmap item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Impact {
    /// Large effect.
    High,
    /// Moderate effect.
    Medium,
    /// Small effect.
    Low,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        })
    }
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        })
    }
}

/// A recommended remediation action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RoadmapItem {
    /// Rank bucket.
    pub priority: Priority,
    /// Short title.
    pub title: String,
    /// What to do.
    pub description: String,
    /// Expected effect.
    pub impact: Impact,
}

/// Narrative statements about the repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Insights {
    /// What the repository does well.
    pub strengths: Vec<String>,
    /// What the repository should improve.
    pub improvements: Vec<String>,
}

/// Derived labels shown next to the scores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DisplayMetrics {
    /// Estimated commit cadence.
    pub commit_frequency_label: String,
    /// Estimated number of contributors, at least one.
    pub contributor_estimate: u64,
    /// Estimated issue response time.
    pub issue_response_label: String,
    /// Code complexity label.
    pub complexity_label: String,
}

/// The engine's output for one repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    /// Profile the report was derived from.
    pub repository: RepositoryProfile,
    /// Whether the profile is live data or the fallback.
    pub profile_source: ProfileSource,
    /// Aggregate score, 0-100.
    pub overall_score: u8,
    /// Letter grade.
    pub grade: Grade,
    /// Per-category scores.
    pub category_scores: CategoryScores,
    /// Strengths and improvements.
    pub insights: Insights,
    /// Ordered remediation roadmap.
    pub roadmap: Vec<RoadmapItem>,
    /// Derived display metrics.
    pub metrics: DisplayMetrics,
    /// Reference instant the report was computed against.
    pub generated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_table_follows_canonical_order() {
        for (index, category) in Category::ALL.into_iter().enumerate() {
            assert_eq!(category_table()[index].category, category);
            assert_eq!(category.display().category, category);
        }
        assert_eq!(Category::BestPractices.label(), "Best Practices");
        assert_eq!(Category::Documentation.icon(), "book-open");
    }

    #[test]
    fn display_keys_match_serialized_score_fields() {
        let scores = CategoryScores {
            code_quality: 1,
            documentation: 2,
            activity: 3,
            community: 4,
            security: 5,
            best_practices: 6,
        };
        let value = serde_json::to_value(scores).expect("serialize scores");
        for (category, score) in scores.iter() {
            assert_eq!(value[category.key()], u64::from(score));
        }
    }

    #[test]
    fn grade_serializes_as_letter() {
        assert_eq!(
            serde_json::to_string(&Grade::BPlus).expect("grade json"),
            "\"B+\""
        );
        assert_eq!(Grade::CPlus.to_string(), "C+");
        let parsed: Grade = serde_json::from_str("\"A\"").expect("parse grade");
        assert_eq!(parsed, Grade::A);
    }

    #[test]
    fn display_metrics_use_label_keys() {
        let metrics = DisplayMetrics {
            commit_frequency_label: "5-10 per week".to_string(),
            contributor_estimate: 2,
            issue_response_label: "< 24 hours".to_string(),
            complexity_label: "Medium".to_string(),
        };
        let value = serde_json::to_value(&metrics).expect("metrics json");
        assert_eq!(value["commitFrequencyLabel"], "5-10 per week");
        assert_eq!(value["contributorEstimate"], 2);
        assert_eq!(value["issueResponseLabel"], "< 24 hours");
        assert_eq!(value["complexityLabel"], "Medium");
    }
}
