//! Report formatting utilities for GitGrade outputs.

use std::fmt::Write;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{AnalysisReport, CategoryScores, Grade, Insights, ProfileSource, RoadmapItem};

/// Flat JSON document offered for download.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    /// `owner/name` of the analyzed repository.
    pub repository: String,
    /// Letter grade.
    pub overall_grade: Grade,
    /// Aggregate score.
    pub overall_score: u8,
    /// Per-category scores.
    pub category_scores: CategoryScores,
    /// Strengths and improvements.
    pub summary: Insights,
    /// Ordered roadmap.
    pub roadmap: Vec<RoadmapItem>,
    /// RFC 3339 timestamp of the analysis.
    pub generated_at: String,
}

impl From<&AnalysisReport> for ExportDocument {
    fn from(report: &AnalysisReport) -> Self {
        Self {
            repository: report.repository.full_name(),
            overall_grade: report.grade,
            overall_score: report.overall_score,
            category_scores: report.category_scores,
            summary: report.insights.clone(),
            roadmap: report.roadmap.clone(),
            generated_at: report
                .generated_at
                .to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// File name used when saving an export document.
pub fn export_file_name(owner: &str, name: &str, at: DateTime<Utc>) -> String {
    format!(
        "gitgrade-report-{owner}-{name}-{}.json",
        at.timestamp_millis()
    )
}

/// Render any serializable report payload as JSON.
pub fn render_json<T: Serialize + ?Sized>(payload: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(payload)
}

/// Render a list of analysis reports as Markdown.
pub fn render_markdown(reports: &[AnalysisReport]) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "# GitGrade Report\n");
    for report in reports {
        let _ = writeln!(output, "## {}\n", report.repository.full_name());
        append_summary(&mut output, report);
        append_scores(&mut output, &report.category_scores);
        append_list(&mut output, "Strengths", &report.insights.strengths);
        append_list(&mut output, "Improvements", &report.insights.improvements);
        append_roadmap(&mut output, &report.roadmap);
        append_metrics(&mut output, report);
        let _ = writeln!(output);
    }
    output
}

fn append_summary(output: &mut String, report: &AnalysisReport) {
    let _ = writeln!(output, "- Grade: **{}**", report.grade);
    let _ = writeln!(output, "- Overall score: {}/100", report.overall_score);
    let _ = writeln!(output, "- Description: {}", report.repository.description);
    let _ = writeln!(
        output,
        "- Stars: {} | Forks: {} | Watchers: {} | Open issues: {}",
        report.repository.star_count,
        report.repository.fork_count,
        report.repository.watcher_count,
        report.repository.open_issue_count
    );
    if report.profile_source == ProfileSource::Fallback {
        let _ = writeln!(
            output,
            "- Note: metadata unavailable, scored against the fallback profile"
        );
    }
    let _ = writeln!(output);
}

fn append_scores(output: &mut String, scores: &CategoryScores) {
    let _ = writeln!(output, "### Category scores");
    let _ = writeln!(output, "| Category | Score |\n| --- | --- |");
    for (category, score) in scores.iter() {
        let _ = writeln!(output, "| {} | {score}/100 |", category.label());
    }
    let _ = writeln!(output);
}

fn append_list(output: &mut String, title: &str, items: &[String]) {
    let _ = writeln!(output, "### {title}");
    for item in items {
        let _ = writeln!(output, "- {item}");
    }
    let _ = writeln!(output);
}

fn append_roadmap(output: &mut String, roadmap: &[RoadmapItem]) {
    let _ = writeln!(output, "### Roadmap");
    for (index, item) in roadmap.iter().enumerate() {
        let _ = writeln!(
            output,
            "{}. **{}** ({} priority, {} impact): {}",
            index + 1,
            item.title,
            item.priority,
            item.impact,
            item.description
        );
    }
    let _ = writeln!(output);
}

fn append_metrics(output: &mut String, report: &AnalysisReport) {
    let metrics = &report.metrics;
    let _ = writeln!(output, "### Metrics");
    let _ = writeln!(output, "- Commit frequency: {}", metrics.commit_frequency_label);
    let _ = writeln!(output, "- Contributors: {}", metrics.contributor_estimate);
    let _ = writeln!(output, "- Issue response: {}", metrics.issue_response_label);
    let _ = writeln!(output, "- Complexity: {}", metrics.complexity_label);
}
