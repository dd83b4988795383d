#![deny(missing_docs)]
//! GitGrade core library.
//!
//! This crate turns coarse repository metadata into a deterministic quality
//! report: category scores, an overall score and grade, narrative insights and
//! a remediation roadmap. It performs no I/O; callers pass the reference
//! instant explicitly.

pub mod assembler;
pub mod domain;
pub mod error;
pub mod grade;
pub mod insights;
pub mod profile;
pub mod report;
pub mod roadmap;
pub mod scoring;
pub mod source;

pub use assembler::{assemble, assemble_profile, display_metrics};
pub use domain::{
    AnalysisReport, Category, CategoryDisplay, CategoryScores, DisplayMetrics, Grade, Impact,
    Insights, Priority, ProfileSource, RepositoryProfile, RoadmapItem, category_table,
};
pub use error::{GitGradeError, Result};
pub use grade::{grade, overall_score};
pub use insights::insights;
pub use profile::{RawLicense, RawOwner, RawRepository, normalize};
pub use report::{ExportDocument, export_file_name, render_json, render_markdown};
pub use roadmap::roadmap;
pub use scoring::{is_recently_active, score};
pub use source::{
    FALLBACK_DESCRIPTION, MetadataSource, RepoSlug, analyze_from_source, fallback_profile,
    resolve_report,
};
