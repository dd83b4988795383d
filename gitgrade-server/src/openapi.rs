//! OpenAPI specification for GitGrade server.

use utoipa::OpenApi;

use gitgrade_core::{
    AnalysisReport, Category, CategoryScores, DisplayMetrics, ExportDocument, Grade, Impact,
    Insights, Priority, ProfileSource, RawLicense, RawOwner, RawRepository, RepositoryProfile,
    RoadmapItem,
};

use crate::routes::{CategoryRow, ErrorResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::analyze,
        crate::routes::repository_report,
        crate::routes::repository_export,
        crate::routes::categories,
        crate::routes::openapi_json
    ),
    components(
        schemas(
            AnalysisReport,
            RepositoryProfile,
            ProfileSource,
            Category,
            CategoryScores,
            Grade,
            Insights,
            RoadmapItem,
            Priority,
            Impact,
            DisplayMetrics,
            ExportDocument,
            RawRepository,
            RawOwner,
            RawLicense,
            CategoryRow,
            ErrorResponse
        )
    ),
    tags(
        (name = "analysis", description = "Repository quality analysis"),
        (name = "system", description = "System endpoints")
    )
)]
/// OpenAPI specification for the GitGrade server.
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::ApiDoc;
    use utoipa::OpenApi;

    #[test]
    fn openapi_includes_expected_paths() {
        let doc = ApiDoc::openapi();
        let paths = doc.paths.paths;

        assert!(paths.contains_key("/analyze"));
        assert!(paths.contains_key("/repos/{owner}/{repo}/report"));
        assert!(paths.contains_key("/repos/{owner}/{repo}/export"));
        assert!(paths.contains_key("/categories"));
        assert!(paths.contains_key("/openapi.json"));
    }

    #[test]
    fn openapi_registers_report_schemas() {
        let doc = ApiDoc::openapi();
        let schemas = doc.components.expect("components").schemas;
        for name in ["AnalysisReport", "ExportDocument", "RawRepository", "Grade"] {
            assert!(schemas.contains_key(name), "missing schema {name}");
        }
    }
}
