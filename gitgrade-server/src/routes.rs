//! HTTP handlers for GitGrade server.

use std::sync::Arc;

use actix_web::{HttpResponse, Responder, get, post, web};
use chrono::{DateTime, Utc};
use gitgrade_core::{
    AnalysisReport, ExportDocument, GitGradeError, MetadataSource, RawRepository, RepoSlug,
    analyze_from_source, assemble, category_table, export_file_name,
};
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

use crate::openapi::ApiDoc;

#[derive(Clone)]
/// Shared application state for handlers.
pub struct AppState {
    /// Where repository metadata is fetched from.
    pub metadata: Arc<dyn MetadataSource + Send + Sync>,
}

/// Optional reference instant for an analysis.
#[derive(Debug, Default, Deserialize)]
pub struct ClockQuery {
    /// RFC 3339 instant; the current time when absent.
    pub now: Option<DateTime<Utc>>,
}

impl ClockQuery {
    fn resolve(&self) -> DateTime<Utc> {
        self.now.unwrap_or_else(Utc::now)
    }
}

/// Error response payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message.
    pub message: String,
}

/// One row of the category display table.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRow {
    /// Key used in `categoryScores`.
    pub key: String,
    /// Human-readable label.
    pub label: String,
    /// Compact label.
    pub short_label: String,
    /// Icon identifier.
    pub icon: String,
}

fn error_response(err: &GitGradeError) -> HttpResponse {
    let body = ErrorResponse {
        message: err.to_string(),
    };
    match err {
        GitGradeError::InvalidInput(_) => HttpResponse::BadRequest().json(body),
        GitGradeError::Retrieval(_) => HttpResponse::BadGateway().json(body),
        GitGradeError::Serialization(_) => HttpResponse::InternalServerError().json(body),
    }
}

async fn fetch_report(
    state: &AppState,
    owner: String,
    repo: String,
    now: DateTime<Utc>,
) -> Result<AnalysisReport, HttpResponse> {
    let slug = RepoSlug::new(owner, repo).map_err(|err| error_response(&err))?;
    let metadata = state.metadata.clone();
    let result = web::block(move || analyze_from_source(metadata.as_ref(), &slug, now))
        .await
        .map_err(|err| {
            HttpResponse::InternalServerError().json(ErrorResponse {
                message: format!("analysis task failed: {err}"),
            })
        })?;
    result.map_err(|err| {
        log::warn!("analysis failed: {err}");
        error_response(&err)
    })
}

#[utoipa::path(
    post,
    path = "/analyze",
    request_body = RawRepository,
    params(
        ("now" = Option<String>, Query, description = "RFC 3339 reference instant")
    ),
    responses(
        (status = 200, description = "Analysis report", body = AnalysisReport),
        (status = 400, description = "Malformed metadata", body = ErrorResponse)
    ),
    tag = "analysis"
)]
#[post("/api/analyze")]
/// Analyze a raw repository metadata record.
pub async fn analyze(
    query: web::Query<ClockQuery>,
    payload: web::Json<serde_json::Value>,
) -> impl Responder {
    match RawRepository::from_value(payload.into_inner()) {
        Ok(raw) => HttpResponse::Ok().json(assemble(raw, query.resolve())),
        Err(err) => error_response(&err),
    }
}

#[utoipa::path(
    get,
    path = "/repos/{owner}/{repo}/report",
    params(
        ("owner" = String, Path, description = "Repository owner"),
        ("repo" = String, Path, description = "Repository name"),
        ("now" = Option<String>, Query, description = "RFC 3339 reference instant")
    ),
    responses(
        (status = 200, description = "Analysis report", body = AnalysisReport),
        (status = 400, description = "Invalid repository reference", body = ErrorResponse)
    ),
    tag = "analysis"
)]
#[get("/api/repos/{owner}/{repo}/report")]
/// Fetch metadata for a GitHub repository and analyze it.
pub async fn repository_report(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    query: web::Query<ClockQuery>,
) -> impl Responder {
    let (owner, repo) = path.into_inner();
    match fetch_report(&state, owner, repo, query.resolve()).await {
        Ok(report) => HttpResponse::Ok().json(report),
        Err(response) => response,
    }
}

#[utoipa::path(
    get,
    path = "/repos/{owner}/{repo}/export",
    params(
        ("owner" = String, Path, description = "Repository owner"),
        ("repo" = String, Path, description = "Repository name"),
        ("now" = Option<String>, Query, description = "RFC 3339 reference instant")
    ),
    responses(
        (status = 200, description = "Export document", body = ExportDocument),
        (status = 400, description = "Invalid repository reference", body = ErrorResponse)
    ),
    tag = "analysis"
)]
#[get("/api/repos/{owner}/{repo}/export")]
/// Download the flat export document for a GitHub repository.
pub async fn repository_export(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    query: web::Query<ClockQuery>,
) -> impl Responder {
    let (owner, repo) = path.into_inner();
    let report = match fetch_report(&state, owner, repo, query.resolve()).await {
        Ok(report) => report,
        Err(response) => return response,
    };
    let file_name = export_file_name(
        &report.repository.owner,
        &report.repository.name,
        report.generated_at,
    );
    HttpResponse::Ok()
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{file_name}\""),
        ))
        .json(ExportDocument::from(&report))
}

#[utoipa::path(
    get,
    path = "/categories",
    responses(
        (status = 200, description = "Category display table", body = [CategoryRow])
    ),
    tag = "analysis"
)]
#[get("/api/categories")]
/// List the scored categories with their display attributes.
pub async fn categories() -> impl Responder {
    let rows: Vec<CategoryRow> = category_table()
        .iter()
        .map(|row| CategoryRow {
            key: row.key.to_string(),
            label: row.label.to_string(),
            short_label: row.short_label.to_string(),
            icon: row.icon.to_string(),
        })
        .collect();
    HttpResponse::Ok().json(rows)
}

#[utoipa::path(
    get,
    path = "/openapi.json",
    responses(
        (status = 200, description = "OpenAPI document", body = serde_json::Value)
    ),
    tag = "system"
)]
#[get("/api/openapi.json")]
/// Serve the OpenAPI document.
pub async fn openapi_json() -> impl Responder {
    HttpResponse::Ok().json(ApiDoc::openapi())
}
