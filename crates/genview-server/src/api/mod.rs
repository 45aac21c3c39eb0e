//! HTTP routes
//!
//! All artifact access is blocking file IO, so every handler moves its work
//! onto the blocking pool. Artifacts are re-read on each request; only the
//! manifest is loaded once at startup.

pub mod response;

use crate::config::Config;
use crate::dashboard::{self, image_mime, media_url, HtmlPage, RenderOptions};
use crate::error::{AppError, AppResult};
use crate::middleware;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use genview_ingest::assembly::{self, AssemblyStats, ASSEMBLY_COLUMNS};
use genview_ingest::blast::{BlastHit, BLAST_COLUMNS};
use genview_ingest::lengths::LengthDistribution;
use genview_ingest::reports::{self, QcReport, QcStage};
use genview_ingest::Project;
use response::ApiResponse;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tower_http::compression::CompressionLayer;

/// Route prefix for data-dir files referenced by the dashboard
pub const MEDIA_PREFIX: &str = "/media";

#[derive(Clone)]
pub struct AppState {
    pub project: Arc<Project>,
}

impl AppState {
    pub fn new(project: Project) -> Self {
        Self {
            project: Arc::new(project),
        }
    }
}

/// Run blocking artifact work against the shared project
async fn with_project<T, F>(state: &AppState, work: F) -> AppResult<T>
where
    T: Send + 'static,
    F: FnOnce(&Project) -> AppResult<T> + Send + 'static,
{
    let project = Arc::clone(&state.project);
    tokio::task::spawn_blocking(move || work(&project)).await?
}

/// Routes without the middleware stack
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(dashboard_page))
        .route("/health", get(health_check))
        .route("/api/v1/gene-lengths", get(gene_lengths))
        .route("/api/v1/blast", get(blast_hits))
        .route("/api/v1/assemblies", get(assemblies))
        .route("/api/v1/reports/:stage", get(list_reports))
        .route("/reports/quast", get(quast_report))
        .route("/reports/:stage/:name", get(qc_report))
        .route(&format!("{MEDIA_PREFIX}/*path"), get(media_file))
        .fallback(not_found)
        .with_state(state)
}

/// Full application router
pub fn create_router(state: AppState, config: &Config) -> Router {
    routes(state)
        .layer(CompressionLayer::new())
        .layer(middleware::tracing_layer())
        .layer(middleware::cors_layer(&config.cors))
}

async fn dashboard_page(State(state): State<AppState>) -> AppResult<Html<String>> {
    let page = with_project(&state, |project| {
        let mut page = HtmlPage::new().with_timestamp(chrono::Utc::now());
        let options = RenderOptions::linked(MEDIA_PREFIX);
        let outcome = dashboard::render_dashboard_with(project, &options, &mut page);
        if !outcome.is_clean() {
            tracing::info!(warnings = outcome.warnings.len(), "Dashboard rendered with warnings");
        }
        Ok(page.finish())
    })
    .await?;

    Ok(Html(page))
}

async fn health_check(State(state): State<AppState>) -> Response {
    let data_dir = state.project.data_dir();
    if data_dir.is_dir() {
        (
            StatusCode::OK,
            Json(json!({
                "status": "healthy",
                "data_dir": data_dir.display().to_string(),
            })),
        )
            .into_response()
    } else {
        tracing::error!(data_dir = %data_dir.display(), "Data directory is unavailable");
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "unhealthy",
                "data_dir": data_dir.display().to_string(),
            })),
        )
            .into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct GeneLengthsResponse {
    pub source: String,
    #[serde(flatten)]
    pub distribution: LengthDistribution,
}

async fn gene_lengths(State(state): State<AppState>) -> AppResult<ApiResponse<GeneLengthsResponse>> {
    let data = with_project(&state, |project| {
        let distribution = project.gene_length_distribution()?;
        Ok(GeneLengthsResponse {
            source: project.predictions_path().display().to_string(),
            distribution,
        })
    })
    .await?;

    let meta = json!({ "count": data.distribution.kept.len() });
    Ok(ApiResponse::success_with_meta(data, meta))
}

#[derive(Debug, Serialize)]
pub struct BlastResponse {
    pub columns: Vec<&'static str>,
    pub hits: Vec<BlastHit>,
}

async fn blast_hits(State(state): State<AppState>) -> AppResult<ApiResponse<BlastResponse>> {
    let hits = with_project(&state, |project| Ok(project.blast_hits()?)).await?;

    let meta = json!({ "count": hits.len() });
    Ok(ApiResponse::success_with_meta(
        BlastResponse {
            columns: BLAST_COLUMNS.to_vec(),
            hits,
        },
        meta,
    ))
}

#[derive(Debug, Serialize)]
pub struct AssembliesResponse {
    pub columns: Vec<&'static str>,
    pub rows: Vec<AssemblyStats>,
    pub best: Option<String>,
}

async fn assemblies(State(state): State<AppState>) -> ApiResponse<AssembliesResponse> {
    let rows = state.project.assemblies();
    let best = assembly::best_assembly(&rows).map(|row| row.assembly.clone());

    ApiResponse::success(AssembliesResponse {
        columns: ASSEMBLY_COLUMNS.to_vec(),
        rows,
        best,
    })
}

fn parse_stage(raw: &str) -> AppResult<QcStage> {
    raw.parse::<QcStage>().map_err(AppError::BadRequest)
}

async fn list_reports(
    State(state): State<AppState>,
    Path(stage): Path<String>,
) -> AppResult<ApiResponse<Vec<QcReport>>> {
    let stage = parse_stage(&stage)?;
    let found = with_project(&state, move |project| Ok(project.reports(stage)?)).await?;

    let meta = json!({ "stage": stage.slug(), "count": found.len() });
    Ok(ApiResponse::success_with_meta(found, meta))
}

async fn qc_report(
    State(state): State<AppState>,
    Path((stage, name)): Path<(String, String)>,
) -> AppResult<Html<String>> {
    let stage = parse_stage(&stage)?;
    let html = with_project(&state, move |project| {
        let found = project.reports(stage)?;
        let report = reports::select_report(&found, Some(name.as_str())).ok_or_else(|| {
            AppError::NotFound(format!("No {} report named '{}'", stage.slug(), name))
        })?;
        Ok(reports::load_report_html(report)?)
    })
    .await?;

    Ok(Html(html))
}

async fn quast_report(State(state): State<AppState>) -> AppResult<Html<String>> {
    let html = with_project(&state, |project| {
        let content = project.quast_report()?;
        Ok(reports::wrap_with_white_background(&content))
    })
    .await?;

    Ok(Html(html))
}

/// Serve an image listed in the manifest; nothing else in the data dir is reachable
async fn media_file(
    State(state): State<AppState>,
    Path(path): Path<String>,
) -> AppResult<Response> {
    let requested = format!("{MEDIA_PREFIX}/{path}");
    let file = state
        .project
        .image_entries()
        .iter()
        .find(|entry| media_url(MEDIA_PREFIX, entry) == requested)
        .map(|entry| state.project.image_path(entry))
        .ok_or_else(|| AppError::NotFound(format!("No image at '{path}'")))?;

    let bytes = match tokio::fs::read(&file).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(AppError::NotFound(format!("No image at '{path}'")));
        },
        Err(e) => return Err(e.into()),
    };

    Ok(([(header::CONTENT_TYPE, image_mime(&file).to_string())], bytes).into_response())
}

async fn not_found() -> AppError {
    AppError::NotFound("No such route".to_string())
}
