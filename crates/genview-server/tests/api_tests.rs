//! Route tests against the in-process router
//!
//! These tests verify:
//! - JSON endpoints return the standard envelope
//! - Missing artifacts map to 404 and malformed ones to 422
//! - Reports and manifest images are served from the data directory

mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use common::Fixture;
use genview_server::api::{self, AppState};
use genview_server::config::Config;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

fn app(fixture: &Fixture) -> Router {
    api::routes(AppState::new(fixture.project()))
}

async fn get(app: Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let (status, body) = get(app, uri).await;
    (status, serde_json::from_str(&body).unwrap())
}

#[tokio::test]
async fn test_health() {
    let fixture = Fixture::empty();
    let (status, body) = get_json(app(&fixture), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["data_dir"], fixture.path().display().to_string());
}

#[tokio::test]
async fn test_gene_lengths_are_filtered() {
    let fixture = Fixture::complete();
    let (status, body) = get_json(app(&fixture), "/api/v1/gene-lengths").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["kept"], serde_json::json!([300, 251]));
    assert_eq!(body["data"]["excluded"], 1);
    assert_eq!(body["data"]["threshold"], 100_000);
    assert_eq!(body["data"]["summary"]["count"], 2);
    assert_eq!(body["meta"]["count"], 2);
}

#[tokio::test]
async fn test_gene_lengths_missing_file_is_404() {
    let fixture = Fixture::empty();
    let (status, body) = get_json(app(&fixture), "/api/v1/gene-lengths").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("was not found"));
}

#[tokio::test]
async fn test_gene_lengths_malformed_file_is_422() {
    let fixture = Fixture::empty().with_file("run_tres.predict", "CDS 1\n");
    let (status, body) = get_json(app(&fixture), "/api/v1/gene-lengths").await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "PARSE_ERROR");
}

#[tokio::test]
async fn test_blast_hits() {
    let fixture = Fixture::complete();
    let (status, body) = get_json(app(&fixture), "/api/v1/blast").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["columns"].as_array().unwrap().len(), 8);
    assert_eq!(body["data"]["hits"][0]["query_id"], "scaffold1_orf00001");
    assert_eq!(body["data"]["hits"][1]["alignment_length"], 1101);
    assert_eq!(body["meta"]["count"], 2);
}

#[tokio::test]
async fn test_assemblies_default_table() {
    let fixture = Fixture::empty();
    let (status, body) = get_json(app(&fixture), "/api/v1/assemblies").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["rows"].as_array().unwrap().len(), 3);
    assert_eq!(body["data"]["best"], "Newbler with Long Reads");
}

#[tokio::test]
async fn test_list_reports_by_stage() {
    let fixture = Fixture::complete();

    let (status, body) = get_json(app(&fixture), "/api/v1/reports/before").await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["SRR1_fastqc.html", "SRR2_fastqc.html"]);
    assert_eq!(body["meta"]["stage"], "before");

    let (status, body) = get_json(app(&fixture), "/api/v1/reports/during").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_single_report() {
    let fixture = Fixture::complete();

    let (status, body) = get(app(&fixture), "/reports/after/SRR1_trimmed_fastqc.html").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "<h1>after</h1>");

    let (status, _) = get(app(&fixture), "/reports/after/missing.html").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_quast_report_is_wrapped() {
    let fixture = Fixture::complete();
    let (status, body) = get(app(&fixture), "/reports/quast").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("background-color: white !important;"));
    assert!(body.contains("<h1>QUAST summary</h1>"));

    let fixture = Fixture::empty();
    let (status, _) = get(app(&fixture), "/reports/quast").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_media_served_from_data_dir() {
    let fixture = Fixture::complete();
    let (status, body) = get(app(&fixture), "/media/2.jpg").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "jpg-two");

    let (status, _) = get(app(&fixture), "/media/4.jpg").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_media_only_serves_manifest_images() {
    let fixture = Fixture::complete()
        .with_file("genview.yml", "max_gene_length: 100000\n")
        .with_file(".env", "SECRET=1\n")
        .with_file("4.jpg", "jpg-four");

    let (status, body) = get(app(&fixture), "/media/1.jpg").await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body.is_empty());

    for uri in [
        "/media/genview.yml",
        "/media/.env",
        "/media/4.jpg",
        "/media/run_tres.predict",
        "/media/../1.jpg",
    ] {
        let (status, body) = get(app(&fixture), uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert!(!body.contains("SECRET"), "{uri}");
    }
}

#[tokio::test]
async fn test_media_content_type() {
    let fixture = Fixture::complete();
    let response = app(&fixture)
        .oneshot(Request::builder().uri("/media/3.jpg").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "image/jpeg");
}

#[tokio::test]
async fn test_dashboard_page_links_media() {
    let fixture = Fixture::complete().without("sorted_file.tsv");
    let response = app(&fixture)
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
    assert!(content_type.starts_with("text/html"));

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("src=\"/media/1.jpg\""));
    assert!(html.contains("sorted_file.tsv&#39; was not found."));
    assert!(html.contains("<footer>Generated "));
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let fixture = Fixture::empty();
    let (status, body) = get_json(app(&fixture), "/api/v2/nothing").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_full_router_with_middleware() {
    let fixture = Fixture::complete();
    let data_dir = fixture.path().to_string_lossy().to_string();
    let config = Config::from_lookup(|key| match key {
        "GENVIEW_DATA_DIR" => Some(data_dir.clone()),
        "CORS_ALLOWED_ORIGINS" => Some("http://localhost:3000".to_string()),
        _ => None,
    });
    config.validate().unwrap();

    let router = api::create_router(AppState::new(fixture.project()), &config);
    let response = router
        .oneshot(
            Request::builder()
                .uri("/api/v1/assemblies")
                .header(header::ORIGIN, "http://localhost:3000")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://localhost:3000"
    );
}
