//! HTTP request handlers for the paystub API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, State, multipart::MultipartRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::models::Country;
use crate::pipeline::BatchRequest;

use super::auth::credentials_match;
use super::request::ProcessForm;
use super::response::{
    ApiError, ApiErrorResponse, CountryError, HealthResponse, ProcessResponse,
};
use super::state::AppState;

/// Largest accepted upload, in bytes.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/process", post(process_handler))
        .route("/health", get(health_handler))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}

/// Handler for GET /health.
async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}

/// Handler for POST /process.
///
/// Accepts a multipart upload, runs the batch on a blocking thread and
/// returns the delivery manifest.
async fn process_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing paystub upload");

    let multipart = match multipart {
        Ok(multipart) => multipart,
        Err(rejection) => {
            warn!(correlation_id = %correlation_id, error = %rejection, "Rejected upload body");
            return ApiErrorResponse::new(
                StatusCode::BAD_REQUEST,
                ApiError::malformed_multipart(rejection.body_text()),
            )
            .into_response();
        }
    };
    let form = match ProcessForm::from_multipart(multipart).await {
        Ok(form) => form,
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err.message, "Unreadable upload");
            return ApiErrorResponse::new(StatusCode::BAD_REQUEST, err).into_response();
        }
    };

    if !credentials_match(&state.config().config().auth, form.credentials.as_deref()) {
        warn!(correlation_id = %correlation_id, "Credentials rejected");
        return ApiErrorResponse::new(StatusCode::FORBIDDEN, ApiError::forbidden())
            .into_response();
    }

    let code = form.country.as_deref().unwrap_or(Country::DEFAULT_CODE);
    let country = match Country::from_code(code) {
        Ok(country) => country,
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Unknown country");
            return CountryError::default().into_response();
        }
    };

    let company = match form.company {
        Some(company) if !company.trim().is_empty() => company,
        Some(_) => {
            return ApiErrorResponse::new(
                StatusCode::BAD_REQUEST,
                ApiError::validation_error("company must not be blank"),
            )
            .into_response();
        }
        None => {
            return ApiErrorResponse::new(
                StatusCode::BAD_REQUEST,
                ApiError::missing_field("company"),
            )
            .into_response();
        }
    };
    let Some(csv) = form.file else {
        return ApiErrorResponse::new(StatusCode::BAD_REQUEST, ApiError::missing_field("file"))
            .into_response();
    };

    info!(
        correlation_id = %correlation_id,
        company = %company,
        country = country.code(),
        upload_bytes = csv.len(),
        "Upload accepted"
    );

    let processor = state.processor();
    let request = BatchRequest::new(country.locale(), company.clone(), csv);
    let start_time = Instant::now();
    let outcome = tokio::task::spawn_blocking(move || processor.process(request)).await;

    match outcome {
        Ok(Ok(sent)) => {
            info!(
                correlation_id = %correlation_id,
                company = %company,
                sent = sent.len(),
                duration_ms = start_time.elapsed().as_millis() as u64,
                "Paystub batch completed"
            );
            (
                StatusCode::OK,
                Json(ProcessResponse {
                    company,
                    country,
                    processed_at: Utc::now(),
                    sent,
                }),
            )
                .into_response()
        }
        Ok(Err(err)) => {
            warn!(
                correlation_id = %correlation_id,
                company = %company,
                error = %err,
                "Paystub batch failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
        Err(join_error) => {
            error!(
                correlation_id = %correlation_id,
                error = %join_error,
                "Paystub batch panicked"
            );
            ApiErrorResponse::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("INTERNAL_ERROR", "Batch processing did not complete"),
            )
            .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetResolver;
    use crate::config::ConfigLoader;
    use crate::dispatch::OutboxSink;
    use crate::pipeline::BatchProcessor;
    use crate::render::PdfRenderer;
    use axum::{
        body::Body,
        http::{Request, header},
    };
    use tempfile::TempDir;
    use tower::ServiceExt;

    const BOUNDARY: &str = "paystub-test-boundary";
    const CREDENTIALS: &str = "payroll+change-me";
    const CSV: &str = "full_name,email,position,health_discount_amount,social_discount_amount,taxes_discount_amount,other_discount_amount,gross_salary,gross_payment,net_payment,period\n\
        John Doe,john@x.com,Engineer,100,200,300,50,5000,4500,3850.00,2024-01\n\
        Jane Smith,jane@x.com,Manager,150,250,400,75,7000,6500,5625.00,2024-01\n";

    fn create_test_state(outbox: &TempDir) -> AppState {
        let config = ConfigLoader::load("./config/paystubs.yaml").expect("Failed to load config");
        let processor = BatchProcessor::new(
            AssetResolver::empty(),
            PdfRenderer::new(),
            OutboxSink::new(outbox.path(), "payroll@example.com"),
        );
        AppState::with_processor(config, processor)
    }

    /// Builds a multipart body; a field named `file` is sent as a CSV upload.
    fn multipart_body(fields: &[(&str, &str)]) -> String {
        let mut body = String::new();
        for (name, value) in fields {
            body.push_str(&format!("--{}\r\n", BOUNDARY));
            if *name == "file" {
                body.push_str(
                    "Content-Disposition: form-data; name=\"file\"; filename=\"payroll.csv\"\r\n\
                     Content-Type: text/csv\r\n\r\n",
                );
            } else {
                body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{}\"\r\n\r\n",
                    name
                ));
            }
            body.push_str(value);
            body.push_str("\r\n");
        }
        body.push_str(&format!("--{}--\r\n", BOUNDARY));
        body
    }

    fn process_request(fields: &[(&str, &str)]) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/process")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(multipart_body(fields)))
            .unwrap()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    fn outbox_pdf_count(outbox: &TempDir) -> usize {
        std::fs::read_dir(outbox.path())
            .map(|entries| {
                entries
                    .filter_map(Result::ok)
                    .filter(|e| e.path().extension().is_some_and(|ext| ext == "pdf"))
                    .count()
            })
            .unwrap_or(0)
    }

    #[tokio::test]
    async fn test_valid_upload_returns_manifest() {
        let outbox = TempDir::new().unwrap();
        let router = create_router(create_test_state(&outbox));

        let response = router
            .oneshot(process_request(&[
                ("country", "do"),
                ("credentials", CREDENTIALS),
                ("company", "Acme"),
                ("file", CSV),
            ]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let result: ProcessResponse = serde_json::from_value(body_json(response).await).unwrap();
        assert_eq!(result.company, "Acme");
        assert_eq!(result.country, Country::DominicanRepublic);
        assert_eq!(result.sent.len(), 2);
        assert_eq!(result.sent[0].email, "john@x.com");
        assert_eq!(result.sent[1].email, "jane@x.com");
        assert_eq!(outbox_pdf_count(&outbox), 2);
    }

    #[tokio::test]
    async fn test_country_defaults_to_do() {
        let outbox = TempDir::new().unwrap();
        let router = create_router(create_test_state(&outbox));

        let response = router
            .oneshot(process_request(&[
                ("credentials", CREDENTIALS),
                ("company", "Acme"),
                ("file", CSV),
            ]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["country"], "DO");
    }

    #[tokio::test]
    async fn test_usa_country_reports_us() {
        let outbox = TempDir::new().unwrap();
        let router = create_router(create_test_state(&outbox));

        let response = router
            .oneshot(process_request(&[
                ("country", "USA"),
                ("credentials", CREDENTIALS),
                ("company", "Acme"),
                ("file", CSV),
            ]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["country"], "US");
    }

    #[tokio::test]
    async fn test_wrong_credentials_return_403() {
        let outbox = TempDir::new().unwrap();
        let router = create_router(create_test_state(&outbox));

        let response = router
            .oneshot(process_request(&[
                ("country", "do"),
                ("credentials", "payroll+wrong"),
                ("company", "Acme"),
                ("file", CSV),
            ]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let error: ApiError = serde_json::from_value(body_json(response).await).unwrap();
        assert_eq!(error.code, "FORBIDDEN");
        assert_eq!(outbox_pdf_count(&outbox), 0);
    }

    #[tokio::test]
    async fn test_credentials_checked_before_country() {
        let outbox = TempDir::new().unwrap();
        let router = create_router(create_test_state(&outbox));

        let response = router
            .oneshot(process_request(&[("country", "invalid"), ("company", "Acme")]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_invalid_country_returns_400() {
        let outbox = TempDir::new().unwrap();
        let router = create_router(create_test_state(&outbox));

        let response = router
            .oneshot(process_request(&[
                ("country", "DO"),
                ("credentials", CREDENTIALS),
                ("company", "Acme"),
                ("file", CSV),
            ]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json, serde_json::json!({"error": "Invalid country option."}));
        assert_eq!(outbox_pdf_count(&outbox), 0);
    }

    #[tokio::test]
    async fn test_missing_file_returns_400() {
        let outbox = TempDir::new().unwrap();
        let router = create_router(create_test_state(&outbox));

        let response = router
            .oneshot(process_request(&[
                ("credentials", CREDENTIALS),
                ("company", "Acme"),
            ]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_value(body_json(response).await).unwrap();
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert!(error.message.contains("file"));
    }

    #[tokio::test]
    async fn test_missing_company_returns_400() {
        let outbox = TempDir::new().unwrap();
        let router = create_router(create_test_state(&outbox));

        let response = router
            .oneshot(process_request(&[("credentials", CREDENTIALS), ("file", CSV)]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_value(body_json(response).await).unwrap();
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert!(error.message.contains("company"));
    }

    #[tokio::test]
    async fn test_missing_column_returns_400_without_dispatch() {
        let outbox = TempDir::new().unwrap();
        let router = create_router(create_test_state(&outbox));
        let csv = "full_name,email\nJohn Doe,john@x.com\n";

        let response = router
            .oneshot(process_request(&[
                ("credentials", CREDENTIALS),
                ("company", "Acme"),
                ("file", csv),
            ]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_value(body_json(response).await).unwrap();
        assert_eq!(error.code, "MISSING_COLUMNS");
        assert!(error.message.contains("net_payment"));
        assert_eq!(outbox_pdf_count(&outbox), 0);
    }

    #[tokio::test]
    async fn test_non_multipart_body_returns_400() {
        let outbox = TempDir::new().unwrap();
        let router = create_router(create_test_state(&outbox));

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/process")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_value(body_json(response).await).unwrap();
        assert_eq!(error.code, "MALFORMED_MULTIPART");
    }

    #[tokio::test]
    async fn test_health_returns_ok() {
        let outbox = TempDir::new().unwrap();
        let router = create_router(create_test_state(&outbox));

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let health: HealthResponse = serde_json::from_value(body_json(response).await).unwrap();
        assert_eq!(health.status, "ok");
        assert_eq!(health.version, env!("CARGO_PKG_VERSION"));
    }
}
