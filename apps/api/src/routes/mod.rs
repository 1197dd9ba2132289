pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::council::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/sectors", get(handlers::handle_list_sectors))
        .route("/api/v1/review", post(handlers::handle_review))
        .route(
            "/api/v1/review/report",
            post(handlers::handle_report_download),
        )
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::council::catalog::Catalog;
    use crate::llm_client::testing::ScriptedClient;
    use crate::llm_client::CompletionClient;

    const BOUNDARY: &str = "unleash-test-boundary";

    fn state_with(llm: Option<Arc<dyn CompletionClient>>) -> AppState {
        AppState {
            llm,
            catalog: Arc::new(Catalog::builtin()),
            config: Config::for_tests(),
        }
    }

    fn stub() -> Arc<dyn CompletionClient> {
        Arc::new(ScriptedClient::new())
    }

    struct Part {
        name: &'static str,
        filename: Option<&'static str>,
        content: Vec<u8>,
    }

    fn text(name: &'static str, value: &str) -> Part {
        Part {
            name,
            filename: None,
            content: value.as_bytes().to_vec(),
        }
    }

    fn file(name: &'static str, filename: &'static str, content: &[u8]) -> Part {
        Part {
            name,
            filename: Some(filename),
            content: content.to_vec(),
        }
    }

    fn multipart_body(parts: &[Part]) -> Vec<u8> {
        let mut body = Vec::new();
        for part in parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            let disposition = match part.filename {
                Some(file) => format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{file}\"\r\n\
                     Content-Type: application/pdf\r\n\r\n",
                    part.name
                ),
                None => format!(
                    "Content-Disposition: form-data; name=\"{}\"\r\n\r\n",
                    part.name
                ),
            };
            body.extend_from_slice(disposition.as_bytes());
            body.extend_from_slice(&part.content);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn form_request(uri: &str, parts: &[Part]) -> Request<Body> {
        Request::post(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(multipart_body(parts)))
            .unwrap()
    }

    async fn read_json(response: axum::response::Response) -> Value {
        let body = to_bytes(response.into_body(), 4 * 1024 * 1024).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_health_reports_ok() {
        let response = build_router(state_with(None))
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json(response).await;
        assert_eq!(payload["status"], "ok");
        assert_eq!(payload["service"], "unleash-api");
    }

    #[tokio::test]
    async fn test_sectors_are_listed_in_declared_order() {
        let response = build_router(state_with(None))
            .oneshot(Request::get("/api/v1/sectors").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json(response).await;
        let sectors = payload["sectors"].as_array().unwrap();
        assert_eq!(sectors.len(), 7);
        assert_eq!(sectors[0]["name"], "Technology");
        assert_eq!(sectors[6]["name"], "Creative");
        assert_eq!(payload["questions"].as_array().unwrap().len(), 7);
    }

    #[tokio::test]
    async fn test_review_runs_full_council_with_pasted_cv() {
        let client = Arc::new(ScriptedClient::new());
        let llm: Arc<dyn CompletionClient> = client.clone();
        let router = build_router(state_with(Some(llm)));

        let request = form_request(
            "/api/v1/review",
            &[
                text("sector", "Technology"),
                text("cv_text", "Experienced backend engineer..."),
                text("linkedin_text", ""),
            ],
        );
        let response = router.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(client.call_count(), 14);

        let payload = read_json(response).await;
        assert_eq!(payload["sector"], "Technology");
        assert_eq!(payload["feedback"].as_array().unwrap().len(), 6);
        assert_eq!(payload["feedback"][0]["heading"], "CEO");
        assert_eq!(payload["questions"].as_array().unwrap().len(), 7);
        assert!(payload["linkedin_analysis"].is_null());
        assert_eq!(payload["model_calls"], 14);
        assert_eq!(payload["report_file_name"], "unleash_career_report.txt");
        assert!(payload["report"]
            .as_str()
            .unwrap()
            .contains("\nFinal Recommendation:\n"));
    }

    #[tokio::test]
    async fn test_review_with_unreadable_cv_upload_is_missing_input() {
        let client = Arc::new(ScriptedClient::new());
        let llm: Arc<dyn CompletionClient> = client.clone();
        let router = build_router(state_with(Some(llm)));

        let request = form_request(
            "/api/v1/review",
            &[
                text("sector", "Finance"),
                file("cv", "cv.pdf", b"not really a pdf"),
            ],
        );
        let response = router.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let payload = read_json(response).await;
        assert_eq!(payload["error"]["code"], "MISSING_INPUT");
        assert_eq!(client.call_count(), 0);
    }

    #[tokio::test]
    async fn test_review_without_credential_is_refused() {
        let router = build_router(state_with(None));

        let request = form_request(
            "/api/v1/review",
            &[
                text("sector", "Finance"),
                text("cv_text", "Chartered accountant, 10 years"),
            ],
        );
        let response = router.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let payload = read_json(response).await;
        assert_eq!(payload["error"]["code"], "MISSING_CREDENTIAL");
    }

    #[tokio::test]
    async fn test_review_without_sector_is_validation_error() {
        let router = build_router(state_with(Some(stub())));

        let request = form_request("/api/v1/review", &[text("cv_text", "Some CV")]);
        let response = router.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let payload = read_json(response).await;
        assert_eq!(payload["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_review_without_sector_or_cv_is_missing_input() {
        let client = Arc::new(ScriptedClient::new());
        let llm: Arc<dyn CompletionClient> = client.clone();
        let router = build_router(state_with(Some(llm)));

        let request = form_request("/api/v1/review", &[text("linkedin_text", "hi")]);
        let response = router.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let payload = read_json(response).await;
        assert_eq!(payload["error"]["code"], "MISSING_INPUT");
        assert_eq!(client.call_count(), 0);
    }

    #[tokio::test]
    async fn test_review_without_sector_or_credential_is_refused() {
        let router = build_router(state_with(None));

        let request = form_request("/api/v1/review", &[text("cv_text", "Some CV")]);
        let response = router.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let payload = read_json(response).await;
        assert_eq!(payload["error"]["code"], "MISSING_CREDENTIAL");
    }

    #[tokio::test]
    async fn test_report_download_is_plain_text_attachment() {
        let router = build_router(state_with(Some(stub())));

        let request = form_request(
            "/api/v1/review/report",
            &[
                text("sector", "Creative"),
                text("cv_text", "Illustrator and animator"),
                text("linkedin_text", "Award-winning storyboard artist"),
            ],
        );
        let response = router.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; charset=utf-8"
        );
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"unleash_career_report.txt\""
        );

        let body = to_bytes(response.into_body(), 4 * 1024 * 1024).await.unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.starts_with("Creative Director:\n"));
        assert!(text.contains("\nLinkedIn Analysis:\n"));
        assert!(text.contains("Career Path:\nJunior (£25k–£35k)"));
    }
}
