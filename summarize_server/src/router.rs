use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};

use crate::{
    docs::{dto::ApiDoc, handler::api_docs},
    info::handler::{health, info, pricing},
    middlewares::handler::payment_gate,
    state::ServerState,
    summarize::handler::{summarize, summarize_webhook},
};

pub fn router(state: Arc<ServerState>) -> Router {
    let doc = ApiDoc::openapi();

    Router::new()
        .merge(Redoc::with_url("/docs", doc))
        .route("/", get(info))
        .route("/health", get(health))
        .route("/pricing", get(pricing))
        .route("/openapi.json", get(api_docs))
        .route("/summarize", post(summarize))
        .route("/summarize/webhook", post(summarize_webhook))
        .layer(middleware::from_fn_with_state(state.clone(), payment_gate))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{HeaderMap, Request, StatusCode},
    };
    use serde_json::{Value, json};
    use std::time::Duration;
    use summarize_core::{
        fetcher::handler::Fetcher,
        helpers::config::PaymentConfig,
        payments::{dto::RetentionPolicy, ledger::PaymentLedger},
        summarizer::handler::Summarizer,
    };
    use tower::ServiceExt;

    use crate::middlewares::handler::PAYMENT_HEADER;

    const ARTICLE: &str = "The city council approved the new transit plan on Monday evening. \
        Short. \
        Buses will run every ten minutes on the main corridors starting next spring. \
        The transit plan also adds protected bike lanes along the river.";

    fn test_state() -> Arc<ServerState> {
        Arc::new(ServerState::from((
            PaymentConfig::default(),
            PaymentLedger::new(RetentionPolicy::unbounded()),
            Fetcher::new(Duration::from_secs(5)).unwrap(),
            Summarizer::extractive_only(),
        )))
    }

    fn post_json(uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json");
        if let Some(token) = token {
            builder = builder.header(PAYMENT_HEADER, token);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, HeaderMap, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, headers, body)
    }

    #[tokio::test]
    async fn test_allow_listed_paths_bypass_the_gate() {
        let app = router(test_state());

        for path in ["/", "/health", "/pricing", "/docs", "/openapi.json"] {
            let (status, _, _) = send(app.clone(), get_request(path)).await;
            assert_eq!(status, StatusCode::OK, "{} should not be gated", path);
        }
    }

    #[tokio::test]
    async fn test_descriptors() {
        let app = router(test_state());

        let (_, _, info) = send(app.clone(), get_request("/")).await;
        assert_eq!(info["service"], "SummarizeAI x402");
        assert_eq!(info["payment"]["type"], "x402");
        assert!(info["endpoints"]["POST /summarize"].is_string());

        let (_, _, pricing) = send(app.clone(), get_request("/pricing")).await;
        assert_eq!(pricing["endpoint"], "/summarize");
        assert_eq!(pricing["price_wei"], 33333333333333u64);
        assert_eq!(pricing["network"], "base");

        let (_, _, health) = send(app, get_request("/health")).await;
        assert_eq!(health, json!({"status": "healthy", "payments_processed": 0}));
    }

    #[tokio::test]
    async fn test_missing_payment_header() {
        let app = router(test_state());

        let (status, headers, body) =
            send(app, post_json("/summarize", None, json!({"text": ARTICLE}))).await;

        assert_eq!(status, StatusCode::PAYMENT_REQUIRED);
        assert_eq!(body["error"], "Payment Required");
        assert_eq!(body["x402"]["receiver"], PaymentConfig::default().receiver);
        assert_eq!(body["x402"]["amount"], "33333333333333");
        assert_eq!(body["x402"]["currency"], "wei");
        assert_eq!(body["x402"]["network"], "base");
        assert_eq!(body["x402"]["description"], "Content summarization (/summarize)");
        assert_eq!(headers["x-402-amount"], "33333333333333");
        assert_eq!(
            headers["x-402-receiver"],
            PaymentConfig::default().receiver.as_str()
        );
    }

    #[tokio::test]
    async fn test_unknown_paths_are_gated() {
        let app = router(test_state());
        let (status, _, _) = send(app, get_request("/admin")).await;
        assert_eq!(status, StatusCode::PAYMENT_REQUIRED);
    }

    #[tokio::test]
    async fn test_blank_payment_header_counts_as_missing() {
        let state = test_state();
        let app = router(state.clone());

        for token in ["", "", "   "] {
            let (status, headers, body) = send(
                app.clone(),
                post_json("/summarize", Some(token), json!({"text": ARTICLE})),
            )
            .await;

            assert_eq!(status, StatusCode::PAYMENT_REQUIRED);
            assert_eq!(body["error"], "Payment Required");
            assert_eq!(body["x402"]["amount"], "33333333333333");
            assert_eq!(headers["x-402-amount"], "33333333333333");
            assert!(headers.contains_key("x-402-receiver"));
        }

        assert!(state.ledger().is_empty());
    }

    #[tokio::test]
    async fn test_token_is_single_use() {
        let state = test_state();
        let app = router(state.clone());
        let body = json!({"text": ARTICLE, "style": "bullets"});

        let (status, _, first) =
            send(app.clone(), post_json("/summarize", Some("tx-1"), body.clone())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            first["summary"],
            "• The city council approved the new transit plan on Monday evening\n\
             • Buses will run every ten minutes on the main corridors starting next spring\n\
             • The transit plan also adds protected bike lanes along the river"
        );
        assert_eq!(first["cost"], "33333333333333 wei (0.1 ETH)");

        let (status, _, second) =
            send(app.clone(), post_json("/summarize", Some("tx-1"), body)).await;
        assert_eq!(status, StatusCode::PAYMENT_REQUIRED);
        assert_eq!(second, json!({"error": "Payment already used"}));

        let (_, _, health) = send(app, get_request("/health")).await;
        assert_eq!(health["payments_processed"], 1);
        assert_eq!(state.ledger().len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_requests_with_same_token() {
        let app = router(test_state());

        let requests = (0..16).map(|_| {
            let app = app.clone();
            tokio::spawn(async move {
                send(
                    app,
                    post_json("/summarize", Some("race-token"), json!({"text": ARTICLE})),
                )
                .await
                .0
            })
        });

        let statuses: Vec<StatusCode> = futures::future::join_all(requests)
            .await
            .into_iter()
            .map(|r| r.unwrap())
            .collect();

        let admitted = statuses.iter().filter(|s| **s == StatusCode::OK).count();
        let rejected = statuses
            .iter()
            .filter(|s| **s == StatusCode::PAYMENT_REQUIRED)
            .count();

        assert_eq!(admitted, 1);
        assert_eq!(rejected, 15);
    }

    #[tokio::test]
    async fn test_summary_lengths_and_budget() {
        let app = router(test_state());

        let (status, _, body) = send(
            app,
            post_json(
                "/summarize",
                Some("tx-budget"),
                json!({"text": ARTICLE, "max_length": 10}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let summary = body["summary"].as_str().unwrap();
        assert!(summary.chars().count() <= 50);
        assert_eq!(body["summary_length"], summary.chars().count());
        assert_eq!(body["original_length"], ARTICLE.chars().count());
    }

    #[tokio::test]
    async fn test_short_content_is_rejected() {
        let app = router(test_state());

        let (status, _, body) = send(
            app,
            post_json(
                "/summarize",
                Some("tx-short"),
                json!({"text": "This is a sentence. Short. Another decently long sentence here."}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Content too short to summarize");
        assert_eq!(body["status"], 400);
    }

    #[tokio::test]
    async fn test_missing_content_is_rejected() {
        let app = router(test_state());

        let (status, _, body) = send(
            app,
            post_json("/summarize", Some("tx-empty"), json!({"text": ""})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Provide either 'url' or 'text'");
    }

    #[tokio::test]
    async fn test_malformed_url_is_rejected() {
        let app = router(test_state());

        let (status, _, body) = send(
            app,
            post_json("/summarize", Some("tx-url"), json!({"url": "not a url"})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(
            body["message"]
                .as_str()
                .unwrap()
                .starts_with("Failed to fetch URL:")
        );
    }

    #[tokio::test]
    async fn test_unknown_style_is_a_bad_request() {
        let app = router(test_state());

        let (status, _, _) = send(
            app,
            post_json(
                "/summarize",
                Some("tx-style"),
                json!({"text": ARTICLE, "style": "haiku"}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_webhook_stub() {
        let app = router(test_state());

        let (status, _, body) = send(
            app.clone(),
            post_json(
                "/summarize/webhook?webhook_url=https%3A%2F%2Fexample.com%2Fhook",
                Some("tx-hook"),
                json!({"text": ARTICLE}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "queued");
        assert_eq!(body["job_id"].as_str().unwrap().len(), 12);

        let (status, _, _) = send(
            app,
            post_json("/summarize/webhook", Some("tx-hook-2"), json!({"text": ARTICLE})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
