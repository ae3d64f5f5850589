use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
};
use summarize_core::helpers::{
    dto::{
        ContentSource, SummarizeRequest, SummarizeResponse, WebhookQuery, WebhookResponse,
    },
    hash::new_job_id,
};

use crate::{error::ErrorServer, state::ServerState};

pub const MIN_CONTENT_CHARS: usize = 100;

#[utoipa::path(
    post,
    path = "/summarize",
    request_body = SummarizeRequest,
    description = "Summarize URL or text content",
    params(
        ("X-402-Payment" = String, Header, description = "Single-use payment token"),
    ),
    responses(
        (status = 200, description = "Success", body = SummarizeResponse),
        (status = 400, description = "Bad Request"),
        (status = 402, description = "Payment Required"),
    )
)]
pub async fn summarize(
    State(server_state): State<Arc<ServerState>>,
    payload: Result<Json<SummarizeRequest>, JsonRejection>,
) -> Result<Json<SummarizeResponse>, ErrorServer> {
    let Json(request) = payload.map_err(|e| ErrorServer::bad_request(e.body_text()))?;

    let content = resolve_content(&server_state, &request).await?;

    let summary = server_state
        .summarizer()
        .summarize(&content, request.max_length, request.style)
        .await;

    Ok(Json(SummarizeResponse {
        original_length: content.chars().count(),
        summary_length: summary.chars().count(),
        summary,
        cost: server_state.payment().cost(),
    }))
}

// TODO: dispatch to a job queue and POST the result to webhook_url.
#[utoipa::path(
    post,
    path = "/summarize/webhook",
    request_body = SummarizeRequest,
    description = "Submit a summarization job with a webhook callback",
    params(
        WebhookQuery,
        ("X-402-Payment" = String, Header, description = "Single-use payment token"),
    ),
    responses(
        (status = 200, description = "Queued", body = WebhookResponse),
        (status = 400, description = "Bad Request"),
        (status = 402, description = "Payment Required"),
    )
)]
pub async fn summarize_webhook(
    Query(query): Query<WebhookQuery>,
    payload: Result<Json<SummarizeRequest>, JsonRejection>,
) -> Result<Json<WebhookResponse>, ErrorServer> {
    let Json(request) = payload.map_err(|e| ErrorServer::bad_request(e.body_text()))?;

    let job_id = new_job_id();

    log::info!(
        "Queued summarization job {} ({} style) for webhook {}",
        job_id,
        request.style,
        query.webhook_url
    );

    Ok(Json(WebhookResponse {
        status: "queued".to_string(),
        job_id,
    }))
}

async fn resolve_content(
    server_state: &ServerState,
    request: &SummarizeRequest,
) -> Result<String, ErrorServer> {
    let content = match request.source() {
        Some(ContentSource::Url(url)) => {
            server_state.fetcher().fetch_text(url).await.map_err(|e| {
                log::warn!("Failed to fetch {}: {}", url, e);
                ErrorServer::from(e)
            })?
        }
        Some(ContentSource::Text(text)) => text.to_string(),
        None => return Err(ErrorServer::bad_request("Provide either 'url' or 'text'")),
    };

    if content.chars().count() < MIN_CONTENT_CHARS {
        return Err(ErrorServer::bad_request("Content too short to summarize"));
    }

    Ok(content)
}
