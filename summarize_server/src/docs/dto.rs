use crate::{info, summarize};
use summarize_core::helpers::dto::{
    PaymentInstructions, PaymentRequired, PaymentUsed, SummarizeRequest, SummarizeResponse,
    SummaryStyle, WebhookQuery, WebhookResponse,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(title = "SummarizeAI x402", description = "Content summarization microservice with x402 payments"),
    paths(
        info::handler::info,
        info::handler::health,
        info::handler::pricing,
        summarize::handler::summarize,
        summarize::handler::summarize_webhook,
    ),
    components(schemas(
        info::dto::Info,
        info::dto::PaymentSummary,
        info::dto::Health,
        info::dto::Pricing,
        SummarizeRequest,
        SummarizeResponse,
        SummaryStyle,
        WebhookQuery,
        WebhookResponse,
        PaymentInstructions,
        PaymentRequired,
        PaymentUsed,
    ))
)]
pub struct ApiDoc;
