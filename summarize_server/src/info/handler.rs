use std::{collections::BTreeMap, sync::Arc};

use axum::{Json, extract::State};

use crate::{
    info::dto::{Health, Info, PaymentSummary, Pricing},
    state::ServerState,
};

pub const SERVICE_NAME: &str = "SummarizeAI x402";

#[utoipa::path(
    get,
    path = "/",
    description = "Service descriptor",
    responses(
        (status = 200, description = "Success", body = Info),
    )
)]
pub async fn info(State(server_state): State<Arc<ServerState>>) -> Json<Info> {
    let payment = server_state.payment();

    let endpoints = BTreeMap::from([
        (
            "POST /summarize".to_string(),
            "Summarize URL or text content".to_string(),
        ),
        (
            "POST /summarize/webhook".to_string(),
            "Queue a summarization job with a webhook callback".to_string(),
        ),
        ("GET /health".to_string(), "Health check".to_string()),
        ("GET /pricing".to_string(), "Current pricing".to_string()),
    ]);

    Json(Info {
        service: SERVICE_NAME.to_string(),
        description: "Content summarization with automatic x402 payments".to_string(),
        endpoints,
        payment: PaymentSummary {
            kind: "x402".to_string(),
            receiver: payment.receiver.clone(),
            amount_per_request: payment.price_display.clone(),
            network: payment.network.clone(),
        },
    })
}

#[utoipa::path(
    get,
    path = "/health",
    description = "Health check",
    responses(
        (status = 200, description = "Success", body = Health),
    )
)]
pub async fn health(State(server_state): State<Arc<ServerState>>) -> Json<Health> {
    Json(Health {
        status: "healthy".to_string(),
        payments_processed: server_state.ledger().len(),
    })
}

#[utoipa::path(
    get,
    path = "/pricing",
    description = "Current pricing",
    responses(
        (status = 200, description = "Success", body = Pricing),
    )
)]
pub async fn pricing(State(server_state): State<Arc<ServerState>>) -> Json<Pricing> {
    let payment = server_state.payment();

    Json(Pricing {
        endpoint: "/summarize".to_string(),
        price: payment.price_display.clone(),
        price_wei: payment.price_wei,
        currency: "ETH".to_string(),
        network: payment.network.clone(),
        receiver: payment.receiver.clone(),
    })
}
