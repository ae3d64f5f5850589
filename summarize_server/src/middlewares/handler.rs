use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use summarize_core::{helpers::dto::PaymentInstructions, payments::dto::Admission};

use crate::{error::GateRejection, state::ServerState};

pub const PAYMENT_HEADER: &str = "X-402-Payment";

pub const UNGATED_PATHS: [&str; 5] = ["/", "/health", "/pricing", "/docs", "/openapi.json"];

pub fn is_ungated(path: &str) -> bool {
    UNGATED_PATHS.contains(&path)
}

pub async fn payment_gate(
    State(state): State<Arc<ServerState>>,
    req: Request,
    next: Next,
) -> Result<Response, GateRejection> {
    let path = req.uri().path().to_string();

    if is_ungated(&path) {
        return Ok(next.run(req).await);
    }

    let token = req
        .headers()
        .get(PAYMENT_HEADER)
        .and_then(|h| h.to_str().ok())
        .filter(|token| !token.trim().is_empty());

    let Some(token) = token else {
        log::debug!("Rejected {}: no payment header", path);
        let payment = state.payment();
        return Err(GateRejection::Missing(PaymentInstructions {
            receiver: payment.receiver.clone(),
            amount: payment.price_wei.to_string(),
            currency: payment.currency().to_string(),
            network: payment.network.clone(),
            description: format!("Content summarization ({})", path),
        }));
    };

    match state.ledger().admit(token, &path) {
        Admission::Admitted => Ok(next.run(req).await),
        Admission::AlreadyUsed => {
            log::debug!("Rejected {}: payment already used", path);
            Err(GateRejection::AlreadyUsed)
        }
    }
}
