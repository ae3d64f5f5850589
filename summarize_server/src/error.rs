use axum::{
    Json,
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use summarize_core::{
    error::FetchError,
    helpers::dto::{PaymentInstructions, PaymentRequired, PaymentUsed},
};
use utoipa::ToResponse;

pub const RECEIVER_HEADER: &str = "x-402-receiver";
pub const AMOUNT_HEADER: &str = "x-402-amount";

#[derive(Debug, Serialize, ToResponse)]
pub struct ErrorServer {
    pub message: String,
    pub status: u16,
}

impl ErrorServer {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: StatusCode::BAD_REQUEST.into(),
        }
    }
}

impl std::fmt::Display for ErrorServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl IntoResponse for ErrorServer {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

impl From<FetchError> for ErrorServer {
    fn from(e: FetchError) -> Self {
        ErrorServer::bad_request(format!("Failed to fetch URL: {}", e))
    }
}

#[derive(Debug)]
pub enum GateRejection {
    Missing(PaymentInstructions),
    AlreadyUsed,
}

impl IntoResponse for GateRejection {
    fn into_response(self) -> Response {
        match self {
            GateRejection::Missing(instructions) => {
                let mut headers = Vec::with_capacity(2);
                for (name, value) in [
                    (RECEIVER_HEADER, instructions.receiver.as_str()),
                    (AMOUNT_HEADER, instructions.amount.as_str()),
                ] {
                    if let Ok(value) = HeaderValue::from_str(value) {
                        headers.push((HeaderName::from_static(name), value));
                    }
                }

                let mut response = (
                    StatusCode::PAYMENT_REQUIRED,
                    Json(PaymentRequired {
                        error: "Payment Required".to_string(),
                        x402: instructions,
                    }),
                )
                    .into_response();
                response.headers_mut().extend(headers);
                response
            }
            GateRejection::AlreadyUsed => (
                StatusCode::PAYMENT_REQUIRED,
                Json(PaymentUsed {
                    error: "Payment already used".to_string(),
                }),
            )
                .into_response(),
        }
    }
}
