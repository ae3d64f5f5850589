use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Deserialize, Serialize, Debug, ToSchema)]
pub struct Info {
    pub service: String,
    pub description: String,
    pub endpoints: BTreeMap<String, String>,
    pub payment: PaymentSummary,
}

#[derive(Deserialize, Serialize, Debug, ToSchema)]
pub struct PaymentSummary {
    #[serde(rename = "type")]
    pub kind: String,
    pub receiver: String,
    pub amount_per_request: String,
    pub network: String,
}

#[derive(Deserialize, Serialize, Debug, ToSchema)]
pub struct Health {
    pub status: String,
    pub payments_processed: usize,
}

#[derive(Deserialize, Serialize, Debug, ToSchema)]
pub struct Pricing {
    pub endpoint: String,
    pub price: String,
    pub price_wei: u64,
    pub currency: String,
    pub network: String,
    pub receiver: String,
}
