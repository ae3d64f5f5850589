use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::{IntoParams, ToSchema};

pub const DEFAULT_MAX_LENGTH: u32 = 200;

#[derive(Deserialize, Serialize, Debug, Clone, Copy, Default, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SummaryStyle {
    #[default]
    Concise,
    Detailed,
    Bullets,
}

impl fmt::Display for SummaryStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SummaryStyle::Concise => write!(f, "concise"),
            SummaryStyle::Detailed => write!(f, "detailed"),
            SummaryStyle::Bullets => write!(f, "bullets"),
        }
    }
}

fn default_max_length() -> u32 {
    DEFAULT_MAX_LENGTH
}

#[derive(Deserialize, Serialize, Debug, Clone, ToSchema)]
pub struct SummarizeRequest {
    pub url: Option<String>,
    pub text: Option<String>,
    /// Word budget for the summary.
    #[serde(default = "default_max_length")]
    #[schema(default = 200)]
    pub max_length: u32,
    #[serde(default)]
    pub style: SummaryStyle,
}

impl SummarizeRequest {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            url: None,
            text: Some(text.into()),
            max_length: DEFAULT_MAX_LENGTH,
            style: SummaryStyle::default(),
        }
    }

    /// A non-empty url wins over text; empty strings count as absent.
    pub fn source(&self) -> Option<ContentSource<'_>> {
        match (self.url.as_deref(), self.text.as_deref()) {
            (Some(url), _) if !url.is_empty() => Some(ContentSource::Url(url)),
            (_, Some(text)) if !text.is_empty() => Some(ContentSource::Text(text)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentSource<'a> {
    Url(&'a str),
    Text(&'a str),
}

#[derive(Deserialize, Serialize, Debug, Clone, ToSchema)]
pub struct SummarizeResponse {
    pub summary: String,
    pub original_length: usize,
    pub summary_length: usize,
    pub cost: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct WebhookQuery {
    pub webhook_url: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, ToSchema)]
pub struct WebhookResponse {
    pub status: String,
    pub job_id: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, ToSchema)]
pub struct PaymentInstructions {
    pub receiver: String,
    pub amount: String,
    pub currency: String,
    pub network: String,
    pub description: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, ToSchema)]
pub struct PaymentRequired {
    pub error: String,
    pub x402: PaymentInstructions,
}

#[derive(Deserialize, Serialize, Debug, Clone, ToSchema)]
pub struct PaymentUsed {
    pub error: String,
}
