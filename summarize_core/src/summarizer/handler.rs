use std::time::Duration;

use open_ai_rust_responses_by_sshift::{Client as OAIClient, Request};
use tokio::time::timeout;

use crate::helpers::dto::SummaryStyle;
use crate::summarizer::helpers::{
    build_instructions, extractive_summary, model_from_name, truncate_chars, DEFAULT_MODEL,
    MODEL_INPUT_LIMIT,
};

const MAX_OUTPUT_TOKENS: u32 = 500;

#[derive(Clone)]
pub struct Summarizer {
    openai_client: Option<OAIClient>,
    model: String,
    timeout: Duration,
}

impl Summarizer {
    /// Without a usable key every summary is extractive.
    pub fn new(openai_api_key: Option<&str>, model: &str, timeout: Duration) -> Self {
        let openai_client = openai_api_key.and_then(|key| match OAIClient::new(key) {
            Ok(client) => Some(client),
            Err(e) => {
                log::error!(
                    "Failed to create OpenAI client, falling back to extractive summaries: {}",
                    e
                );
                None
            }
        });

        Self {
            openai_client,
            model: model.to_string(),
            timeout,
        }
    }

    pub fn extractive_only() -> Self {
        Self {
            openai_client: None,
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::ZERO,
        }
    }

    pub fn ai_enabled(&self) -> bool {
        self.openai_client.is_some()
    }

    pub async fn summarize(&self, text: &str, max_length: u32, style: SummaryStyle) -> String {
        if let Some(summary) = self.summarize_with_model(text, max_length, style).await {
            return summary;
        }

        extractive_summary(text, max_length, style)
    }

    /// Any model failure is logged and reported as `None`.
    pub async fn summarize_with_model(
        &self,
        text: &str,
        max_length: u32,
        style: SummaryStyle,
    ) -> Option<String> {
        let client = self.openai_client.as_ref()?;

        match timeout(
            self.timeout,
            request_model_summary(client, &self.model, text, max_length, style),
        )
        .await
        {
            Ok(Ok(summary)) => {
                log::info!(
                    "Model produced a {} summary of {} characters",
                    style,
                    summary.len()
                );
                Some(summary)
            }
            Ok(Err(e)) => {
                log::warn!("OpenAI summarization failed, using extractive fallback: {}", e);
                None
            }
            Err(_) => {
                log::warn!(
                    "OpenAI summarization timed out after {:?}, using extractive fallback",
                    self.timeout
                );
                None
            }
        }
    }
}

async fn request_model_summary(
    client: &OAIClient,
    model: &str,
    text: &str,
    max_length: u32,
    style: SummaryStyle,
) -> Result<String, anyhow::Error> {
    let model = model_from_name(model)
        .ok_or_else(|| anyhow::anyhow!("Unsupported model '{}'", model))?;

    let request = Request::builder()
        .model(model)
        .instructions(build_instructions(style, max_length))
        .input(truncate_chars(text, MODEL_INPUT_LIMIT).to_string())
        .max_output_tokens(MAX_OUTPUT_TOKENS)
        .build();

    let response = client.responses.create(request).await?;
    let summary = response.output_text().trim().to_string();

    if summary.is_empty() {
        return Err(anyhow::anyhow!("Generated summary is empty"));
    }

    Ok(summary)
}
