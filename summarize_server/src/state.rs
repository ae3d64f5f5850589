use summarize_core::{
    error::FetchError,
    fetcher::handler::Fetcher,
    helpers::config::{PaymentConfig, ServiceConfig},
    payments::ledger::PaymentLedger,
    summarizer::handler::Summarizer,
};

pub struct ServerState {
    payment: PaymentConfig,
    ledger: PaymentLedger,
    fetcher: Fetcher,
    summarizer: Summarizer,
}

impl From<(PaymentConfig, PaymentLedger, Fetcher, Summarizer)> for ServerState {
    fn from(states: (PaymentConfig, PaymentLedger, Fetcher, Summarizer)) -> Self {
        let (payment, ledger, fetcher, summarizer) = states;
        Self {
            payment,
            ledger,
            fetcher,
            summarizer,
        }
    }
}

impl TryFrom<&ServiceConfig> for ServerState {
    type Error = FetchError;

    fn try_from(config: &ServiceConfig) -> Result<Self, Self::Error> {
        let fetcher = Fetcher::new(config.fetch_timeout)?;
        let summarizer = Summarizer::new(
            config.openai_api_key.as_deref(),
            &config.openai_model,
            config.ai_timeout,
        );

        Ok(Self::from((
            config.payment.clone(),
            PaymentLedger::new(config.retention),
            fetcher,
            summarizer,
        )))
    }
}

impl ServerState {
    pub fn payment(&self) -> &PaymentConfig {
        &self.payment
    }

    pub fn ledger(&self) -> &PaymentLedger {
        &self.ledger
    }

    pub fn fetcher(&self) -> &Fetcher {
        &self.fetcher
    }

    pub fn summarizer(&self) -> &Summarizer {
        &self.summarizer
    }
}
