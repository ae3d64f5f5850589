use std::{env, str::FromStr, time::Duration};

use chrono::TimeDelta;

use crate::{
    error::ConfigError,
    payments::dto::RetentionPolicy,
    summarizer::helpers::{model_from_name, DEFAULT_MODEL},
};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_RECEIVER: &str = "0xcAa16ffB50cb7f17690286ED4a19224AF7dC199B";
// ~$0.10 USD at $3,000 ETH
pub const DEFAULT_PRICE_WEI: u64 = 33_333_333_333_333;
pub const DEFAULT_NETWORK: &str = "base";
pub const DEFAULT_PRICE_DISPLAY: &str = "$0.10 USD (0.000033 ETH)";
pub const DEFAULT_COST_LABEL: &str = "0.1 ETH";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_LEDGER_TTL_SECS: i64 = 24 * 60 * 60;
pub const DEFAULT_LEDGER_MAX_ENTRIES: usize = 100_000;
pub const DEFAULT_PRUNE_INTERVAL_SECS: u64 = 300;

#[derive(Debug, Clone)]
pub struct PaymentConfig {
    pub receiver: String,
    pub price_wei: u64,
    pub network: String,
    pub price_display: String,
    pub cost_label: String,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            receiver: DEFAULT_RECEIVER.to_string(),
            price_wei: DEFAULT_PRICE_WEI,
            network: DEFAULT_NETWORK.to_string(),
            price_display: DEFAULT_PRICE_DISPLAY.to_string(),
            cost_label: DEFAULT_COST_LABEL.to_string(),
        }
    }
}

impl PaymentConfig {
    pub fn currency(&self) -> &'static str {
        "wei"
    }

    /// Always the full fixed price, whatever the caller actually paid.
    pub fn cost(&self) -> String {
        format!("{} wei ({})", self.price_wei, self.cost_label)
    }
}

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    pub payment: PaymentConfig,
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub ai_timeout: Duration,
    pub fetch_timeout: Duration,
    pub retention: RetentionPolicy,
    pub prune_interval: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            payment: PaymentConfig::default(),
            openai_api_key: None,
            openai_model: DEFAULT_MODEL.to_string(),
            ai_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            fetch_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            retention: RetentionPolicy::default(),
            prune_interval: Duration::from_secs(DEFAULT_PRUNE_INTERVAL_SECS),
        }
    }
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let text = |name: &str, default: &str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let payment = PaymentConfig {
            receiver: text("RECEIVER_WALLET", DEFAULT_RECEIVER),
            price_wei: parse_var(&lookup, "PRICE_PER_REQUEST", DEFAULT_PRICE_WEI)?,
            network: text("PAYMENT_NETWORK", DEFAULT_NETWORK),
            price_display: text("PRICE_DISPLAY", DEFAULT_PRICE_DISPLAY),
            cost_label: text("COST_LABEL", DEFAULT_COST_LABEL),
        };

        let ttl_secs: i64 = parse_var(&lookup, "LEDGER_TTL_SECS", DEFAULT_LEDGER_TTL_SECS)?;
        let ttl = match ttl_secs {
            0 => None,
            secs if secs < 0 => {
                return Err(ConfigError::InvalidValue {
                    name: "LEDGER_TTL_SECS",
                    value: secs.to_string(),
                    reason: "must not be negative".to_string(),
                });
            }
            secs => Some(TimeDelta::try_seconds(secs).ok_or_else(|| {
                ConfigError::InvalidValue {
                    name: "LEDGER_TTL_SECS",
                    value: secs.to_string(),
                    reason: "out of range".to_string(),
                }
            })?),
        };

        let max_entries: usize =
            parse_var(&lookup, "LEDGER_MAX_ENTRIES", DEFAULT_LEDGER_MAX_ENTRIES)?;

        let prune_secs: u64 =
            parse_var(&lookup, "LEDGER_PRUNE_INTERVAL_SECS", DEFAULT_PRUNE_INTERVAL_SECS)?;
        if prune_secs == 0 {
            return Err(ConfigError::InvalidValue {
                name: "LEDGER_PRUNE_INTERVAL_SECS",
                value: prune_secs.to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }

        let openai_model = text("OPENAI_MODEL", DEFAULT_MODEL);
        if model_from_name(&openai_model).is_none() {
            return Err(ConfigError::InvalidValue {
                name: "OPENAI_MODEL",
                value: openai_model,
                reason: "unsupported model".to_string(),
            });
        }

        Ok(Self {
            host: text("HOST", DEFAULT_HOST),
            port: parse_var(&lookup, "PORT", DEFAULT_PORT)?,
            payment,
            openai_api_key: lookup("OPENAI_API_KEY").filter(|key| !key.trim().is_empty()),
            openai_model,
            ai_timeout: Duration::from_secs(parse_var(
                &lookup,
                "AI_TIMEOUT_SECS",
                DEFAULT_TIMEOUT_SECS,
            )?),
            fetch_timeout: Duration::from_secs(parse_var(
                &lookup,
                "FETCH_TIMEOUT_SECS",
                DEFAULT_TIMEOUT_SECS,
            )?),
            retention: RetentionPolicy {
                ttl,
                max_entries: (max_entries > 0).then_some(max_entries),
            },
            prune_interval: Duration::from_secs(prune_secs),
        })
    }

    pub fn ai_enabled(&self) -> bool {
        self.openai_api_key.is_some()
    }
}

fn parse_var<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        Some(raw) if !raw.trim().is_empty() => {
            raw.trim()
                .parse::<T>()
                .map_err(|e| ConfigError::InvalidValue {
                    name,
                    value: raw.clone(),
                    reason: e.to_string(),
                })
        }
        _ => Ok(default),
    }
}
