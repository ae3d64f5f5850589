use chrono::{DateTime, TimeDelta, Utc};

use crate::helpers::config::{DEFAULT_LEDGER_MAX_ENTRIES, DEFAULT_LEDGER_TTL_SECS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRecord {
    pub token_hash: String,
    pub timestamp: DateTime<Utc>,
    pub endpoint: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Admitted,
    AlreadyUsed,
}

/// `None` disables the corresponding bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionPolicy {
    pub ttl: Option<TimeDelta>,
    pub max_entries: Option<usize>,
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self {
            ttl: TimeDelta::try_seconds(DEFAULT_LEDGER_TTL_SECS),
            max_entries: Some(DEFAULT_LEDGER_MAX_ENTRIES),
        }
    }
}

impl RetentionPolicy {
    pub fn unbounded() -> Self {
        Self {
            ttl: None,
            max_entries: None,
        }
    }

    pub fn is_expired(&self, record: &PaymentRecord, now: DateTime<Utc>) -> bool {
        match self.ttl {
            Some(ttl) => now - record.timestamp >= ttl,
            None => false,
        }
    }
}
