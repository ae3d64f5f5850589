use std::sync::{Mutex, TryLockError};

use chrono::{DateTime, Utc};
use dashmap::{mapref::entry::Entry, DashMap};

use crate::helpers::hash::token_hash;
use crate::payments::dto::{Admission, PaymentRecord, RetentionPolicy};

/// Write-once record of consumed payment tokens, keyed by token hash.
///
/// Admission runs through the map's entry API, so the lookup and the insert
/// happen under a single shard lock and a token can only be admitted once
/// while its record is live.
#[derive(Debug)]
pub struct PaymentLedger {
    records: DashMap<String, PaymentRecord>,
    policy: RetentionPolicy,
    eviction: Mutex<()>,
}

impl Default for PaymentLedger {
    fn default() -> Self {
        Self::new(RetentionPolicy::default())
    }
}

impl PaymentLedger {
    pub fn new(policy: RetentionPolicy) -> Self {
        Self {
            records: DashMap::new(),
            policy,
            eviction: Mutex::new(()),
        }
    }

    pub fn policy(&self) -> RetentionPolicy {
        self.policy
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, token: &str) -> Option<PaymentRecord> {
        self.records
            .get(&token_hash(token))
            .map(|record| record.value().clone())
    }

    pub fn admit(&self, token: &str, endpoint: &str) -> Admission {
        self.admit_at(token, endpoint, Utc::now())
    }

    pub fn admit_at(&self, token: &str, endpoint: &str, now: DateTime<Utc>) -> Admission {
        let key = token_hash(token);
        let record = PaymentRecord {
            token_hash: key.clone(),
            timestamp: now,
            endpoint: endpoint.to_string(),
        };

        let admission = match self.records.entry(key) {
            Entry::Occupied(entry) if !self.policy.is_expired(entry.get(), now) => {
                Admission::AlreadyUsed
            }
            Entry::Occupied(mut entry) => {
                entry.insert(record);
                Admission::Admitted
            }
            Entry::Vacant(entry) => {
                entry.insert(record);
                Admission::Admitted
            }
        };

        if admission == Admission::Admitted {
            self.enforce_capacity(now);
        }

        admission
    }

    pub fn prune_expired(&self) -> usize {
        self.prune_expired_at(Utc::now())
    }

    pub fn prune_expired_at(&self, now: DateTime<Utc>) -> usize {
        if self.policy.ttl.is_none() {
            return 0;
        }

        let before = self.records.len();
        self.records
            .retain(|_, record| !self.policy.is_expired(record, now));
        let pruned = before.saturating_sub(self.records.len());

        if pruned > 0 {
            log::debug!("Pruned {} expired payment records", pruned);
        }

        pruned
    }

    /// Evicts down to a low-water mark below the cap, so the full scan runs
    /// once per batch of admissions rather than on every one. A single caller
    /// evicts at a time; others skip while it works.
    fn enforce_capacity(&self, now: DateTime<Utc>) {
        let Some(max_entries) = self.policy.max_entries else {
            return;
        };

        if self.records.len() <= max_entries {
            return;
        }

        let _evicting = match self.eviction.try_lock() {
            Ok(guard) => guard,
            Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner(),
            Err(TryLockError::WouldBlock) => return,
        };

        if self.records.len() <= max_entries {
            return;
        }

        self.prune_expired_at(now);

        let low_water = low_water_mark(max_entries);
        let overflow = self.records.len().saturating_sub(low_water);
        if overflow == 0 {
            return;
        }

        let mut oldest: Vec<(String, DateTime<Utc>)> = self
            .records
            .iter()
            .map(|record| (record.key().clone(), record.value().timestamp))
            .collect();
        oldest.sort_by_key(|(_, timestamp)| *timestamp);

        for (key, _) in oldest.into_iter().take(overflow) {
            self.records.remove(&key);
        }

        log::debug!(
            "Evicted {} payment records, {} left (cap {})",
            overflow,
            self.records.len(),
            max_entries
        );
    }
}

// 90% of the cap, never below one so the newest record survives.
fn low_water_mark(max_entries: usize) -> usize {
    (max_entries.saturating_mul(9) / 10).max(1)
}
