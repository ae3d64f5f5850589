use sha2::{Digest, Sha256};
use uuid::Uuid;

pub const TOKEN_HASH_LEN: usize = 16;
pub const JOB_ID_LEN: usize = 12;

pub fn short_sha256(input: &str, len: usize) -> String {
    let mut digest = hex::encode(Sha256::digest(input.as_bytes()));
    digest.truncate(len);
    digest
}

pub fn token_hash(token: &str) -> String {
    short_sha256(token, TOKEN_HASH_LEN)
}

pub fn new_job_id() -> String {
    short_sha256(&Uuid::new_v4().to_string(), JOB_ID_LEN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_hash_is_stable_and_truncated() {
        let first = token_hash("0xdeadbeef");
        let second = token_hash("0xdeadbeef");

        assert_eq!(first, second);
        assert_eq!(first.len(), TOKEN_HASH_LEN);
        assert!(first.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_token_hash_known_digest() {
        // sha256("abc") = ba7816bf8f01cfea414140de5dae2223...
        assert_eq!(token_hash("abc"), "ba7816bf8f01cfea");
    }

    #[test]
    fn test_distinct_tokens_hash_differently() {
        assert_ne!(token_hash("payment-1"), token_hash("payment-2"));
    }

    #[test]
    fn test_job_ids() {
        let a = new_job_id();
        let b = new_job_id();

        assert_eq!(a.len(), JOB_ID_LEN);
        assert_ne!(a, b);
    }
}
