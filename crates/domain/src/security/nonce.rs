use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

/// A nonce is valid for the tick it was issued in and the one after,
/// i.e. between 12 and 24 hours.
pub const NONCE_LIFE_SECS: i64 = 86_400;

/// Issues and verifies form nonces bound to an action name.
#[derive(Debug, Clone)]
pub struct NonceKey {
    secret: String,
}

impl NonceKey {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    pub fn create(&self, action: &str, now: DateTime<Utc>) -> String {
        self.digest(action, tick(now))
    }

    pub fn verify(&self, action: &str, nonce: &str, now: DateTime<Utc>) -> bool {
        let current = tick(now);
        [current, current - 1]
            .into_iter()
            .any(|t| constant_time_eq(self.digest(action, t).as_bytes(), nonce.as_bytes()))
    }

    fn digest(&self, action: &str, tick: i64) -> String {
        let mut h = Sha256::new();
        h.update(self.secret.as_bytes());
        h.update(b":");
        h.update(action.as_bytes());
        h.update(b":");
        h.update(tick.to_string().as_bytes());
        hex::encode(h.finalize())
    }
}

fn tick(now: DateTime<Utc>) -> i64 {
    let half = NONCE_LIFE_SECS / 2;
    now.timestamp().div_euclid(half) + 1
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn verifies_within_lifetime() {
        let key = NonceKey::new("s3cret");
        let now = Utc::now();
        let nonce = key.create("contact_form", now);

        assert!(key.verify("contact_form", &nonce, now));
        assert!(key.verify("contact_form", &nonce, now + Duration::hours(12)));
        assert!(!key.verify("contact_form", &nonce, now + Duration::hours(25)));
    }

    #[test]
    fn binds_action_and_secret() {
        let now = Utc::now();
        let nonce = NonceKey::new("a").create("contact_form", now);
        assert!(!NonceKey::new("a").verify("other_action", &nonce, now));
        assert!(!NonceKey::new("b").verify("contact_form", &nonce, now));
        assert!(!NonceKey::new("a").verify("contact_form", "deadbeef", now));
    }
}
