use std::{sync::Arc, time::Duration};

use redis::{Commands, Connection, Script};
use tokio::sync::RwLock;
use turnstile_core::{Admission, RateLimiter, RateLimiterError, ThrottleKey};

// Counts and opens the window in one round trip; the TTL is only set on the first hit.
const HIT_SCRIPT: &str = r#"
local hits = redis.call('INCR', KEYS[1])
if hits == 1 then
    redis.call('EXPIRE', KEYS[1], ARGV[1])
end
return hits
"#;

// Check-then-hit, atomic because Redis runs scripts one at a time.
const ATTEMPT_SCRIPT: &str = r#"
local hits = tonumber(redis.call('GET', KEYS[1]) or '0')
if hits >= tonumber(ARGV[1]) then
    return {0, redis.call('PTTL', KEYS[1])}
end
hits = redis.call('INCR', KEYS[1])
if hits == 1 then
    redis.call('EXPIRE', KEYS[1], ARGV[2])
end
return {1, hits}
"#;

/// Attempt counters kept in Redis, one key per throttle key, expiring with the window.
#[derive(Clone)]
pub struct RedisRateLimiter {
    conn: Arc<RwLock<Connection>>,
}

impl RedisRateLimiter {
    pub fn new(conn: Arc<RwLock<Connection>>) -> Self {
        Self { conn }
    }
}

fn unexpected(e: redis::RedisError) -> RateLimiterError {
    RateLimiterError::UnexpectedError(e.to_string())
}

fn pttl_to_duration(pttl: i64) -> Duration {
    // -1 (no expiry) and -2 (missing key) both mean there is nothing to wait for
    Duration::from_millis(u64::try_from(pttl).unwrap_or_default())
}

#[async_trait::async_trait]
impl RateLimiter for RedisRateLimiter {
    async fn too_many_attempts(
        &self,
        key: &ThrottleKey,
        max_attempts: u32,
    ) -> Result<bool, RateLimiterError> {
        let mut conn = self.conn.write().await;
        let hits: Option<u32> = conn.get(get_key(key)).map_err(unexpected)?;
        Ok(hits.unwrap_or_default() >= max_attempts)
    }

    async fn available_in(&self, key: &ThrottleKey) -> Result<Duration, RateLimiterError> {
        let mut conn = self.conn.write().await;
        let pttl: i64 = conn.pttl(get_key(key)).map_err(unexpected)?;
        Ok(pttl_to_duration(pttl))
    }

    async fn hit(&self, key: &ThrottleKey, decay: Duration) -> Result<u32, RateLimiterError> {
        let mut conn = self.conn.write().await;
        Script::new(HIT_SCRIPT)
            .key(get_key(key))
            .arg(decay.as_secs().max(1))
            .invoke(&mut *conn)
            .map_err(unexpected)
    }

    async fn clear(&self, key: &ThrottleKey) -> Result<(), RateLimiterError> {
        let mut conn = self.conn.write().await;
        let _: i64 = conn.del(get_key(key)).map_err(unexpected)?;
        Ok(())
    }

    #[tracing::instrument(name = "RedisRateLimiter::attempt", skip_all)]
    async fn attempt(
        &self,
        key: &ThrottleKey,
        max_attempts: u32,
        decay: Duration,
    ) -> Result<Admission, RateLimiterError> {
        let mut conn = self.conn.write().await;
        let (admitted, value): (i64, i64) = Script::new(ATTEMPT_SCRIPT)
            .key(get_key(key))
            .arg(max_attempts)
            .arg(decay.as_secs().max(1))
            .invoke(&mut *conn)
            .map_err(unexpected)?;

        if admitted == 1 {
            let attempts = u32::try_from(value)
                .map_err(|e| RateLimiterError::UnexpectedError(e.to_string()))?;
            return Ok(Admission::Admitted { attempts });
        }
        Ok(Admission::Throttled {
            retry_after: pttl_to_duration(value),
        })
    }
}

// Prefix keeps limiter keys apart from anything else sharing the Redis instance
const RATE_LIMIT_KEY_PREFIX: &str = "rate_limit:";

fn get_key(key: &ThrottleKey) -> String {
    format!("{}{}", RATE_LIMIT_KEY_PREFIX, key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_prefixed() {
        assert_eq!(
            get_key(&ThrottleKey::for_login("A@B.com")),
            "rate_limit:login:a@b.com"
        );
    }

    #[test]
    fn negative_ttl_means_no_wait() {
        assert_eq!(pttl_to_duration(-2), Duration::ZERO);
        assert_eq!(pttl_to_duration(-1), Duration::ZERO);
        assert_eq!(pttl_to_duration(42_000), Duration::from_secs(42));
    }

    #[test]
    fn sub_second_remainder_is_kept() {
        let remaining = pttl_to_duration(400);

        assert_eq!(remaining, Duration::from_millis(400));
        assert!(remaining > Duration::ZERO);
    }
}
