mod hashmap_rate_limiter;
mod redis_rate_limiter;

pub use hashmap_rate_limiter::HashMapRateLimiter;
pub use redis_rate_limiter::RedisRateLimiter;
