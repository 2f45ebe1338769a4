//! Cache module for the refresh token denylist
//!
//! Provides the Redis client (multiplexed connection, retry with exponential
//! backoff) and the two [`RevocationStore`](pw_core::RevocationStore)
//! implementations built on top of it or on process memory.

pub mod memory;
pub mod redis_client;
pub mod revocation;


pub use memory::InMemoryRevocationStore;
pub use redis_client::RedisClient;
pub use revocation::{RedisRevocationStore, REVOKED_MARKER};

// Re-export commonly used types
pub use pw_shared::CacheConfig;
