
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::errors::DomainError;
use crate::repositories::RevocationStore;

pub(super) const SECRET: &str = "test-secret-key-for-unit-tests";

/// In-process store that records every marker and its TTL
#[derive(Default)]
pub(super) struct RecordingStore {
    entries: Mutex<HashMap<String, Duration>>,
    revoke_calls: AtomicUsize,
    lookups: AtomicUsize,
}

impl RecordingStore {
    pub(super) fn ttl_of(&self, token: &str) -> Option<Duration> {
        self.entries.lock().unwrap().get(token).copied()
    }

    pub(super) fn revoke_calls(&self) -> usize {
        self.revoke_calls.load(Ordering::SeqCst)
    }

    pub(super) fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RevocationStore for RecordingStore {
    async fn revoke(&self, token: &str, ttl: Duration) -> Result<(), DomainError> {
        self.revoke_calls.fetch_add(1, Ordering::SeqCst);
        self.entries.lock().unwrap().insert(token.to_string(), ttl);
        Ok(())
    }

    async fn is_revoked(&self, token: &str) -> Result<bool, DomainError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self.entries.lock().unwrap().contains_key(token))
    }
}

/// Store that is always unreachable
pub(super) struct UnreachableStore;

#[async_trait]
impl RevocationStore for UnreachableStore {
    async fn revoke(&self, _token: &str, _ttl: Duration) -> Result<(), DomainError> {
        Err(DomainError::Storage {
            message: "connection refused".to_string(),
        })
    }

    async fn is_revoked(&self, _token: &str) -> Result<bool, DomainError> {
        Err(DomainError::Storage {
            message: "connection refused".to_string(),
        })
    }
}
