//! Per-team serialization of code issuance.
//!
//! Reading the issued-code snapshot and inserting the new participant are
//! two store calls. Holding the prefix lock across both keeps two requests
//! for the same team from computing the same "next free" code in this
//! process. Other processes are still arbitrated by the store's unique
//! constraint.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

/// One async mutex per team prefix, created on first use.
#[derive(Default)]
pub struct IssueLocks {
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl IssueLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive issuance rights on `prefix`.
    ///
    /// Released when the returned guard is dropped.
    pub async fn acquire(&self, prefix: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            Arc::clone(locks.entry(prefix.to_string()).or_default())
        };
        lock.lock_owned().await
    }
}
