// ptg-service/src/utils/user_lock.rs
use log::debug;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

// Serializes read-modify-write cycles per user email within this process.
// Other processes writing the same row still resolve by last-writer-wins.
#[derive(Clone, Default)]
pub struct UserLockRegistry {
    locks: Arc<Mutex<HashMap<String, Arc<AsyncMutex<()>>>>>,
}

impl UserLockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // Wait for exclusive access to `user_email`; released when the guard drops
    pub async fn acquire(&self, user_email: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            prune_idle(&mut locks);
            locks
                .entry(user_email.to_string())
                .or_insert_with(|| Arc::new(AsyncMutex::new(())))
                .clone()
        };

        debug!("Waiting for viewed teams lock: {}", user_email);
        lock.lock_owned().await
    }

    // Number of identities with a live lock entry
    #[cfg(test)]
    fn len(&self) -> usize {
        self.locks
            .lock()
            .map(|locks| locks.len())
            .unwrap_or_else(|poisoned| poisoned.into_inner().len())
    }
}

// Drop entries nobody holds or waits on
fn prune_idle(locks: &mut HashMap<String, Arc<AsyncMutex<()>>>) {
    let before = locks.len();
    locks.retain(|_, lock| Arc::strong_count(lock) > 1);

    let removed = before - locks.len();
    if removed > 0 {
        debug!("Removed {} idle user locks", removed);
    }
}
