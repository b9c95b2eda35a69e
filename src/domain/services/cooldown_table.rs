//! Per-user trigger cooldowns shared across concurrent runs.

use std::collections::HashMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::time::{Duration, Instant};

use parking_lot::Mutex;

const SHARD_COUNT: usize = 16;

/// Last-trigger timestamps keyed by user, split across independently locked shards.
pub struct CooldownTable {
    cooldown: Duration,
    shards: Vec<Mutex<HashMap<String, Instant>>>,
}

impl CooldownTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            shards: (0..SHARD_COUNT)
                .map(|_| Mutex::new(HashMap::new()))
                .collect(),
        }
    }

    fn shard(&self, user_id: &str) -> &Mutex<HashMap<String, Instant>> {
        let mut hasher = DefaultHasher::new();
        user_id.hash(&mut hasher);
        #[allow(clippy::cast_possible_truncation)]
        let index = hasher.finish() as usize % SHARD_COUNT;
        &self.shards[index]
    }

    fn wait_left(&self, last: Instant, now: Instant) -> Duration {
        self.cooldown
            .saturating_sub(now.saturating_duration_since(last))
    }

    /// Checks and records in one step under the shard lock.
    ///
    /// Returns `Ok(())` and records `now` if the user may proceed, otherwise
    /// the remaining wait without touching the entry. Expired entries in the
    /// same shard are dropped on every accepted trigger.
    ///
    /// # Errors
    /// Returns the remaining cooldown if the user triggered too recently.
    pub fn try_acquire(&self, user_id: &str, now: Instant) -> Result<(), Duration> {
        let mut shard = self.shard(user_id).lock();
        if let Some(last) = shard.get(user_id) {
            let remaining = self.wait_left(*last, now);
            if !remaining.is_zero() {
                return Err(remaining);
            }
        }
        shard.retain(|_, last| !self.wait_left(*last, now).is_zero());
        shard.insert(user_id.to_string(), now);
        Ok(())
    }

    #[cfg(test)]
    fn tracked_users(&self) -> usize {
        self.shards.iter().map(|shard| shard.lock().len()).sum()
    }
}

impl std::fmt::Debug for CooldownTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CooldownTable")
            .field("cooldown", &self.cooldown)
            .finish_non_exhaustive()
    }
}
