//! Provider instance id generation
//!
//! Every Open gets an id that differs from every other id handed out by the
//! same generator, however close together the opens happen.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicI64, Ordering};
use uuid::Uuid;

/// How instance ids are produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum IdStrategy {
    /// Monotonic counter starting at a random offset
    #[default]
    Sequential,
    /// Random 128-bit UUID folded to a positive 64-bit value
    Random,
}

/// Generator of opaque session ids
#[derive(Debug)]
pub struct InstanceIdGenerator {
    strategy: IdStrategy,
    counter: AtomicI64,
    last: AtomicI64,
}

impl InstanceIdGenerator {
    pub fn new(strategy: IdStrategy) -> Self {
        // Random offset keeps ids from different runs apart
        let seed = rand::thread_rng().gen_range(1..=i64::from(u32::MAX));
        Self {
            strategy,
            counter: AtomicI64::new(seed),
            last: AtomicI64::new(0),
        }
    }

    pub fn strategy(&self) -> IdStrategy {
        self.strategy
    }

    /// Next id, always positive
    pub fn next(&self) -> i64 {
        match self.strategy {
            IdStrategy::Sequential => self.counter.fetch_add(1, Ordering::Relaxed),
            IdStrategy::Random => loop {
                let id = fold_uuid(Uuid::new_v4());
                if id != 0 && self.last.swap(id, Ordering::Relaxed) != id {
                    break id;
                }
            },
        }
    }
}

impl Default for InstanceIdGenerator {
    fn default() -> Self {
        Self::new(IdStrategy::default())
    }
}

fn fold_uuid(uuid: Uuid) -> i64 {
    let bits = uuid.as_u128();
    let folded = (bits as u64) ^ ((bits >> 64) as u64);
    (folded & i64::MAX as u64) as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_sequential_ids_are_distinct_and_increasing() {
        let ids = InstanceIdGenerator::new(IdStrategy::Sequential);
        let first = ids.next();
        let second = ids.next();
        assert!(first > 0);
        assert_eq!(second, first + 1);
    }

    #[test]
    fn test_random_ids_are_distinct_and_positive() {
        let ids = InstanceIdGenerator::new(IdStrategy::Random);
        let seen: HashSet<i64> = (0..1000).map(|_| ids.next()).collect();
        assert_eq!(seen.len(), 1000);
        assert!(seen.iter().all(|id| *id > 0));
    }

    #[test]
    fn test_strategy_serialization() {
        let json = serde_json::to_string(&IdStrategy::Random).unwrap();
        assert_eq!(json, "\"random\"");
    }
}
