//! Random implementations.

use crate::infrastructure::ports::RandomPort;
use uuid::Uuid;

/// System random - uses real randomness.
pub struct SystemRandom;

impl SystemRandom {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomPort for SystemRandom {
    fn gen_uuid(&self) -> Uuid {
        Uuid::new_v4()
    }
}

/// Deterministic ids for testing: 1, 2, 3, ...
#[cfg(test)]
#[derive(Default)]
pub struct FixedRandom(std::sync::atomic::AtomicU64);

#[cfg(test)]
impl RandomPort for FixedRandom {
    fn gen_uuid(&self) -> Uuid {
        let n = self.0.fetch_add(1, std::sync::atomic::Ordering::Relaxed) + 1;
        Uuid::from_u128(u128::from(n))
    }
}
