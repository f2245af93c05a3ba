//! Testability port for injecting randomness.

use uuid::Uuid;

#[cfg_attr(test, mockall::automock)]
pub trait RandomPort: Send + Sync {
    fn gen_uuid(&self) -> Uuid;
}
