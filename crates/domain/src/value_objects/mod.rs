//! Value objects - Immutable objects defined by their attributes

mod capacity;
mod display_options;
mod preparation;
mod reconciliation;

pub use capacity::{CapacityProfile, CapacityVerdict};
pub use display_options::{DisplayOptions, FilterCategory, SortMode};
pub use preparation::{CastingMethod, ChangeOrigin, PreparationMode};
pub use reconciliation::ReconciliationPlan;
