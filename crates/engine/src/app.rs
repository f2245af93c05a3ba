//! Application state and composition.

use std::sync::Arc;

use crate::entities::{RepositorySettings, SpellListRegistry};
use crate::infrastructure::config::SpellListConfig;
use crate::infrastructure::ports::HostPorts;
use crate::use_cases;

/// Main application state.
///
/// Built once by the embedding host, which routes its sheet and item events
/// to the use cases.
pub struct App {
    pub config: SpellListConfig,
    pub registry: Arc<SpellListRegistry>,
    pub use_cases: UseCases,
}

/// Container for all use cases.
pub struct UseCases {
    pub preparation: use_cases::PreparationUseCases,
    pub spell_lists: use_cases::SpellListUseCases,
}

impl App {
    /// Create a new App with all dependencies wired up.
    pub fn new(host: HostPorts, config: SpellListConfig) -> Self {
        let registry = Arc::new(SpellListRegistry::new(
            host,
            RepositorySettings::from(&config),
        ));

        let preparation = use_cases::PreparationUseCases::new(
            Arc::new(use_cases::preparation::PreparationGate::new(
                registry.clone(),
            )),
            Arc::new(use_cases::preparation::SpellTracker::new(registry.clone())),
        );
        let spell_lists = use_cases::SpellListUseCases::new(
            Arc::new(use_cases::spell_lists::DisplayOptionsOps::new(
                registry.clone(),
            )),
            Arc::new(use_cases::spell_lists::SpellListManagement::new(
                registry.clone(),
            )),
        );

        tracing::debug!(
            store_property = %config.store_property,
            resync_active = config.resync_active,
            "Spell list engine ready"
        );

        Self {
            config,
            registry,
            use_cases: UseCases {
                preparation,
                spell_lists,
            },
        }
    }
}
