//! Test harness: an App over an in-memory host with one character.

use std::sync::Arc;

use spellbinder_domain::{
    CharacterId, CharacterSummary, ClassItem, PreparationMode, SpellId, SpellItem,
    SpellItemChanges,
};

use crate::entities::SpellListRepository;
use crate::infrastructure::config::SpellListConfig;
use crate::infrastructure::memory_host::InMemoryHost;
use crate::infrastructure::ports::HostPorts;
use crate::infrastructure::random::FixedRandom;
use crate::use_cases::preparation::{GateDecision, ProposedSpellChange};
use crate::App;

pub struct E2ETestContext {
    pub host: Arc<InMemoryHost>,
    pub app: App,
    pub character_id: CharacterId,
}

impl E2ETestContext {
    /// A player character with the given `(identifier, name, max prepared)`
    /// classes. The sheet has been opened, so spellcasters have their
    /// default list.
    pub async fn setup(classes: &[(&str, &str, Option<u32>)]) -> Self {
        let host = Arc::new(InMemoryHost::new());
        let character_id = CharacterId::new("tasha");
        host.add_character(CharacterSummary::new(character_id.clone(), "Tasha"), true)
            .await;
        for (identifier, name, max) in classes {
            let mut class = ClassItem::new(*identifier, *name);
            if let Some(max) = max {
                class = class.with_max_prepared(*max);
            }
            host.add_class(&character_id, class)
                .await
                .expect("character exists");
        }

        let ports = HostPorts::from_host(host.clone(), Arc::new(FixedRandom::default()));
        let app = App::new(ports, SpellListConfig::default());
        app.use_cases
            .spell_lists
            .management
            .ensure_initialized(&character_id)
            .await
            .expect("initialisation should succeed");

        Self {
            host,
            app,
            character_id,
        }
    }

    pub fn repo(&self) -> Arc<SpellListRepository> {
        self.app.registry.for_character(&self.character_id)
    }

    /// Give the character a level-1 spell of `class`.
    pub async fn learn(&self, spell_id: &str, class: &str) {
        self.host
            .add_spell(
                &self.character_id,
                SpellItem::new(spell_id, spell_id, 1, class),
            )
            .await
            .expect("character exists");
    }

    /// Change a spell's prepared state through the sheet: gate, commit, track.
    pub async fn set_prepared(&self, spell_id: &str, mode: PreparationMode) -> GateDecision {
        let spell_id = SpellId::new(spell_id);
        let before = self
            .host
            .spell(&self.character_id, &spell_id)
            .await
            .expect("spell exists");
        let proposed = ProposedSpellChange::user(SpellItemChanges::prepared(mode));

        let decision = self
            .app
            .use_cases
            .preparation
            .gate
            .check(&before, &proposed)
            .await;
        if !decision.allow {
            return decision;
        }

        let after = self
            .host
            .apply_spell_change(&self.character_id, &spell_id, &proposed.changes)
            .await
            .expect("spell exists");
        self.app
            .use_cases
            .preparation
            .tracker
            .on_spell_updated(&after, &proposed.changes, proposed.origin)
            .await
            .expect("tracking should succeed");
        decision
    }

    pub async fn prepared(&self) -> Vec<SpellId> {
        self.host.prepared_spell_ids(&self.character_id).await
    }
}

pub fn ids(ids: &[&str]) -> Vec<SpellId> {
    ids.iter().map(|id| SpellId::new(*id)).collect()
}
