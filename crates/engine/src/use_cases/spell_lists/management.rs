//! Spell list lifecycle and the dialog-driven list actions.

use std::sync::Arc;

use spellbinder_domain::{CharacterId, NewSpellList, SpellList, SpellListId, SpellListPatch};

use crate::entities::{ResetOutcome, SpellListRegistry, SpellListRepoError, SpellListRepository};
use crate::infrastructure::ports::MessageParams;
use crate::messages;

/// Result of resetting every player character.
#[derive(Debug, Default)]
pub struct ResetReport {
    pub seeded: Vec<CharacterId>,
    pub cleared: Vec<CharacterId>,
    pub failed: Vec<(CharacterId, SpellListRepoError)>,
}

impl ResetReport {
    pub fn error_count(&self) -> usize {
        self.failed.len()
    }
}

pub struct SpellListManagement {
    registry: Arc<SpellListRegistry>,
}

impl SpellListManagement {
    pub fn new(registry: Arc<SpellListRegistry>) -> Self {
        Self { registry }
    }

    fn repo(&self, character_id: &CharacterId) -> Arc<SpellListRepository> {
        self.registry.for_character(character_id)
    }

    fn localize(&self, key: &str, params: &MessageParams) -> String {
        self.registry.host().localization.localize(key, params)
    }

    /// Run when a character sheet is shown: seed a default list for new
    /// spellcasters and drop stale lists from everyone else.
    pub async fn ensure_initialized(
        &self,
        character_id: &CharacterId,
    ) -> Result<Vec<SpellList>, SpellListRepoError> {
        self.repo(character_id).ensure_initialized().await
    }

    /// Reset every player character, carrying on past failures.
    pub async fn reset_all(&self) -> Result<ResetReport, SpellListRepoError> {
        let characters = self
            .registry
            .host()
            .characters
            .list_player_characters()
            .await?;

        let mut report = ResetReport::default();
        for character_id in characters {
            match self.repo(&character_id).reset().await {
                Ok(ResetOutcome::Cleared) => report.cleared.push(character_id),
                Ok(ResetOutcome::Seeded { .. }) => report.seeded.push(character_id),
                Err(e) => {
                    tracing::warn!(
                        character_id = %character_id,
                        error = %e,
                        "Failed to reset spell lists"
                    );
                    report.failed.push((character_id, e));
                }
            }
        }

        tracing::info!(
            seeded = report.seeded.len(),
            cleared = report.cleared.len(),
            errors = report.error_count(),
            "Reset spell lists for all player characters"
        );
        Ok(report)
    }

    /// Ask for a name and create an inactive list. `None` when cancelled or blank.
    pub async fn create_with_prompt(
        &self,
        character_id: &CharacterId,
    ) -> Result<Option<SpellList>, SpellListRepoError> {
        let Some(name) = self.prompt_name(messages::CREATE_DIALOG_TITLE).await else {
            return Ok(None);
        };
        if name.is_empty() {
            return Ok(None);
        }
        self.repo(character_id)
            .create(NewSpellList::named(name))
            .await
            .map(Some)
    }

    /// Ask for a name and copy the list. A blank name gets the default copy
    /// name; cancelling copies nothing.
    pub async fn copy_with_prompt(
        &self,
        character_id: &CharacterId,
        list_id: &SpellListId,
    ) -> Result<Option<SpellList>, SpellListRepoError> {
        let repo = self.repo(character_id);
        // Fail before prompting if the list is gone.
        repo.get(list_id).await?;

        let Some(name) = self.prompt_name(messages::COPY_DIALOG_TITLE).await else {
            return Ok(None);
        };
        repo.copy(list_id, Some(name)).await.map(Some)
    }

    /// Ask for a new name. Cancelled or blank input leaves the list as is.
    pub async fn rename_with_prompt(
        &self,
        character_id: &CharacterId,
        list_id: &SpellListId,
    ) -> Result<Option<SpellList>, SpellListRepoError> {
        let repo = self.repo(character_id);
        repo.get(list_id).await?;

        match self.prompt_name(messages::RENAME_DIALOG_TITLE).await {
            Some(name) if !name.is_empty() => repo
                .update(SpellListPatch::new(list_id.clone()).name(name))
                .await
                .map(Some),
            _ => Ok(None),
        }
    }

    /// Confirm, then delete. Returns whether the list was deleted.
    pub async fn delete_with_confirmation(
        &self,
        character_id: &CharacterId,
        list_id: &SpellListId,
    ) -> Result<bool, SpellListRepoError> {
        let repo = self.repo(character_id);
        let list = repo.get_deletable(list_id).await?;

        let title = self.localize(messages::DELETE_DIALOG_TITLE, &MessageParams::new());
        let body = self.localize(
            messages::DELETE_DIALOG_BODY,
            &MessageParams::new().with(messages::PARAM_LIST_NAME, list.name.as_str()),
        );
        if !self.registry.host().dialogs.confirm(&title, &body).await {
            return Ok(false);
        }

        repo.delete(list_id).await?;
        Ok(true)
    }

    pub fn can_delete(list_id: &SpellListId) -> bool {
        SpellListRepository::can_delete(list_id)
    }

    async fn prompt_name(&self, title_key: &str) -> Option<String> {
        let title = self.localize(title_key, &MessageParams::new());
        let placeholder = self.localize(messages::NAME_PLACEHOLDER, &MessageParams::new());
        self.registry
            .host()
            .dialogs
            .prompt_text(&title, &placeholder)
            .await
            .map(|name| name.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::RepositorySettings;
    use crate::infrastructure::memory_host::InMemoryHost;
    use crate::infrastructure::ports::{
        HostPorts, MockCharacterPort, MockDialogPort, MockFlagStorePort, MockLocalizationPort,
        MockNotificationPort, MockRandomPort, MockSheetPort, RepoError,
    };
    use crate::infrastructure::random::FixedRandom;
    use spellbinder_domain::{CharacterSummary, ClassItem};

    struct Fixture {
        host: Arc<InMemoryHost>,
        management: SpellListManagement,
        registry: Arc<SpellListRegistry>,
        id: CharacterId,
    }

    async fn fixture() -> Fixture {
        let host = Arc::new(InMemoryHost::new());
        let id = CharacterId::new("wiz");
        host.add_character(CharacterSummary::new(id.clone(), "Wiz"), true)
            .await;
        host.add_class(&id, ClassItem::new("wizard", "Wizard").with_max_prepared(4))
            .await
            .unwrap();
        let registry = Arc::new(SpellListRegistry::new(
            HostPorts::from_host(host.clone(), Arc::new(FixedRandom::default())),
            RepositorySettings::default(),
        ));
        Fixture {
            host,
            management: SpellListManagement::new(registry.clone()),
            registry,
            id,
        }
    }

    #[tokio::test]
    async fn ensure_initialized_seeds_then_leaves_alone() {
        let f = fixture().await;
        let lists = f.management.ensure_initialized(&f.id).await.unwrap();
        assert_eq!(lists.len(), 1);
        assert_eq!(lists[0].name, "Default");

        f.management.ensure_initialized(&f.id).await.unwrap();
        assert_eq!(f.host.blob_writes(), 1);
    }

    #[tokio::test]
    async fn ensure_initialized_drops_stale_lists() {
        let f = fixture().await;
        f.management.ensure_initialized(&f.id).await.unwrap();
        f.host.clear_classes(&f.id).await.unwrap();

        let lists = f.management.ensure_initialized(&f.id).await.unwrap();
        assert!(lists.is_empty());
        assert_eq!(f.host.blob(&f.id, "spellLists").await, None);
    }

    #[tokio::test]
    async fn create_with_prompt_respects_cancel_and_blank() {
        let f = fixture().await;
        f.management.ensure_initialized(&f.id).await.unwrap();

        f.host.queue_prompt(None);
        assert!(f.management.create_with_prompt(&f.id).await.unwrap().is_none());
        f.host.queue_prompt(Some("   "));
        assert!(f.management.create_with_prompt(&f.id).await.unwrap().is_none());

        f.host.queue_prompt(Some(" Healing "));
        let list = f.management.create_with_prompt(&f.id).await.unwrap().unwrap();
        assert_eq!(list.name, "Healing");
        assert!(!list.is_active);
    }

    #[tokio::test]
    async fn copy_with_blank_name_uses_default_copy_name() {
        let f = fixture().await;
        f.management.ensure_initialized(&f.id).await.unwrap();

        f.host.queue_prompt(Some(""));
        let copy = f
            .management
            .copy_with_prompt(&f.id, &SpellListId::default_list())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(copy.name, "Copy of Default");
    }

    #[tokio::test]
    async fn rename_with_prompt_updates_name() {
        let f = fixture().await;
        f.management.ensure_initialized(&f.id).await.unwrap();

        f.host.queue_prompt(Some("Everyday"));
        let renamed = f
            .management
            .rename_with_prompt(&f.id, &SpellListId::default_list())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(renamed.name, "Everyday");
    }

    #[tokio::test]
    async fn delete_requires_confirmation() {
        let f = fixture().await;
        f.management.ensure_initialized(&f.id).await.unwrap();
        let repo = f.registry.for_character(&f.id);
        let list = repo.create(NewSpellList::named("Temp")).await.unwrap();

        f.host.queue_confirm(false);
        assert!(!f.management.delete_with_confirmation(&f.id, &list.id).await.unwrap());
        assert_eq!(repo.get_all().await.unwrap().len(), 2);

        f.host.queue_confirm(true);
        assert!(f.management.delete_with_confirmation(&f.id, &list.id).await.unwrap());
        assert_eq!(repo.get_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn default_list_is_never_offered_for_deletion() {
        let f = fixture().await;
        f.management.ensure_initialized(&f.id).await.unwrap();
        let temp = f
            .registry
            .for_character(&f.id)
            .create(NewSpellList::named("Temp"))
            .await
            .unwrap();
        f.host.queue_confirm(true);

        let result = f
            .management
            .delete_with_confirmation(&f.id, &SpellListId::default_list())
            .await;
        assert!(matches!(result, Err(SpellListRepoError::CannotDeleteDefault)));
        assert!(!SpellListManagement::can_delete(&SpellListId::default_list()));

        // The queued answer was not spent on the refused delete.
        assert!(f.management.delete_with_confirmation(&f.id, &temp.id).await.unwrap());
    }

    #[tokio::test]
    async fn reset_all_reports_failures_and_continues() {
        let mut characters = MockCharacterPort::new();
        characters
            .expect_list_player_characters()
            .returning(|| Ok(vec![CharacterId::new("gone"), CharacterId::new("fighter")]));
        characters.expect_get_character().returning(|id| {
            if id.as_str() == "gone" {
                Ok(None)
            } else {
                Ok(Some(CharacterSummary::new(id.clone(), "Fighter")))
            }
        });
        characters
            .expect_class_items()
            .returning(|_| Ok(vec![ClassItem::new("fighter", "Fighter")]));
        let mut flags = MockFlagStorePort::new();
        flags
            .expect_clear_blob()
            .times(1)
            .returning(|_, _| Ok(()));

        let host = HostPorts {
            characters: Arc::new(characters),
            flags: Arc::new(flags),
            sheet: Arc::new(MockSheetPort::new()),
            notifications: Arc::new(MockNotificationPort::new()),
            localization: Arc::new(MockLocalizationPort::new()),
            dialogs: Arc::new(MockDialogPort::new()),
            random: Arc::new(MockRandomPort::new()),
        };
        let management = SpellListManagement::new(Arc::new(SpellListRegistry::new(
            host,
            RepositorySettings::default(),
        )));

        let report = management.reset_all().await.unwrap();
        assert_eq!(report.cleared, vec![CharacterId::new("fighter")]);
        assert_eq!(report.error_count(), 1);
        assert!(report.failed[0].1.is_not_found());
    }

    #[tokio::test]
    async fn reset_all_fails_when_characters_cannot_be_listed() {
        let mut characters = MockCharacterPort::new();
        characters
            .expect_list_player_characters()
            .returning(|| Err(RepoError::database("list_player_characters", "offline")));
        let host = HostPorts {
            characters: Arc::new(characters),
            flags: Arc::new(MockFlagStorePort::new()),
            sheet: Arc::new(MockSheetPort::new()),
            notifications: Arc::new(MockNotificationPort::new()),
            localization: Arc::new(MockLocalizationPort::new()),
            dialogs: Arc::new(MockDialogPort::new()),
            random: Arc::new(MockRandomPort::new()),
        };
        let management = SpellListManagement::new(Arc::new(SpellListRegistry::new(
            host,
            RepositorySettings::default(),
        )));

        assert!(matches!(
            management.reset_all().await,
            Err(SpellListRepoError::Repo(_))
        ));
    }
}
