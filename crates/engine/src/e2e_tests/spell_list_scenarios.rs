//! Scenarios covering activation sync, limits and whole-blob persistence.

use std::sync::Arc;

use serde_json::json;
use spellbinder_domain::{
    ChangeOrigin, NewSpellList, Placement, PreparationMode, PreparedStateChange, SpellId,
    SpellItem, SpellItemChanges, SpellList, SpellListEntry, SpellListId,
};

use super::{ids, E2ETestContext};
use crate::entities::{RepositorySettings, ResetOutcome, SpellListRepoError, SpellListRepository};
use crate::infrastructure::config::DEFAULT_FLAG_SCOPE;
use crate::infrastructure::file_flag_store::JsonFileFlagStore;
use crate::infrastructure::ports::{FlagStorePort, HostPorts};
use crate::infrastructure::random::FixedRandom;
use crate::messages;
use crate::use_cases::preparation::{GateReason, ProposedSpellChange};

const WIZARD: (&str, &str, Option<u32>) = ("wizard", "Wizard", Some(2));

#[tokio::test]
async fn third_preparation_over_class_limit_is_vetoed() {
    let ctx = E2ETestContext::setup(&[WIZARD]).await;
    for spell in ["x", "y", "z"] {
        ctx.learn(spell, "wizard").await;
    }

    assert!(ctx.set_prepared("x", PreparationMode::Prepared).await.allow);
    assert!(ctx.set_prepared("y", PreparationMode::Prepared).await.allow);
    let vetoed = ctx.set_prepared("z", PreparationMode::Prepared).await;

    assert!(!vetoed.allow);
    let active = ctx.repo().get_active().await.unwrap();
    assert_eq!(active.spell_ids().cloned().collect::<Vec<_>>(), ids(&["x", "y"]));
    assert_eq!(ctx.prepared().await, ids(&["x", "y"]));

    let warnings = ctx.host.warnings();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].key, messages::WARN_EXCEEDS_CLASS);
    assert_eq!(warnings[0].message, "Tasha cannot prepare more Wizard spells.");
}

#[tokio::test]
async fn activation_flips_only_the_difference() {
    let ctx = E2ETestContext::setup(&[("wizard", "Wizard", Some(3))]).await;
    for spell in ["x", "y", "z"] {
        ctx.learn(spell, "wizard").await;
    }
    ctx.set_prepared("x", PreparationMode::Prepared).await;
    ctx.set_prepared("z", PreparationMode::Prepared).await;

    let list_b = ctx
        .repo()
        .create(NewSpellList::named("B").with_spells(vec![
            SpellListEntry::new("x", "wizard"),
            SpellListEntry::new("y", "wizard"),
        ]))
        .await
        .unwrap();
    ctx.repo().activate(&list_b.id).await.unwrap();

    let batches = ctx.host.batches().await;
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0].origin, ChangeOrigin::SystemReconciliation);
    assert_eq!(
        batches[0].changes,
        vec![
            PreparedStateChange::prepare(SpellId::new("y")),
            PreparedStateChange::unprepare(SpellId::new("z")),
        ]
    );
    assert_eq!(ctx.prepared().await, ids(&["x", "y"]));

    // The host runs the gate over every change in the batch; none is vetoed.
    for change in &batches[0].changes {
        let spell = ctx
            .host
            .spell(&ctx.character_id, &change.spell_id)
            .await
            .unwrap();
        let proposed = ProposedSpellChange::system(SpellItemChanges::prepared(change.new_state));
        let decision = ctx
            .app
            .use_cases
            .preparation
            .gate
            .check(&spell, &proposed)
            .await;
        assert!(decision.allow);
    }
    assert!(ctx.host.warnings().is_empty());

    let applied = ctx.host.applied_options(&ctx.character_id).await.unwrap();
    assert_eq!(applied.sort, list_b.display_options.unwrap().sort);
}

#[tokio::test]
async fn activation_never_prepares_a_listed_cantrip() {
    let ctx = E2ETestContext::setup(&[("wizard", "Wizard", Some(3))]).await;
    ctx.host
        .add_spell(&ctx.character_id, SpellItem::new("light", "Light", 0, "wizard"))
        .await
        .unwrap();
    ctx.learn("x", "wizard").await;

    let list = ctx
        .repo()
        .create(NewSpellList::named("Utility").with_spells(vec![
            SpellListEntry::new("light", "wizard"),
            SpellListEntry::new("x", "wizard"),
        ]))
        .await
        .unwrap();
    ctx.repo().activate(&list.id).await.unwrap();

    let light = ctx
        .host
        .spell(&ctx.character_id, &SpellId::new("light"))
        .await
        .unwrap();
    assert_eq!(light.prepared, PreparationMode::NotPrepared);
    let batches = ctx.host.batches().await;
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0].changes, vec![PreparedStateChange::prepare(SpellId::new("x"))]);
}

#[tokio::test]
async fn activation_survives_a_listed_spell_that_was_deleted() {
    let ctx = E2ETestContext::setup(&[("wizard", "Wizard", Some(3))]).await;
    ctx.learn("x", "wizard").await;
    ctx.learn("gone", "wizard").await;
    let list = ctx
        .repo()
        .create(NewSpellList::named("Stale").with_spells(vec![
            SpellListEntry::new("x", "wizard"),
            SpellListEntry::new("gone", "wizard"),
        ]))
        .await
        .unwrap();
    ctx.host
        .remove_spell(&ctx.character_id, &SpellId::new("gone"))
        .await
        .unwrap();

    ctx.repo().activate(&list.id).await.unwrap();

    assert_eq!(ctx.repo().get_active().await.unwrap().id, list.id);
    assert_eq!(ctx.prepared().await, ids(&["x"]));

    // Later syncs against the same list keep working.
    ctx.repo().activate(&list.id).await.unwrap();
    assert_eq!(ctx.prepared().await, ids(&["x"]));
}

#[tokio::test]
async fn removing_a_spell_everywhere_is_one_write() {
    let ctx = E2ETestContext::setup(&[("wizard", "Wizard", Some(5))]).await;
    let repo = ctx.repo();
    repo.add_spells(vec![SpellListEntry::new("x", "wizard")]).await.unwrap();
    let with_x = repo
        .create(NewSpellList::named("B").with_spells(vec![SpellListEntry::new("x", "wizard")]))
        .await
        .unwrap();
    let without_x = repo
        .create(NewSpellList::named("C").with_spells(vec![SpellListEntry::new("y", "wizard")]))
        .await
        .unwrap();

    let writes_before = ctx.host.blob_writes();
    let changed = repo.remove_spell_from_all(&SpellId::new("x")).await.unwrap();

    assert_eq!(changed, vec![SpellListId::default_list(), with_x.id]);
    assert_eq!(ctx.host.blob_writes() - writes_before, 1);
    assert_eq!(repo.get(&without_x.id).await.unwrap(), without_x);
}

#[tokio::test]
async fn listed_spell_is_allowed_even_when_class_is_full() {
    let ctx = E2ETestContext::setup(&[WIZARD]).await;
    for spell in ["x", "y"] {
        ctx.learn(spell, "wizard").await;
    }
    ctx.set_prepared("x", PreparationMode::Prepared).await;
    ctx.set_prepared("y", PreparationMode::Prepared).await;

    // Unprepared behind the tracker's back: still listed.
    ctx.host
        .apply_spell_change(
            &ctx.character_id,
            &SpellId::new("x"),
            &SpellItemChanges::prepared(PreparationMode::NotPrepared),
        )
        .await
        .unwrap();

    let decision = ctx.set_prepared("x", PreparationMode::Prepared).await;
    assert_eq!(decision.reason, GateReason::AlreadyListed);
    assert!(ctx.host.warnings().is_empty());
}

#[tokio::test]
async fn reset_without_class_maxima_leaves_no_lists() {
    let ctx = E2ETestContext::setup(&[("fighter", "Fighter", None)]).await;
    ctx.host
        .write_blob(
            &ctx.character_id,
            "spellLists",
            json!([{ "id": "default", "name": "Old", "isActive": true, "spells": [] }]),
        )
        .await
        .unwrap();

    assert_eq!(ctx.repo().reset().await.unwrap(), ResetOutcome::Cleared);
    assert!(ctx.repo().get_all().await.unwrap().is_empty());
    assert_eq!(ctx.host.blob(&ctx.character_id, "spellLists").await, None);
}

#[tokio::test]
async fn exactly_one_list_stays_active() {
    let ctx = E2ETestContext::setup(&[WIZARD]).await;
    let repo = ctx.repo();
    let a = repo.create(NewSpellList::named("A")).await.unwrap();
    let b = repo.copy(&a.id, None).await.unwrap();

    let active_count = |lists: &[SpellList]| lists.iter().filter(|l| l.is_active).count();

    repo.activate(&a.id).await.unwrap();
    assert_eq!(active_count(&repo.get_all().await.unwrap()), 1);

    let err = repo.activate(&SpellListId::new("missing")).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(repo.get_active().await.unwrap().id, a.id);

    repo.delete(&a.id).await.unwrap();
    let lists = repo.get_all().await.unwrap();
    assert_eq!(active_count(&lists), 1);
    assert!(repo.get_active().await.unwrap().is_default());

    repo.delete(&b.id).await.unwrap();
    assert_eq!(active_count(&repo.get_all().await.unwrap()), 1);
}

#[tokio::test]
async fn deleting_default_changes_nothing() {
    let ctx = E2ETestContext::setup(&[WIZARD]).await;
    let repo = ctx.repo();
    repo.create(NewSpellList::named("A")).await.unwrap();
    let before = repo.get_all().await.unwrap();

    let result = repo.delete(&SpellListId::default_list()).await;
    assert!(matches!(result, Err(SpellListRepoError::CannotDeleteDefault)));
    assert_eq!(repo.get_all().await.unwrap(), before);
}

#[tokio::test]
async fn moving_twice_matches_moving_once() {
    let ctx = E2ETestContext::setup(&[WIZARD]).await;
    let repo = ctx.repo();
    let a = repo.create(NewSpellList::named("A")).await.unwrap();
    let b = repo.create(NewSpellList::named("B")).await.unwrap();
    let default = SpellListId::default_list();

    repo.move_list(&default, Placement::After, &b.id).await.unwrap();
    let once = repo.get_all().await.unwrap();
    repo.move_list(&default, Placement::After, &b.id).await.unwrap();

    assert_eq!(repo.get_all().await.unwrap(), once);
    let order: Vec<_> = once.into_iter().map(|l| l.id).collect();
    assert_eq!(order, vec![a.id, b.id, default]);
}

#[tokio::test]
async fn lists_survive_a_file_store_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = E2ETestContext::setup(&[WIZARD]).await;

    let mut ports = HostPorts::from_host(ctx.host.clone(), Arc::new(FixedRandom::default()));
    ports.flags = Arc::new(JsonFileFlagStore::new(dir.path(), DEFAULT_FLAG_SCOPE));
    let repo = SpellListRepository::new(
        ctx.character_id.clone(),
        ports.clone(),
        RepositorySettings::default(),
    );
    repo.ensure_initialized().await.unwrap();
    ctx.learn("x", "wizard").await;
    let entries = vec![SpellListEntry::new("x", "wizard")];
    let created = repo
        .create(NewSpellList::named("Prepared").with_spells(entries))
        .await
        .unwrap();
    repo.activate(&created.id).await.unwrap();
    let saved = repo.get_all().await.unwrap();

    // A fresh repository reads the same lists back from disk.
    let reloaded =
        SpellListRepository::new(ctx.character_id.clone(), ports, RepositorySettings::default());
    assert_eq!(reloaded.get_all().await.unwrap(), saved);
    assert_eq!(reloaded.get_active().await.unwrap().id, created.id);
    assert!(dir.path().join(DEFAULT_FLAG_SCOPE).exists());
    assert_eq!(ctx.prepared().await, ids(&["x"]));
}
