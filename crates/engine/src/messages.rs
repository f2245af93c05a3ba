//! Localization keys used by the engine, and their English defaults.

pub const DEFAULT_LIST_NAME: &str = "FSL.names.defaultSpellListName";
pub const COPY_LIST_NAME: &str = "FSL.names.defaultSpellListCopyName";

pub const WARN_EXCEEDS_CLASS: &str = "FSL.ui.notifications.warn.exceedsClassPreparedSpells";
pub const WARN_EXCEEDS_UNKNOWN_CLASS: &str =
    "FSL.ui.notifications.warn.exceedsUnknownClassPreparedSpells";
pub const WARN_EXCEEDS_GENERIC: &str = "FSL.ui.notifications.warn.exceedsPreparedSpellsGeneric";

pub const CREATE_DIALOG_TITLE: &str = "FSL.dialogs.createSpellList.title";
pub const RENAME_DIALOG_TITLE: &str = "FSL.dialogs.renameSpellList.title";
pub const COPY_DIALOG_TITLE: &str = "FSL.dialogs.copySpellList.title";
pub const NAME_PLACEHOLDER: &str = "FSL.dialogs.spellListName.placeholder";
pub const DELETE_DIALOG_TITLE: &str = "FSL.dialogs.deleteSpellList.title";
pub const DELETE_DIALOG_BODY: &str = "FSL.dialogs.deleteSpellList.content";

// Message parameters
pub const PARAM_ACTOR_NAME: &str = "actorName";
pub const PARAM_CLASS_NAME: &str = "className";
pub const PARAM_ORIGINAL_NAME: &str = "originalName";
pub const PARAM_LIST_NAME: &str = "listName";

/// English templates, `{param}` placeholders substituted at lookup.
pub const ENGLISH: &[(&str, &str)] = &[
    (DEFAULT_LIST_NAME, "Default"),
    (COPY_LIST_NAME, "Copy of {originalName}"),
    (
        WARN_EXCEEDS_CLASS,
        "{actorName} cannot prepare more {className} spells.",
    ),
    (
        WARN_EXCEEDS_UNKNOWN_CLASS,
        "{actorName} cannot prepare more spells for this class.",
    ),
    (
        WARN_EXCEEDS_GENERIC,
        "{actorName} cannot prepare any more spells.",
    ),
    (CREATE_DIALOG_TITLE, "New Spell List"),
    (RENAME_DIALOG_TITLE, "Rename Spell List"),
    (COPY_DIALOG_TITLE, "Copy Spell List"),
    (NAME_PLACEHOLDER, "Spell list name"),
    (DELETE_DIALOG_TITLE, "Delete Spell List"),
    (
        DELETE_DIALOG_BODY,
        "Delete the spell list \"{listName}\"? This cannot be undone.",
    ),
];
