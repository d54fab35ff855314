//! Transformations over the parsed settings document.
//!
//! Everything here operates on an in-memory `serde_json::Value`; reading,
//! writing, and backups are the caller's job. Keys and structures that do
//! not belong to the managed hook pass through untouched.

use serde_json::{json, Value};

use super::HookError;
use crate::domain::BinaryIdentity;

/// Hook event the managed binary registers under.
pub const HOOK_EVENT: &str = "UserPromptSubmit";

/// Minimal document written when no settings file exists yet.
pub(crate) fn empty_document() -> Value {
    json!({ "hooks": { HOOK_EVENT: [] } })
}

/// A single hook entry invoking `command`.
fn hook_entry(command: &str) -> Value {
    json!({ "type": "command", "command": command })
}

/// A hook group wrapping exactly one entry, the shape Claude Code expects
/// as an element of an event array.
fn hook_group(command: &str) -> Value {
    json!({ "hooks": [hook_entry(command)] })
}

/// Tests whether any entry under the managed event matches the identity.
///
/// Tolerant of absent keys and unrecognized shapes; never errors.
pub(crate) fn contains_entry(doc: &Value, identity: &BinaryIdentity) -> bool {
    doc.get("hooks")
        .and_then(|hooks| hooks.get(HOOK_EVENT))
        .and_then(Value::as_array)
        .is_some_and(|groups| groups.iter().any(|group| group_matches(group, identity)))
}

fn group_matches(group: &Value, identity: &BinaryIdentity) -> bool {
    group
        .get("hooks")
        .and_then(Value::as_array)
        .is_some_and(|entries| entries.iter().any(|entry| entry_matches(entry, identity)))
}

fn entry_matches(entry: &Value, identity: &BinaryIdentity) -> bool {
    entry
        .get("command")
        .and_then(Value::as_str)
        .is_some_and(|command| identity.matches(command))
}

/// Appends a new hook group for `command` under the managed event, creating
/// the `hooks` object and the event array when absent.
///
/// Fails when an existing key has the wrong JSON type; replacing a user's
/// non-object `hooks` value would destroy data.
pub(crate) fn insert_entry(doc: &mut Value, command: &str) -> Result<(), HookError> {
    let root = doc
        .as_object_mut()
        .ok_or_else(|| HookError::Shape("settings root is not a JSON object".to_string()))?;
    let hooks = root
        .entry("hooks")
        .or_insert(json!({}))
        .as_object_mut()
        .ok_or_else(|| HookError::Shape("\"hooks\" is not a JSON object".to_string()))?;
    let groups = hooks
        .entry(HOOK_EVENT)
        .or_insert(json!([]))
        .as_array_mut()
        .ok_or_else(|| HookError::Shape(format!("\"hooks.{HOOK_EVENT}\" is not an array")))?;
    groups.push(hook_group(command));
    Ok(())
}

/// Removes every entry matching the identity from every group under the
/// managed event, dropping any group this emptied. Returns the number of
/// entries removed.
///
/// Groups without a recognizable `hooks` array, and groups that were empty
/// to begin with, pass through unchanged.
pub(crate) fn remove_entries(doc: &mut Value, identity: &BinaryIdentity) -> usize {
    let groups = match doc
        .get_mut("hooks")
        .and_then(|hooks| hooks.get_mut(HOOK_EVENT))
        .and_then(Value::as_array_mut)
    {
        Some(groups) => groups,
        None => return 0,
    };

    let mut removed = 0;
    groups.retain_mut(|group| {
        let entries = match group.get_mut("hooks").and_then(Value::as_array_mut) {
            Some(entries) => entries,
            None => return true,
        };
        let before = entries.len();
        entries.retain(|entry| !entry_matches(entry, identity));
        removed += before - entries.len();
        // Drop the group only when this removal emptied it.
        entries.len() == before || !entries.is_empty()
    });
    removed
}

/// Removes the managed event key when its array is empty, then the `hooks`
/// key when the object is empty. Runs on the deregistration path only;
/// registration never prunes.
pub(crate) fn prune_empty(doc: &mut Value) {
    let Some(root) = doc.as_object_mut() else {
        return;
    };
    if let Some(hooks) = root.get_mut("hooks").and_then(Value::as_object_mut) {
        let event_empty = hooks
            .get(HOOK_EVENT)
            .and_then(Value::as_array)
            .is_some_and(|groups| groups.is_empty());
        if event_empty {
            hooks.remove(HOOK_EVENT);
        }
    }
    let hooks_empty = root
        .get("hooks")
        .and_then(Value::as_object)
        .is_some_and(|hooks| hooks.is_empty());
    if hooks_empty {
        root.remove("hooks");
    }
}
