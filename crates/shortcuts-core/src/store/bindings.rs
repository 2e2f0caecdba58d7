//! Slot-based binding storage inside the parameter tree.
//!
//! Layout per namespace (`Source/Context`):
//! - `index`: comma-joined slot ids currently in use
//! - `<slot id>/command`, `<slot id>/shortcut`: one binding per slot
//!
//! Every [`BindingStore::write`] rewrites the namespace so its index is the
//! dense run `1..N`.

use super::{ParamGroup, Persist};
use crate::error::{Result, ShortcutsError};
use crate::scope::{Scope, Source};
use indexmap::IndexMap;
use std::collections::HashSet;

/// Maximum number of slots in one namespace.
pub const MAX_SLOTS: usize = 999;

const INDEX_KEY: &str = "index";
const COMMAND_KEY: &str = "command";
const SHORTCUT_KEY: &str = "shortcut";

/// Command name -> shortcut, in slot order.
pub type Bindings = IndexMap<String, String>;

/// Binding storage over a parameter tree, flushed to its backend after
/// every mutation.
pub struct BindingStore {
    root: ParamGroup,
    persist: Option<Box<dyn Persist>>,
}

impl BindingStore {
    /// Store that lives only in memory.
    pub fn in_memory() -> Self {
        Self::from_root(ParamGroup::new())
    }

    /// In-memory store seeded with an existing tree.
    pub fn from_root(root: ParamGroup) -> Self {
        Self {
            root,
            persist: None,
        }
    }

    /// Load the tree from `persist` and write every change back to it.
    pub fn open(persist: impl Persist + 'static) -> Result<Self> {
        let root = persist.load()?;
        Ok(Self {
            root,
            persist: Some(Box::new(persist)),
        })
    }

    /// Re-read the tree from the backend, dropping in-memory state.
    pub fn reload(&mut self) -> Result<()> {
        if let Some(persist) = &self.persist {
            self.root = persist.load()?;
        }
        Ok(())
    }

    pub fn root(&self) -> &ParamGroup {
        &self.root
    }

    /// Mutable access to the raw tree. Changes are not flushed.
    pub fn root_mut(&mut self) -> &mut ParamGroup {
        &mut self.root
    }

    pub fn has_namespace(&self, source: Source, scope: &Scope) -> bool {
        self.namespace(source, scope).is_some()
    }

    /// Slot ids listed in the namespace index.
    pub fn index(&self, source: Source, scope: &Scope) -> Vec<String> {
        self.namespace(source, scope)
            .map(|ns| split_index(ns.get_string(INDEX_KEY)))
            .unwrap_or_default()
    }

    /// Contexts that have stored bindings for `source`.
    pub fn contexts(&self, source: Source) -> Vec<Scope> {
        self.root
            .group(source.storage_key())
            .map(|group| group.group_names().map(Scope::named).collect())
            .unwrap_or_default()
    }

    /// Read all bindings of a namespace.
    ///
    /// Slots with an empty command or shortcut are dropped from the index and
    /// deleted. An untouched namespace reads as empty and is not created.
    pub fn list(&mut self, source: Source, scope: &Scope) -> Result<Bindings> {
        if !self.has_namespace(source, scope) {
            return Ok(Bindings::new());
        }
        let before = self.root.clone();
        let Some(ns) = self.namespace_mut(source, scope) else {
            return Ok(Bindings::new());
        };

        let mut bindings = Bindings::new();
        let mut kept: Vec<String> = Vec::new();
        let mut dropped: Vec<String> = Vec::new();
        for id in split_index(ns.get_string(INDEX_KEY)) {
            let (command, shortcut) = ns
                .group(&id)
                .map(|slot| (slot.get_string(COMMAND_KEY), slot.get_string(SHORTCUT_KEY)))
                .unwrap_or(("", ""));
            if command.is_empty() || shortcut.is_empty() {
                dropped.push(id);
                continue;
            }
            bindings.insert(command.to_string(), shortcut.to_string());
            kept.push(id);
        }

        if dropped.is_empty() {
            return Ok(bindings);
        }

        for id in &dropped {
            tracing::warn!(%source, %scope, slot = %id, "dropping incomplete binding slot");
            ns.remove_group(id);
        }
        ns.set_string(INDEX_KEY, kept.join(","));
        if kept.is_empty() {
            self.remove_namespace(source, scope);
        }
        self.commit(before)?;
        Ok(bindings)
    }

    /// Slot id for `command`: its current slot, or the smallest free id.
    ///
    /// A new id is appended to the index before any slot body exists, so an
    /// interrupted write shows up as an incomplete slot in [`list`](Self::list).
    /// The change is not flushed; the caller writes the slot body next.
    pub fn allocate_slot(&mut self, source: Source, scope: &Scope, command: &str) -> Result<String> {
        let ns = self
            .root
            .group_or_insert(source.storage_key())
            .group_or_insert(scope.storage_key());
        let mut index = split_index(ns.get_string(INDEX_KEY));

        let existing = index.iter().find(|id| {
            ns.group(id)
                .is_some_and(|slot| slot.get_string(COMMAND_KEY) == command)
        });
        if let Some(id) = existing {
            return Ok(id.clone());
        }

        let used: HashSet<&str> = index.iter().map(String::as_str).collect();
        let Some(id) = (1..=MAX_SLOTS)
            .map(|n| n.to_string())
            .find(|id| !used.contains(id.as_str()))
        else {
            return Err(namespace_full(source, scope));
        };
        index.push(id.clone());
        ns.set_string(INDEX_KEY, index.join(","));
        Ok(id)
    }

    /// Set (non-empty `shortcut`) or remove (empty `shortcut`) one binding,
    /// rewriting the namespace into slots `1..N`.
    ///
    /// Fails with [`ShortcutsError::NamespaceFull`] without touching the
    /// namespace when the result would exceed [`MAX_SLOTS`].
    pub fn write(
        &mut self,
        source: Source,
        scope: &Scope,
        command: &str,
        shortcut: &str,
    ) -> Result<()> {
        let mut bindings = self.list(source, scope)?;
        if shortcut.is_empty() {
            bindings.shift_remove(command);
        } else {
            bindings.insert(command.to_string(), shortcut.to_string());
        }
        self.replace(source, scope, &bindings)
    }

    /// Remove the binding for `command`.
    pub fn delete(&mut self, source: Source, scope: &Scope, command: &str) -> Result<()> {
        self.write(source, scope, command, "")
    }

    /// Replace a whole namespace with `bindings`, in order, as slots `1..N`.
    ///
    /// Entries with an empty command or shortcut are skipped. An empty result
    /// removes the namespace.
    pub fn replace(&mut self, source: Source, scope: &Scope, bindings: &Bindings) -> Result<()> {
        let entries: Vec<(&String, &String)> = bindings
            .iter()
            .filter(|(command, shortcut)| !command.is_empty() && !shortcut.is_empty())
            .collect();
        if entries.len() > MAX_SLOTS {
            return Err(namespace_full(source, scope));
        }

        let before = self.root.clone();
        self.remove_namespace(source, scope);
        if !entries.is_empty() {
            let ns = self
                .root
                .group_or_insert(source.storage_key())
                .group_or_insert(scope.storage_key());
            let ids: Vec<String> = (1..=entries.len()).map(|n| n.to_string()).collect();
            ns.set_string(INDEX_KEY, ids.join(","));
            for (id, &(command, shortcut)) in ids.iter().zip(&entries) {
                let slot = ns.group_or_insert(id);
                slot.set_string(COMMAND_KEY, command.as_str());
                slot.set_string(SHORTCUT_KEY, shortcut.as_str());
            }
        }
        self.commit(before)?;
        tracing::debug!(%source, %scope, count = entries.len(), "rewrote binding namespace");
        Ok(())
    }

    fn namespace(&self, source: Source, scope: &Scope) -> Option<&ParamGroup> {
        self.root
            .group(source.storage_key())?
            .group(scope.storage_key())
    }

    fn namespace_mut(&mut self, source: Source, scope: &Scope) -> Option<&mut ParamGroup> {
        self.root
            .group_mut(source.storage_key())?
            .group_mut(scope.storage_key())
    }

    /// Drop the namespace, and its source group once that is empty.
    fn remove_namespace(&mut self, source: Source, scope: &Scope) {
        let Some(group) = self.root.group_mut(source.storage_key()) else {
            return;
        };
        group.remove_group(scope.storage_key());
        if group.is_empty() {
            self.root.remove_group(source.storage_key());
        }
    }

    fn flush(&self) -> Result<()> {
        match &self.persist {
            Some(persist) => persist.save(&self.root),
            None => Ok(()),
        }
    }

    /// Flush the mutated tree, rolling back to `before` if the backend
    /// rejects it.
    fn commit(&mut self, before: ParamGroup) -> Result<()> {
        if let Err(err) = self.flush() {
            tracing::warn!(error = %err, "store save failed; discarding change");
            self.root = before;
            return Err(err);
        }
        Ok(())
    }
}

impl Default for BindingStore {
    fn default() -> Self {
        Self::in_memory()
    }
}

fn namespace_full(source: Source, scope: &Scope) -> ShortcutsError {
    ShortcutsError::NamespaceFull {
        namespace: format!("{}/{}", source, scope),
        max: MAX_SLOTS,
    }
}

/// Index ids in order, without blanks or repeats.
fn split_index(raw: &str) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty() && seen.insert(id))
        .map(str::to_string)
        .collect()
}
