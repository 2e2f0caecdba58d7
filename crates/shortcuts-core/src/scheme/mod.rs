//! Scheme resolution: merging global and local bindings for the active
//! context and applying them to the host commands.

mod resolve;
mod rows;

use crate::registry::{ActionRegistry, CommandSource};
use crate::scope::Scope;
use crate::store::{BindingStore, Bindings};
use std::collections::HashMap;

pub use rows::{BindingOrigin, BindingRow};

/// Result of [`SchemeResolver::set_binding`], enough to refresh one row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SetBindingOutcome {
    pub command: String,
    /// Canonical shortcut actually stored, empty if the binding was cleared.
    pub shortcut: String,
    /// The stored shortcut reaches the command through lookup.
    pub resolved: bool,
    /// Text the command now shows: its scheme entry, else its native default.
    pub display: String,
    pub origin: Option<BindingOrigin>,
}

/// Owns the resolved scheme, the captured native defaults and the registry.
pub struct SchemeResolver<S> {
    registry: ActionRegistry<S>,
    store: BindingStore,
    scope: Option<Scope>,
    local: Bindings,
    global: Bindings,
    scheme: Bindings,
    lookup: HashMap<String, String>,
    defaults: HashMap<String, String>,
}

impl<S: CommandSource> SchemeResolver<S> {
    pub fn new(source: S, store: BindingStore) -> Self {
        Self {
            registry: ActionRegistry::new(source),
            store,
            scope: None,
            local: Bindings::new(),
            global: Bindings::new(),
            scheme: Bindings::new(),
            lookup: HashMap::new(),
            defaults: HashMap::new(),
        }
    }

    /// Scope of the last resolution.
    pub fn active_scope(&self) -> Option<&Scope> {
        self.scope.as_ref()
    }

    /// Effective command -> shortcut mapping.
    pub fn scheme(&self) -> &Bindings {
        &self.scheme
    }

    /// Shortcut -> command, without ambiguous shortcuts.
    pub fn conflict_free_lookup(&self) -> &HashMap<String, String> {
        &self.lookup
    }

    /// Bindings stored for the active context itself.
    pub fn local_bindings(&self) -> &Bindings {
        &self.local
    }

    /// Global bindings merged into the active context (empty when the
    /// active context is the global one).
    pub fn global_bindings(&self) -> &Bindings {
        &self.global
    }

    /// Native shortcuts captured before any scheme touched the commands.
    pub fn defaults(&self) -> &HashMap<String, String> {
        &self.defaults
    }

    pub fn default_shortcut(&self, command: &str) -> Option<&str> {
        self.defaults.get(command).map(String::as_str)
    }

    pub fn registry(&self) -> &ActionRegistry<S> {
        &self.registry
    }

    pub fn store(&self) -> &BindingStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut BindingStore {
        &mut self.store
    }
}
