use super::{SchemeResolver, SetBindingOutcome};
use crate::error::Result;
use crate::registry::CommandSource;
use crate::scope::{Scope, Source};
use crate::store::Bindings;
use shortcuts_keys::normalize;
use std::collections::{HashMap, HashSet};

impl<S: CommandSource> SchemeResolver<S> {
    /// Resolve and apply the scheme for `scope`.
    ///
    /// Every command bound by the previous scheme is first reset to its
    /// native default, so nothing from the old context survives. Local
    /// bindings win over global ones for the same command.
    pub fn resolve(&mut self, scope: &Scope) -> Result<()> {
        self.registry.rebuild();

        let local = self.store.list(Source::User, scope)?;
        let global = if scope.is_global() {
            Bindings::new()
        } else {
            self.store.list(Source::User, &Scope::Global)?
        };

        for command in self.scheme.keys() {
            let native = self.defaults.get(command).map(String::as_str).unwrap_or("");
            self.registry.apply(command, native);
        }

        let mut scheme = local.clone();
        for (command, shortcut) in &global {
            if !scheme.contains_key(command) {
                scheme.insert(command.clone(), shortcut.clone());
            }
        }

        for (name, command) in self.registry.iter() {
            if !self.defaults.contains_key(name) {
                self.defaults.insert(name.to_string(), command.shortcut());
            }
        }

        let mut missing = 0usize;
        for (command, shortcut) in &scheme {
            if !self.registry.apply(command, shortcut) {
                missing += 1;
            }
        }

        self.lookup = conflict_free(&scheme, |command| self.registry.contains(command));
        tracing::debug!(
            %scope,
            local = local.len(),
            global = global.len(),
            applied = scheme.len() - missing,
            missing,
            "resolved shortcut scheme"
        );

        self.local = local;
        self.global = global;
        self.scheme = scheme;
        self.scope = Some(scope.clone());
        Ok(())
    }

    /// Store `raw` (normalized) as the user binding of `command` in `scope`
    /// and re-resolve that scope. Text that is not a key sequence clears the
    /// binding.
    pub fn set_binding(
        &mut self,
        scope: &Scope,
        command: &str,
        raw: &str,
    ) -> Result<SetBindingOutcome> {
        let shortcut = normalize(raw);
        self.store.write(Source::User, scope, command, &shortcut)?;
        self.resolve(scope)?;

        let resolved = !shortcut.is_empty()
            && self.lookup.get(&shortcut).is_some_and(|owner| owner == command);
        Ok(SetBindingOutcome {
            command: command.to_string(),
            resolved,
            display: self.display_shortcut(command),
            origin: self.origin(command),
            shortcut,
        })
    }

    /// Command reachable through `typed` key sequence text, if unambiguous.
    pub fn lookup(&self, typed: &str) -> Option<&str> {
        let key = normalize(typed);
        if key.is_empty() {
            return None;
        }
        self.lookup.get(&key).map(String::as_str)
    }
}

/// Invert `scheme`, dropping every key sequence claimed by more than one
/// available command.
fn conflict_free(
    scheme: &Bindings,
    available: impl Fn(&str) -> bool,
) -> HashMap<String, String> {
    let mut lookup: HashMap<String, String> = HashMap::new();
    let mut ambiguous: HashSet<String> = HashSet::new();
    for (command, shortcut) in scheme {
        if !available(command.as_str()) {
            continue;
        }
        let key = normalize(shortcut);
        if key.is_empty() {
            continue;
        }
        if lookup.insert(key.clone(), command.clone()).is_some() {
            ambiguous.insert(key);
        }
    }
    for key in &ambiguous {
        tracing::debug!(shortcut = %key, "ambiguous shortcut left out of lookup");
        lookup.remove(key);
    }
    lookup
}
