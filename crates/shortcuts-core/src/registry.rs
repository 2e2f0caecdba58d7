//! Read-through view of the host's addressable commands.
//!
//! The host owns its commands; the registry only keeps handles to them,
//! rebuilt from the [`CommandSource`] before every resolution.

use indexmap::IndexMap;
use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::rc::Rc;

/// A host command that can carry a shortcut.
pub trait Command {
    /// Unique, stable identity.
    fn name(&self) -> &str;
    /// Display label, possibly with `&` mnemonic markers.
    fn label(&self) -> &str;
    fn tooltip(&self) -> &str {
        ""
    }
    fn icon(&self) -> Option<&str> {
        None
    }
    fn is_enabled(&self) -> bool {
        true
    }
    /// Live key sequence text, empty when unbound.
    fn shortcut(&self) -> String;
    /// Replace the live key sequence; empty text clears it.
    fn set_shortcut(&self, shortcut: &str);
    fn trigger(&self);
}

/// Enumerates the host's current commands.
pub trait CommandSource {
    fn commands(&self) -> Vec<Rc<dyn Command>>;
}

impl CommandSource for Vec<Rc<dyn Command>> {
    fn commands(&self) -> Vec<Rc<dyn Command>> {
        self.clone()
    }
}

impl CommandSource for RefCell<Vec<Rc<dyn Command>>> {
    fn commands(&self) -> Vec<Rc<dyn Command>> {
        self.borrow().clone()
    }
}

impl<T: CommandSource + ?Sized> CommandSource for Rc<T> {
    fn commands(&self) -> Vec<Rc<dyn Command>> {
        (**self).commands()
    }
}

/// Label text without `&` mnemonic markers.
pub fn display_label(label: &str) -> String {
    label.replace('&', "")
}

/// Deduplicated commands by name, in host order.
pub struct ActionRegistry<S> {
    source: S,
    actions: IndexMap<String, Rc<dyn Command>>,
}

impl<S: CommandSource> ActionRegistry<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            actions: IndexMap::new(),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Re-enumerate the host commands.
    ///
    /// Commands without a name or label, or whose name contains `,`, are
    /// skipped. A name seen more than once is dropped entirely.
    pub fn rebuild(&mut self) -> &IndexMap<String, Rc<dyn Command>> {
        self.actions.clear();
        let mut duplicates: HashSet<String> = HashSet::new();
        for command in self.source.commands() {
            let name = command.name();
            if name.is_empty() || command.label().is_empty() || name.contains(',') {
                continue;
            }
            if self.actions.contains_key(name) {
                duplicates.insert(name.to_string());
            } else {
                self.actions.insert(name.to_string(), command);
            }
        }
        for name in &duplicates {
            tracing::debug!(command = %name, "dropping ambiguous command name");
            self.actions.shift_remove(name);
        }
        &self.actions
    }

    pub fn get(&self, name: &str) -> Option<&Rc<dyn Command>> {
        self.actions.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.actions.contains_key(name)
    }

    /// Set or clear the live shortcut of `name`. Returns `false` if the
    /// command is not available.
    pub fn apply(&self, name: &str, shortcut: &str) -> bool {
        match self.actions.get(name) {
            Some(command) => {
                command.set_shortcut(shortcut);
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Rc<dyn Command>)> {
        self.actions.iter().map(|(name, cmd)| (name.as_str(), cmd))
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

/// Plain in-memory command for hosts without their own command objects.
#[derive(Debug, Default)]
pub struct BasicCommand {
    name: String,
    label: String,
    tooltip: String,
    icon: Option<String>,
    enabled: Cell<bool>,
    shortcut: RefCell<String>,
    triggered: Cell<usize>,
}

impl BasicCommand {
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            enabled: Cell::new(true),
            ..Self::default()
        }
    }

    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = tooltip.into();
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Native shortcut the host gives the command.
    pub fn with_shortcut(self, shortcut: impl Into<String>) -> Self {
        self.shortcut.replace(shortcut.into());
        self
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.set(enabled);
    }

    /// How many times the command was triggered.
    pub fn trigger_count(&self) -> usize {
        self.triggered.get()
    }
}

impl Command for BasicCommand {
    fn name(&self) -> &str {
        &self.name
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn tooltip(&self) -> &str {
        &self.tooltip
    }

    fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    fn is_enabled(&self) -> bool {
        self.enabled.get()
    }

    fn shortcut(&self) -> String {
        self.shortcut.borrow().clone()
    }

    fn set_shortcut(&self, shortcut: &str) {
        self.shortcut.replace(shortcut.to_string());
    }

    fn trigger(&self) {
        self.triggered.set(self.triggered.get() + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cmd(name: &str, label: &str) -> Rc<dyn Command> {
        Rc::new(BasicCommand::new(name, label))
    }

    #[test]
    fn rebuild_drops_duplicate_names() {
        let source: Vec<Rc<dyn Command>> = vec![
            cmd("Std_Undo", "&Undo"),
            cmd("Std_Copy", "Copy"),
            cmd("Std_Undo", "Undo again"),
            cmd("Std_Undo", "Undo thrice"),
        ];
        let mut registry = ActionRegistry::new(source);
        let names: Vec<String> = registry.rebuild().keys().cloned().collect();
        assert_eq!(names, vec!["Std_Copy"]);
        assert!(registry.get("Std_Undo").is_none());
    }

    #[test]
    fn rebuild_skips_unusable_commands() {
        let source: Vec<Rc<dyn Command>> = vec![
            cmd("", "No name"),
            cmd("NoLabel", ""),
            cmd("A,B", "Comma"),
            cmd("Ok", "Fine"),
        ];
        let mut registry = ActionRegistry::new(source);
        registry.rebuild();
        assert_eq!(registry.len(), 1);
        assert!(registry.contains("Ok"));
    }

    #[test]
    fn rebuild_follows_host_changes() {
        let source = Rc::new(RefCell::new(vec![cmd("A", "A")]));
        let mut registry = ActionRegistry::new(source.clone());
        registry.rebuild();
        assert!(registry.contains("A"));

        source.borrow_mut().push(cmd("B", "B"));
        registry.rebuild();
        assert_eq!(registry.len(), 2);

        source.borrow_mut().clear();
        registry.rebuild();
        assert!(registry.is_empty());
    }

    #[test]
    fn apply_sets_and_clears() {
        let command = Rc::new(BasicCommand::new("Std_Save", "Save").with_shortcut("Ctrl+S"));
        let source: Vec<Rc<dyn Command>> = vec![command.clone()];
        let mut registry = ActionRegistry::new(source);
        registry.rebuild();

        assert!(registry.apply("Std_Save", "F2"));
        assert_eq!(command.shortcut(), "F2");
        assert!(registry.apply("Std_Save", ""));
        assert_eq!(command.shortcut(), "");
        assert!(!registry.apply("Missing", "F3"));
    }

    #[test]
    fn display_label_strips_mnemonics() {
        assert_eq!(display_label("&Undo"), "Undo");
        assert_eq!(display_label("Save &As..."), "Save As...");
    }
}
