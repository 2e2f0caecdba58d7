use super::SchemeResolver;
use crate::error::Result;
use crate::registry::{CommandSource, display_label};
use crate::scope::Scope;

/// Where a command's current shortcut comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BindingOrigin {
    /// Stored for the active context only.
    Local,
    /// Stored globally.
    Global,
    /// Stored locally, hiding a global binding or a native shortcut.
    LocalOverride,
    /// The host's own shortcut; nothing stored.
    Native,
}

/// One command as listed in a bindings table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BindingRow {
    pub command: String,
    pub label: String,
    pub tooltip: String,
    pub icon: Option<String>,
    pub enabled: bool,
    /// Live shortcut of the command.
    pub shortcut: String,
    pub origin: Option<BindingOrigin>,
}

impl<S: CommandSource> SchemeResolver<S> {
    pub fn origin(&self, command: &str) -> Option<BindingOrigin> {
        let local = self.local.contains_key(command);
        let global = self.global.contains_key(command);
        let native = self
            .defaults
            .get(command)
            .is_some_and(|shortcut| !shortcut.is_empty());
        let in_global_scope = self.scope.as_ref().is_some_and(Scope::is_global);

        match (local, global) {
            (true, _) if in_global_scope => Some(BindingOrigin::Global),
            (true, true) => Some(BindingOrigin::LocalOverride),
            (true, false) if native => Some(BindingOrigin::LocalOverride),
            (true, false) => Some(BindingOrigin::Local),
            (false, true) => Some(BindingOrigin::Global),
            (false, false) if native => Some(BindingOrigin::Native),
            (false, false) => None,
        }
    }

    /// Shortcut a command shows: its scheme entry, else its native default.
    pub fn display_shortcut(&self, command: &str) -> String {
        self.scheme
            .get(command)
            .or_else(|| self.defaults.get(command).filter(|s| !s.is_empty()))
            .cloned()
            .unwrap_or_default()
    }

    /// Every available command with its live shortcut, sorted by label.
    pub fn rows(&self) -> Vec<BindingRow> {
        let mut rows: Vec<BindingRow> = self
            .registry
            .iter()
            .map(|(name, command)| BindingRow {
                command: name.to_string(),
                label: display_label(command.label()),
                tooltip: command.tooltip().to_string(),
                icon: command.icon().map(str::to_string),
                enabled: command.is_enabled(),
                shortcut: command.shortcut(),
                origin: self.origin(name),
            })
            .collect();
        rows.sort_by(|a, b| a.label.cmp(&b.label).then_with(|| a.command.cmp(&b.command)));
        rows
    }

    /// Resolve `scope` and list its rows.
    pub fn list_bindings(&mut self, scope: &Scope) -> Result<Vec<BindingRow>> {
        self.resolve(scope)?;
        Ok(self.rows())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{BasicCommand, Command};
    use crate::scope::Source;
    use crate::store::BindingStore;
    use std::rc::Rc;

    fn resolver(commands: Vec<BasicCommand>) -> SchemeResolver<Vec<Rc<dyn Command>>> {
        let host: Vec<Rc<dyn Command>> = commands
            .into_iter()
            .map(|c| Rc::new(c) as Rc<dyn Command>)
            .collect();
        SchemeResolver::new(host, BindingStore::in_memory())
    }

    fn store(r: &mut SchemeResolver<Vec<Rc<dyn Command>>>, scope: &Scope, cmd: &str, sc: &str) {
        r.store_mut()
            .write(Source::User, scope, cmd, sc)
            .expect("write");
    }

    #[test]
    fn rows_are_sorted_by_label_without_mnemonics() {
        let mut r = resolver(vec![
            BasicCommand::new("Std_Zoom", "&Zoom"),
            BasicCommand::new("Std_Copy", "&Copy").with_tooltip("Copy selection"),
            BasicCommand::new("Std_Align", "Align").with_icon("align.svg"),
        ]);
        let rows = r.list_bindings(&Scope::named("Sketch")).expect("rows");
        let labels: Vec<&str> = rows.iter().map(|row| row.label.as_str()).collect();
        assert_eq!(labels, vec!["Align", "Copy", "Zoom"]);
        assert_eq!(rows[0].icon.as_deref(), Some("align.svg"));
        assert_eq!(rows[1].tooltip, "Copy selection");
    }

    #[test]
    fn rows_show_ambiguous_bindings() {
        let mut r = resolver(vec![BasicCommand::new("CmdA", "A"), BasicCommand::new("CmdB", "B")]);
        let sketch = Scope::named("Sketch");
        store(&mut r, &sketch, "CmdA", "Ctrl+K");
        store(&mut r, &sketch, "CmdB", "Ctrl+K");

        let rows = r.list_bindings(&sketch).expect("rows");
        assert!(rows.iter().all(|row| row.shortcut == "Ctrl+K"));
        assert!(r.lookup("Ctrl+K").is_none());
    }

    #[test]
    fn origins() {
        let mut r = resolver(vec![
            BasicCommand::new("LocalOnly", "1"),
            BasicCommand::new("GlobalOnly", "2"),
            BasicCommand::new("Both", "3"),
            BasicCommand::new("OverNative", "4").with_shortcut("F4"),
            BasicCommand::new("NativeOnly", "5").with_shortcut("F5"),
            BasicCommand::new("Nothing", "6"),
        ]);
        let sketch = Scope::named("Sketch");
        store(&mut r, &sketch, "LocalOnly", "A");
        store(&mut r, &Scope::Global, "GlobalOnly", "B");
        store(&mut r, &sketch, "Both", "C");
        store(&mut r, &Scope::Global, "Both", "D");
        store(&mut r, &sketch, "OverNative", "E");
        r.resolve(&sketch).expect("resolve");

        assert_eq!(r.origin("LocalOnly"), Some(BindingOrigin::Local));
        assert_eq!(r.origin("GlobalOnly"), Some(BindingOrigin::Global));
        assert_eq!(r.origin("Both"), Some(BindingOrigin::LocalOverride));
        assert_eq!(r.origin("OverNative"), Some(BindingOrigin::LocalOverride));
        assert_eq!(r.origin("NativeOnly"), Some(BindingOrigin::Native));
        assert_eq!(r.origin("Nothing"), None);

        r.resolve(&Scope::Global).expect("resolve");
        assert_eq!(r.origin("Both"), Some(BindingOrigin::Global));
        assert_eq!(r.origin("LocalOnly"), None);
    }

    #[test]
    fn display_prefers_scheme_then_default() {
        let mut r = resolver(vec![
            BasicCommand::new("Bound", "1").with_shortcut("F1"),
            BasicCommand::new("Native", "2").with_shortcut("F2"),
            BasicCommand::new("Bare", "3"),
        ]);
        let sketch = Scope::named("Sketch");
        store(&mut r, &sketch, "Bound", "Ctrl+B");
        r.resolve(&sketch).expect("resolve");

        assert_eq!(r.display_shortcut("Bound"), "Ctrl+B");
        assert_eq!(r.display_shortcut("Native"), "F2");
        assert_eq!(r.display_shortcut("Bare"), "");
    }
}
