//! Plain-text listing of the shortcuts currently on the host's commands.

use shortcuts_core::{ActionRegistry, CommandSource, display_label};

/// One `label<TAB>shortcut` line per bound host command, in host order.
///
/// Walks every command the host reports, including ones the registry
/// leaves out (no label, repeated or unusable names). A command without a
/// label shows as `N/A`.
pub fn report<S: CommandSource>(registry: &ActionRegistry<S>) -> Vec<String> {
    registry
        .source()
        .commands()
        .iter()
        .filter_map(|command| {
            let shortcut = command.shortcut();
            if shortcut.is_empty() {
                return None;
            }
            let label = match command.label() {
                "" => "N/A".to_string(),
                label => display_label(label),
            };
            Some(format!("{}\t{}", label, shortcut))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shortcuts_core::{BasicCommand, Command};
    use std::rc::Rc;

    #[test]
    fn lists_bound_commands_only() {
        let host: Vec<Rc<dyn Command>> = vec![
            Rc::new(BasicCommand::new("Std_Undo", "&Undo").with_shortcut("Ctrl+Z")),
            Rc::new(BasicCommand::new("Std_Copy", "Copy")),
        ];
        let mut registry = ActionRegistry::new(host);
        registry.rebuild();
        assert_eq!(report(&registry), vec!["Undo\tCtrl+Z"]);
    }

    #[test]
    fn includes_commands_the_registry_skips() {
        let host: Vec<Rc<dyn Command>> = vec![
            Rc::new(BasicCommand::new("Unlabelled", "").with_shortcut("F9")),
            Rc::new(BasicCommand::new("Std_Dup", "&First").with_shortcut("F1")),
            Rc::new(BasicCommand::new("Std_Dup", "Second").with_shortcut("F2")),
        ];
        let mut registry = ActionRegistry::new(host);
        registry.rebuild();
        assert!(registry.is_empty());
        assert_eq!(
            report(&registry),
            vec!["N/A\tF9", "First\tF1", "Second\tF2"]
        );
    }
}
