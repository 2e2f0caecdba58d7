//! Search overlay model: the completion list shown while the user types a
//! shortcut, and running the command it names.
//!
//! Drawing the popup and the typing delay are left to the UI.

use crate::config::OverlaySettings;
use shortcuts_core::{CommandSource, SchemeResolver, display_label};
use shortcuts_keys::KeySequence;

/// One row of the completion list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Completion {
    pub shortcut: String,
    pub command: String,
    /// `"<shortcut>  <label>"`, the text completions are matched against.
    pub text: String,
    pub tooltip: String,
    pub icon: Option<String>,
    pub enabled: bool,
}

pub struct Overlay {
    settings: OverlaySettings,
}

impl Overlay {
    pub fn new(settings: OverlaySettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &OverlaySettings {
        &self.settings
    }

    /// Does `sequence` open the overlay?
    pub fn is_invoke(&self, sequence: &KeySequence) -> bool {
        sequence.to_string() == self.settings.invoke
    }

    /// A row for every scheme entry whose command is present, in scheme order.
    pub fn completions<S: CommandSource>(&self, resolver: &SchemeResolver<S>) -> Vec<Completion> {
        resolver
            .scheme()
            .iter()
            .filter_map(|(command, shortcut)| {
                let action = resolver.registry().get(command)?;
                Some(Completion {
                    shortcut: shortcut.clone(),
                    command: command.clone(),
                    text: format!("{}  {}", shortcut, display_label(action.label())),
                    tooltip: action.tooltip().to_string(),
                    icon: action.icon().map(str::to_string),
                    enabled: action.is_enabled(),
                })
            })
            .collect()
    }

    /// Completions whose text starts with `typed`, ignoring case, capped at
    /// `max_visible`.
    pub fn matching<'a>(&self, completions: &'a [Completion], typed: &str) -> Vec<&'a Completion> {
        let typed = typed.trim().to_lowercase();
        completions
            .iter()
            .filter(|c| c.text.to_lowercase().starts_with(&typed))
            .take(self.settings.max_visible)
            .collect()
    }

    /// Trigger the command `typed` resolves to. Returns its name when it ran.
    pub fn trigger<S: CommandSource>(
        &self,
        resolver: &SchemeResolver<S>,
        typed: &str,
    ) -> Option<String> {
        let command = resolver.lookup(typed)?;
        self.activate(resolver, command)
            .then(|| command.to_string())
    }

    /// Trigger a command picked from the completion list.
    pub fn activate<S: CommandSource>(&self, resolver: &SchemeResolver<S>, command: &str) -> bool {
        let Some(action) = resolver.registry().get(command) else {
            return false;
        };
        if !action.is_enabled() {
            tracing::debug!(command, "not triggering disabled command");
            return false;
        }
        tracing::debug!(command, "triggering command from overlay");
        action.trigger();
        true
    }
}

impl Default for Overlay {
    fn default() -> Self {
        Self::new(OverlaySettings::default())
    }
}
