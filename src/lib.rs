//! shortcuts - Context-aware keyboard shortcut schemes.
//!
//! Bindings are stored per context ("Sketch", "Part", ...) and globally. When
//! the host switches context, the [`ContextSwitcher`] resolves the merged
//! scheme onto the host's commands; local bindings win over global ones and
//! commands without a binding fall back to their native shortcut.

pub mod config;
pub mod logging;
pub mod overlay;
pub mod report;
pub mod switcher;

pub use config::{OverlaySettings, ShortcutsConfig, load_config};
pub use overlay::{Completion, Overlay};
pub use report::report;
pub use switcher::{ContextSource, ContextSwitcher, SwitchEvent};

pub use shortcuts_core::{
    ActionRegistry, BasicCommand, BindingOrigin, BindingRow, BindingStore, Bindings, Command,
    CommandSource, GLOBAL_CONTEXT_ID, MAX_SLOTS, ParamGroup, Persist, Result, SchemeResolver, Scope,
    SetBindingOutcome, ShortcutsError, Source, TomlFile, display_label,
};
pub use shortcuts_keys::{KeyChord, KeyParseError, KeySequence, normalize};
