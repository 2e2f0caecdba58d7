//! shortcuts-core - Binding storage, command registry and scheme resolution.

pub mod error;
pub mod registry;
pub mod scheme;
pub mod scope;
pub mod store;

pub use error::{Result, ShortcutsError};
pub use registry::{ActionRegistry, BasicCommand, Command, CommandSource, display_label};
pub use scheme::{BindingOrigin, BindingRow, SchemeResolver, SetBindingOutcome};
pub use scope::{GLOBAL_CONTEXT_ID, Scope, Source};
pub use store::{BindingStore, Bindings, MAX_SLOTS, ParamGroup, Persist, TomlFile};

pub use shortcuts_keys::{KeySequence, normalize};
