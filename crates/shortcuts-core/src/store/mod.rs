//! Persistent binding storage.

mod bindings;
mod file;
mod param;

pub use bindings::{BindingStore, Bindings, MAX_SLOTS};
pub use file::{Persist, TomlFile};
pub use param::ParamGroup;
