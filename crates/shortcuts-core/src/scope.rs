//! Binding scopes and sources.
//!
//! Bindings live under `Source/Context`. The global scope keeps its historic
//! on-disk name so existing stores stay readable.

use std::fmt;

/// Storage name of the global scope.
pub const GLOBAL_CONTEXT_ID: &str = "GlobalShortcuts";

/// Where a binding applies.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Active in every context.
    Global,
    /// Active only while the named context is active.
    Named(String),
}

impl Scope {
    /// Scope for a context name. The global storage name maps to [`Scope::Global`].
    pub fn named(context: impl Into<String>) -> Self {
        let context = context.into();
        if context == GLOBAL_CONTEXT_ID {
            Scope::Global
        } else {
            Scope::Named(context)
        }
    }

    pub fn is_global(&self) -> bool {
        matches!(self, Scope::Global)
    }

    /// Group name used in the parameter store.
    pub fn storage_key(&self) -> &str {
        match self {
            Scope::Global => GLOBAL_CONTEXT_ID,
            Scope::Named(name) => name,
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.storage_key())
    }
}

/// Who defined a binding. Only user bindings exist today.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Source {
    #[default]
    User,
}

impl Source {
    pub fn storage_key(&self) -> &'static str {
        match self {
            Source::User => "User",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.storage_key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_storage_name_maps_to_global() {
        assert_eq!(Scope::named("GlobalShortcuts"), Scope::Global);
        assert_eq!(Scope::named("Sketch"), Scope::Named("Sketch".to_string()));
    }

    #[test]
    fn storage_keys() {
        assert_eq!(Scope::Global.storage_key(), "GlobalShortcuts");
        assert_eq!(Scope::named("PartDesign").storage_key(), "PartDesign");
        assert_eq!(Source::User.storage_key(), "User");
    }
}
