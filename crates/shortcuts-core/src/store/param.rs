//! In-memory parameter tree: named groups holding string values and child groups.

use std::collections::BTreeMap;

/// One node of the parameter tree.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParamGroup {
    strings: BTreeMap<String, String>,
    groups: BTreeMap<String, ParamGroup>,
}

impl ParamGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// String value of `key`, or `""` when unset.
    pub fn get_string(&self, key: &str) -> &str {
        self.strings.get(key).map(String::as_str).unwrap_or("")
    }

    pub fn set_string(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.strings.insert(key.into(), value.into());
    }

    pub fn remove_string(&mut self, key: &str) -> Option<String> {
        self.strings.remove(key)
    }

    pub fn has_group(&self, name: &str) -> bool {
        self.groups.contains_key(name)
    }

    /// Child group, without creating it.
    pub fn group(&self, name: &str) -> Option<&ParamGroup> {
        self.groups.get(name)
    }

    /// Mutable child group, without creating it.
    pub fn group_mut(&mut self, name: &str) -> Option<&mut ParamGroup> {
        self.groups.get_mut(name)
    }

    /// Child group, created empty if missing.
    pub fn group_or_insert(&mut self, name: &str) -> &mut ParamGroup {
        self.groups.entry(name.to_string()).or_default()
    }

    pub fn remove_group(&mut self, name: &str) -> Option<ParamGroup> {
        self.groups.remove(name)
    }

    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    pub fn strings(&self) -> impl Iterator<Item = (&str, &str)> {
        self.strings.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn groups(&self) -> impl Iterator<Item = (&str, &ParamGroup)> {
        self.groups.iter().map(|(k, g)| (k.as_str(), g))
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty() && self.groups.is_empty()
    }
}
