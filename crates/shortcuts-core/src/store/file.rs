//! TOML persistence for the parameter tree.
//!
//! Groups map to TOML tables and values to TOML strings, so a store with one
//! local binding reads:
//!
//! ```toml
//! [User.Sketch]
//! index = "1"
//!
//! [User.Sketch.1]
//! command = "Sketcher_NewSketch"
//! shortcut = "Ctrl+Shift+N"
//! ```

use super::ParamGroup;
use crate::error::{Result, ShortcutsError};
use std::fs;
use std::path::{Path, PathBuf};
use toml::{Table, Value};

const MAX_STORE_FILE_BYTES: u64 = 4 * 1_048_576; // 4 MiB

/// Backend that loads and saves the whole parameter tree.
pub trait Persist {
    fn load(&self) -> Result<ParamGroup>;
    fn save(&self, root: &ParamGroup) -> Result<()>;
}

/// Parameter tree stored in a single TOML file.
#[derive(Clone, Debug)]
pub struct TomlFile {
    path: PathBuf,
}

impl TomlFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Persist for TomlFile {
    /// A missing file is an empty store.
    fn load(&self) -> Result<ParamGroup> {
        if !self.path.exists() {
            return Ok(ParamGroup::new());
        }
        let meta = fs::metadata(&self.path)?;
        if meta.len() > MAX_STORE_FILE_BYTES {
            return Err(ShortcutsError::StoreTooLarge {
                path: self.path.display().to_string(),
                size: meta.len(),
                max: MAX_STORE_FILE_BYTES,
            });
        }
        let content = fs::read_to_string(&self.path)?;
        let table: Table = content.parse()?;
        Ok(group_from_table(&table))
    }

    /// Write to a sibling temp file, then rename over the store.
    fn save(&self, root: &ParamGroup) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string(&table_from_group(root))?;
        let tmp = self.path.with_extension("toml.tmp");
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

fn group_from_table(table: &Table) -> ParamGroup {
    let mut group = ParamGroup::new();
    for (key, value) in table {
        match value {
            Value::String(s) => group.set_string(key.as_str(), s.as_str()),
            Value::Table(child) => {
                *group.group_or_insert(key) = group_from_table(child);
            }
            other => {
                tracing::warn!(key = %key, kind = other.type_str(), "skipping non-string store value");
            }
        }
    }
    group
}

fn table_from_group(group: &ParamGroup) -> Table {
    let mut table = Table::new();
    for (key, value) in group.strings() {
        table.insert(key.to_string(), Value::String(value.to_string()));
    }
    for (name, child) in group.groups() {
        table.insert(name.to_string(), Value::Table(table_from_group(child)));
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = TomlFile::new(dir.path().join("bindings.toml"));
        assert!(store.load().expect("load").is_empty());
    }

    #[test]
    fn save_then_load_keeps_tree() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = TomlFile::new(dir.path().join("nested").join("bindings.toml"));

        let mut root = ParamGroup::new();
        let ns = root.group_or_insert("User").group_or_insert("Sketch");
        ns.set_string("index", "1");
        let slot = ns.group_or_insert("1");
        slot.set_string("command", "Std_Undo");
        slot.set_string("shortcut", "Ctrl+Z");

        store.save(&root).expect("save");
        assert_eq!(store.load().expect("load"), root);
        assert!(!dir.path().join("nested").join("bindings.toml.tmp").exists());
    }

    #[test]
    fn non_string_values_are_skipped() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("bindings.toml");
        std::fs::write(&path, "[User.Sketch]\nindex = \"1\"\ncount = 3\n").expect("write");

        let root = TomlFile::new(&path).load().expect("load");
        let ns = root
            .group("User")
            .and_then(|g| g.group("Sketch"))
            .expect("namespace");
        assert_eq!(ns.get_string("index"), "1");
        assert_eq!(ns.get_string("count"), "");
    }

    #[test]
    fn rejects_oversized_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("bindings.toml");
        let oversized = "#".repeat(MAX_STORE_FILE_BYTES as usize + 1);
        std::fs::write(&path, oversized).expect("write oversized store");

        let err = TomlFile::new(&path).load().unwrap_err();
        assert!(matches!(err, ShortcutsError::StoreTooLarge { .. }));
    }

    #[test]
    fn rejects_malformed_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("bindings.toml");
        std::fs::write(&path, "[User\n").expect("write");
        let err = TomlFile::new(&path).load().unwrap_err();
        assert!(matches!(err, ShortcutsError::TomlParse(_)));
    }
}
