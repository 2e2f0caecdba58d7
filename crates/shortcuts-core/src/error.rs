//! Error types for shortcuts core.

use thiserror::Error;

/// Errors that can occur while reading or writing bindings.
#[derive(Error, Debug)]
pub enum ShortcutsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Store serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Refusing to read {path}: store too large ({size} bytes, max {max})")]
    StoreTooLarge { path: String, size: u64, max: u64 },

    #[error("No free slot in {namespace} (max {max})")]
    NamespaceFull { namespace: String, max: usize },
}

pub type Result<T> = std::result::Result<T, ShortcutsError>;
