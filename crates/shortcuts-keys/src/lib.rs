//! shortcuts-keys - Key chords, key sequences and their canonical text form.
//!
//! Every stored binding goes through [`normalize`] first, so two spellings of
//! the same chord ("ctrl+shift+q", "Shift+Ctrl+Q") end up as one string.

mod chord;
mod parse;
mod sequence;

pub use chord::KeyChord;
pub use parse::KeyParseError;
pub use sequence::{KeySequence, MAX_CHORDS, normalize};

pub use crossterm::event::{KeyCode, KeyModifiers};
