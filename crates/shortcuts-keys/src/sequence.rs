use crate::chord::KeyChord;
use crate::parse::{KeyParseError, parse_chords};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum number of chords in one key sequence.
pub const MAX_CHORDS: usize = 4;

/// One to [`MAX_CHORDS`] chords pressed in order, e.g. `Ctrl+K, Ctrl+C`.
///
/// The `Display` form is canonical: parsing it back yields an equal value.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct KeySequence {
    chords: Vec<KeyChord>,
}

impl KeySequence {
    pub fn parse(input: &str) -> Result<Self, KeyParseError> {
        let chords = parse_chords(input, MAX_CHORDS)?;
        Ok(Self { chords })
    }

    /// Sequence made of a single chord.
    pub fn single(chord: KeyChord) -> Self {
        Self {
            chords: vec![chord],
        }
    }

    pub fn chords(&self) -> &[KeyChord] {
        &self.chords
    }

    pub fn len(&self) -> usize {
        self.chords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chords.is_empty()
    }

    /// Append a captured chord, returning `false` once the sequence is full.
    pub fn push(&mut self, chord: KeyChord) -> bool {
        if self.chords.len() >= MAX_CHORDS {
            return false;
        }
        self.chords.push(chord);
        true
    }
}

impl fmt::Display for KeySequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.chords.iter().map(|c| c.to_string()).collect();
        write!(f, "{}", parts.join(", "))
    }
}

impl FromStr for KeySequence {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for KeySequence {
    type Error = KeyParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<KeySequence> for String {
    fn from(value: KeySequence) -> Self {
        value.to_string()
    }
}

/// Canonical text for user-entered key sequence text.
///
/// Returns an empty string when the text is not a valid key sequence; an
/// empty result means "no shortcut".
pub fn normalize(text: &str) -> String {
    match KeySequence::parse(text) {
        Ok(seq) => seq.to_string(),
        Err(err) => {
            if !text.trim().is_empty() {
                tracing::debug!(input = text, error = %err, "rejected key sequence");
            }
            String::new()
        }
    }
}
