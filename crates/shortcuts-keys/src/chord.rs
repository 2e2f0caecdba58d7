use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::fmt;

/// Modifiers that take part in a chord. Anything else reported by the
/// terminal (hyper, keypad state) is dropped.
const CHORD_MODIFIERS: KeyModifiers = KeyModifiers::CONTROL
    .union(KeyModifiers::ALT)
    .union(KeyModifiers::SHIFT)
    .union(KeyModifiers::SUPER);

/// A single key press together with its held modifiers.
///
/// Chords are always stored in canonical shape: letters are upper-cased,
/// `BackTab` becomes `Shift+Tab` and `Meta` folds into `SUPER`. Two chords
/// that describe the same key combination therefore compare equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct KeyChord {
    code: KeyCode,
    modifiers: KeyModifiers,
}

impl KeyChord {
    /// Build a chord, returning `None` for keys that cannot be bound.
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Option<Self> {
        let mut mods = modifiers;
        if mods.contains(KeyModifiers::META) {
            mods.insert(KeyModifiers::SUPER);
        }
        mods &= CHORD_MODIFIERS;

        let code = match code {
            KeyCode::BackTab => {
                mods.insert(KeyModifiers::SHIFT);
                KeyCode::Tab
            }
            KeyCode::Char(c) => KeyCode::Char(canonical_char(c)),
            other => other,
        };
        key_name(code)?;
        Some(Self {
            code,
            modifiers: mods,
        })
    }

    /// Chord for a captured key press.
    ///
    /// Releases and bare modifier presses yield `None`.
    pub fn from_key_event(event: KeyEvent) -> Option<Self> {
        if event.kind == KeyEventKind::Release {
            return None;
        }
        Self::new(event.code, event.modifiers)
    }

    pub fn code(&self) -> KeyCode {
        self.code
    }

    pub fn modifiers(&self) -> KeyModifiers {
        self.modifiers
    }

    /// Does a key press trigger this chord?
    pub fn matches(&self, event: KeyEvent) -> bool {
        Self::from_key_event(event).is_some_and(|pressed| pressed == *self)
    }
}

impl fmt::Display for KeyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::new();
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            parts.push("Ctrl".to_string());
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            parts.push("Alt".to_string());
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            parts.push("Shift".to_string());
        }
        if self.modifiers.contains(KeyModifiers::SUPER) {
            parts.push("Meta".to_string());
        }
        // new() rejects codes without a name
        parts.push(key_name(self.code).unwrap_or_default());
        write!(f, "{}", parts.join("+"))
    }
}

fn canonical_char(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

/// Canonical display name of a bindable key.
pub(crate) fn key_name(code: KeyCode) -> Option<String> {
    let name = match code {
        KeyCode::Char(' ') => "Space",
        KeyCode::Char(c) if c.is_control() => return None,
        KeyCode::Char(c) => return Some(c.to_string()),
        KeyCode::F(n) if (1..=35).contains(&n) => return Some(format!("F{}", n)),
        KeyCode::Enter => "Enter",
        KeyCode::Esc => "Esc",
        KeyCode::Backspace => "Backspace",
        KeyCode::Tab => "Tab",
        KeyCode::Insert => "Ins",
        KeyCode::Delete => "Del",
        KeyCode::Home => "Home",
        KeyCode::End => "End",
        KeyCode::PageUp => "PgUp",
        KeyCode::PageDown => "PgDown",
        KeyCode::Left => "Left",
        KeyCode::Right => "Right",
        KeyCode::Up => "Up",
        KeyCode::Down => "Down",
        KeyCode::Pause => "Pause",
        KeyCode::PrintScreen => "Print",
        KeyCode::Menu => "Menu",
        KeyCode::CapsLock => "CapsLock",
        KeyCode::NumLock => "NumLock",
        KeyCode::ScrollLock => "ScrollLock",
        _ => return None,
    };
    Some(name.to_string())
}
