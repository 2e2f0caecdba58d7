use crate::chord::KeyChord;
use crossterm::event::{KeyCode, KeyModifiers};
use thiserror::Error;

/// Errors that can occur when parsing key sequence text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyParseError {
    #[error("key sequence is empty")]
    Empty,

    #[error("chord has no key, only modifiers")]
    MissingKey,

    #[error("empty modifier segment")]
    EmptyModifier,

    #[error("unknown modifier '{0}'")]
    UnknownModifier(String),

    #[error("duplicate modifier '{0}'")]
    DuplicateModifier(String),

    #[error("unknown key '{0}'")]
    UnknownKey(String),

    #[error("too many chords: {count} (max {max})")]
    TooManyChords { count: usize, max: usize },
}

pub(crate) fn parse_chords(input: &str, max: usize) -> Result<Vec<KeyChord>, KeyParseError> {
    let parts = split_chords(input);
    if parts.is_empty() {
        return Err(KeyParseError::Empty);
    }
    if parts.len() > max {
        return Err(KeyParseError::TooManyChords {
            count: parts.len(),
            max,
        });
    }
    parts.iter().map(|part| parse_chord(part)).collect()
}

/// Split sequence text into chord texts, dropping all whitespace.
///
/// A `,` separates chords unless it is itself the key: at the start of a
/// chord, or right after a `+` that joins a modifier to a key.
fn split_chords(input: &str) -> Vec<String> {
    let mut chords: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut saw_separator = false;
    for ch in input.chars().filter(|c| !c.is_whitespace()) {
        if ch == ',' && !current.is_empty() && !expects_key(&current) {
            chords.push(std::mem::take(&mut current));
            saw_separator = true;
            continue;
        }
        current.push(ch);
    }
    if !current.is_empty() || saw_separator {
        chords.push(current);
    }
    chords
}

/// True if the chord text ends in a `+` that still waits for its key.
fn expects_key(chord: &str) -> bool {
    chord.ends_with('+') && chord != "+" && !chord.ends_with("++")
}

fn parse_chord(input: &str) -> Result<KeyChord, KeyParseError> {
    if input.is_empty() {
        return Err(KeyParseError::Empty);
    }

    let (mod_str, key_part) = if input == "+" {
        ("", "+")
    } else if let Some(rest) = input.strip_suffix("++") {
        (rest, "+")
    } else {
        match input.rfind('+') {
            Some(idx) => (&input[..idx], &input[idx + 1..]),
            None => ("", input),
        }
    };

    if key_part.is_empty() || modifier_flag(key_part).is_some() {
        return Err(KeyParseError::MissingKey);
    }
    let modifiers = if mod_str.is_empty() {
        KeyModifiers::empty()
    } else {
        parse_modifiers(mod_str)?
    };
    let code = parse_key_code(key_part)?;
    KeyChord::new(code, modifiers).ok_or_else(|| KeyParseError::UnknownKey(key_part.to_string()))
}

fn parse_modifiers(input: &str) -> Result<KeyModifiers, KeyParseError> {
    let mut modifiers = KeyModifiers::empty();
    for part in input.split('+') {
        if part.is_empty() {
            return Err(KeyParseError::EmptyModifier);
        }
        let flag = modifier_flag(part)
            .ok_or_else(|| KeyParseError::UnknownModifier(part.to_string()))?;
        if modifiers.contains(flag) {
            return Err(KeyParseError::DuplicateModifier(part.to_string()));
        }
        modifiers.insert(flag);
    }
    Ok(modifiers)
}

fn modifier_flag(input: &str) -> Option<KeyModifiers> {
    match input.to_ascii_lowercase().as_str() {
        "ctrl" | "control" | "ctl" => Some(KeyModifiers::CONTROL),
        "alt" | "option" | "opt" => Some(KeyModifiers::ALT),
        "shift" => Some(KeyModifiers::SHIFT),
        "meta" | "super" | "cmd" | "command" | "win" => Some(KeyModifiers::SUPER),
        _ => None,
    }
}

fn parse_key_code(input: &str) -> Result<KeyCode, KeyParseError> {
    if let Some(ch) = parse_single_char(input) {
        return Ok(KeyCode::Char(ch));
    }
    let norm = input.to_ascii_lowercase();
    if let Some(n) = norm.strip_prefix('f').and_then(|n| n.parse::<u8>().ok())
        && (1..=35).contains(&n)
    {
        return Ok(KeyCode::F(n));
    }
    match norm.as_str() {
        "esc" | "escape" => Ok(KeyCode::Esc),
        "tab" => Ok(KeyCode::Tab),
        "backtab" => Ok(KeyCode::BackTab),
        "backspace" => Ok(KeyCode::Backspace),
        "enter" | "return" => Ok(KeyCode::Enter),
        "ins" | "insert" => Ok(KeyCode::Insert),
        "del" | "delete" => Ok(KeyCode::Delete),
        "home" => Ok(KeyCode::Home),
        "end" => Ok(KeyCode::End),
        "pgup" | "pageup" => Ok(KeyCode::PageUp),
        "pgdown" | "pgdn" | "pagedown" => Ok(KeyCode::PageDown),
        "left" => Ok(KeyCode::Left),
        "right" => Ok(KeyCode::Right),
        "up" => Ok(KeyCode::Up),
        "down" => Ok(KeyCode::Down),
        "space" | "spc" => Ok(KeyCode::Char(' ')),
        "pause" => Ok(KeyCode::Pause),
        "print" | "printscreen" => Ok(KeyCode::PrintScreen),
        "menu" => Ok(KeyCode::Menu),
        "capslock" => Ok(KeyCode::CapsLock),
        "numlock" => Ok(KeyCode::NumLock),
        "scrolllock" => Ok(KeyCode::ScrollLock),
        "dash" | "minus" => Ok(KeyCode::Char('-')),
        "plus" => Ok(KeyCode::Char('+')),
        "comma" => Ok(KeyCode::Char(',')),
        "period" | "dot" => Ok(KeyCode::Char('.')),
        "slash" => Ok(KeyCode::Char('/')),
        "backslash" => Ok(KeyCode::Char('\\')),
        "semicolon" => Ok(KeyCode::Char(';')),
        "quote" | "apostrophe" => Ok(KeyCode::Char('\'')),
        "backtick" | "grave" => Ok(KeyCode::Char('`')),
        "lbracket" | "leftbracket" => Ok(KeyCode::Char('[')),
        "rbracket" | "rightbracket" => Ok(KeyCode::Char(']')),
        "equal" => Ok(KeyCode::Char('=')),
        _ => Err(KeyParseError::UnknownKey(input.to_string())),
    }
}

fn parse_single_char(input: &str) -> Option<char> {
    let mut chars = input.chars();
    let ch = chars.next()?;
    if chars.next().is_none() {
        Some(ch)
    } else {
        None
    }
}
