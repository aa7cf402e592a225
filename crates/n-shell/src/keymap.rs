//! Key bindings.
//!
//! Maps key chords (a key plus modifiers) to session actions. The keymap
//! starts from a fixed default table and accepts user overrides from the
//! rc script via `bind` / `unbind`. Overrides are never written back; the
//! keymap can only report how it differs from the defaults.
//!
//! # Chord syntax
//!
//! Modifiers and key joined by `+`, case-insensitive, modifiers in any
//! order: `alt+left`, `ctrl+shift+o`, `super+F5`, `ctrl+plus`. Printable
//! keys are stored lowercase so `ctrl+shift+O` and `ctrl+shift+o` are the
//! same chord.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use n_layout::{Direction, Orientation};
use thiserror::Error;

use crate::action::Action;

// ─── Chord types ────────────────────────────────────────────────────────────

/// The key part of a chord.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum KeyCode {
    /// A printable character, stored lowercase.
    Char(char),
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    Tab,
    Enter,
    Escape,
    /// F1 through F35.
    F(u8),
}

bitflags! {
    /// Modifier keys held with a chord.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0000_0001;
        const ALT   = 0b0000_0010;
        const CTRL  = 0b0000_0100;
        const SUPER = 0b0000_1000;
    }
}

/// A key plus the modifiers held with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KeyChord {
    pub code: KeyCode,
    pub modifiers: Modifiers,
}

impl KeyChord {
    #[must_use]
    pub const fn new(code: KeyCode, modifiers: Modifiers) -> Self {
        Self { code, modifiers }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyParseError {
    #[error("empty key chord")]
    Empty,

    #[error("unknown modifier '{modifier}' in '{chord}'")]
    UnknownModifier { modifier: String, chord: String },

    #[error("unknown key '{key}' in '{chord}'")]
    UnknownKey { key: String, chord: String },
}

fn parse_modifier(name: &str) -> Option<Modifiers> {
    match name {
        "shift" => Some(Modifiers::SHIFT),
        "alt" | "meta" | "m" => Some(Modifiers::ALT),
        "ctrl" | "control" | "c" => Some(Modifiers::CTRL),
        "super" | "cmd" | "win" => Some(Modifiers::SUPER),
        _ => None,
    }
}

fn parse_key(name: &str) -> Option<KeyCode> {
    let code = match name {
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" | "pgup" => KeyCode::PageUp,
        "pagedown" | "pgdn" => KeyCode::PageDown,
        "tab" => KeyCode::Tab,
        "enter" | "return" => KeyCode::Enter,
        "escape" | "esc" => KeyCode::Escape,
        "space" => KeyCode::Char(' '),
        "plus" => KeyCode::Char('+'),
        _ => {
            let mut chars = name.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c),
                (Some('f'), Some(_)) => {
                    let n: u8 = name[1..].parse().ok()?;
                    if !(1..=35).contains(&n) {
                        return None;
                    }
                    KeyCode::F(n)
                }
                _ => return None,
            }
        }
    };
    Some(code)
}

impl FromStr for KeyChord {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        if lower.is_empty() {
            return Err(KeyParseError::Empty);
        }

        let mut parts: Vec<&str> = lower.split('+').collect();
        let key = parts.pop().unwrap_or_default();
        let code = parse_key(key).ok_or_else(|| KeyParseError::UnknownKey {
            key: key.to_string(),
            chord: s.to_string(),
        })?;

        let mut modifiers = Modifiers::empty();
        for part in parts {
            modifiers |= parse_modifier(part).ok_or_else(|| KeyParseError::UnknownModifier {
                modifier: part.to_string(),
                chord: s.to_string(),
            })?;
        }

        Ok(Self { code, modifiers })
    }
}

impl fmt::Display for KeyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (flag, name) in [
            (Modifiers::CTRL, "ctrl"),
            (Modifiers::ALT, "alt"),
            (Modifiers::SHIFT, "shift"),
            (Modifiers::SUPER, "super"),
        ] {
            if self.modifiers.contains(flag) {
                write!(f, "{name}+")?;
            }
        }
        match self.code {
            KeyCode::Char(' ') => f.write_str("space"),
            KeyCode::Char('+') => f.write_str("plus"),
            KeyCode::Char(c) => write!(f, "{c}"),
            KeyCode::Left => f.write_str("left"),
            KeyCode::Right => f.write_str("right"),
            KeyCode::Up => f.write_str("up"),
            KeyCode::Down => f.write_str("down"),
            KeyCode::Home => f.write_str("home"),
            KeyCode::End => f.write_str("end"),
            KeyCode::PageUp => f.write_str("pageup"),
            KeyCode::PageDown => f.write_str("pagedown"),
            KeyCode::Tab => f.write_str("tab"),
            KeyCode::Enter => f.write_str("enter"),
            KeyCode::Escape => f.write_str("escape"),
            KeyCode::F(n) => write!(f, "f{n}"),
        }
    }
}

// ─── Keymap ─────────────────────────────────────────────────────────────────

/// A difference between a keymap and the default table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingChange {
    /// Chord bound to an action it does not have by default.
    Bound(KeyChord, Action),
    /// Default chord that has been unbound.
    Unbound(KeyChord),
}

impl fmt::Display for BindingChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bound(chord, action) => write!(f, "bind {chord} {action}"),
            Self::Unbound(chord) => write!(f, "unbind {chord}"),
        }
    }
}

/// Chord → action table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keymap {
    bindings: BTreeMap<KeyChord, Action>,
}

const fn chord(code: KeyCode, modifiers: Modifiers) -> KeyChord {
    KeyChord::new(code, modifiers)
}

const CTRL_SHIFT: Modifiers = Modifiers::CTRL.union(Modifiers::SHIFT);

/// The built-in bindings.
const DEFAULT_BINDINGS: [(KeyChord, Action); 11] = [
    (chord(KeyCode::Left, Modifiers::ALT), Action::Focus(Direction::Left)),
    (chord(KeyCode::Right, Modifiers::ALT), Action::Focus(Direction::Right)),
    (chord(KeyCode::Up, Modifiers::ALT), Action::Focus(Direction::Up)),
    (chord(KeyCode::Down, Modifiers::ALT), Action::Focus(Direction::Down)),
    (chord(KeyCode::Char('o'), CTRL_SHIFT), Action::Split(Orientation::Horizontal)),
    (chord(KeyCode::Char('e'), CTRL_SHIFT), Action::Split(Orientation::Vertical)),
    (chord(KeyCode::Char('w'), CTRL_SHIFT), Action::Close),
    (chord(KeyCode::Char('n'), CTRL_SHIFT), Action::CycleNext),
    (chord(KeyCode::Char('p'), CTRL_SHIFT), Action::CyclePrev),
    (chord(KeyCode::Char('x'), CTRL_SHIFT), Action::Only),
    (chord(KeyCode::Tab, Modifiers::CTRL), Action::CycleNext),
];

impl Default for Keymap {
    fn default() -> Self {
        Self {
            bindings: DEFAULT_BINDINGS.into_iter().collect(),
        }
    }
}

impl Keymap {
    /// A keymap with no bindings at all.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            bindings: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn lookup(&self, chord: KeyChord) -> Option<Action> {
        self.bindings.get(&chord).copied()
    }

    /// Bind `chord` to `action`, returning the action it replaced.
    pub fn bind(&mut self, chord: KeyChord, action: Action) -> Option<Action> {
        self.bindings.insert(chord, action)
    }

    /// Remove the binding for `chord`, returning the action it had.
    pub fn unbind(&mut self, chord: KeyChord) -> Option<Action> {
        self.bindings.remove(&chord)
    }

    /// All bindings, ordered by chord.
    pub fn iter(&self) -> impl Iterator<Item = (KeyChord, Action)> + '_ {
        self.bindings.iter().map(|(k, v)| (*k, *v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Bindings that differ from the default table, ordered by chord.
    ///
    /// Rebinding a default chord to its default action reports nothing.
    #[must_use]
    pub fn changed(&self) -> Vec<BindingChange> {
        let defaults = Self::default();
        let mut out: Vec<BindingChange> = self
            .iter()
            .filter(|&(chord, action)| defaults.lookup(chord) != Some(action))
            .map(|(chord, action)| BindingChange::Bound(chord, action))
            .collect();
        out.extend(
            defaults
                .iter()
                .filter(|(chord, _)| !self.bindings.contains_key(chord))
                .map(|(chord, _)| BindingChange::Unbound(chord)),
        );
        out.sort_by_key(|change| match change {
            BindingChange::Bound(chord, _) | BindingChange::Unbound(chord) => *chord,
        });
        out
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
