//! rc and script commands — one command per line.
//!
//! The same grammar serves the startup rc file and any script the binary
//! is fed. Each line is either an [`Action`] in its text form or one of the
//! keymap/reporting commands below. `#` starts a comment; blank lines are
//! skipped.
//!
//! # Commands
//!
//! | Command                  | Effect                                  |
//! |--------------------------|-----------------------------------------|
//! | any action text          | Apply it (`focus left`, `split v`, …)   |
//! | `press <chord>`          | Dispatch a chord through the keymap     |
//! | `bind <chord> <action>`  | Bind a chord                            |
//! | `unbind <chord>`         | Remove a binding                        |
//! | `bind`                   | List bindings that differ from defaults |
//! | `show`                   | Describe the layout                     |

use std::fmt;

use thiserror::Error;

use crate::action::{Action, ActionParseError};
use crate::diag::Diagnostics;
use crate::keymap::{BindingChange, KeyChord, KeyParseError};
use crate::session::{Outcome, Session, SessionError};

/// A parsed script line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run(Action),
    Press(KeyChord),
    Bind(KeyChord, Action),
    Unbind(KeyChord),
    ListChanged,
    Show,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error(transparent)]
    Action(#[from] ActionParseError),

    #[error(transparent)]
    Key(#[from] KeyParseError),

    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),
}

/// Parse one line. Blank lines and comments yield `Ok(None)`.
///
/// # Errors
///
/// Returns a [`CommandError`] naming the part of the line that did not parse.
pub fn parse_line(line: &str) -> Result<Option<Command>, CommandError> {
    let text = line.split_once('#').map_or(line, |(before, _)| before).trim();
    if text.is_empty() {
        return Ok(None);
    }

    let (head, rest) = text
        .split_once(char::is_whitespace)
        .map_or((text, ""), |(h, r)| (h, r.trim()));

    let command = match head {
        "show" if rest.is_empty() => Command::Show,
        "press" => {
            if rest.is_empty() {
                return Err(CommandError::MissingArgument("press"));
            }
            Command::Press(rest.parse()?)
        }
        "bind" if rest.is_empty() => Command::ListChanged,
        "bind" => {
            let (chord, action) = rest
                .split_once(char::is_whitespace)
                .ok_or(CommandError::MissingArgument("bind"))?;
            Command::Bind(chord.parse()?, action.parse()?)
        }
        "unbind" => {
            if rest.is_empty() {
                return Err(CommandError::MissingArgument("unbind"));
            }
            Command::Unbind(rest.parse()?)
        }
        _ => Command::Run(text.parse()?),
    };
    Ok(Some(command))
}

/// Parse every line of `text`, skipping blanks and comments.
///
/// Yields `(line_number, result)` with 1-based line numbers so callers can
/// report errors against the file and carry on.
pub fn parse_script(text: &str) -> impl Iterator<Item = (usize, Result<Command, CommandError>)> + '_ {
    text.lines()
        .enumerate()
        .filter_map(|(i, line)| parse_line(line).transpose().map(|res| (i + 1, res)))
}

/// What executing a command produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Outcome(Outcome),
    Bound {
        chord: KeyChord,
        action: Action,
        previous: Option<Action>,
    },
    Unbound {
        chord: KeyChord,
        previous: Option<Action>,
    },
    Changes(Vec<BindingChange>),
    Layout(String),
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Outcome(outcome) => write!(f, "{outcome}"),
            Self::Bound { chord, action, previous: Some(old) } => {
                write!(f, "{chord}: {old} -> {action}")
            }
            Self::Bound { chord, action, previous: None } => write!(f, "{chord}: {action}"),
            Self::Unbound { chord, previous: Some(old) } => write!(f, "{chord}: unbound ({old})"),
            Self::Unbound { chord, previous: None } => write!(f, "{chord}: was not bound"),
            Self::Changes(changes) if changes.is_empty() => f.write_str("default bindings"),
            Self::Changes(changes) => {
                for (i, change) in changes.iter().enumerate() {
                    if i > 0 {
                        f.write_str("\n")?;
                    }
                    write!(f, "{change}")?;
                }
                Ok(())
            }
            Self::Layout(text) => f.write_str(text.trim_end()),
        }
    }
}

impl Session {
    /// Execute one parsed command.
    ///
    /// # Errors
    ///
    /// Propagates [`SessionError`] from applied actions.
    pub fn execute(
        &mut self,
        command: Command,
        diag: &mut dyn Diagnostics,
    ) -> Result<Reply, SessionError> {
        let reply = match command {
            Command::Run(action) => Reply::Outcome(self.apply(action, diag)?),
            Command::Press(chord) => Reply::Outcome(self.press(chord, diag)?),
            Command::Bind(chord, action) => {
                let previous = self.keymap_mut().bind(chord, action);
                Reply::Bound { chord, action, previous }
            }
            Command::Unbind(chord) => {
                let previous = self.keymap_mut().unbind(chord);
                Reply::Unbound { chord, previous }
            }
            Command::ListChanged => Reply::Changes(self.keymap().changed()),
            Command::Show => Reply::Layout(self.describe()),
        };
        Ok(reply)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use n_layout::{Allocation, Direction, Orientation, PaneId};
    use pretty_assertions::assert_eq;

    fn key(s: &str) -> KeyChord {
        s.parse().unwrap()
    }

    // ── parse_line ───────────────────────────────────────────────────────

    #[test]
    fn blank_and_comment_lines() {
        assert_eq!(parse_line(""), Ok(None));
        assert_eq!(parse_line("   "), Ok(None));
        assert_eq!(parse_line("# a comment"), Ok(None));
    }

    #[test]
    fn action_lines() {
        assert_eq!(
            parse_line("focus right  # go right"),
            Ok(Some(Command::Run(Action::Focus(Direction::Right))))
        );
        assert_eq!(
            parse_line("split v"),
            Ok(Some(Command::Run(Action::Split(Orientation::Vertical))))
        );
    }

    #[test]
    fn keymap_lines() {
        assert_eq!(
            parse_line("bind alt+h focus left"),
            Ok(Some(Command::Bind(key("alt+h"), Action::Focus(Direction::Left))))
        );
        assert_eq!(parse_line("unbind ctrl+tab"), Ok(Some(Command::Unbind(key("ctrl+tab")))));
        assert_eq!(parse_line("bind"), Ok(Some(Command::ListChanged)));
        assert_eq!(parse_line("press alt+up"), Ok(Some(Command::Press(key("alt+up")))));
        assert_eq!(parse_line("show"), Ok(Some(Command::Show)));
    }

    #[test]
    fn parse_errors() {
        assert_eq!(parse_line("bind alt+h"), Err(CommandError::MissingArgument("bind")));
        assert_eq!(parse_line("press"), Err(CommandError::MissingArgument("press")));
        assert!(matches!(parse_line("bind nope+h close"), Err(CommandError::Key(_))));
        assert!(matches!(parse_line("bind alt+h fly"), Err(CommandError::Action(_))));
        assert!(matches!(parse_line("teleport"), Err(CommandError::Action(_))));
        assert!(matches!(parse_line("show me"), Err(CommandError::Action(_))));
    }

    #[test]
    fn script_keeps_line_numbers() {
        let script = "# rc\nsplit v\n\nfocus sideways\nshow\n";
        let parsed: Vec<(usize, bool)> =
            parse_script(script).map(|(n, res)| (n, res.is_ok())).collect();
        assert_eq!(parsed, vec![(2, true), (4, false), (5, true)]);
    }

    // ── execute ──────────────────────────────────────────────────────────

    fn run_script(session: &mut Session, script: &str) -> Vec<String> {
        parse_script(script)
            .map(|(_, cmd)| {
                session
                    .execute(cmd.unwrap(), &mut ())
                    .map_or_else(|e| format!("error: {e}"), |r| r.to_string())
            })
            .collect()
    }

    #[test]
    fn script_drives_session() {
        let mut s = Session::new(Allocation::new(0, 0, 80, 24));
        let out = run_script(
            &mut s,
            "split v\nfocus left\nfocus left\npress ctrl+shift+o\nclose\nclose\nclose",
        );
        assert_eq!(
            out,
            vec![
                "split 1 -> new pane 2",
                "focus 2 -> 1",
                "unchanged",
                "split 1 -> new pane 3",
                "closed 3, focus 2",
                "closed 2, focus 1",
                "error: cannot close the last pane",
            ]
        );
        assert_eq!(s.focus(), PaneId(1));
    }

    #[test]
    fn bind_then_press() {
        let mut s = Session::new(Allocation::new(0, 0, 80, 24));
        let out = run_script(
            &mut s,
            "bind alt+l split v\nbind alt+l next\npress alt+l\nunbind alt+l\nunbind alt+l",
        );
        assert_eq!(
            out,
            vec![
                "alt+l: split v",
                "alt+l: split v -> next",
                "unchanged",
                "alt+l: unbound (next)",
                "alt+l: was not bound",
            ]
        );
    }

    #[test]
    fn list_changed_bindings() {
        let mut s = Session::new(Allocation::new(0, 0, 80, 24));
        assert_eq!(run_script(&mut s, "bind"), vec!["default bindings"]);
        let out = run_script(&mut s, "unbind ctrl+tab\nbind alt+h focus left\nbind");
        assert_eq!(out[2], "bind alt+h focus left\nunbind ctrl+tab");
    }

    #[test]
    fn show_describes_layout() {
        let mut s = Session::new(Allocation::new(0, 0, 80, 24));
        let out = run_script(&mut s, "split h\nshow");
        assert_eq!(out[1], "H[1, 2]\n    1  80x12+0+0\n*   2  80x12+0+12");
    }
}
