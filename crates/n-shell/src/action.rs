//! Session actions — what a key binding or script line asks the session to do.
//!
//! # Text form
//!
//! | Text              | Action                       |
//! |-------------------|------------------------------|
//! | `focus <dir>`     | Move focus left/up/right/down |
//! | `next` / `prev`   | Cycle focus through panes     |
//! | `split <h\|v>`    | Split the focused pane        |
//! | `close`           | Close the focused pane        |
//! | `only`            | Close every other pane        |
//! | `cursor <x> <y>`  | Record the pointer position   |
//! | `resize <w>x<h>`  | Lay the tree out on a new area |

use std::fmt;
use std::str::FromStr;

use n_layout::geometry::ParseDirectionError;
use n_layout::tree::ParseOrientationError;
use n_layout::{Direction, Orientation, Point};
use thiserror::Error;

/// A single request to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Focus(Direction),
    CycleNext,
    CyclePrev,
    Split(Orientation),
    Close,
    Only,
    MoveCursor(Point),
    Resize { width: u32, height: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionParseError {
    #[error("empty action")]
    Empty,

    #[error("unknown action: '{0}'")]
    Unknown(String),

    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),

    #[error("'{0}' takes no further arguments")]
    TrailingArguments(&'static str),

    #[error(transparent)]
    Direction(#[from] ParseDirectionError),

    #[error(transparent)]
    Orientation(#[from] ParseOrientationError),

    #[error("not a coordinate: '{0}'")]
    Coordinate(String),

    #[error("not a size: '{0}' (expected WIDTHxHEIGHT)")]
    Size(String),
}

/// Parse `WIDTHxHEIGHT`, e.g. `80x24`.
///
/// # Errors
///
/// Returns [`ActionParseError::Size`] if either side is missing or not a
/// non-negative integer.
pub fn parse_size(s: &str) -> Result<(u32, u32), ActionParseError> {
    let bad = || ActionParseError::Size(s.to_string());
    let (w, h) = s.trim().split_once(['x', 'X']).ok_or_else(bad)?;
    let width = w.parse().map_err(|_| bad())?;
    let height = h.parse().map_err(|_| bad())?;
    Ok((width, height))
}

fn parse_coord(s: &str) -> Result<i32, ActionParseError> {
    s.parse()
        .map_err(|_| ActionParseError::Coordinate(s.to_string()))
}

impl FromStr for Action {
    type Err = ActionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let name = words.next().ok_or(ActionParseError::Empty)?;

        let action = match name {
            "focus" | "go" => {
                let dir = words.next().ok_or(ActionParseError::MissingArgument("focus"))?;
                Self::Focus(dir.parse()?)
            }
            "next" => Self::CycleNext,
            "prev" => Self::CyclePrev,
            "split" => {
                let o = words.next().ok_or(ActionParseError::MissingArgument("split"))?;
                Self::Split(o.parse()?)
            }
            "close" => Self::Close,
            "only" => Self::Only,
            "cursor" => {
                let x = words.next().ok_or(ActionParseError::MissingArgument("cursor"))?;
                let y = words.next().ok_or(ActionParseError::MissingArgument("cursor"))?;
                Self::MoveCursor(Point::new(parse_coord(x)?, parse_coord(y)?))
            }
            "resize" => {
                let size = words.next().ok_or(ActionParseError::MissingArgument("resize"))?;
                let (width, height) = parse_size(size)?;
                Self::Resize { width, height }
            }
            other => return Err(ActionParseError::Unknown(other.to_string())),
        };

        if words.next().is_some() {
            return Err(ActionParseError::TrailingArguments(action.name()));
        }
        Ok(action)
    }
}

impl Action {
    /// The leading keyword of the text form.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Focus(_) => "focus",
            Self::CycleNext => "next",
            Self::CyclePrev => "prev",
            Self::Split(_) => "split",
            Self::Close => "close",
            Self::Only => "only",
            Self::MoveCursor(_) => "cursor",
            Self::Resize { .. } => "resize",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Focus(dir) => write!(f, "focus {dir}"),
            Self::Split(Orientation::Horizontal) => f.write_str("split h"),
            Self::Split(Orientation::Vertical) => f.write_str("split v"),
            Self::MoveCursor(p) => write!(f, "cursor {} {}", p.x, p.y),
            Self::Resize { width, height } => write!(f, "resize {width}x{height}"),
            other => f.write_str(other.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_actions() {
        assert_eq!("next".parse(), Ok(Action::CycleNext));
        assert_eq!("prev".parse(), Ok(Action::CyclePrev));
        assert_eq!("close".parse(), Ok(Action::Close));
        assert_eq!("  only ".parse(), Ok(Action::Only));
    }

    #[test]
    fn parse_focus() {
        assert_eq!("focus left".parse(), Ok(Action::Focus(Direction::Left)));
        assert_eq!("go j".parse(), Ok(Action::Focus(Direction::Down)));
    }

    #[test]
    fn parse_focus_bad_direction() {
        assert_eq!(
            "focus diagonal".parse::<Action>(),
            Err(ActionParseError::Direction(ParseDirectionError("diagonal".into())))
        );
    }

    #[test]
    fn parse_split() {
        assert_eq!("split h".parse(), Ok(Action::Split(Orientation::Horizontal)));
        assert_eq!("split vertical".parse(), Ok(Action::Split(Orientation::Vertical)));
        assert_eq!(
            "split".parse::<Action>(),
            Err(ActionParseError::MissingArgument("split"))
        );
    }

    #[test]
    fn parse_cursor_and_resize() {
        assert_eq!(
            "cursor -3 17".parse(),
            Ok(Action::MoveCursor(Point::new(-3, 17)))
        );
        assert_eq!(
            "resize 120x40".parse(),
            Ok(Action::Resize { width: 120, height: 40 })
        );
        assert_eq!(
            "cursor 1 y".parse::<Action>(),
            Err(ActionParseError::Coordinate("y".into()))
        );
        assert_eq!(
            "resize 120".parse::<Action>(),
            Err(ActionParseError::Size("120".into()))
        );
    }

    #[test]
    fn parse_rejects_trailing_words() {
        assert_eq!(
            "close now".parse::<Action>(),
            Err(ActionParseError::TrailingArguments("close"))
        );
    }

    #[test]
    fn parse_rejects_unknown_and_empty() {
        assert_eq!(
            "explode".parse::<Action>(),
            Err(ActionParseError::Unknown("explode".into()))
        );
        assert_eq!("   ".parse::<Action>(), Err(ActionParseError::Empty));
    }

    #[test]
    fn display_parses_back() {
        let actions = [
            Action::Focus(Direction::Up),
            Action::CycleNext,
            Action::CyclePrev,
            Action::Split(Orientation::Horizontal),
            Action::Split(Orientation::Vertical),
            Action::Close,
            Action::Only,
            Action::MoveCursor(Point::new(4, -2)),
            Action::Resize { width: 10, height: 5 },
        ];
        for action in actions {
            assert_eq!(action.to_string().parse(), Ok(action));
        }
    }

    #[test]
    fn size_parse() {
        assert_eq!(parse_size("80x24"), Ok((80, 24)));
        assert_eq!(parse_size("80X24"), Ok((80, 24)));
        assert!(parse_size("x24").is_err());
        assert!(parse_size("-1x24").is_err());
    }
}
