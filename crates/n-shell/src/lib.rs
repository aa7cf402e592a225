//! # n-shell — Session, keymap, and command layer for n-tile
//!
//! Everything between a key press and the layout tree:
//!
//! - **[`action`]** — the closed set of things a binding can do
//! - **[`keymap`]** — key chords, default bindings, user overrides
//! - **[`session`]** — one window's tree, focus, and pointer; applies actions
//! - **[`command`]** — the line-oriented rc/script grammar
//! - **[`config`]** — where the rc file lives and how it is read
//! - **[`diag`]** — the sink navigation decisions are reported to

pub mod action;
pub mod command;
pub mod config;
pub mod diag;
pub mod keymap;
pub mod session;

pub use action::Action;
pub use command::{Command, CommandError, Reply, parse_line, parse_script};
pub use diag::{Diagnostic, Diagnostics, Recorder, TracingSink};
pub use keymap::{KeyChord, Keymap};
pub use session::{Outcome, Session, SessionError};
