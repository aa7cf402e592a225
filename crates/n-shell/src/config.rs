//! rc file lookup.
//!
//! The rc file is a command script (see [`crate::command`]) run once at
//! startup, normally to rebind keys. It lives at
//! `$XDG_CONFIG_HOME/n-tile/rc`, falling back to `~/.config/n-tile/rc`.
//! Configuration is read-only: nothing here ever writes the file.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Directory name under the XDG config root.
pub const APP_DIR: &str = "n-tile";

/// File name of the rc script inside [`APP_DIR`].
pub const RC_FILE: &str = "rc";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Resolve the config directory from explicit `XDG_CONFIG_HOME` and `HOME`
/// values. Empty values count as unset.
#[must_use]
pub fn config_dir_from(xdg: Option<OsString>, home: Option<OsString>) -> Option<PathBuf> {
    let non_empty = |v: Option<OsString>| v.filter(|s| !s.is_empty());
    let base = match non_empty(xdg) {
        Some(xdg) => PathBuf::from(xdg),
        None => PathBuf::from(non_empty(home)?).join(".config"),
    };
    Some(base.join(APP_DIR))
}

/// The config directory for the current environment.
#[must_use]
pub fn config_dir() -> Option<PathBuf> {
    config_dir_from(
        std::env::var_os("XDG_CONFIG_HOME"),
        std::env::var_os("HOME"),
    )
}

/// Where the rc file is expected when no path is given on the command line.
#[must_use]
pub fn default_rc_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(RC_FILE))
}

/// Read an rc file. A file that does not exist yields `Ok(None)`.
///
/// # Errors
///
/// Any other I/O failure, with the path attached.
pub fn load_rc(path: &Path) -> Result<Option<String>, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn os(s: &str) -> Option<OsString> {
        Some(OsString::from(s))
    }

    #[test]
    fn xdg_wins_over_home() {
        assert_eq!(
            config_dir_from(os("/xdg"), os("/home/u")),
            Some(PathBuf::from("/xdg/n-tile"))
        );
    }

    #[test]
    fn home_fallback() {
        assert_eq!(
            config_dir_from(None, os("/home/u")),
            Some(PathBuf::from("/home/u/.config/n-tile"))
        );
        assert_eq!(
            config_dir_from(os(""), os("/home/u")),
            Some(PathBuf::from("/home/u/.config/n-tile"))
        );
    }

    #[test]
    fn nothing_set() {
        assert_eq!(config_dir_from(None, None), None);
        assert_eq!(config_dir_from(os(""), os("")), None);
    }

    #[test]
    fn missing_rc_is_not_an_error() {
        let path = std::env::temp_dir().join("n-tile-test-no-such-dir/rc");
        assert!(matches!(load_rc(&path), Ok(None)));
    }

    #[test]
    fn reads_existing_rc() {
        let path = std::env::temp_dir().join(format!("n-tile-rc-{}", std::process::id()));
        std::fs::write(&path, "bind alt+h focus left\n").unwrap();
        let text = load_rc(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(text.as_deref(), Some("bind alt+h focus left\n"));
    }

    #[test]
    fn directory_is_an_io_error() {
        let dir = std::env::temp_dir();
        let err = load_rc(&dir).unwrap_err();
        assert!(err.to_string().starts_with("cannot read "));
    }
}
