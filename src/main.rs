// SPDX-License-Identifier: MIT
//
// n-tile — a headless driver for the tiling layout shell.
//
// This is the binary that wires the two crates together:
//
//   n-layout → layout tree, geometry, directional navigation
//   n-shell  → session, keymap, rc/script commands, diagnostics
//
// There is no terminal rendering. The binary keeps one Session, feeds it
// commands, and prints what each command did:
//
//   rc file ─┐
//            ├→ parse_script → Session::execute → Reply → stdout
//   script ──┘                        │
//   (or stdin)                        └→ TracingSink → stderr (N_TILE_LOG)
//
// A line that fails to parse or apply is reported with its line number and
// skipped. Only I/O failures stop the run.

use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use n_layout::Allocation;
use n_shell::action::parse_size;
use n_shell::config::{self, load_rc};
use n_shell::{Session, TracingSink, parse_script};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "N_TILE_LOG";

const DEFAULT_SIZE: (u32, u32) = (80, 24);

const USAGE: &str = "\
usage: n-tile [--size WxH] [--rc PATH | --no-rc] [SCRIPT]

Reads commands from SCRIPT (or stdin) and applies them to a tiled window.

  --size WxH   window size in cells (default 80x24)
  --rc PATH    rc file to run first (default $XDG_CONFIG_HOME/n-tile/rc)
  --no-rc      skip the rc file
  -h, --help   show this help

Log level comes from N_TILE_LOG (e.g. N_TILE_LOG=debug).";

// ─── Arguments ──────────────────────────────────────────────────────────────

/// Which rc file to run before the script.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Rc {
    /// The XDG location; silently skipped when absent.
    Default,
    /// A path given with `--rc`; must exist.
    Path(PathBuf),
    /// `--no-rc`.
    Disabled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Options {
    size: (u32, u32),
    rc: Rc,
    script: Option<PathBuf>,
}

#[derive(Debug, PartialEq, Eq)]
enum Invocation {
    Run(Options),
    Help,
}

fn parse_args<I>(args: I) -> Result<Invocation, String>
where
    I: IntoIterator<Item = String>,
{
    let mut opts = Options {
        size: DEFAULT_SIZE,
        rc: Rc::Default,
        script: None,
    };
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Invocation::Help),
            "--size" => {
                let value = args.next().ok_or("--size needs a value")?;
                opts.size = parse_size(&value).map_err(|e| e.to_string())?;
            }
            "--rc" => {
                let value = args.next().ok_or("--rc needs a path")?;
                if opts.rc == Rc::Disabled {
                    return Err("--rc and --no-rc are mutually exclusive".into());
                }
                opts.rc = Rc::Path(value.into());
            }
            "--no-rc" => {
                if matches!(opts.rc, Rc::Path(_)) {
                    return Err("--rc and --no-rc are mutually exclusive".into());
                }
                opts.rc = Rc::Disabled;
            }
            flag if flag.starts_with('-') && flag != "-" => {
                return Err(format!("unknown option: {flag}"));
            }
            path => {
                if opts.script.is_some() {
                    return Err(format!("unexpected argument: {path}"));
                }
                if path != "-" {
                    opts.script = Some(path.into());
                }
            }
        }
    }

    Ok(Invocation::Run(opts))
}

// ─── Running commands ───────────────────────────────────────────────────────

/// Apply every command in `text` to `session`.
///
/// Replies go to `out`, one per command. Parse and session errors go to
/// `err` as `name:line: message` and do not stop the run. Returns the number
/// of lines that failed.
fn run_lines<O, E>(
    session: &mut Session,
    name: &str,
    text: &str,
    out: &mut O,
    err: &mut E,
) -> io::Result<usize>
where
    O: Write,
    E: Write,
{
    let mut sink = TracingSink;
    let mut failures = 0;

    for (line_no, parsed) in parse_script(text) {
        let result = match parsed {
            Ok(command) => session.execute(command, &mut sink).map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        };
        match result {
            Ok(reply) => writeln!(out, "{reply}")?,
            Err(e) => {
                failures += 1;
                writeln!(err, "{name}:{line_no}: {e}")?;
            }
        }
    }
    out.flush()?;

    Ok(failures)
}

fn run(opts: &Options) -> Result<(), String> {
    let (width, height) = opts.size;
    let mut session = Session::new(Allocation::new(0, 0, width, height));

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let stderr = io::stderr();
    let mut err = stderr.lock();

    let rc_path = match &opts.rc {
        Rc::Default => config::default_rc_path(),
        Rc::Path(path) => Some(path.clone()),
        Rc::Disabled => None,
    };
    if let Some(path) = rc_path {
        match load_rc(&path).map_err(|e| e.to_string())? {
            Some(text) => {
                debug!(path = %path.display(), "running rc file");
                let name = path.display().to_string();
                run_lines(&mut session, &name, &text, &mut out, &mut err)
                    .map_err(|e| e.to_string())?;
            }
            None if opts.rc == Rc::Default => debug!(path = %path.display(), "no rc file"),
            None => return Err(format!("{}: no such file", path.display())),
        }
    }

    let (name, text) = match &opts.script {
        Some(path) => {
            let text =
                fs::read_to_string(path).map_err(|e| format!("{}: {e}", path.display()))?;
            (path.display().to_string(), text)
        }
        None => {
            let text = io::read_to_string(io::stdin()).map_err(|e| format!("<stdin>: {e}"))?;
            ("<stdin>".to_string(), text)
        }
    };
    let failures =
        run_lines(&mut session, &name, &text, &mut out, &mut err).map_err(|e| e.to_string())?;

    debug!(failures, panes = session.root().pane_count(), "done");
    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() {
    let opts = match parse_args(env::args().skip(1)) {
        Ok(Invocation::Run(opts)) => opts,
        Ok(Invocation::Help) => {
            println!("{USAGE}");
            return;
        }
        Err(e) => {
            eprintln!("n-tile: {e}\n\n{USAGE}");
            process::exit(2);
        }
    };

    init_logging();

    if let Err(e) = run(&opts) {
        eprintln!("n-tile: {e}");
        process::exit(1);
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn args(list: &[&str]) -> Result<Invocation, String> {
        parse_args(list.iter().map(ToString::to_string))
    }

    fn run_opts(list: &[&str]) -> Options {
        match args(list) {
            Ok(Invocation::Run(opts)) => opts,
            other => panic!("expected options, got {other:?}"),
        }
    }

    /// Run `script` on a fresh 80x24 session, returning (stdout, stderr, failures).
    fn drive(script: &str) -> (String, String, usize) {
        let mut session = Session::new(Allocation::new(0, 0, 80, 24));
        let mut out = Vec::new();
        let mut err = Vec::new();
        let failures =
            run_lines(&mut session, "test", script, &mut out, &mut err).unwrap();
        (
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
            failures,
        )
    }

    // ── Arguments ─────────────────────────────────────────────────────────

    #[test]
    fn defaults() {
        assert_eq!(
            run_opts(&[]),
            Options {
                size: (80, 24),
                rc: Rc::Default,
                script: None,
            }
        );
    }

    #[test]
    fn all_options() {
        assert_eq!(
            run_opts(&["--size", "120x40", "--rc", "my.rc", "layout.txt"]),
            Options {
                size: (120, 40),
                rc: Rc::Path("my.rc".into()),
                script: Some("layout.txt".into()),
            }
        );
        assert_eq!(run_opts(&["--no-rc", "-"]).rc, Rc::Disabled);
        assert_eq!(run_opts(&["-"]).script, None);
    }

    #[test]
    fn help_wins() {
        assert_eq!(args(&["--size", "10x10", "--help"]), Ok(Invocation::Help));
        assert_eq!(args(&["-h"]), Ok(Invocation::Help));
    }

    #[test]
    fn bad_arguments() {
        assert!(args(&["--size"]).is_err());
        assert!(args(&["--size", "wide"]).is_err());
        assert!(args(&["--rc", "a", "--no-rc"]).is_err());
        assert!(args(&["--no-rc", "--rc", "a"]).is_err());
        assert!(args(&["--verbose"]).is_err());
        assert!(args(&["one", "two"]).is_err());
    }

    // ── Running ───────────────────────────────────────────────────────────

    #[test]
    fn replies_go_to_stdout() {
        let (out, err, failures) = drive("split v\n# comment\n\nfocus left\n");
        assert_eq!(out, "split 1 -> new pane 2\nfocus 2 -> 1\n");
        assert_eq!(err, "");
        assert_eq!(failures, 0);
    }

    #[test]
    fn errors_name_the_line_and_continue() {
        let (out, err, failures) = drive("focus sideways\nclose\nsplit h\n");
        assert_eq!(out, "split 1 -> new pane 2\n");
        assert_eq!(
            err,
            "test:1: unknown direction: 'sideways'\ntest:2: cannot close the last pane\n"
        );
        assert_eq!(failures, 2);
    }

    #[test]
    fn error_line_numbers_count_comments_and_blanks() {
        let (out, err, failures) = drive("# layout\n\nsplit v\n  # note\nsplit diagonal\n");
        assert_eq!(out, "split 1 -> new pane 2\n");
        assert!(err.starts_with("test:5: "));
        assert_eq!(failures, 1);
    }

    #[test]
    fn show_prints_layout() {
        let (out, _, _) = drive("split v\nshow\n");
        assert_eq!(out, "split 1 -> new pane 2\nV[1, 2]\n    1  40x24+0+0\n*   2  40x24+40+0\n");
    }
}
