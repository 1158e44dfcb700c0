//! Host interface for build-tool side effects.
//!
//! The pipeline has exactly two observable side effects beyond its
//! completion: registering a file as a build dependency (failure path,
//! when the failing stage names one) and echoing a human-readable
//! diagnostic to an external sink (failure path, best-effort). Both go
//! through [`BuildHost`] so embedders and tests can intercept them.

use std::io::Write;
use std::path::{Path, PathBuf};

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

pub trait BuildHost {
    /// Registers `path` so the host build tool re-runs when it changes.
    fn add_dependency(&mut self, path: &Path);

    /// Writes a diagnostic message. Best-effort: failures to write never
    /// affect the pipeline's result.
    fn diagnostic(&mut self, message: &str);
}

/// Host that writes diagnostics to stderr in red and discards
/// dependency registrations. The default for CLI use.
pub struct StderrHost;

impl BuildHost for StderrHost {
    fn add_dependency(&mut self, _path: &Path) {}

    fn diagnostic(&mut self, message: &str) {
        let mut stderr = StandardStream::stderr(ColorChoice::Auto);
        let _ = stderr.set_color(ColorSpec::new().set_fg(Some(Color::Red)));
        let _ = writeln!(stderr, "{message}");
        let _ = stderr.reset();
    }
}

/// Host that ignores everything.
pub struct NullHost;

impl BuildHost for NullHost {
    fn add_dependency(&mut self, _path: &Path) {}
    fn diagnostic(&mut self, _message: &str) {}
}

/// Host that records every side effect, for tests and embedders that
/// forward them to a real build tool.
#[derive(Default)]
pub struct RecordingHost {
    pub dependencies: Vec<PathBuf>,
    pub diagnostics: Vec<String>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BuildHost for RecordingHost {
    fn add_dependency(&mut self, path: &Path) {
        self.dependencies.push(path.to_path_buf());
    }

    fn diagnostic(&mut self, message: &str) {
        self.diagnostics.push(message.to_string());
    }
}
