//! The transform pipeline runner.
//!
//! A single invocation computes the scope token, substitutes the
//! placeholder, assembles the stage list from its configuration, runs
//! the stages strictly in order, and produces exactly one [`Outcome`].
//! The completion contract is exactly-once: [`Pipeline::process`]
//! returns the outcome by value, and [`Pipeline::process_with`] hands it
//! to an `FnOnce` callback that can fire neither zero times nor twice.

use crate::config::Config;
use crate::emit;
use crate::errors::ScopaError;
use crate::host::BuildHost;
use crate::scope;
use crate::stages::{build_builtin_stages, Stage};

/// The result of one pipeline invocation. The scope token and a module
/// body are always present; `styles` is empty and `error` is set when a
/// stage failed.
pub struct Outcome {
    pub hash: String,
    pub styles: String,
    pub module: String,
    pub error: Option<ScopaError>,
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Runs stylesheets through the configured transform pipeline.
///
/// Invocations are independent: the configuration is read-only and every
/// call assembles a fresh stage list, so a `Pipeline` may be shared
/// across concurrent build tasks.
pub struct Pipeline {
    config: Config,
}

impl Pipeline {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Processes one stylesheet, reporting side effects (dependency
    /// registration, failure diagnostics) through `host`.
    pub fn process(&self, source: &str, host: &mut dyn BuildHost) -> Outcome {
        // The scope token is computed exactly once, from the raw input,
        // before any stage runs; it survives into failure outcomes.
        let hash = scope::scope_token(source);
        let scoped = scope::substitute(source, &hash);

        match self.run_stages(scoped) {
            Ok(styles) => {
                let module = emit::success_module(&hash, &styles);
                Outcome {
                    hash,
                    styles,
                    module,
                    error: None,
                }
            }
            Err(error) => {
                host.diagnostic(&format!(
                    "Name: {}\nReason: {}\nLine: {}\nColumn: {}",
                    error.name, error.reason, error.line, error.column
                ));
                if let Some(file) = &error.file {
                    host.add_dependency(file);
                }
                let module = emit::failure_module(&hash, &error);
                Outcome {
                    hash,
                    styles: String::new(),
                    module,
                    error: Some(error),
                }
            }
        }
    }

    /// Processes one stylesheet and delivers the result through a
    /// completion callback: `(None, module)` on success, `(Some(error),
    /// module)` on failure. The callback is consumed, so it runs exactly
    /// once per invocation.
    pub fn process_with<F>(&self, source: &str, host: &mut dyn BuildHost, complete: F)
    where
        F: FnOnce(Option<ScopaError>, String),
    {
        let outcome = self.process(source, host);
        complete(outcome.error, outcome.module);
    }

    /// Applies the assembled stage list in order. Strictly sequential:
    /// each stage consumes the previous stage's output, and the first
    /// failure aborts the run.
    fn run_stages(&self, css: String) -> Result<String, ScopaError> {
        let builtins = build_builtin_stages(&self.config);
        let stages: Vec<&dyn Stage> = builtins
            .iter()
            .map(|stage| stage.as_ref())
            .chain(self.config.custom_plugins.iter().map(|stage| stage.as_ref()))
            .collect();

        let mut text = css;
        for stage in stages {
            text = stage.apply(&text)?;
        }
        Ok(text)
    }
}
