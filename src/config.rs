//! Pipeline configuration.
//!
//! Configuration is an explicit, invocation-scoped value passed at the
//! call boundary. There are no process-wide mutable defaults: every
//! invocation assembles its stage list from the `Config` it was given.

use std::path::PathBuf;

use serde::Deserialize;

use crate::stages::Stage;

/// Options for the feature-target compilation stage.
///
/// Deserializable so embedders and the CLI can accept it as JSON
/// (unknown fields are ignored). Forwarded verbatim to the stage.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PresetEnvConfig {
    /// Browserslist queries describing the support baseline.
    pub browsers: Vec<String>,
    /// Lowering features force-enabled regardless of browser support.
    /// Unknown feature names are ignored.
    pub features: Vec<String>,
}

impl Default for PresetEnvConfig {
    /// The documented default: broad coverage, structural nesting
    /// lowered unconditionally.
    fn default() -> Self {
        Self {
            browsers: vec!["cover 100%".to_string()],
            features: vec!["css-nesting".to_string()],
        }
    }
}

/// Per-invocation pipeline options. All fields are optional in spirit:
/// `Config::default()` yields the plain built-in pipeline.
pub struct Config {
    /// Append a minification stage after the built-ins.
    pub minified: bool,
    /// Options for the feature-target stage; `None` selects the fixed
    /// default preset.
    pub preset_env: Option<PresetEnvConfig>,
    /// Caller-supplied stages, appended after every built-in stage in
    /// caller order. Opaque: no purity guarantee is enforced, a custom
    /// stage may perform its own I/O.
    pub custom_plugins: Vec<Box<dyn Stage>>,
    /// Root directory for resolving relative `@import` paths.
    pub root: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            minified: false,
            preset_env: None,
            custom_plugins: Vec::new(),
            root: PathBuf::from("."),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn minified(mut self, minified: bool) -> Self {
        self.minified = minified;
        self
    }

    pub fn preset_env(mut self, preset_env: PresetEnvConfig) -> Self {
        self.preset_env = Some(preset_env);
        self
    }

    pub fn plugin(mut self, stage: Box<dyn Stage>) -> Self {
        self.custom_plugins.push(stage);
        self
    }

    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }
}
