//! # Scopa transform stages
//!
//! A stage is the primitive unit of the pipeline: it consumes stylesheet
//! text and produces new text or a structured failure. Built-in stages
//! run in a fixed order; custom stages are caller-supplied
//! implementations of the same trait, appended at the end.
//!
//! ## Built-in order
//!
//! 1. [`ImportStage`] — inlines `@import` statements from disk
//! 2. [`VarsStage`] — SCSS-like `$variable` substitution
//! 3. [`PresetEnvStage`] — lowers modern syntax to a browser baseline
//! 4. [`MinifyStage`] — only when `Config::minified` is set

use crate::config::Config;
use crate::errors::ScopaError;

pub mod import;
pub mod minify;
pub mod preset_env;
pub mod vars;

pub use import::ImportStage;
pub use minify::MinifyStage;
pub use preset_env::PresetEnvStage;
pub use vars::VarsStage;

/// A single transformation unit: text in, text or failure out.
///
/// Built-ins are pure text transforms (the import stage reads files, but
/// only those the stylesheet names). Custom stages honor the same
/// signature; purity is an expectation, not an enforced guarantee.
pub trait Stage {
    /// Stable stage name, used in diagnostics.
    fn name(&self) -> &str;

    /// Applies the transformation to `css`.
    fn apply(&self, css: &str) -> Result<String, ScopaError>;
}

/// Assembles the built-in portion of the stage list for one invocation:
/// fixed built-ins in fixed order, then the minification stage when
/// enabled. Custom stages are chained after these by the runner.
pub fn build_builtin_stages(config: &Config) -> Vec<Box<dyn Stage>> {
    let mut stages: Vec<Box<dyn Stage>> = vec![
        Box::new(ImportStage::new(config.root.clone())),
        Box::new(VarsStage::new()),
        Box::new(PresetEnvStage::new(
            config.preset_env.clone().unwrap_or_default(),
        )),
    ];
    if config.minified {
        stages.push(Box::new(MinifyStage::new()));
    }
    stages
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_order_is_import_vars_preset_env() {
        let stages = build_builtin_stages(&Config::default());
        let names: Vec<&str> = stages.iter().map(|s| s.name()).collect();
        assert_eq!(names, ["import", "vars", "preset-env"]);
    }

    #[test]
    fn minify_stage_is_appended_last_when_enabled() {
        let stages = build_builtin_stages(&Config::new().minified(true));
        let names: Vec<&str> = stages.iter().map(|s| s.name()).collect();
        assert_eq!(names, ["import", "vars", "preset-env", "minify"]);
    }
}
