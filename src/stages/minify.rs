//! Minification stage.
//!
//! Optional, appended after the built-ins when `Config::minified` is
//! set and before any custom stages. Re-parses the lowered stylesheet
//! and prints it compactly. Recommended for production builds.

use lightningcss::stylesheet::{MinifyOptions, ParserOptions, PrinterOptions, StyleSheet};

use crate::errors::ScopaError;
use crate::stages::Stage;

#[derive(Default)]
pub struct MinifyStage;

impl MinifyStage {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for MinifyStage {
    fn name(&self) -> &str {
        "minify"
    }

    fn apply(&self, css: &str) -> Result<String, ScopaError> {
        let mut sheet = StyleSheet::parse(css, ParserOptions::default()).map_err(|err| {
            let (line, column) = match err.loc {
                Some(loc) => (loc.line + 1, loc.column),
                None => (0, 0),
            };
            ScopaError::syntax("CssSyntaxError", err.kind.to_string(), line, column)
        })?;

        sheet
            .minify(MinifyOptions::default())
            .map_err(|err| ScopaError::stage("MinifyError", err.kind.to_string()))?;

        let result = sheet
            .to_css(PrinterOptions {
                minify: true,
                ..PrinterOptions::default()
            })
            .map_err(|err| ScopaError::stage("PrinterError", err.kind.to_string()))?;

        Ok(result.code)
    }
}
