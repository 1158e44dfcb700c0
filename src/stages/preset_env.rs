//! Feature-target compilation stage.
//!
//! Lowers modern stylesheet syntax to a browser-support baseline using
//! `lightningcss`: structural nesting is flattened, media range syntax,
//! color forms and vendor prefixes are compiled down according to the
//! configured browserslist queries. This is the pipeline's one parsing
//! stage, so it is also where malformed input surfaces as a syntax
//! error with a line and column.

use lightningcss::stylesheet::{MinifyOptions, ParserOptions, PrinterOptions, StyleSheet};
use lightningcss::targets::{Browsers, Features, Targets};

use crate::config::PresetEnvConfig;
use crate::errors::ScopaError;
use crate::stages::Stage;

pub struct PresetEnvStage {
    config: PresetEnvConfig,
}

impl PresetEnvStage {
    pub fn new(config: PresetEnvConfig) -> Self {
        Self { config }
    }

    fn targets(&self) -> Result<Targets, ScopaError> {
        let browsers = Browsers::from_browserslist(&self.config.browsers)
            .map_err(|err| ScopaError::stage("BrowserslistError", err.to_string()))?;
        Ok(Targets {
            browsers,
            include: forced_features(&self.config.features),
            exclude: Features::empty(),
        })
    }
}

impl Stage for PresetEnvStage {
    fn name(&self) -> &str {
        "preset-env"
    }

    fn apply(&self, css: &str) -> Result<String, ScopaError> {
        let targets = self.targets()?;

        let mut sheet = StyleSheet::parse(css, ParserOptions::default())
            .map_err(|err| syntax_error(err.kind.to_string(), err.loc))?;

        sheet
            .minify(MinifyOptions {
                targets,
                ..MinifyOptions::default()
            })
            .map_err(|err| {
                ScopaError::stage("MinifyError", err.kind.to_string())
            })?;

        let result = sheet
            .to_css(PrinterOptions {
                targets,
                ..PrinterOptions::default()
            })
            .map_err(|err| ScopaError::stage("PrinterError", err.kind.to_string()))?;

        Ok(result.code)
    }
}

/// Maps named lowering features to `lightningcss` feature flags.
/// Unknown names are ignored, matching the permissive behavior of
/// preset-style option bags.
fn forced_features(names: &[String]) -> Features {
    let mut features = Features::empty();
    for name in names {
        match name.as_str() {
            "css-nesting" => features |= Features::Nesting,
            "media-query-ranges" => {
                features |= Features::MediaRangeSyntax | Features::MediaIntervalSyntax
            }
            "custom-media-queries" => features |= Features::CustomMediaQueries,
            "logical-properties" => features |= Features::LogicalProperties,
            _ => {}
        }
    }
    features
}

/// Converts a `lightningcss` parse failure into the pipeline's syntax
/// error shape. `lightningcss` locations are 0-based lines.
fn syntax_error(
    reason: String,
    loc: Option<lightningcss::error::ErrorLocation>,
) -> ScopaError {
    let (line, column) = match loc {
        Some(loc) => (loc.line + 1, loc.column),
        None => (0, 0),
    };
    ScopaError::syntax("CssSyntaxError", reason, line, column)
}
