//! Variable substitution stage.
//!
//! SCSS-like variables: `$name: value;` declares, `$name` or `$(name)`
//! substitutes. Declarations are collected first (later declarations
//! win, values may reference previously declared variables) and stripped
//! from the output; a usage with no declaration is a syntax error at the
//! usage site.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::errors::{line_col, ScopaError};
use crate::stages::Stage;

static DECL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*\$([A-Za-z_][A-Za-z0-9_-]*)[ \t]*:[ \t]*([^;{}\n]+);[ \t]*\r?\n?")
        .unwrap()
});

static USE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$\(([A-Za-z_][A-Za-z0-9_-]*)\)|\$([A-Za-z_][A-Za-z0-9_-]*)").unwrap()
});

#[derive(Default)]
pub struct VarsStage;

impl VarsStage {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for VarsStage {
    fn name(&self) -> &str {
        "vars"
    }

    fn apply(&self, css: &str) -> Result<String, ScopaError> {
        let mut vars: HashMap<String, String> = HashMap::new();
        let mut removed: Vec<(usize, usize)> = Vec::new();

        // Pass 1: collect declarations in order, resolving references to
        // earlier variables inside declaration values, and strip them.
        // The stripped spans are kept so error locations can be mapped
        // back to the text this stage was handed.
        let body = DECL_RE.replace_all(css, |captures: &Captures| {
            let whole = captures.get(0).unwrap();
            removed.push((whole.start(), whole.len()));
            let name = captures[1].to_string();
            let value = substitute_known(captures[2].trim(), &vars);
            vars.insert(name, value);
            String::new()
        });

        // Pass 2: substitute usages; anything left unresolved is an
        // undefined variable.
        let mut error: Option<ScopaError> = None;
        let out = USE_RE.replace_all(&body, |captures: &Captures| {
            let name = captures
                .get(1)
                .or_else(|| captures.get(2))
                .map(|m| m.as_str())
                .unwrap_or_default();
            match vars.get(name) {
                Some(value) => value.clone(),
                None => {
                    if error.is_none() {
                        let offset = captures.get(0).map(|m| m.start()).unwrap_or(0);
                        let (line, column) = line_col(css, source_offset(offset, &removed));
                        error = Some(ScopaError::syntax(
                            "CssSyntaxError",
                            format!("Undefined variable ${name}"),
                            line,
                            column,
                        ));
                    }
                    String::new()
                }
            }
        });

        match error {
            Some(err) => Err(err),
            None => Ok(out.into_owned()),
        }
    }
}

/// Maps an offset in the declaration-stripped text back to the
/// corresponding offset in the original input. Stripped spans are
/// non-overlapping and in increasing order, so each one at or before
/// the running position shifts it by the span's length.
fn source_offset(stripped_offset: usize, removed: &[(usize, usize)]) -> usize {
    let mut offset = stripped_offset;
    for &(start, len) in removed {
        if start <= offset {
            offset += len;
        } else {
            break;
        }
    }
    offset
}

fn substitute_known(value: &str, vars: &HashMap<String, String>) -> String {
    USE_RE
        .replace_all(value, |captures: &Captures| {
            let name = captures
                .get(1)
                .or_else(|| captures.get(2))
                .map(|m| m.as_str())
                .unwrap_or_default();
            match vars.get(name) {
                Some(resolved) => resolved.clone(),
                // Leave unknown references for the usage pass to report.
                None => captures[0].to_string(),
            }
        })
        .into_owned()
}
