//! Generated module emission.
//!
//! The pipeline's output is the body of a JavaScript module exposing the
//! scope token and the final stylesheet (or an error descriptor). The
//! file path of a failure is deliberately not embedded, it only feeds
//! dependency registration.
//!
//! All values are embedded verbatim, without escaping: a backtick in the
//! stylesheet text, or a single quote in an error name or reason, yields
//! a module body that will not parse as JavaScript. Known limitation of
//! the format, kept for compatibility with existing consumers.

use crate::errors::ScopaError;

/// Module body for a completed pipeline.
pub fn success_module(hash: &str, styles: &str) -> String {
    format!(
        "module.exports = {{\n  hash: '{hash}',\n  styles: `{styles}`\n}}\n"
    )
}

/// Module body for a failed pipeline: the deterministic scope token is
/// still exposed, styles are empty, and the error descriptor carries the
/// four fields consumers can render.
pub fn failure_module(hash: &str, error: &ScopaError) -> String {
    format!(
        "module.exports = {{\n  \
           hash: '{hash}',\n  \
           styles: '',\n  \
           cssParsingError: {{\n    \
             name: '{name}',\n    \
             reason: '{reason}',\n    \
             line: '{line}',\n    \
             column: '{column}',\n  \
           }}\n}}\n",
        name = error.name,
        reason = error.reason,
        line = error.line,
        column = error.column,
    )
}
