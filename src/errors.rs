//! Scopa error handling.
//!
//! Every stage failure is represented by a single [`ScopaError`] carrying
//! the four fields the generated failure module embeds (name, reason,
//! line, column) plus the originating file, when one is known, so the
//! runner can register it as a build dependency.

use std::fmt;
use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Classification of a pipeline failure.
///
/// `Syntax` marks malformed stylesheet input detected by a stage; it is
/// the distinguished subtype the completion contract surfaces specially.
/// Everything else (unresolved imports, bad target queries, printer
/// failures, custom-stage errors) is a `Stage` error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Syntax,
    Stage,
}

impl ErrorKind {
    pub fn code_suffix(&self) -> &'static str {
        match self {
            ErrorKind::Syntax => "syntax",
            ErrorKind::Stage => "stage",
        }
    }
}

/// The single error type for the transform pipeline.
#[derive(Debug, Error)]
#[error("{name}: {reason} (line {line}, column {column})")]
pub struct ScopaError {
    pub kind: ErrorKind,
    /// Error class name, embedded verbatim in the failure module
    /// (e.g. `CssSyntaxError`, `ImportError`).
    pub name: String,
    pub reason: String,
    /// 1-based source line, or 0 when the failure carries no location.
    pub line: u32,
    /// 1-based source column, or 0 when the failure carries no location.
    pub column: u32,
    /// Originating file, when the failing stage identified one distinct
    /// from the primary input. Used for dependency registration only;
    /// never embedded in the module body.
    pub file: Option<PathBuf>,
}

impl Diagnostic for ScopaError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(format!("scopa::{}", self.kind.code_suffix())))
    }
}

impl ScopaError {
    /// A syntax error with a source location.
    pub fn syntax(
        name: impl Into<String>,
        reason: impl Into<String>,
        line: u32,
        column: u32,
    ) -> Self {
        Self {
            kind: ErrorKind::Syntax,
            name: name.into(),
            reason: reason.into(),
            line,
            column,
            file: None,
        }
    }

    /// A stage error with no location.
    pub fn stage(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Stage,
            name: name.into(),
            reason: reason.into(),
            line: 0,
            column: 0,
            file: None,
        }
    }

    pub fn with_location(mut self, line: u32, column: u32) -> Self {
        self.line = line;
        self.column = column;
        self
    }

    pub fn with_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn is_syntax(&self) -> bool {
        self.kind == ErrorKind::Syntax
    }
}

/// Converts a byte offset into 1-based (line, column) coordinates.
///
/// Text stages locate failures by offset; the error contract speaks in
/// line/column, matching what the generated failure module embeds.
pub(crate) fn line_col(text: &str, offset: usize) -> (u32, u32) {
    let offset = offset.min(text.len());
    let prefix = &text[..offset];
    let line = prefix.bytes().filter(|b| *b == b'\n').count() as u32 + 1;
    let column = match prefix.rfind('\n') {
        Some(newline) => (offset - newline) as u32,
        None => offset as u32 + 1,
    };
    (line, column)
}
