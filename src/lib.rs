//! # Scopa
//!
//! A build-time stylesheet transformer. Scopa computes a content-derived
//! scope token for a stylesheet, substitutes it for the `.__SCOPE`
//! placeholder, runs the text through an ordered pipeline of transform
//! stages, and emits a generated module exposing the token and the final
//! CSS (or a structured parse-error payload on failure).

pub use crate::config::{Config, PresetEnvConfig};
pub use crate::engine::{Outcome, Pipeline};
pub use crate::errors::{ErrorKind, ScopaError};
pub use crate::host::{BuildHost, NullHost, RecordingHost, StderrHost};
pub use crate::scope::{scope_token, PLACEHOLDER};
pub use crate::stages::Stage;

pub mod cli;
pub mod config;
pub mod emit;
pub mod engine;
pub mod errors;
pub mod host;
pub mod scope;
pub mod stages;
