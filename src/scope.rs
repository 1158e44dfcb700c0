//! Scope token computation and placeholder substitution.
//!
//! The scope token namespaces a stylesheet's selectors with an identifier
//! derived from the raw input text, so identical sources always scope to
//! the same class and distinct sources (with overwhelming probability) do
//! not collide.

use std::fmt::Write;

use sha2::{Digest, Sha256};

/// The placeholder marker callers write in their stylesheets. The first
/// occurrence is rewritten to the scope token's class selector.
pub const PLACEHOLDER: &str = ".__SCOPE";

/// Computes the scope token for a stylesheet: `_` followed by the
/// hex-encoded first 16 bytes of the SHA-256 digest of the raw text.
///
/// Pure and deterministic: identical input always yields an identical
/// token, within a build and across builds.
pub fn scope_token(source: &str) -> String {
    let digest = Sha256::digest(source.as_bytes());
    let mut token = String::with_capacity(33);
    token.push('_');
    for byte in &digest[..16] {
        // Writing to a String cannot fail.
        let _ = write!(token, "{byte:02x}");
    }
    token
}

/// Replaces the first occurrence of [`PLACEHOLDER`] with the token's
/// class selector.
///
/// Single-replacement semantics are contractual: a second occurrence
/// survives literally in the output. Callers relying on global
/// replacement will see the later markers untouched.
pub fn substitute(source: &str, token: &str) -> String {
    source.replacen(PLACEHOLDER, &format!(".{token}"), 1)
}
