//! Import inlining stage.
//!
//! Recursively replaces `@import "path";` and `@import url("path");`
//! statements with the contents of the referenced file, resolved
//! relative to the importing file (or the configured root for the
//! primary input). Remote URLs and media-qualified imports are left
//! untouched for the feature-target stage to pass through.

use std::fs;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{line_col, ScopaError};
use crate::stages::Stage;

/// Matches `@import "p";`, `@import 'p';`, `@import url("p");` and
/// `@import url('p');`. Imports with trailing media queries do not match
/// and therefore survive verbatim.
static IMPORT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"@import\s+(?:url\(\s*)?(?:"([^"]+)"|'([^']+)')\s*\)?\s*;"#)
        .unwrap()
});

pub struct ImportStage {
    root: PathBuf,
}

impl ImportStage {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn inline(
        &self,
        css: &str,
        dir: &Path,
        seen: &mut Vec<PathBuf>,
    ) -> Result<String, ScopaError> {
        let mut out = String::with_capacity(css.len());
        let mut cursor = 0;

        for captures in IMPORT_RE.captures_iter(css) {
            let whole = captures.get(0).unwrap();
            let spec = captures
                .get(1)
                .or_else(|| captures.get(2))
                .unwrap()
                .as_str();

            out.push_str(&css[cursor..whole.start()]);
            cursor = whole.end();

            if is_remote(spec) {
                // Remote imports stay in the stylesheet untouched.
                out.push_str(whole.as_str());
                continue;
            }

            let (line, column) = line_col(css, whole.start());
            let path = resolve(dir, spec);
            let content = fs::read_to_string(&path).map_err(|io| {
                ScopaError::stage(
                    "ImportError",
                    format!("failed to read '{}': {io}", path.display()),
                )
                .with_location(line, column)
                .with_file(&path)
            })?;

            if seen.contains(&path) {
                return Err(ScopaError::stage(
                    "ImportError",
                    format!("circular @import of '{}'", path.display()),
                )
                .with_location(line, column)
                .with_file(&path));
            }

            seen.push(path.clone());
            let parent = path.parent().unwrap_or(dir).to_path_buf();
            let inlined = self.inline(&content, &parent, seen)?;
            seen.pop();

            out.push_str(&inlined);
        }

        out.push_str(&css[cursor..]);
        Ok(out)
    }
}

impl Stage for ImportStage {
    fn name(&self) -> &str {
        "import"
    }

    fn apply(&self, css: &str) -> Result<String, ScopaError> {
        let mut seen = Vec::new();
        self.inline(css, &self.root, &mut seen)
    }
}

fn is_remote(spec: &str) -> bool {
    spec.starts_with("http://") || spec.starts_with("https://") || spec.starts_with("//")
}

/// Resolves an import specifier against the importing directory,
/// appending `.css` when the specifier has no extension.
fn resolve(dir: &Path, spec: &str) -> PathBuf {
    let mut path = dir.join(spec);
    if path.extension().is_none() {
        path.set_extension("css");
    }
    path
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    /// Creates a scratch directory under the system temp dir, unique per
    /// test, and removes it on drop.
    struct Scratch(PathBuf);

    impl Scratch {
        fn new(tag: &str) -> Self {
            let dir = std::env::temp_dir()
                .join(format!("scopa-import-{tag}-{}", std::process::id()));
            fs::create_dir_all(&dir).unwrap();
            Self(dir)
        }

        fn write(&self, name: &str, content: &str) -> PathBuf {
            let path = self.0.join(name);
            fs::write(&path, content).unwrap();
            path
        }
    }

    impl Drop for Scratch {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.0);
        }
    }

    #[test]
    fn inlines_a_relative_import() {
        let scratch = Scratch::new("basic");
        scratch.write("palette.css", ".imported { color: green; }");

        let stage = ImportStage::new(scratch.0.clone());
        let out = stage
            .apply("@import \"palette.css\";\n.local { color: red; }")
            .unwrap();

        assert!(out.contains(".imported { color: green; }"));
        assert!(out.contains(".local { color: red; }"));
        assert!(!out.contains("@import"));
    }

    #[test]
    fn inlines_nested_imports_relative_to_importer() {
        let scratch = Scratch::new("nested");
        fs::create_dir_all(scratch.0.join("theme")).unwrap();
        scratch.write("theme/base.css", "@import 'extra.css';\n.base {}");
        scratch.write("theme/extra.css", ".extra {}");

        let stage = ImportStage::new(scratch.0.clone());
        let out = stage.apply("@import url(\"theme/base.css\");").unwrap();

        assert!(out.contains(".extra {}"));
        assert!(out.contains(".base {}"));
    }

    #[test]
    fn appends_css_extension_to_bare_specifiers() {
        let scratch = Scratch::new("ext");
        scratch.write("mixins.css", ".mixin {}");

        let stage = ImportStage::new(scratch.0.clone());
        let out = stage.apply("@import 'mixins';").unwrap();
        assert!(out.contains(".mixin {}"));
    }

    #[test]
    fn remote_imports_survive_verbatim() {
        let stage = ImportStage::new(PathBuf::from("."));
        let css = "@import \"https://example.com/reset.css\";\n.x {}";
        assert_eq!(stage.apply(css).unwrap(), css);
    }

    #[test]
    fn missing_file_is_a_stage_error_carrying_the_path() {
        let scratch = Scratch::new("missing");
        let stage = ImportStage::new(scratch.0.clone());

        let err = stage.apply(".a {}\n@import 'nowhere.css';").unwrap_err();
        assert_eq!(err.name, "ImportError");
        assert_eq!(err.line, 2);
        assert_eq!(err.column, 1);
        assert_eq!(err.file.as_deref(), Some(scratch.0.join("nowhere.css").as_path()));
    }

    #[test]
    fn circular_imports_are_rejected() {
        let scratch = Scratch::new("cycle");
        scratch.write("a.css", "@import 'b.css';");
        scratch.write("b.css", "@import 'a.css';");

        let stage = ImportStage::new(scratch.0.clone());
        let err = stage.apply("@import 'a.css';").unwrap_err();
        assert_eq!(err.name, "ImportError");
        assert!(err.reason.contains("circular"));
    }
}
