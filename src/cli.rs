//! Command-line entry points.
//!
//! This module is the main entry point for all CLI commands and
//! orchestrates the core library functions.

use std::path::PathBuf;
use std::{fs, process};

use clap::{Parser, Subcommand};

use crate::config::{Config, PresetEnvConfig};
use crate::engine::Pipeline;
use crate::host::StderrHost;
use crate::scope;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "scopa",
    version,
    about = "Scope and transform stylesheets at build time."
)]
pub struct ScopaArgs {
    #[command(subcommand)]
    pub command: ArgsCommand,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum ArgsCommand {
    /// Full pipeline: scope, inline imports, substitute variables,
    /// lower to the browser baseline, and write the generated module.
    Build {
        /// The stylesheet file to transform.
        #[arg(required = true)]
        file: PathBuf,
        /// Append the minification stage.
        #[arg(long)]
        minify: bool,
        /// Output path for the generated module. Defaults to `<file>.js`.
        #[arg(long)]
        out: Option<PathBuf>,
        /// Root directory for resolving relative `@import` paths.
        /// Defaults to the input file's directory.
        #[arg(long)]
        root: Option<PathBuf>,
        /// JSON options for the feature-target stage, e.g.
        /// `{"browsers": ["last 2 versions"]}`.
        #[arg(long, value_name = "JSON")]
        preset_env: Option<String>,
    },
    /// Print the scope token derived from a stylesheet's contents.
    Hash {
        #[arg(required = true)]
        file: PathBuf,
    },
}

/// Parses arguments, dispatches, and exits with a nonzero status on any
/// failure.
pub fn run() {
    let args = ScopaArgs::parse();
    let code = dispatch(args);
    process::exit(code);
}

fn dispatch(args: ScopaArgs) -> i32 {
    match args.command {
        ArgsCommand::Build {
            file,
            minify,
            out,
            root,
            preset_env,
        } => build(file, minify, out, root, preset_env),
        ArgsCommand::Hash { file } => hash(file),
    }
}

fn build(
    file: PathBuf,
    minify: bool,
    out: Option<PathBuf>,
    root: Option<PathBuf>,
    preset_env: Option<String>,
) -> i32 {
    let source = match fs::read_to_string(&file) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("scopa: cannot read '{}': {err}", file.display());
            return 1;
        }
    };

    let mut config = Config::new().minified(minify);
    config.root = match root {
        Some(root) => root,
        None => file
            .parent()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(".")),
    };
    if let Some(json) = preset_env {
        match serde_json::from_str::<PresetEnvConfig>(&json) {
            Ok(preset) => config.preset_env = Some(preset),
            Err(err) => {
                eprintln!("scopa: invalid --preset-env JSON: {err}");
                return 1;
            }
        }
    }

    let pipeline = Pipeline::new(config);
    let mut host = StderrHost;
    let outcome = pipeline.process(&source, &mut host);

    // The module is written even on failure: it embeds the error
    // descriptor so importing consumers see a structured payload.
    let out = out.unwrap_or_else(|| module_path_for(&file));
    if let Err(err) = fs::write(&out, &outcome.module) {
        eprintln!("scopa: cannot write '{}': {err}", out.display());
        return 1;
    }

    match outcome.error {
        None => 0,
        Some(error) => {
            eprintln!("{:?}", miette::Report::new(error));
            1
        }
    }
}

fn hash(file: PathBuf) -> i32 {
    match fs::read_to_string(&file) {
        Ok(source) => {
            println!("{}", scope::scope_token(&source));
            0
        }
        Err(err) => {
            eprintln!("scopa: cannot read '{}': {err}", file.display());
            1
        }
    }
}

/// `style.css` -> `style.css.js`, keeping the stylesheet name visible in
/// the generated module's filename.
fn module_path_for(file: &std::path::Path) -> PathBuf {
    let mut name = file.as_os_str().to_os_string();
    name.push(".js");
    PathBuf::from(name)
}
