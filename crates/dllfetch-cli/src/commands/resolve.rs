//! Default command: resolve the dependency closure of `FILE`, report it, and
//! optionally copy every found dependency into `--target-dir`.

use dllfetch_core::version::{REPORT_SCHEMA_VERSION, VERSION};
use dllfetch_core::{
    FsLocator, ObjdumpExtractor, PromptChooser, Resolution, Resolver, ResolverConfig,
};
use dllfetch_util::fs::copy_into_dir;
use miette::{IntoDiagnostic, Result, WrapErr};
use serde::Serialize;
use std::ffi::OsString;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Exit code when the run fails.
const EXIT_ERROR: i32 = 1;

/// Error codes for failures outside the resolver.
pub mod codes {
    pub const STAGE_FAILED: &str = "STAGE_FAILED";
}

/// Arguments for a resolution run.
#[derive(Debug)]
pub struct ResolveArgs {
    pub file: PathBuf,
    pub dirs: Vec<PathBuf>,
    pub target_dir: Option<PathBuf>,
    pub objdump: OsString,
}

/// Report for JSON output.
#[derive(Serialize)]
struct ResolveReport<'a> {
    schema_version: u32,
    version: &'static str,
    ok: bool,
    root: String,
    search_roots: Vec<String>,
    #[serde(flatten)]
    resolution: &'a Resolution,
    staged: Vec<String>,
}

pub fn run(args: &ResolveArgs, json: bool) -> Result<()> {
    let root = canonical(&args.file);
    let config = ResolverConfig::new().with_search_roots(args.dirs.iter().map(|d| canonical(d)));
    for dir in config.search_roots() {
        if !dir.is_dir() {
            tracing::warn!(dir = %dir.display(), "search root is not a directory");
        }
    }

    // In JSON mode stdout carries only the report, so the prompt goes to stderr.
    let prompt_out: Box<dyn Write> = if json {
        Box::new(io::stderr())
    } else {
        Box::new(io::stdout())
    };
    let chooser = PromptChooser::new(io::stdin().lock(), prompt_out);
    let extractor = ObjdumpExtractor::new().with_tool(args.objdump.clone());
    let mut resolver = Resolver::new(config, FsLocator, chooser, extractor);

    let resolution = match resolver.run(&root) {
        Ok(resolution) => resolution,
        Err(e) if json => {
            print_error(e.code(), &e.to_string());
            std::process::exit(EXIT_ERROR);
        }
        Err(e) => return Err(e).into_diagnostic(),
    };

    if json {
        let staged = match &args.target_dir {
            Some(target) => match stage(&resolution.found, target, |_| {}) {
                Ok(staged) => staged,
                Err(e) => {
                    print_error(codes::STAGE_FAILED, &e.to_string());
                    std::process::exit(EXIT_ERROR);
                }
            },
            None => Vec::new(),
        };
        let report = ResolveReport {
            schema_version: REPORT_SCHEMA_VERSION,
            version: VERSION,
            ok: true,
            root: root.to_string_lossy().into_owned(),
            search_roots: resolver
                .config()
                .search_roots()
                .iter()
                .map(|d| d.to_string_lossy().into_owned())
                .collect(),
            resolution: &resolution,
            staged: staged
                .iter()
                .map(|p| p.to_string_lossy().into_owned())
                .collect(),
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&report).into_diagnostic()?
        );
        return Ok(());
    }

    print_human(&resolution);

    if let Some(target) = &args.target_dir {
        println!("\nCopying files to {}", target.display());
        stage(&resolution.found, target, |copied| {
            if let Some(name) = copied.file_name() {
                println!("> {}", name.to_string_lossy());
            }
        })?;
        println!("\nDone!");
    }

    Ok(())
}

fn print_human(resolution: &Resolution) {
    println!("\n*** Found dependencies: ***");
    for path in &resolution.found {
        println!("+ {}", path.display());
    }

    println!("\n*** Missing dependencies: ***");
    for name in &resolution.missing {
        println!("- {name}");
    }
}

fn print_error(code: &str, message: &str) {
    let report = serde_json::json!({
        "schema_version": REPORT_SCHEMA_VERSION,
        "ok": false,
        "error": {
            "code": code,
            "message": message,
        },
    });
    println!("{report}");
}

/// Copy every found dependency into `target`, calling `on_copy` after each.
fn stage(found: &[PathBuf], target: &Path, mut on_copy: impl FnMut(&Path)) -> Result<Vec<PathBuf>> {
    let mut staged = Vec::with_capacity(found.len());
    for source in found {
        let dest = copy_into_dir(source, target)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to copy {} to {}", source.display(), target.display()))?;
        tracing::debug!(from = %source.display(), to = %dest.display(), "staged");
        on_copy(&dest);
        staged.push(dest);
    }
    Ok(staged)
}

fn canonical(path: &Path) -> PathBuf {
    dunce::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
