#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::doc_markdown)]

mod commands;
mod logging;

use clap::Parser;
use dllfetch_core::inspect::{DEFAULT_OBJDUMP, OBJDUMP_ENV};
use miette::Result;
use std::ffi::OsString;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "dllfetch")]
#[command(author, version, about = "Resolve the DLL dependency closure of a binary", long_about = None)]
struct Cli {
    /// Check the dependencies of this file
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Search for dependencies in these directories (default: /)
    #[arg(short = 'd', long = "dir", value_name = "DIR", num_args = 1.., action = clap::ArgAction::Append)]
    dirs: Vec<PathBuf>,

    /// Copy found dependencies into this directory
    #[arg(short = 't', long, value_name = "DIR")]
    target_dir: Option<PathBuf>,

    /// objdump binary used to read import tables
    #[arg(long, env = OBJDUMP_ENV, value_name = "PATH", default_value = DEFAULT_OBJDUMP)]
    objdump: OsString,

    /// Increase logging verbosity (-v for DEBUG, -vv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Emit JSON formatted output (stable, machine-readable)
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose, cli.json);

    let args = commands::resolve::ResolveArgs {
        file: cli.file,
        dirs: cli.dirs,
        target_dir: cli.target_dir,
        objdump: cli.objdump,
    };
    commands::resolve::run(&args, cli.json)
}
