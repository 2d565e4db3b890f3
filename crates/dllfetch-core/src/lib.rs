#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::return_self_not_must_use)]

//! Dependency-closure resolution for dynamically linked binaries.
//!
//! The [`Resolver`] reads a binary's import table through an
//! [`ImportExtractor`], searches the configured roots for each imported
//! library with a [`Locator`], and repeats the process on every library it
//! finds until the closure is complete.

pub mod choose;
pub mod config;
pub mod dependency;
pub mod engine;
pub mod error;
pub mod inspect;
pub mod locate;
pub mod name;
pub mod version;

pub use choose::{Chooser, PromptChooser};
pub use config::ResolverConfig;
pub use dependency::{Dependency, DependencyState};
pub use engine::{Resolution, Resolver};
pub use error::{Error, InspectError, Result};
pub use inspect::{ImportExtractor, ObjdumpExtractor};
pub use locate::{find_candidates, Candidate, FsLocator, Locator};
pub use name::LibName;
pub use version::VERSION;
