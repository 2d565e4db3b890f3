use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::choose::Chooser;
use crate::error::{Error, Result};
use crate::inspect::ImportExtractor;
use crate::locate::Locator;
use crate::name::LibName;

/// Where a dependency is in its resolution lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyState {
    /// Not searched for yet.
    Pending,
    /// Searched for, no matching file.
    Missing,
    /// Located, imports not read yet.
    Found,
    /// Located and its imports read.
    Inspected,
}

/// Resolution state of one library name.
///
/// `new -> located(missing)` or `new -> located(found) -> inspected`. Each
/// transition happens at most once, so a library referenced by many
/// importers is searched for and inspected a single time.
#[derive(Debug, Clone)]
pub struct Dependency {
    name: LibName,
    resolved_path: Option<PathBuf>,
    located: bool,
    found: bool,
    inspected: bool,
    candidates: usize,
}

impl Dependency {
    #[must_use]
    pub fn new(name: LibName) -> Self {
        Self {
            name,
            resolved_path: None,
            located: false,
            found: false,
            inspected: false,
            candidates: 0,
        }
    }

    #[must_use]
    pub fn name(&self) -> &LibName {
        &self.name
    }

    /// Full path of the located file, with on-disk casing.
    #[must_use]
    pub fn resolved_path(&self) -> Option<&Path> {
        self.resolved_path.as_deref()
    }

    #[must_use]
    pub fn is_located(&self) -> bool {
        self.located
    }

    #[must_use]
    pub fn is_found(&self) -> bool {
        self.found
    }

    #[must_use]
    pub fn is_inspected(&self) -> bool {
        self.inspected
    }

    /// Whether more than one file matched when this dependency was located.
    #[must_use]
    pub fn was_ambiguous(&self) -> bool {
        self.candidates > 1
    }

    /// No further work remains: inspected, or located and missing.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.inspected || (self.located && !self.found)
    }

    #[must_use]
    pub fn state(&self) -> DependencyState {
        match (self.located, self.found, self.inspected) {
            (false, _, _) => DependencyState::Pending,
            (true, false, _) => DependencyState::Missing,
            (true, true, false) => DependencyState::Found,
            (true, true, true) => DependencyState::Inspected,
        }
    }

    /// Search `roots` for this library. Does nothing if already located.
    ///
    /// Zero matches leaves the dependency missing, one match resolves it, and
    /// several matches are handed to `chooser`. The dependency counts as
    /// located afterwards even when the chooser fails.
    pub fn locate<L, C>(&mut self, locator: &L, chooser: &mut C, roots: &[PathBuf]) -> Result<()>
    where
        L: Locator + ?Sized,
        C: Chooser + ?Sized,
    {
        if self.located {
            return Ok(());
        }
        self.located = true;

        let candidates = locator.find(&self.name, roots);
        self.candidates = candidates.len();

        let chosen = match candidates.len() {
            0 => {
                tracing::info!(dependency = %self.name, "missing");
                return Ok(());
            }
            1 => &candidates[0],
            n => {
                let idx = chooser.choose(&self.name, &candidates)?;
                let Some(candidate) = candidates.get(idx) else {
                    return Err(Error::Selection(std::io::Error::new(
                        std::io::ErrorKind::InvalidInput,
                        format!("candidate index {idx} out of range for {n} candidates"),
                    )));
                };
                candidate
            }
        };

        let path = chosen.path();
        tracing::debug!(dependency = %self.name, path = %path.display(), "located");
        self.resolved_path = Some(path);
        self.found = true;
        Ok(())
    }

    /// Read this library's imports. Runs at most once, and only once found.
    ///
    /// Returns an empty set when there is nothing to inspect.
    pub fn inspect<E>(&mut self, extractor: &E) -> Result<BTreeSet<String>>
    where
        E: ImportExtractor + ?Sized,
    {
        if !self.located || !self.found || self.inspected {
            return Ok(BTreeSet::new());
        }
        let Some(path) = self.resolved_path.as_deref() else {
            return Ok(BTreeSet::new());
        };
        self.inspected = true;

        tracing::debug!(dependency = %self.name, "checking dependencies");
        extractor
            .extract(path)
            .map_err(|source| Error::inspection(path, source))
    }
}
