//! Fixpoint computation of a binary's dependency closure.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::choose::Chooser;
use crate::config::ResolverConfig;
use crate::dependency::Dependency;
use crate::error::{Error, Result};
use crate::inspect::ImportExtractor;
use crate::locate::Locator;
use crate::name::LibName;

/// Final partition of a resolution run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// Resolved paths of every found dependency, sorted.
    pub found: Vec<PathBuf>,
    /// Normalized names of every missing dependency, sorted.
    pub missing: Vec<String>,
    /// Names that matched several files and needed a choice, sorted.
    pub ambiguous: Vec<String>,
}

impl Resolution {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Owns every [`Dependency`] of one run and drives them to a fixpoint.
///
/// Dependencies are keyed by [`LibName`], so a library imported by several
/// files is tracked once. Records are never removed during a run.
pub struct Resolver<L, C, E> {
    config: ResolverConfig,
    locator: L,
    chooser: C,
    extractor: E,
    deps: BTreeMap<LibName, Dependency>,
}

impl<L, C, E> Resolver<L, C, E>
where
    L: Locator,
    C: Chooser,
    E: ImportExtractor,
{
    pub fn new(config: ResolverConfig, locator: L, chooser: C, extractor: E) -> Self {
        Self {
            config,
            locator,
            chooser,
            extractor,
            deps: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Track `name`. Returns `false` if it was already known (or empty);
    /// an existing record keeps its state.
    pub fn add(&mut self, name: &str) -> bool {
        let key = LibName::new(name);
        if key.is_empty() {
            tracing::debug!(raw = name, "ignoring empty import name");
            return false;
        }
        if self.deps.contains_key(&key) {
            return false;
        }
        self.deps.insert(key.clone(), Dependency::new(key));
        true
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.deps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.deps.is_empty()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Dependency> {
        self.deps.get(&LibName::new(name))
    }

    /// All tracked dependencies, ordered by name.
    pub fn dependencies(&self) -> impl Iterator<Item = &Dependency> {
        self.deps.values()
    }

    /// Resolve the full closure of `root`.
    ///
    /// Any failure to read an import table (the root's or a dependency's)
    /// aborts the run: an unknown import set would under-report the closure.
    pub fn run(&mut self, root: &Path) -> Result<Resolution> {
        tracing::info!(file = %root.display(), "checking dependencies");
        let imports = self
            .extractor
            .extract(root)
            .map_err(|source| Error::inspection(root, source))?;
        for name in &imports {
            self.add(name);
        }

        let mut pass = 0usize;
        loop {
            // Names discovered during this pass are picked up by the next one.
            let frontier: Vec<LibName> = self
                .deps
                .values()
                .filter(|dep| !dep.is_settled())
                .map(|dep| dep.name().clone())
                .collect();
            if frontier.is_empty() {
                break;
            }
            pass += 1;
            tracing::debug!(pass, pending = frontier.len(), "resolving");

            for name in frontier {
                let discovered = {
                    let Some(dep) = self.deps.get_mut(&name) else {
                        continue;
                    };
                    dep.locate(&self.locator, &mut self.chooser, &self.config.search_roots)?;
                    dep.inspect(&self.extractor)?
                };
                for import in &discovered {
                    self.add(import);
                }
            }
        }

        let resolution = self.resolution();
        tracing::info!(
            found = resolution.found.len(),
            missing = resolution.missing.len(),
            "resolution complete"
        );
        Ok(resolution)
    }

    /// Partition the tracked dependencies into found and missing.
    #[must_use]
    pub fn resolution(&self) -> Resolution {
        let mut resolution = Resolution::default();
        for dep in self.deps.values() {
            match dep.resolved_path() {
                Some(path) if dep.is_found() => resolution.found.push(path.to_path_buf()),
                _ => resolution.missing.push(dep.name().to_string()),
            }
            if dep.was_ambiguous() {
                resolution.ambiguous.push(dep.name().to_string());
            }
        }
        resolution.found.sort();
        resolution.missing.sort();
        resolution.ambiguous.sort();
        resolution
    }
}
