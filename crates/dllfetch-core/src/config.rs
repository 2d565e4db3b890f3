use std::path::PathBuf;

/// Search root used when none is configured.
pub const DEFAULT_SEARCH_ROOT: &str = "/";

/// Configuration for a single resolution run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Directories searched recursively, in order, for library files.
    pub search_roots: Vec<PathBuf>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            search_roots: vec![PathBuf::from(DEFAULT_SEARCH_ROOT)],
        }
    }
}

impl ResolverConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the search roots.
    ///
    /// An empty list keeps the default (the filesystem root).
    #[must_use]
    pub fn with_search_roots<I, P>(mut self, roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let roots: Vec<PathBuf> = roots.into_iter().map(Into::into).collect();
        if !roots.is_empty() {
            self.search_roots = roots;
        }
        self
    }

    #[must_use]
    pub fn search_roots(&self) -> &[PathBuf] {
        &self.search_roots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_searches_filesystem_root() {
        let config = ResolverConfig::new();
        assert_eq!(config.search_roots(), &[PathBuf::from("/")]);
    }

    #[test]
    fn test_empty_roots_keep_default() {
        let config = ResolverConfig::new().with_search_roots(Vec::<PathBuf>::new());
        assert_eq!(config, ResolverConfig::default());
    }

    #[test]
    fn test_with_search_roots_preserves_order() {
        let config = ResolverConfig::new().with_search_roots(["/b", "/a"]);
        assert_eq!(
            config.search_roots(),
            &[PathBuf::from("/b"), PathBuf::from("/a")]
        );
    }

    #[test]
    fn test_explicit_filesystem_root_is_kept() {
        let config = ResolverConfig::new().with_search_roots(["/", "/opt"]);
        assert_eq!(
            config.search_roots(),
            &[PathBuf::from("/"), PathBuf::from("/opt")]
        );
    }
}
