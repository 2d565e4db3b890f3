use std::fmt;

/// A library file name normalized for identity.
///
/// Two imports that differ only in case (`KERNEL32.dll`, `kernel32.DLL`) map
/// to the same `LibName`, so the resolver tracks them as one dependency.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LibName(String);

impl LibName {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self(name.trim().to_lowercase())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether a file name on disk is this library, ignoring case.
    ///
    /// This is an exact comparison, not a pattern match.
    #[must_use]
    pub fn matches(&self, file_name: &str) -> bool {
        file_name.to_lowercase() == self.0
    }
}

impl From<&str> for LibName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for LibName {
    fn from(name: String) -> Self {
        Self::new(&name)
    }
}

impl AsRef<str> for LibName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LibName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
