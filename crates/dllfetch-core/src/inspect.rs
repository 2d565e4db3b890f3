//! Import-table extraction.
//!
//! The resolver only needs "which library names does this file import", so
//! the extraction step sits behind [`ImportExtractor`]. The default
//! implementation shells out to `objdump -p` and reads the `DLL Name:` lines
//! of the PE import directory.

use std::collections::BTreeSet;
use std::ffi::OsString;
use std::path::Path;
use std::process::Command;
use std::sync::OnceLock;

use regex_lite::Regex;

use crate::error::InspectError;

/// Default inspection tool, looked up on `PATH`.
pub const DEFAULT_OBJDUMP: &str = "objdump";

/// Environment variable overriding the inspection tool.
pub const OBJDUMP_ENV: &str = "DLLFETCH_OBJDUMP";

const DLL_NAME_PATTERN: &str = r"DLL Name:\s*(\S+)";

/// Produces the set of library names a binary imports.
pub trait ImportExtractor {
    /// List every dynamically linked library `path` declares, whether or not
    /// the library exists on disk.
    fn extract(&self, path: &Path) -> Result<BTreeSet<String>, InspectError>;
}

/// Extractor that runs `objdump -p <file>`.
#[derive(Debug, Clone)]
pub struct ObjdumpExtractor {
    tool: OsString,
}

impl Default for ObjdumpExtractor {
    fn default() -> Self {
        Self {
            tool: OsString::from(DEFAULT_OBJDUMP),
        }
    }
}

impl ObjdumpExtractor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific `objdump` binary (name on `PATH` or a path).
    #[must_use]
    pub fn with_tool(mut self, tool: impl Into<OsString>) -> Self {
        self.tool = tool.into();
        self
    }

    #[must_use]
    pub fn tool(&self) -> &std::ffi::OsStr {
        &self.tool
    }

    fn tool_display(&self) -> String {
        self.tool.to_string_lossy().into_owned()
    }
}

impl ImportExtractor for ObjdumpExtractor {
    fn extract(&self, path: &Path) -> Result<BTreeSet<String>, InspectError> {
        if !path.is_file() {
            return Err(InspectError::NotFound);
        }

        let tool = which::which(&self.tool).map_err(|_| InspectError::ToolNotFound {
            tool: self.tool_display(),
        })?;

        tracing::debug!(file = %path.display(), tool = %tool.display(), "reading import table");

        let output = Command::new(&tool)
            .arg("-p")
            .arg(path)
            .output()
            .map_err(|source| InspectError::Spawn {
                tool: self.tool_display(),
                source,
            })?;

        if !output.status.success() {
            return Err(InspectError::Failed {
                tool: self.tool_display(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(parse_imports(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// Collect the names from every `DLL Name: <name>` line of `objdump -p` output.
#[must_use]
pub fn parse_imports(dump: &str) -> BTreeSet<String> {
    static DLL_NAME: OnceLock<Option<Regex>> = OnceLock::new();

    let Some(re) = DLL_NAME.get_or_init(|| Regex::new(DLL_NAME_PATTERN).ok()) else {
        return BTreeSet::new();
    };

    dump.lines()
        .filter_map(|line| re.captures(line))
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_DUMP: &str = "\
app.exe:     file format pei-x86-64

The Import Tables (interpreted .idata section contents)
 vma:            Hint    Time      Forward  DLL       First
                 Table   Stamp     Chain    Name      Thunk
 00009000       0000903c 00000000 00000000 000095a4 00009174

\tDLL Name: KERNEL32.dll
\tvma:  Hint/Ord Member-Name Bound-To
\t9330      280  ExitProcess

 00009014       00009088 00000000 00000000 000095f0 000091c0

\tDLL Name: msvcrt.dll
\tvma:  Hint/Ord Member-Name Bound-To
\t9350       57  __getmainargs

\tDLL Name: KERNEL32.dll
";

    #[test]
    fn test_parse_imports_collects_dll_names() {
        let imports = parse_imports(SAMPLE_DUMP);
        let expected: BTreeSet<String> = ["KERNEL32.dll", "msvcrt.dll"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(imports, expected);
    }

    #[test]
    fn test_parse_imports_preserves_raw_case() {
        let imports = parse_imports("DLL Name: ZLIB1.DLL\n");
        assert!(imports.contains("ZLIB1.DLL"));
    }

    #[test]
    fn test_parse_imports_empty_for_non_pe_output() {
        let dump = "hello:     file format elf64-x86-64\n\nDynamic Section:\n  NEEDED  libc.so.6\n";
        assert!(parse_imports(dump).is_empty());
    }

    #[test]
    fn test_parse_imports_is_stable_across_calls() {
        let first = parse_imports(SAMPLE_DUMP);
        let second = parse_imports("\tDLL Name: zlib1.dll\n");
        assert_eq!(first.len(), 2);
        assert_eq!(second.into_iter().collect::<Vec<_>>(), vec!["zlib1.dll"]);
        assert_eq!(parse_imports(SAMPLE_DUMP), first);
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let err = ObjdumpExtractor::new()
            .extract(Path::new("/nonexistent/app.exe"))
            .unwrap_err();
        assert!(matches!(err, InspectError::NotFound));
    }

    #[test]
    fn test_unknown_tool_is_reported() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let err = ObjdumpExtractor::new()
            .with_tool("dllfetch-no-such-objdump")
            .extract(file.path())
            .unwrap_err();
        assert!(matches!(err, InspectError::ToolNotFound { .. }));
    }
}
