use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Copy `source` into `target_dir`, keeping its file name.
///
/// Creates `target_dir` if needed and overwrites an existing file of the same
/// name. Returns the path of the copy.
///
/// # Errors
/// Returns an error if `source` has no file name, or if the directory cannot
/// be created or the copy fails.
pub fn copy_into_dir(source: &Path, target_dir: &Path) -> io::Result<PathBuf> {
    let file_name = source.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} has no file name", source.display()),
        )
    })?;

    fs::create_dir_all(target_dir)?;
    let dest = target_dir.join(file_name);
    fs::copy(source, &dest)?;
    Ok(dest)
}
