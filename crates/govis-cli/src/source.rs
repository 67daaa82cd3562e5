//! Loading of Go source files from package directories.
//!
//! Each directory is read non-recursively: only the `.go` files directly in
//! it are loaded, in file name order.

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::{debug, info};

use govis::{GovisError, SourceUnit};

/// Returns the `.go` files directly inside `dir`, sorted by path.
fn go_files(dir: &Path) -> Result<Vec<PathBuf>, GovisError> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().and_then(|ext| ext.to_str()) == Some("go") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Reads every `.go` file of every directory in `dirs`.
///
/// # Errors
///
/// Returns [`GovisError::NoInputSpecified`] when `dirs` is empty and
/// [`GovisError::Io`] when a directory or file cannot be read.
pub fn load_units<P: AsRef<Path>>(dirs: &[P]) -> Result<Vec<SourceUnit>, GovisError> {
    if dirs.is_empty() {
        return Err(GovisError::NoInputSpecified);
    }

    let mut units = Vec::new();
    for dir in dirs {
        let dir = dir.as_ref();
        let files = go_files(dir)?;
        info!(dir = dir.display().to_string(), files = files.len(); "Loading package directory");

        for file in files {
            debug!(file = file.display().to_string(); "Reading source file");
            let source = fs::read_to_string(&file)?;
            units.push(SourceUnit::new(file.display().to_string(), source));
        }
    }
    Ok(units)
}
