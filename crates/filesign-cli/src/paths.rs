//! Default output locations.

use std::ffi::OsString;
use std::path::Path;
use std::path::PathBuf;

/// `<file>.<suffix>`, keeping any existing extension.
pub fn with_suffix(file: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(file.as_os_str());
    name.push(".");
    name.push(suffix);
    PathBuf::from(name)
}
