use std::path::{Path, PathBuf};

use crate::platform;

const DATA_FILE_NAME: &str = "bookmarks.json";
const LEGACY_SIDEBAR_FILE_NAME: &str = "quick_links.json";
const BACKUP_DIR_NAME: &str = "backups";

/// File locations the store reads and writes.
///
/// The unified document and the legacy top-bar file share the same path:
/// a `bookmarks.json` without `version >= 2` is the legacy format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorePaths {
    pub data_file: PathBuf,
    pub legacy_sidebar_file: PathBuf,
    pub backup_dir: PathBuf,
}

impl StorePaths {
    /// Standard locations under the user's SuiteView profile directory.
    pub fn default_locations() -> Self {
        Self::in_dir(&platform::profile_dir())
    }

    /// All files rooted in one directory. Tests use this with a tempdir.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            data_file: dir.join(DATA_FILE_NAME),
            legacy_sidebar_file: dir.join(LEGACY_SIDEBAR_FILE_NAME),
            backup_dir: dir.join(BACKUP_DIR_NAME),
        }
    }
}
