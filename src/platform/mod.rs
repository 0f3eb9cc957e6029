// SuiteView platform abstraction
// Resolves the user profile directory that holds the bookmark document.
//
// SuiteView keeps its state in a dot-folder directly under the user's home
// directory on every platform, matching the paths the file-manager UI shows.

use std::env;
use std::path::PathBuf;

const PROFILE_DIR_NAME: &str = ".suiteview";

/// Returns the user's home directory.
///
/// - **Windows**: `%USERPROFILE%` (falling back to `%HOMEDRIVE%%HOMEPATH%`)
/// - **Unix**: `$HOME`
///
/// Falls back to the current directory when no environment variable is set,
/// so the store still has somewhere writable to land.
pub fn home_dir() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Ok(profile) = env::var("USERPROFILE") {
            return PathBuf::from(profile);
        }
        if let (Ok(drive), Ok(path)) = (env::var("HOMEDRIVE"), env::var("HOMEPATH")) {
            return PathBuf::from(format!("{}{}", drive, path));
        }
        PathBuf::from(".")
    }
    #[cfg(not(target_os = "windows"))]
    {
        env::var("HOME").map(PathBuf::from).unwrap_or_else(|_| PathBuf::from("."))
    }
}

/// Returns the SuiteView profile directory (`<home>/.suiteview`).
pub fn profile_dir() -> PathBuf {
    home_dir().join(PROFILE_DIR_NAME)
}
