//! Platform-specific directory paths.
//!
//! Uses XDG on Linux, standard locations on macOS/Windows.

use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use directories::ProjectDirs;

const QUALIFIER: &str = "dev";
const ORGANIZATION: &str = "contractdesk";
const APPLICATION: &str = "contracts";

/// Get project directories, or None if home directory cannot be determined.
fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// Directory for persistent data (the saved session).
///
/// - Linux: `$XDG_DATA_HOME/contracts` or `~/.local/share/contracts`
/// - macOS: `~/Library/Application Support/dev.contractdesk.contracts`
pub fn data_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
}

/// Directory for logs.
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().to_path_buf())
}

pub fn config_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
}

pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}

pub fn session_file() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join("session.json"))
}

/// Get the path to the latest log file.
pub fn log_file() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join("latest.log"))
}

/// Archived logs kept next to `latest.log`.
pub const KEEP_ARCHIVED_LOGS: usize = 25;

const ARCHIVE_PREFIX: &str = "contracts-";

/// Moves `dir/latest.log` aside as `contracts-<timestamp>.log` and prunes the
/// archive down to the `keep` newest files.
///
/// Archive names sort chronologically, so pruning goes by name rather than by
/// file times. Files not named like an archive are left alone.
pub fn rotate_logs_in(dir: &Path, keep: usize) -> io::Result<()> {
    let latest = dir.join("latest.log");
    if latest.exists() {
        fs::rename(&latest, archive_name(dir))?;
    }

    let mut archived: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| is_archive(path))
        .collect();
    archived.sort();

    let excess = archived.len().saturating_sub(keep);
    for old in &archived[..excess] {
        fs::remove_file(old)?;
    }
    Ok(())
}

/// A free archive path for the current time. Rotations within the same
/// second get a counter.
fn archive_name(dir: &Path) -> PathBuf {
    let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
    let mut path = dir.join(format!("{ARCHIVE_PREFIX}{stamp}.log"));
    let mut n = 1;
    while path.exists() {
        path = dir.join(format!("{ARCHIVE_PREFIX}{stamp}-{n}.log"));
        n += 1;
    }
    path
}

fn is_archive(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "log")
        && path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.starts_with(ARCHIVE_PREFIX))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn rotation_archives_latest_and_prunes_oldest() {
        let dir = tempfile::TempDir::new().unwrap();
        for day in 1..=28 {
            let name = format!("contracts-202001{day:02}-120000.log");
            fs::write(dir.path().join(name), "old").unwrap();
        }
        fs::write(dir.path().join("latest.log"), "previous run").unwrap();
        fs::write(dir.path().join("notes.log"), "not ours").unwrap();

        rotate_logs_in(dir.path(), KEEP_ARCHIVED_LOGS).unwrap();

        let names = names(dir.path());
        assert!(!names.contains(&"latest.log".to_string()));
        assert!(names.contains(&"notes.log".to_string()));
        let archives: Vec<&String> = names
            .iter()
            .filter(|n| n.starts_with("contracts-"))
            .collect();
        assert_eq!(archives.len(), KEEP_ARCHIVED_LOGS);
        // The four oldest went; the fresh archive survived.
        assert_eq!(archives[0], "contracts-20200105-120000.log");
        assert!(!archives.last().unwrap().starts_with("contracts-2020"));
    }

    #[test]
    fn same_second_rotations_do_not_overwrite() {
        let dir = tempfile::TempDir::new().unwrap();
        fs::write(dir.path().join("latest.log"), "first").unwrap();
        rotate_logs_in(dir.path(), KEEP_ARCHIVED_LOGS).unwrap();
        fs::write(dir.path().join("latest.log"), "second").unwrap();
        rotate_logs_in(dir.path(), KEEP_ARCHIVED_LOGS).unwrap();

        assert_eq!(names(dir.path()).len(), 2);
    }

    #[test]
    fn missing_latest_only_prunes() {
        let dir = tempfile::TempDir::new().unwrap();
        for day in 1..=3 {
            let name = format!("contracts-202001{day:02}-120000.log");
            fs::write(dir.path().join(name), "old").unwrap();
        }
        rotate_logs_in(dir.path(), 1).unwrap();
        assert_eq!(names(dir.path()), vec!["contracts-20200103-120000.log"]);
    }
}
