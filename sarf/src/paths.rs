//! Layout of a lexical database and where installed databases live.
use std::path::{Path, PathBuf};

pub const PREFIXES: &str = "prefixes.xml";
pub const SUFFIXES: &str = "suffixes.xml";

/// Tried in order; the first present file is used.
pub const TOOLWORDS: &[&str] = &["toolwords.xml", "underived/toolwords.xml"];

pub const PATTERN_SHARDS: &[&str] = &[
    "nouns/patterns/Unvoweled",
    "nouns/patterns/Voweled",
    "verbs/patterns/Unvoweled",
    "verbs/patterns/Voweled",
];

pub const ROOT_SHARDS: &[&str] = &["nouns/roots", "verbs/roots"];

pub const TABLE_EXTENSION: &str = "xml";

/// Overrides the installed locations when set.
pub const DATABASE_ENV: &str = "SARF_DATABASE";

const DATABASE_PATTERN: &str = "{db,db.zip}";

fn find_in(dir: &Path) -> Option<PathBuf> {
    globwalk::GlobWalkerBuilder::new(dir, DATABASE_PATTERN)
        .max_depth(1)
        .build()
        .ok()?
        .filter_map(Result::ok)
        .next()
        .map(|entry| entry.path().to_path_buf())
}

#[cfg(target_os = "linux")]
fn install_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];
    if let Some(home) = std::env::var_os("HOME") {
        dirs.push(PathBuf::from(home).join(".local/share/sarf"));
    }
    dirs.push(PathBuf::from("/usr/local/share/sarf"));
    dirs.push(PathBuf::from("/usr/share/sarf"));
    dirs
}

#[cfg(target_os = "macos")]
fn install_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];
    if let Some(home) = std::env::var_os("HOME") {
        dirs.push(PathBuf::from(home).join("Library/Application Support/Sarf"));
    }
    dirs.push(PathBuf::from("/Library/Application Support/Sarf"));
    dirs
}

#[cfg(windows)]
fn install_dirs() -> Vec<PathBuf> {
    vec![PathBuf::from(r"C:\Program Files\Sarf")]
}

#[cfg(not(any(target_os = "linux", target_os = "macos", windows)))]
fn install_dirs() -> Vec<PathBuf> {
    vec![]
}

/// Locates a database directory or zip archive.
///
/// `SARF_DATABASE` wins if it points at something that exists, then the
/// per-user and system install locations are searched for `db` or `db.zip`.
pub fn find_database_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(DATABASE_ENV).map(PathBuf::from) {
        if path.exists() {
            return Some(path);
        }
        log::warn!("{} points at missing path {:?}", DATABASE_ENV, path);
    }

    install_dirs()
        .into_iter()
        .filter(|dir| dir.is_dir())
        .find_map(|dir| find_in(&dir))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_database_folder() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("db")).unwrap();

        assert_eq!(find_in(dir.path()), Some(dir.path().join("db")));
    }

    #[test]
    fn nothing_to_find() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(find_in(dir.path()), None);
    }
}
