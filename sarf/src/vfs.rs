use std::io::{Error, ErrorKind, Result};
use std::path::{Component, Path, PathBuf};

/// Read access to a database tree, addressed by paths relative to its root.
pub trait Filesystem {
    fn read(&self, path: &Path) -> Result<Vec<u8>>;
    fn exists(&self, path: &Path) -> bool;
    fn is_dir(&self, path: &Path) -> bool;

    /// Files directly inside `dir` with the given extension, sorted.
    fn list(&self, dir: &Path, extension: &str) -> Result<Vec<PathBuf>>;
}

/// A database tree on disk.
#[derive(Debug, Clone)]
pub struct Fs {
    root: PathBuf,
}

impl Fs {
    pub fn new<P: AsRef<Path>>(root: P) -> Fs {
        Fs {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Filesystem for Fs {
    #[inline(always)]
    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        std::fs::read(self.root.join(path))
    }

    #[inline(always)]
    fn exists(&self, path: &Path) -> bool {
        self.root.join(path).is_file()
    }

    #[inline(always)]
    fn is_dir(&self, path: &Path) -> bool {
        self.root.join(path).is_dir()
    }

    fn list(&self, dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
        let base = self.root.join(dir);
        let pattern = format!("*.{}", extension);

        let walker = globwalk::GlobWalkerBuilder::new(&base, &pattern)
            .max_depth(1)
            .case_insensitive(true)
            .build()
            .map_err(|e| Error::new(ErrorKind::Other, e.to_string()))?;

        let mut paths = walker
            .filter_map(std::result::Result::ok)
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                entry
                    .path()
                    .strip_prefix(&self.root)
                    .ok()
                    .map(Path::to_path_buf)
            })
            .collect::<Vec<_>>();
        paths.sort();

        Ok(paths)
    }
}

/// Zip entry names always use `/`.
fn entry_name(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

pub mod zip {
    use std::fs::File;
    use std::io::{BufReader, Error, ErrorKind, Read, Result};
    use std::path::{Path, PathBuf};

    use ::zip::ZipArchive;
    use parking_lot::Mutex;

    use super::entry_name;
    use crate::paths;

    /// A database tree packed into a zip archive, either at the archive root
    /// or under a single top-level folder.
    pub struct Filesystem {
        archive: Mutex<ZipArchive<BufReader<File>>>,
        base: String,
        names: Vec<String>,
    }

    impl std::fmt::Debug for Filesystem {
        fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            f.debug_struct("Filesystem")
                .field("base", &self.base)
                .field("entries", &self.names.len())
                .finish()
        }
    }

    impl Filesystem {
        pub fn open(path: &Path) -> std::result::Result<Filesystem, ::zip::result::ZipError> {
            let file = File::open(path)?;
            let mut archive = ZipArchive::new(BufReader::new(file))?;

            let mut names = Vec::with_capacity(archive.len());
            for i in 0..archive.len() {
                let entry = archive.by_index(i)?;
                if !entry.is_dir() {
                    names.push(entry.name().to_string());
                }
            }

            let base = detect_base(&names);
            log::debug!("zip database {:?}: {} entries, base {:?}", path, names.len(), base);

            Ok(Filesystem {
                archive: Mutex::new(archive),
                base,
                names,
            })
        }

        fn full_name(&self, path: &Path) -> String {
            let name = entry_name(path);
            if self.base.is_empty() {
                name
            } else if name.is_empty() {
                self.base.clone()
            } else {
                format!("{}/{}", self.base, name)
            }
        }
    }

    fn detect_base(names: &[String]) -> String {
        if names.iter().any(|n| n == paths::PREFIXES) {
            return String::new();
        }

        let suffix = format!("/{}", paths::PREFIXES);
        names
            .iter()
            .filter_map(|n| n.strip_suffix(&suffix))
            .find(|folder| !folder.contains('/'))
            .map(str::to_string)
            .unwrap_or_default()
    }

    impl super::Filesystem for Filesystem {
        fn read(&self, path: &Path) -> Result<Vec<u8>> {
            let name = self.full_name(path);
            let mut archive = self.archive.lock();
            let mut entry = archive.by_name(&name).map_err(|e| match e {
                ::zip::result::ZipError::FileNotFound => {
                    Error::new(ErrorKind::NotFound, format!("{} not found", name))
                }
                ::zip::result::ZipError::Io(e) => e,
                e => Error::new(ErrorKind::Other, e.to_string()),
            })?;

            let mut buf = Vec::with_capacity(entry.size() as usize);
            entry.read_to_end(&mut buf)?;
            Ok(buf)
        }

        fn exists(&self, path: &Path) -> bool {
            let name = self.full_name(path);
            self.names.iter().any(|n| n == &name)
        }

        fn is_dir(&self, path: &Path) -> bool {
            let prefix = format!("{}/", self.full_name(path));
            self.names.iter().any(|n| n.starts_with(&prefix))
        }

        fn list(&self, dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
            let prefix = format!("{}/", self.full_name(dir));

            let mut paths = self
                .names
                .iter()
                .filter_map(|n| n.strip_prefix(&prefix))
                .filter(|rest| !rest.contains('/'))
                .filter(|rest| {
                    Path::new(rest)
                        .extension()
                        .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case(extension))
                        .unwrap_or(false)
                })
                .map(|rest| dir.join(rest))
                .collect::<Vec<_>>();
            paths.sort();

            Ok(paths)
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_names_use_forward_slashes() {
        let path = Path::new("nouns").join("roots").join("a.xml");
        assert_eq!(entry_name(&path), "nouns/roots/a.xml");
    }

    #[test]
    fn lists_xml_files_only() {
        let dir = tempfile::tempdir().unwrap();
        let shard = dir.path().join("nouns").join("roots");
        std::fs::create_dir_all(&shard).unwrap();
        std::fs::write(shard.join("b.xml"), "<roots/>").unwrap();
        std::fs::write(shard.join("a.XML"), "<roots/>").unwrap();
        std::fs::write(shard.join("notes.txt"), "").unwrap();

        let fs = Fs::new(dir.path());
        let listed = fs.list(Path::new("nouns/roots"), "xml").unwrap();

        assert_eq!(
            listed,
            vec![
                Path::new("nouns/roots").join("a.XML"),
                Path::new("nouns/roots").join("b.xml"),
            ]
        );
        assert!(fs.is_dir(Path::new("nouns/roots")));
        assert!(!fs.exists(Path::new("nouns/roots")));
    }
}
