//! The lexical database: affix tables, tool words, derivational patterns and roots.
//!
//! A database is read once from a directory tree or a zip archive of the same
//! tree and is immutable afterwards. Prefix, suffix and tool word tables are
//! mandatory; pattern and root tables are sharded over several files, and a
//! shard that cannot be read only costs its own entries.
use std::path::{Path, PathBuf};

use hashbrown::HashMap;
use smol_str::SmolStr;

mod encoding;
pub mod error;
pub mod report;
mod xml;

pub use self::error::DatabaseLoadError;
pub use self::report::{LoadReport, TableKind, TableReport, TableStatus};

use crate::constants::GUARANTEED_SUFFIXES;
use crate::paths;
use crate::types::{AffixEntry, PatternEntry, RootEntry, ToolWordEntry};
use crate::vfs::{self, Filesystem};

type Parser<T> = fn(&str) -> Result<Vec<T>, serde_xml_rs::Error>;

#[derive(Debug)]
pub struct LexicalDatabase {
    prefixes: Vec<AffixEntry>,
    suffixes: Vec<AffixEntry>,
    patterns: Vec<PatternEntry>,
    roots: Vec<RootEntry>,
    toolwords: Vec<ToolWordEntry>,

    prefix_classes: HashMap<SmolStr, SmolStr>,
    suffix_classes: HashMap<SmolStr, SmolStr>,
    toolword_index: HashMap<SmolStr, Vec<usize>>,
    root_index: HashMap<SmolStr, Vec<usize>>,
    template_index: HashMap<SmolStr, Vec<usize>>,

    report: LoadReport,
}

impl LexicalDatabase {
    /// Opens a database directory or a `.zip` archive.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<LexicalDatabase, DatabaseLoadError> {
        let path = path.as_ref();

        if path.is_dir() {
            log::info!("Loading database from directory {:?}", path);
            return LexicalDatabase::load(&vfs::Fs::new(path));
        }

        let is_zip = path
            .extension()
            .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case("zip"))
            .unwrap_or(false);

        if is_zip && path.is_file() {
            log::info!("Loading database from archive {:?}", path);
            let fs = vfs::zip::Filesystem::open(path)?;
            return LexicalDatabase::load(&fs);
        }

        Err(DatabaseLoadError::UnsupportedSource(path.to_path_buf()))
    }

    pub fn load<F: Filesystem>(fs: &F) -> Result<LexicalDatabase, DatabaseLoadError> {
        let mut report = LoadReport::default();

        let prefixes = load_table(
            fs,
            TableKind::Prefixes,
            &[paths::PREFIXES],
            xml::parse_prefixes,
            &mut report,
        )?;
        let suffixes = load_table(
            fs,
            TableKind::Suffixes,
            &[paths::SUFFIXES],
            xml::parse_suffixes,
            &mut report,
        )?;
        let toolwords = load_table(
            fs,
            TableKind::Toolwords,
            paths::TOOLWORDS,
            xml::parse_toolwords,
            &mut report,
        )?;
        let patterns = load_shards(
            fs,
            TableKind::Patterns,
            paths::PATTERN_SHARDS,
            xml::parse_patterns,
            &mut report,
        );
        let roots = load_shards(
            fs,
            TableKind::Roots,
            paths::ROOT_SHARDS,
            xml::parse_roots,
            &mut report,
        );

        let db = LexicalDatabase::build(prefixes, suffixes, patterns, roots, toolwords, report);
        log::info!(
            "Database loaded: {} prefixes, {} suffixes, {} tool words, {} patterns, {} roots ({})",
            db.prefixes.len(),
            db.suffixes.len(),
            db.toolwords.len(),
            db.patterns.len(),
            db.roots.len(),
            db.report
        );

        Ok(db)
    }

    /// Builds a database from tables already in memory.
    pub fn from_tables(
        prefixes: Vec<AffixEntry>,
        suffixes: Vec<AffixEntry>,
        patterns: Vec<PatternEntry>,
        roots: Vec<RootEntry>,
        toolwords: Vec<ToolWordEntry>,
    ) -> LexicalDatabase {
        LexicalDatabase::build(
            prefixes,
            suffixes,
            patterns,
            roots,
            toolwords,
            LoadReport::default(),
        )
    }

    fn build(
        prefixes: Vec<AffixEntry>,
        mut suffixes: Vec<AffixEntry>,
        patterns: Vec<PatternEntry>,
        roots: Vec<RootEntry>,
        toolwords: Vec<ToolWordEntry>,
        report: LoadReport,
    ) -> LexicalDatabase {
        for &(surface, voweled, class) in GUARANTEED_SUFFIXES {
            if !suffixes.iter().any(|s| s.surface == surface) {
                suffixes.push(AffixEntry::new(surface, voweled, class));
            }
        }

        let prefix_classes = class_index(&prefixes);
        let suffix_classes = class_index(&suffixes);

        let toolword_index = position_index(toolwords.iter().map(|t| t.surface.clone()));
        let root_index = position_index(roots.iter().map(|r| SmolStr::new(r.compact())));
        let template_index = position_index(patterns.iter().map(|p| SmolStr::new(p.stripped())));

        LexicalDatabase {
            prefixes,
            suffixes,
            patterns,
            roots,
            toolwords,
            prefix_classes,
            suffix_classes,
            toolword_index,
            root_index,
            template_index,
            report,
        }
    }

    pub fn prefixes(&self) -> &[AffixEntry] {
        &self.prefixes
    }

    pub fn suffixes(&self) -> &[AffixEntry] {
        &self.suffixes
    }

    pub fn patterns(&self) -> &[PatternEntry] {
        &self.patterns
    }

    pub fn roots(&self) -> &[RootEntry] {
        &self.roots
    }

    pub fn toolwords(&self) -> &[ToolWordEntry] {
        &self.toolwords
    }

    pub fn load_report(&self) -> &LoadReport {
        &self.report
    }

    #[inline]
    pub fn prefix_class(&self, surface: &str) -> Option<&str> {
        self.prefix_classes.get(surface).map(SmolStr::as_str)
    }

    #[inline]
    pub fn suffix_class(&self, surface: &str) -> Option<&str> {
        self.suffix_classes.get(surface).map(SmolStr::as_str)
    }

    /// Every tool word spelled exactly `surface`, in table order.
    pub fn toolwords_for(&self, surface: &str) -> impl Iterator<Item = &ToolWordEntry> {
        lookup(&self.toolword_index, surface, &self.toolwords)
    }

    /// Every root whose radicals, spacing removed, spell exactly `word`.
    pub fn roots_for(&self, word: &str) -> impl Iterator<Item = &RootEntry> {
        lookup(&self.root_index, word, &self.roots)
    }

    /// Every pattern whose stripped template is exactly `stem`.
    pub fn patterns_for(&self, stem: &str) -> impl Iterator<Item = &PatternEntry> {
        lookup(&self.template_index, stem, &self.patterns)
    }

    #[inline]
    pub fn has_root(&self, compact: &str) -> bool {
        self.root_index.contains_key(compact)
    }
}

fn class_index(entries: &[AffixEntry]) -> HashMap<SmolStr, SmolStr> {
    entries
        .iter()
        .map(|e| (e.surface.clone(), e.class.clone()))
        .collect()
}

fn position_index(keys: impl Iterator<Item = SmolStr>) -> HashMap<SmolStr, Vec<usize>> {
    let mut index: HashMap<SmolStr, Vec<usize>> = HashMap::new();
    for (i, key) in keys.enumerate() {
        index.entry(key).or_default().push(i);
    }
    index
}

fn lookup<'a, T>(
    index: &'a HashMap<SmolStr, Vec<usize>>,
    key: &str,
    entries: &'a [T],
) -> impl Iterator<Item = &'a T> {
    index
        .get(key)
        .into_iter()
        .flatten()
        .map(move |&i| &entries[i])
}

fn read_file<F: Filesystem, T>(
    fs: &F,
    path: &Path,
    parse: Parser<T>,
) -> Result<Vec<T>, DatabaseLoadError> {
    let bytes = fs
        .read(path)
        .map_err(|e| DatabaseLoadError::Io(path.to_path_buf(), e))?;

    let (text, encoding) = encoding::decode(&bytes)
        .ok_or_else(|| DatabaseLoadError::Undecodable(path.to_path_buf()))?;
    if encoding != encoding_rs::UTF_8 {
        log::debug!("{:?} decoded as {}", path, encoding.name());
    }

    parse(encoding::strip_declaration(&text))
        .map_err(|e| DatabaseLoadError::Xml(path.to_path_buf(), e))
}

fn load_table<F: Filesystem, T>(
    fs: &F,
    table: TableKind,
    candidates: &[&str],
    parse: Parser<T>,
    report: &mut LoadReport,
) -> Result<Vec<T>, DatabaseLoadError> {
    let path = match candidates.iter().map(PathBuf::from).find(|p| fs.exists(p)) {
        Some(path) => path,
        None => {
            return Err(DatabaseLoadError::Missing {
                table,
                path: PathBuf::from(candidates.first().copied().unwrap_or_default()),
            })
        }
    };

    let entries = read_file(fs, &path, parse)?;
    report.loaded(table, path, entries.len());
    Ok(entries)
}

fn load_shards<F: Filesystem, T>(
    fs: &F,
    table: TableKind,
    dirs: &[&str],
    parse: Parser<T>,
    report: &mut LoadReport,
) -> Vec<T> {
    let mut entries = vec![];

    for dir in dirs.iter().map(Path::new) {
        if !fs.is_dir(dir) {
            report.skipped(table, dir.to_path_buf(), "directory not found");
            continue;
        }

        let files = match fs.list(dir, paths::TABLE_EXTENSION) {
            Ok(files) => files,
            Err(e) => {
                report.failed(table, dir.to_path_buf(), e.to_string());
                continue;
            }
        };

        for path in files {
            match read_file(fs, &path, parse) {
                Ok(shard) => {
                    report.loaded(table, path, shard.len());
                    entries.extend(shard);
                }
                Err(e) => report.failed(table, path, e.to_string()),
            }
        }
    }

    entries
}
