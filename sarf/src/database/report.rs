//! What happened to each table while a database was loading.
use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    Prefixes,
    Suffixes,
    Toolwords,
    Patterns,
    Roots,
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            TableKind::Prefixes => "prefixes",
            TableKind::Suffixes => "suffixes",
            TableKind::Toolwords => "toolwords",
            TableKind::Patterns => "patterns",
            TableKind::Roots => "roots",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TableStatus {
    Loaded { entries: usize },
    Skipped { reason: String },
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableReport {
    pub table: TableKind,
    /// Path of the file or shard directory, relative to the database root
    pub path: PathBuf,
    #[serde(flatten)]
    pub status: TableStatus,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadReport {
    pub tables: Vec<TableReport>,
}

impl LoadReport {
    pub(crate) fn loaded(&mut self, table: TableKind, path: PathBuf, entries: usize) {
        log::debug!("{} {:?}: {} entries", table, path, entries);
        self.tables.push(TableReport {
            table,
            path,
            status: TableStatus::Loaded { entries },
        });
    }

    pub(crate) fn skipped(&mut self, table: TableKind, path: PathBuf, reason: impl Into<String>) {
        let reason = reason.into();
        log::info!("{} {:?} skipped: {}", table, path, reason);
        self.tables.push(TableReport {
            table,
            path,
            status: TableStatus::Skipped { reason },
        });
    }

    pub(crate) fn failed(&mut self, table: TableKind, path: PathBuf, reason: impl Into<String>) {
        let reason = reason.into();
        log::warn!("{} {:?} failed: {}", table, path, reason);
        self.tables.push(TableReport {
            table,
            path,
            status: TableStatus::Failed { reason },
        });
    }

    pub fn failures(&self) -> impl Iterator<Item = &TableReport> {
        self.tables
            .iter()
            .filter(|t| matches!(t.status, TableStatus::Failed { .. }))
    }

    pub fn is_clean(&self) -> bool {
        self.failures().next().is_none()
    }

    /// Entries loaded into `table` across all of its files.
    pub fn entries(&self, table: TableKind) -> usize {
        self.tables
            .iter()
            .filter(|t| t.table == table)
            .map(|t| match t.status {
                TableStatus::Loaded { entries } => entries,
                _ => 0,
            })
            .sum()
    }
}

impl fmt::Display for LoadReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut loaded = 0;
        let mut skipped = 0;
        let mut failed = 0;

        for table in &self.tables {
            match table.status {
                TableStatus::Loaded { .. } => loaded += 1,
                TableStatus::Skipped { .. } => skipped += 1,
                TableStatus::Failed { .. } => failed += 1,
            }
        }

        write!(
            f,
            "{} files loaded, {} skipped, {} failed",
            loaded, skipped, failed
        )
    }
}
