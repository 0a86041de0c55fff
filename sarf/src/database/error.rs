use std::io;
use std::path::PathBuf;

use super::report::TableKind;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum DatabaseLoadError {
    #[error("Missing {table} table, expected at '{}'", .path.display())]
    Missing { table: TableKind, path: PathBuf },

    #[error("Failed to read '{}'", .0.display())]
    Io(PathBuf, #[source] io::Error),

    #[error("'{}' is not valid UTF-8, windows-1256 or ISO-8859-6", .0.display())]
    Undecodable(PathBuf),

    #[error("Invalid XML in '{}': {}", .0.display(), .1)]
    Xml(PathBuf, #[source] serde_xml_rs::Error),

    #[error("Could not open zip archive")]
    Zip(#[from] ::zip::result::ZipError),

    #[error("'{}' is neither a directory nor a zip archive", .0.display())]
    UnsupportedSource(PathBuf),
}
