/*! Rule-based Arabic morphological analysis.

A word is split into detachable prefixes, a stem and suffixes; every split
is scored against a lexical database of affixes, derivational patterns and
roots, and the best one is returned together with the roots and patterns it
points to. Closed-class tool words are recognized as a whole.
[`branches`] lists the words of a text built on a given root.

# Usage examples

```no_run
use sarf::analyzer::Analyzer;

let analyzer = Analyzer::build("path/to/db").unwrap();
for result in analyzer.analyze("والكتب") {
    println!("{}", result);
}
```

The database is a directory of XML tables, or a zip archive of one. See
[`paths`] for the expected layout and [`database::LexicalDatabase`] for
loading semantics. The `sarf` binary in this repository wraps the library
as a command line tool.
*/

pub mod analyzer;
pub mod branches;
pub mod database;
pub mod paths;
pub mod tokenizer;
pub mod types;
pub mod vfs;

pub(crate) mod constants;

pub use crate::analyzer::{AnalysisResult, Analyzer, AnalyzerConfig, TokenAnalysis};
pub use crate::database::{DatabaseLoadError, LexicalDatabase};
