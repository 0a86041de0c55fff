use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use gumdrop::Options;
use serde::Serialize;

use sarf::analyzer::{AnalysisResult, Analyzer, AnalyzerConfig, TokenAnalysis};
use sarf::branches::{self, BranchQuery};
use sarf::database::{LexicalDatabase, TableStatus};
use sarf::paths;
use sarf::tokenizer::Tokenize;

trait OutputWriter {
    fn write_results(&mut self, word: &str, results: &[AnalysisResult]);
    fn write_tokens(&mut self, tokens: &[TokenAnalysis]);
    fn finish(&mut self) -> anyhow::Result<()>;
}

struct StdoutWriter {
    all: bool,
}

impl OutputWriter for StdoutWriter {
    fn write_results(&mut self, word: &str, results: &[AnalysisResult]) {
        println!("Input: {}", word);

        if results.is_empty() {
            println!("  (no analysis)");
        }

        let shown = if self.all { results.len() } else { 1 };
        for result in results.iter().take(shown) {
            match result {
                AnalysisResult::Morphological(m) => {
                    println!(
                        "  {}\t[{}{}]",
                        result,
                        m.score,
                        if m.accepted { "" } else { ", below threshold" }
                    );
                    for hit in &m.stem_analysis.pattern_roots {
                        println!(
                            "    root {} via {} ({}){}",
                            hit.root,
                            hit.template,
                            hit.kind,
                            if hit.verified { "" } else { " unverified" }
                        );
                    }
                }
                _ => println!("  {}", result),
            }
        }
        println!();
    }

    fn write_tokens(&mut self, tokens: &[TokenAnalysis]) {
        for token in tokens {
            match &token.best {
                Some(best) => println!("{:>4}: {}\t{}", token.offset, token.token, best),
                None => println!("{:>4}: {}\t-", token.offset, token.token),
            }
        }
    }

    fn finish(&mut self) -> anyhow::Result<()> {
        Ok(())
    }
}

#[derive(Serialize)]
struct WordResults {
    word: String,
    results: Vec<AnalysisResult>,
}

#[derive(Serialize)]
struct JsonWriter {
    #[serde(skip)]
    all: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    words: Vec<WordResults>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tokens: Vec<TokenAnalysis>,
}

impl JsonWriter {
    pub fn new(all: bool) -> JsonWriter {
        JsonWriter {
            all,
            words: vec![],
            tokens: vec![],
        }
    }
}

impl OutputWriter for JsonWriter {
    fn write_results(&mut self, word: &str, results: &[AnalysisResult]) {
        let shown = if self.all { results.len() } else { 1 };
        self.words.push(WordResults {
            word: word.to_owned(),
            results: results.iter().take(shown).cloned().collect(),
        });
    }

    fn write_tokens(&mut self, tokens: &[TokenAnalysis]) {
        self.tokens.extend_from_slice(tokens);
    }

    fn finish(&mut self) -> anyhow::Result<()> {
        println!("{}", serde_json::to_string_pretty(self)?);
        Ok(())
    }
}

#[derive(Debug, Options)]
struct Args {
    #[options(help = "print help message")]
    help: bool,

    #[options(command)]
    command: Option<Command>,
}

#[derive(Debug, Options)]
enum Command {
    #[options(help = "analyze the provided words")]
    Analyze(AnalyzeArgs),

    #[options(help = "analyze every word of running text")]
    Text(TextArgs),

    #[options(help = "print input in word-separated tokenized form")]
    Tokenize(TokenizeArgs),

    #[options(help = "print table sizes and the load report of a database")]
    Info(InfoArgs),

    #[options(help = "list the words of a text built on a root")]
    Branches(BranchesArgs),
}

#[derive(Debug, Options)]
struct AnalyzeArgs {
    #[options(help = "print help message")]
    help: bool,

    #[options(help = "database directory or zip archive")]
    database: Option<PathBuf>,

    #[options(help = "analyzer config (JSON)")]
    config: Option<PathBuf>,

    #[options(short = "a", help = "print every result, not only the best")]
    all: bool,

    #[options(no_short, long = "json", help = "output in JSON format")]
    use_json: bool,

    #[options(free, help = "words to be analyzed")]
    inputs: Vec<String>,
}

#[derive(Debug, Options)]
struct TextArgs {
    #[options(help = "print help message")]
    help: bool,

    #[options(help = "database directory or zip archive")]
    database: Option<PathBuf>,

    #[options(help = "analyzer config (JSON)")]
    config: Option<PathBuf>,

    #[options(no_short, long = "json", help = "output in JSON format")]
    use_json: bool,

    #[options(free, help = "text to be analyzed")]
    inputs: Vec<String>,
}

#[derive(Debug, Options)]
struct TokenizeArgs {
    #[options(help = "print help message")]
    help: bool,

    #[options(short = "w", long = "words", help = "show words only")]
    is_words_only: bool,

    #[options(free, help = "text to be tokenized")]
    inputs: Vec<String>,
}

#[derive(Debug, Options)]
struct InfoArgs {
    #[options(help = "print help message")]
    help: bool,

    #[options(help = "database directory or zip archive")]
    database: Option<PathBuf>,
}

#[derive(Debug, Options)]
struct BranchesArgs {
    #[options(help = "print help message")]
    help: bool,

    #[options(
        required,
        short = "r",
        help = "root letters, excluded letters in parentheses: \"كتب (ن،ي)\""
    )]
    root: String,

    #[options(no_short, long = "json", help = "output in JSON format")]
    use_json: bool,

    #[options(free, help = "text to be searched")]
    inputs: Vec<String>,
}

fn read_stdin() -> anyhow::Result<String> {
    eprintln!("Reading from stdin...");
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .context("reading stdin")?;
    Ok(buffer)
}

fn database_path(path: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    match path {
        Some(v) => Ok(v),
        None => paths::find_database_path().with_context(|| {
            format!(
                "No database given and none found; pass --database or set {}",
                paths::DATABASE_ENV
            )
        }),
    }
}

fn load_database(path: &Path) -> anyhow::Result<Arc<LexicalDatabase>> {
    let db = LexicalDatabase::open(path)
        .with_context(|| format!("loading database {}", path.display()))?;

    for failure in db.load_report().failures() {
        if let TableStatus::Failed { reason } = &failure.status {
            eprintln!("warning: {} {}: {}", failure.table, failure.path.display(), reason);
        }
    }

    Ok(Arc::new(db))
}

fn load_analyzer(database: Option<PathBuf>, config: Option<PathBuf>) -> anyhow::Result<Analyzer> {
    let db = load_database(&database_path(database)?)?;

    let config = match config {
        Some(path) => AnalyzerConfig::from_path(&path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => AnalyzerConfig::default(),
    };

    Ok(Analyzer::with_config(db, config))
}

fn analyze(args: AnalyzeArgs) -> anyhow::Result<()> {
    let analyzer = load_analyzer(args.database, args.config)?;

    let mut writer: Box<dyn OutputWriter> = if args.use_json {
        Box::new(JsonWriter::new(args.all))
    } else {
        Box::new(StdoutWriter { all: args.all })
    };

    let words = if args.inputs.is_empty() {
        read_stdin()?
            .lines()
            .map(|x| x.trim().to_string())
            .filter(|x| !x.is_empty())
            .collect()
    } else {
        args.inputs
    };

    for word in words {
        let results = analyzer.analyze(&word);
        writer.write_results(&word, &results);
    }

    writer.finish()
}

fn text(args: TextArgs) -> anyhow::Result<()> {
    let analyzer = load_analyzer(args.database, args.config)?;

    let mut writer: Box<dyn OutputWriter> = if args.use_json {
        Box::new(JsonWriter::new(false))
    } else {
        Box::new(StdoutWriter { all: false })
    };

    let input = if args.inputs.is_empty() {
        read_stdin()?
    } else {
        args.inputs.join(" ")
    };

    writer.write_tokens(&analyzer.analyze_text(&input));
    writer.finish()
}

fn tokenize(args: TokenizeArgs) -> anyhow::Result<()> {
    let inputs: String = if args.inputs.is_empty() {
        read_stdin()?
    } else {
        args.inputs.join(" ")
    };

    if args.is_words_only {
        for (index, token) in inputs.word_indices() {
            println!("{:>4}: \"{}\"", index, token);
        }
    } else {
        for (index, token) in inputs.word_bound_indices() {
            println!("{:>4}: \"{}\"", index, token);
        }
    }

    Ok(())
}

fn info(args: InfoArgs) -> anyhow::Result<()> {
    let path = database_path(args.database)?;
    let db = load_database(&path)?;

    println!("Database: {}", path.display());
    println!("  prefixes:   {}", db.prefixes().len());
    println!("  suffixes:   {}", db.suffixes().len());
    println!("  tool words: {}", db.toolwords().len());
    println!("  patterns:   {}", db.patterns().len());
    println!("  roots:      {}", db.roots().len());
    println!();

    let report = db.load_report();
    for table in &report.tables {
        let status = match &table.status {
            TableStatus::Loaded { entries } => format!("loaded ({} entries)", entries),
            TableStatus::Skipped { reason } => format!("skipped: {}", reason),
            TableStatus::Failed { reason } => format!("FAILED: {}", reason),
        };
        println!("{:<10} {:<40} {}", table.table.to_string(), table.path.display().to_string(), status);
    }
    println!();
    println!("{}", report);

    Ok(())
}

fn branches(args: BranchesArgs) -> anyhow::Result<()> {
    let query = BranchQuery::parse(&args.root)?;

    let input = if args.inputs.is_empty() {
        read_stdin()?
    } else {
        args.inputs.join(" ")
    };

    let found = branches::search(&input, &query);

    if args.use_json {
        println!("{}", serde_json::to_string_pretty(&found)?);
        return Ok(());
    }

    if found.is_empty() {
        println!("No branches of {} found", args.root.trim());
        return Ok(());
    }

    for (i, branch) in found.iter().enumerate() {
        println!("{:>3}. {:<20} {:>4}", i + 1, branch.word, branch.count);
    }
    println!();
    println!("{} distinct words", found.len());

    Ok(())
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let args = Args::parse_args_default_or_exit();

    match args.command {
        None => Ok(()),
        Some(Command::Analyze(args)) => analyze(args),
        Some(Command::Text(args)) => text(args),
        Some(Command::Tokenize(args)) => tokenize(args),
        Some(Command::Info(args)) => info(args),
        Some(Command::Branches(args)) => branches(args),
    }
}
