use chrono::prelude::*;
use std::error::Error;
use std::{
    io::Write,
    time::{Instant, SystemTime},
};

use distance::damerau_levenshtein;
use indicatif::{ParallelProgressIterator, ProgressBar, ProgressStyle};
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use sarf::analyzer::{AnalysisResult, Analyzer, AnalyzerConfig};
use sarf::tokenizer::strip_diacritics;
use serde::Serialize;
use structopt::clap::{App, AppSettings, Arg};

static CFG: AnalyzerConfig = AnalyzerConfig::new();

#[derive(Debug, Clone)]
struct GoldWord {
    word: String,
    stem: String,
    root: Option<String>,
}

fn load_words(path: &str, max_words: Option<usize>) -> Result<Vec<GoldWord>, Box<dyn Error>> {
    let mut rdr = csv::ReaderBuilder::new()
        .comment(Some(b'#'))
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    Ok(rdr
        .records()
        .filter_map(Result::ok)
        .filter_map(|r| {
            let word = r.get(0)?.trim();
            let stem = r.get(1)?.trim();
            let root = r
                .get(2)
                .map(str::trim)
                .filter(|x| !x.is_empty())
                .map(str::to_string);

            Some(GoldWord {
                word: word.to_string(),
                stem: strip_diacritics(stem),
                root,
            })
        })
        .take(max_words.unwrap_or(std::usize::MAX))
        .collect())
}

fn compact(root: &str) -> String {
    root.chars().filter(|c| !c.is_whitespace()).collect()
}

#[derive(Debug, Default, Serialize, PartialOrd, Ord, PartialEq, Eq, Clone, Copy)]
struct Time {
    secs: u64,
    subsec_nanos: u32,
}

impl std::fmt::Display for Time {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        let ms = self.secs * 1000 + (self.subsec_nanos as u64 / 1_000_000);
        write!(f, "{}ms", ms)
    }
}

impl From<std::time::Duration> for Time {
    fn from(d: std::time::Duration) -> Time {
        Time {
            secs: d.as_secs(),
            subsec_nanos: d.subsec_nanos(),
        }
    }
}

#[derive(Debug, Serialize)]
struct AccuracyResult<'a> {
    input: &'a str,
    expected_stem: &'a str,
    expected_root: Option<&'a str>,
    stem: Option<String>,
    /// Edit distance between the selected and the expected stem
    distance: Option<usize>,
    stem_correct: bool,
    root_correct: Option<bool>,
    accepted: bool,
    best: Option<AnalysisResult>,
    time: Time,
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    config: &'a AnalyzerConfig,
    load_report: &'a sarf::database::LoadReport,
    summary: Summary,
    results: Vec<AccuracyResult<'a>>,
    start_timestamp: Time,
    total_time: Time,
}

#[derive(Serialize, Default, Debug, Clone)]
struct Summary {
    total_words: u32,
    stem_correct: u32,
    roots_checked: u32,
    root_correct: u32,
    accepted: u32,
    toolwords: u32,
    no_analysis: u32,
    wrong_stem: u32,
    slowest_lookup: Time,
    fastest_lookup: Time,
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        let percent = |v: u32, of: u32| -> String {
            if of == 0 {
                "-".to_string()
            } else {
                format!("{:.2}%", v as f32 / of as f32 * 100f32)
            }
        };

        write!(
            f,
            "[stem] {} [root] {} [accepted] {} [tool] {} [none] {} [wrong] {} [fast] {} [slow] {}",
            percent(self.stem_correct, self.total_words),
            percent(self.root_correct, self.roots_checked),
            percent(self.accepted, self.total_words),
            percent(self.toolwords, self.total_words),
            percent(self.no_analysis, self.total_words),
            percent(self.wrong_stem, self.total_words),
            self.fastest_lookup,
            self.slowest_lookup
        )
    }
}

impl Summary {
    fn new<'a>(results: &[AccuracyResult<'a>]) -> Summary {
        let mut summary = Summary::default();

        results.iter().for_each(|result| {
            summary.total_words += 1;

            if result.stem_correct {
                summary.stem_correct += 1;
            } else if result.best.is_none() {
                summary.no_analysis += 1;
            } else {
                summary.wrong_stem += 1;
            }

            if let Some(correct) = result.root_correct {
                summary.roots_checked += 1;
                if correct {
                    summary.root_correct += 1;
                }
            }

            if result.accepted {
                summary.accepted += 1;
            }

            if result.best.as_ref().map(AnalysisResult::is_toolword) == Some(true) {
                summary.toolwords += 1;
            }
        });

        summary.slowest_lookup = results.iter().map(|x| x.time).max().unwrap_or_default();
        summary.fastest_lookup = results.iter().map(|x| x.time).min().unwrap_or_default();

        summary
    }
}

fn evaluate<'a>(analyzer: &Analyzer, cfg: &AnalyzerConfig, gold: &'a GoldWord) -> AccuracyResult<'a> {
    let now = Instant::now();
    let results = analyzer.analyze_with_config(&gold.word, cfg);
    let time = Time::from(now.elapsed());

    let best = results.into_iter().next();

    let (stem, accepted, roots) = match &best {
        Some(AnalysisResult::Morphological(m)) => {
            let roots = m
                .stem_analysis
                .pattern_roots
                .iter()
                .map(|p| compact(&p.root))
                .chain(m.stem_analysis.candidate_roots.iter().map(|r| compact(&r.radicals)))
                .collect::<Vec<_>>();
            (Some(m.stem.to_string()), m.accepted, roots)
        }
        Some(AnalysisResult::Toolword(t)) => (Some(t.word.to_string()), true, vec![]),
        Some(AnalysisResult::RootDirect(r)) => (Some(r.word.to_string()), true, vec![compact(&r.root)]),
        None => (None, false, vec![]),
    };

    let stem_correct = stem.as_deref() == Some(gold.stem.as_str());
    let distance = stem.as_ref().map(|s| damerau_levenshtein(s, &gold.stem));
    let root_correct = gold
        .root
        .as_ref()
        .map(|expected| roots.contains(&compact(expected)));

    AccuracyResult {
        input: &gold.word,
        expected_stem: &gold.stem,
        expected_root: gold.root.as_deref(),
        stem,
        distance,
        stem_correct,
        root_correct,
        accepted,
        best,
        time,
    }
}

fn git_output(args: &[&str]) -> Result<String, Box<dyn Error>> {
    let output = std::process::Command::new("git").args(args).output()?;
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

fn main() -> Result<(), Box<dyn Error>> {
    pretty_env_logger::init();

    let matches = App::new("sarf-accuracy")
        .setting(AppSettings::ArgRequiredElseHelp)
        .version(env!("CARGO_PKG_VERSION"))
        .about("Accuracy testing for the sarf analyzer.")
        .arg(
            Arg::with_name("config")
                .short("c")
                .takes_value(true)
                .help("Provide JSON config file to override test defaults"),
        )
        .arg(
            Arg::with_name("words")
                .value_name("WORDS")
                .help("The 'word -> expected stem [-> expected root]' list in tab-delimited value file (TSV)"),
        )
        .arg(
            Arg::with_name("database")
                .value_name("DATABASE")
                .help("Use the given database directory or zip archive"),
        )
        .arg(
            Arg::with_name("json-output")
                .short("o")
                .value_name("JSON-OUTPUT")
                .help("The file path for the JSON report output"),
        )
        .arg(
            Arg::with_name("tsv-output")
                .short("t")
                .value_name("TSV-OUTPUT")
                .help("The file path for the TSV line append"),
        )
        .arg(
            Arg::with_name("max-words")
                .short("w")
                .takes_value(true)
                .help("Truncate word list to max number of words specified"),
        )
        .get_matches();

    let cfg: AnalyzerConfig = match matches.value_of("config") {
        Some(path) => AnalyzerConfig::from_path(path)?,
        None => CFG.clone(),
    };

    let analyzer = match matches.value_of("database") {
        Some(path) => Analyzer::build(path)?,
        None => {
            eprintln!("No database found for given path; aborting.");
            std::process::exit(1);
        }
    };

    let words = match matches.value_of("words") {
        Some(path) => load_words(
            path,
            matches
                .value_of("max-words")
                .and_then(|x| x.parse::<usize>().ok()),
        )?,
        None => {
            eprintln!("No word list for given path; aborting.");
            std::process::exit(1);
        }
    };

    let pb = ProgressBar::new(words.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{pos}/{len} [{percent}%] {wide_bar} {elapsed_precise}"),
    );

    let start_time = Instant::now();
    let results = words
        .par_iter()
        .progress_with(pb)
        .map(|gold| evaluate(&analyzer, &cfg, gold))
        .collect::<Vec<_>>();

    let total_time = Time::from(start_time.elapsed());
    let start_timestamp = Time::from(
        SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap_or_default(),
    );

    let summary = Summary::new(&results);
    println!("{}", summary);

    if let Some(path) = matches.value_of("json-output") {
        let output = std::fs::File::create(path)?;
        let report = Report {
            config: &cfg,
            load_report: analyzer.database().load_report(),
            summary,
            results,
            start_timestamp,
            total_time,
        };
        println!("Writing JSON report…");
        serde_json::to_writer_pretty(output, &report)?;
    } else if let Some(path) = matches.value_of("tsv-output") {
        let mut output = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        let md = output.metadata()?;
        if md.len() == 0 {
            // new file, write headers:
            output.write_all(
                b"id\tdate\ttag/branch\tstem\troot\taccepted\tno analysis\twrong stem\n",
            )?;
        }

        let fields = [
            git_output(&["rev-parse", "--short", "HEAD"])?,
            Local::now().to_rfc3339(),
            git_output(&["describe"])?,
            summary.stem_correct.to_string(),
            summary.root_correct.to_string(),
            summary.accepted.to_string(),
            summary.no_analysis.to_string(),
            summary.wrong_stem.to_string(),
        ];
        output.write_all(fields.join("\t").as_bytes())?;
        output.write_all(b"\n")?;
    };

    println!("Done!");
    Ok(())
}
