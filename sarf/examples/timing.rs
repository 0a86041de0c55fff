use std::time::Instant;

use sarf::analyzer::Analyzer;

static WORDS: &[&str] = &[
    "الكتاب",
    "والكتب",
    "المعلمون",
    "فسيكتبونها",
    "بالقلم",
    "مدرسة",
    "في",
    "قال",
];

fn main() {
    let path = match std::env::args().nth(1).map(std::path::PathBuf::from) {
        Some(v) => v,
        None => match sarf::paths::find_database_path() {
            Some(v) => v,
            None => {
                eprintln!("No database passed.");
                return;
            }
        },
    };

    let now = Instant::now();
    let analyzer = match Analyzer::build(&path) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("{}", e);
            return;
        }
    };
    println!("Loaded {} in {:?}", path.display(), now.elapsed());

    for word in WORDS {
        let now = Instant::now();
        let results = analyzer.analyze(word);
        let then = now.elapsed();

        let summary = results
            .first()
            .map(|r| r.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!("{} -> {} [{}.{:06}s]", word, summary, then.as_secs(), then.subsec_micros());
    }
}
