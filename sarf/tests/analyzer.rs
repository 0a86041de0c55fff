use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use sarf::analyzer::{AnalysisResult, Analyzer, MorphologicalAnalysis};
use sarf::database::{DatabaseLoadError, LexicalDatabase, TableKind, TableStatus};
use sarf::tokenizer::strip_diacritics;

const PREFIXES: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<prefixes>
  <prefixe unvoweledform="و" voweledform="وَ" classe="C1"/>
  <prefixe unvoweledform="ف" voweledform="فَ" classe="C1"/>
  <prefixe unvoweledform="ب" voweledform="بِ" classe="C2"/>
  <prefixe unvoweledform="ك" voweledform="كَ" classe="C2"/>
  <prefixe unvoweledform="ل" voweledform="لِ" classe="C2"/>
  <prefixe unvoweledform="س" voweledform="سَ" classe="V1"/>
  <prefixe unvoweledform="ال" voweledform="الْ" classe="N1"/>
</prefixes>
"#;

const SUFFIXES: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<suffixes>
  <suffixe unvoweledform="ون" voweledform="ونَ" classe="N2"/>
  <suffixe unvoweledform="ين" voweledform="ينَ" classe="N2"/>
  <suffixe unvoweledform="ات" voweledform="اتٌ" classe="N2"/>
  <suffixe unvoweledform="ها" voweledform="هَا" classe="C3"/>
  <suffixe unvoweledform="ه" voweledform="هُ" classe="C3"/>
  <suffixe unvoweledform="هم" voweledform="هُمْ" classe="C3"/>
  <suffixe unvoweledform="نا" voweledform="نَا" classe="C3"/>
  <suffixe unvoweledform="ي" voweledform="ي" classe="C3"/>
  <suffixe unvoweledform="ك" voweledform="كَ" classe="C3"/>
</suffixes>
"#;

const TOOLWORDS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<toolwords>
  <toolword unvoweledform="في" voweledform="فِي" type="حرف جر" prefixeclass="C1" suffixeclass="C3"/>
  <toolword unvoweledform="من" voweledform="مِنْ" type="حرف جر" prefixeclass="C1" suffixeclass="C3"/>
  <toolword unvoweledform="من" voweledform="مَنْ" type="اسم موصول" prefixeclass="C1" suffixeclass=""/>
</toolwords>
"#;

const PATTERNS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<patterns>
  <pattern id="1" diac="فَاعِل" type="noun" aug="1" cas="1" ncg="1" trans=""/>
</patterns>
"#;

const ROOTS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<roots>
  <root val="ك ت ب" vect="1"/>
</roots>
"#;

const FILES: &[(&str, &str)] = &[
    ("prefixes.xml", PREFIXES),
    ("suffixes.xml", SUFFIXES),
    ("underived/toolwords.xml", TOOLWORDS),
    ("nouns/patterns/Unvoweled/1.xml", PATTERNS),
    ("nouns/roots/1.xml", ROOTS),
];

fn write(root: &Path, path: &str, content: &[u8]) {
    let path = root.join(path);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

fn fixture() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    for (path, content) in FILES {
        write(dir.path(), path, content.as_bytes());
    }
    dir
}

fn fixture_zip(folder: &str) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let file = std::fs::File::create(dir.path().join("db.zip")).unwrap();
    let mut zip = zip::ZipWriter::new(file);
    let options =
        zip::write::FileOptions::default().compression_method(zip::CompressionMethod::Stored);

    for (path, content) in FILES {
        zip.start_file(format!("{}{}", folder, path), options).unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    }
    zip.finish().unwrap();

    dir
}

fn morphological(results: &[AnalysisResult]) -> &MorphologicalAnalysis {
    assert_eq!(results.len(), 1, "{:?}", results);
    results[0].as_morphological().unwrap()
}

fn parts(m: &MorphologicalAnalysis) -> (Vec<&str>, &str, Vec<&str>) {
    (
        m.prefixes.iter().map(|p| p.as_str()).collect(),
        m.stem.as_str(),
        m.suffixes.iter().map(|s| s.as_str()).collect(),
    )
}

#[test]
fn article_is_detached() {
    let dir = fixture();
    let analyzer = Analyzer::build(dir.path()).unwrap();

    let results = analyzer.analyze("الكتاب");
    let m = morphological(&results);

    assert_eq!(parts(m), (vec!["ال"], "كتاب", vec![]));
    assert!(m.accepted);
    assert_eq!(m.stem_analysis.length, 4);
}

#[test]
fn conjunction_and_article_are_detached() {
    let dir = fixture();
    let analyzer = Analyzer::build(dir.path()).unwrap();

    let results = analyzer.analyze("والكتب");
    let m = morphological(&results);

    assert_eq!(parts(m), (vec!["و", "ال"], "كتب", vec![]));
    assert_eq!(m.stem_analysis.candidate_roots.len(), 1);
    assert_eq!(m.stem_analysis.candidate_roots[0].radicals, "ك ت ب");
}

#[test]
fn plural_marker_is_detached() {
    let dir = fixture();
    let analyzer = Analyzer::build(dir.path()).unwrap();

    let results = analyzer.analyze("المعلمون");
    let m = morphological(&results);

    assert_eq!(parts(m), (vec!["ال"], "معلم", vec!["ون"]));
    assert!(!m.accepted);
}

#[test]
fn pattern_roots_are_attached() {
    let dir = fixture();
    let analyzer = Analyzer::build(dir.path()).unwrap();

    let results = analyzer.analyze("الكاتب");
    let m = morphological(&results);

    assert_eq!(m.stem, "كاتب");
    let hit = &m.stem_analysis.pattern_roots[0];
    assert_eq!(hit.root, "ك ت ب");
    assert_eq!(hit.pattern_id, "1");
    assert!(hit.verified);
}

#[test]
fn toolwords_short_circuit() {
    let dir = fixture();
    let analyzer = Analyzer::build(dir.path()).unwrap();

    let results = analyzer.analyze("في");
    assert_eq!(results.len(), 1);
    assert!(results[0].is_toolword());

    let results = analyzer.analyze("مَنْ");
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(AnalysisResult::is_toolword));
    match &results[1] {
        AnalysisResult::Toolword(t) => assert_eq!(t.word_class, "اسم موصول"),
        other => panic!("unexpected: {:?}", other),
    }
}

#[test]
fn empty_input() {
    let dir = fixture();
    let analyzer = Analyzer::build(dir.path()).unwrap();

    assert!(analyzer.analyze("").is_empty());
    assert!(analyzer.analyze("   ").is_empty());
}

#[test]
fn selected_split_reconstructs_the_word() {
    let dir = fixture();
    let analyzer = Analyzer::build(dir.path()).unwrap();

    for word in ["والكتب", "فسيكتبونها", "بالقلم", "كاتبهم", "وَالْمُعَلِّمَاتُ"] {
        for result in analyzer.analyze(word) {
            if let AnalysisResult::Morphological(m) = result {
                let joined = m
                    .prefixes
                    .iter()
                    .chain(Some(&m.stem))
                    .chain(m.suffixes.iter())
                    .map(|s| s.as_str())
                    .collect::<String>();
                assert_eq!(joined, strip_diacritics(word));
            }
        }
    }
}

#[test]
fn analysis_is_deterministic() {
    let dir = fixture();
    let first = Analyzer::build(dir.path()).unwrap();
    let second = Analyzer::build(dir.path()).unwrap();

    for word in ["والكتب", "المعلمون", "في", "سيكتب"] {
        assert_eq!(first.analyze(word), first.analyze(word));
        assert_eq!(first.analyze(word), second.analyze(word));
    }
}

#[test]
fn shared_across_threads() {
    let dir = fixture();
    let analyzer = Analyzer::build(dir.path()).unwrap();
    let expected = analyzer.analyze("والكتب");

    let handles = (0..4)
        .map(|_| {
            let analyzer = analyzer.clone();
            std::thread::spawn(move || analyzer.analyze("والكتب"))
        })
        .collect::<Vec<_>>();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn zip_matches_directory() {
    let dir = fixture();
    let from_dir = Analyzer::build(dir.path()).unwrap();

    for folder in ["", "db/"] {
        let zipped = fixture_zip(folder);
        let from_zip = Analyzer::build(zipped.path().join("db.zip")).unwrap();

        let (a, b) = (from_dir.database(), from_zip.database());
        assert_eq!(a.prefixes(), b.prefixes());
        assert_eq!(a.suffixes(), b.suffixes());
        assert_eq!(a.toolwords(), b.toolwords());
        assert_eq!(a.patterns(), b.patterns());
        assert_eq!(a.roots(), b.roots());

        for word in ["الكتاب", "والكتب", "المعلمون", "في"] {
            assert_eq!(from_dir.analyze(word), from_zip.analyze(word));
        }
    }
}

#[test]
fn windows_1256_tables_load() {
    let dir = fixture();
    let xml = r#"<?xml version="1.0" encoding="windows-1256"?>
<roots>
  <root val="ع ل م" vect="2"/>
</roots>
"#;
    let (bytes, _, unmappable) = encoding_rs::WINDOWS_1256.encode(xml);
    assert!(!unmappable);
    write(dir.path(), "verbs/roots/legacy.xml", &bytes);

    let db = LexicalDatabase::open(dir.path()).unwrap();
    assert!(db.has_root("علم"));
    assert!(db.has_root("كتب"));
    assert_eq!(db.load_report().entries(TableKind::Roots), 2);
}

#[test]
fn broken_shard_is_reported() {
    let dir = fixture();
    write(dir.path(), "nouns/roots/2.xml", b"<roots><root val=\"\xD8\xB9 \xD9\x84\"></roots>");

    let db = LexicalDatabase::open(dir.path()).unwrap();
    let report = db.load_report();

    let failures = report.failures().collect::<Vec<_>>();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].table, TableKind::Roots);
    assert_eq!(failures[0].path, Path::new("nouns/roots").join("2.xml"));
    assert!(db.has_root("كتب"));

    let analyzer = Analyzer::new(Arc::new(db));
    let results = analyzer.analyze("الكتاب");
    assert_eq!(morphological(&results).stem, "كتاب");
}

#[test]
fn missing_shard_directories_are_skipped() {
    let dir = fixture();
    let db = LexicalDatabase::open(dir.path()).unwrap();

    let skipped = db
        .load_report()
        .tables
        .iter()
        .filter(|t| matches!(t.status, TableStatus::Skipped { .. }))
        .map(|t| t.path.clone())
        .collect::<Vec<_>>();

    assert!(skipped.contains(&Path::new("verbs/roots").to_path_buf()));
    assert!(skipped.contains(&Path::new("nouns/patterns/Voweled").to_path_buf()));
    assert!(db.load_report().is_clean());
}

#[test]
fn root_in_both_shards_is_reported_once() {
    let dir = fixture();
    write(dir.path(), "nouns/roots/2.xml", br#"<roots><root val="q r s" vect="1"/></roots>"#);
    write(dir.path(), "verbs/roots/1.xml", br#"<roots><root val="q r s" vect="2"/></roots>"#);

    let analyzer = Analyzer::build(dir.path()).unwrap();
    assert_eq!(analyzer.database().roots_for("qrs").count(), 2);

    let results = analyzer.analyze("qrs");
    assert_eq!(results.len(), 1, "{:?}", results);
    match &results[0] {
        AnalysisResult::RootDirect(r) => {
            assert_eq!(r.root, "q r s");
            assert_eq!(r.vector, "1");
        }
        other => panic!("expected a root lookup, got {:?}", other),
    }
}

#[test]
fn missing_prefix_table() {
    let dir = fixture();
    std::fs::remove_file(dir.path().join("prefixes.xml")).unwrap();

    match Analyzer::build(dir.path()) {
        Err(DatabaseLoadError::Missing { table, .. }) => assert_eq!(table, TableKind::Prefixes),
        other => panic!("unexpected: {:?}", other.map(|_| ())),
    }
}

#[test]
fn malformed_mandatory_table() {
    let dir = fixture();
    write(dir.path(), "suffixes.xml", b"<suffixes><suffixe unvoweledform=");

    assert!(matches!(
        LexicalDatabase::open(dir.path()),
        Err(DatabaseLoadError::Xml(..))
    ));
}

#[test]
fn toolwords_at_root_take_precedence() {
    let dir = fixture();
    write(
        dir.path(),
        "toolwords.xml",
        "<toolwords><toolword unvoweledform=\"إلى\" voweledform=\"إِلَى\" type=\"حرف جر\"/></toolwords>"
            .as_bytes(),
    );

    let db = LexicalDatabase::open(dir.path()).unwrap();
    assert_eq!(db.toolwords().len(), 1);
    assert_eq!(db.toolwords()[0].surface, "إلى");
}
