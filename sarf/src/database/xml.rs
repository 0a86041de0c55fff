//! Table file records as they appear on disk.
//!
//! Only the direct children of a table's root element are read; attribute
//! values are trimmed and missing attributes read as empty.
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_xml_rs::Error;

use crate::types::{AffixEntry, PatternEntry, RootEntry, ToolWordEntry};

#[derive(Deserialize, Debug, Default)]
struct AffixRecord {
    #[serde(default)]
    unvoweledform: String,
    #[serde(default)]
    voweledform: String,
    #[serde(default)]
    classe: String,
}

impl AffixRecord {
    fn into_entry(self) -> Option<AffixEntry> {
        let surface = self.unvoweledform.trim();
        let class = self.classe.trim();

        if surface.is_empty() && class.is_empty() {
            return None;
        }

        Some(AffixEntry::new(surface, self.voweledform.trim(), class))
    }
}

#[derive(Deserialize, Debug, Default)]
struct PrefixTable {
    #[serde(rename = "prefixe", default)]
    entries: Vec<AffixRecord>,
}

#[derive(Deserialize, Debug, Default)]
struct SuffixTable {
    #[serde(rename = "suffixe", default)]
    entries: Vec<AffixRecord>,
}

#[derive(Deserialize, Debug, Default)]
struct PatternRecord {
    #[serde(default)]
    id: String,
    #[serde(default)]
    diac: String,
    #[serde(rename = "type", default)]
    type_: String,
    #[serde(default)]
    aug: String,
    #[serde(default)]
    cas: String,
    #[serde(default)]
    ncg: String,
    #[serde(default)]
    trans: String,
}

#[derive(Deserialize, Debug, Default)]
struct PatternTable {
    #[serde(rename = "pattern", default)]
    entries: Vec<PatternRecord>,
}

#[derive(Deserialize, Debug, Default)]
struct RootRecord {
    #[serde(default)]
    val: String,
    #[serde(default)]
    vect: String,
}

#[derive(Deserialize, Debug, Default)]
struct RootTable {
    #[serde(rename = "root", default)]
    entries: Vec<RootRecord>,
}

#[derive(Deserialize, Debug, Default)]
struct ToolWordRecord {
    #[serde(default)]
    unvoweledform: String,
    #[serde(default)]
    voweledform: String,
    #[serde(rename = "type", default)]
    type_: String,
    #[serde(default)]
    prefixeclass: String,
    #[serde(default)]
    suffixeclass: String,
}

#[derive(Deserialize, Debug, Default)]
struct ToolWordTable {
    #[serde(rename = "toolword", default)]
    entries: Vec<ToolWordRecord>,
}

fn from_str<T: DeserializeOwned>(text: &str) -> Result<T, Error> {
    serde_xml_rs::from_str(text)
}

pub fn parse_prefixes(text: &str) -> Result<Vec<AffixEntry>, Error> {
    let table: PrefixTable = from_str(text)?;
    Ok(table
        .entries
        .into_iter()
        .filter_map(AffixRecord::into_entry)
        .collect())
}

pub fn parse_suffixes(text: &str) -> Result<Vec<AffixEntry>, Error> {
    let table: SuffixTable = from_str(text)?;
    Ok(table
        .entries
        .into_iter()
        .filter_map(AffixRecord::into_entry)
        .collect())
}

pub fn parse_patterns(text: &str) -> Result<Vec<PatternEntry>, Error> {
    let table: PatternTable = from_str(text)?;
    Ok(table
        .entries
        .into_iter()
        .map(|r| {
            PatternEntry::new(r.id.trim(), r.diac.trim(), r.type_.trim()).with_features(
                r.aug.trim(),
                r.cas.trim(),
                r.ncg.trim(),
                r.trans.trim(),
            )
        })
        .collect())
}

pub fn parse_roots(text: &str) -> Result<Vec<RootEntry>, Error> {
    let table: RootTable = from_str(text)?;
    Ok(table
        .entries
        .into_iter()
        .map(|r| RootEntry::new(r.val.trim(), r.vect.trim()))
        .collect())
}

pub fn parse_toolwords(text: &str) -> Result<Vec<ToolWordEntry>, Error> {
    let table: ToolWordTable = from_str(text)?;
    Ok(table
        .entries
        .into_iter()
        .map(|r| {
            ToolWordEntry::new(r.unvoweledform.trim(), r.voweledform.trim(), r.type_.trim())
                .with_classes(r.prefixeclass.trim(), r.suffixeclass.trim())
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes() {
        let xml = r#"<prefixes>
            <prefixe unvoweledform=" و " voweledform="وَ" classe="C1"/>
            <prefixe unvoweledform="" voweledform="" classe=""/>
            <prefixe unvoweledform="ال" voweledform="الْ" classe="N1"/>
        </prefixes>"#;

        let entries = parse_prefixes(xml).unwrap();
        assert_eq!(
            entries,
            vec![
                AffixEntry::new("و", "وَ", "C1"),
                AffixEntry::new("ال", "الْ", "N1"),
            ]
        );
    }

    #[test]
    fn empty_table() {
        assert!(parse_suffixes("<suffixes></suffixes>").unwrap().is_empty());
    }

    #[test]
    fn patterns_with_missing_attributes() {
        let xml = r#"<patterns><pattern id="7" diac="فَاعِل" type="noun"/></patterns>"#;
        let entries = parse_patterns(xml).unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, "7");
        assert_eq!(entries[0].stripped(), "فاعل");
        assert_eq!(entries[0].kind, "noun");
        assert_eq!(entries[0].case, "");
    }

    #[test]
    fn roots_and_toolwords() {
        let roots = parse_roots(r#"<roots><root val="ك ت ب" vect="1"/></roots>"#).unwrap();
        assert_eq!(roots[0].compact(), "كتب");

        let toolwords = parse_toolwords(
            r#"<toolwords><toolword unvoweledform="في" voweledform="فِي" type="حرف جر" prefixeclass="C1" suffixeclass="C3"/></toolwords>"#,
        )
        .unwrap();
        assert_eq!(toolwords[0].surface, "في");
        assert_eq!(toolwords[0].prefix_class, "C1");
        assert_eq!(toolwords[0].suffix_class, "C3");
    }

    #[test]
    fn broken_xml_is_an_error() {
        assert!(parse_roots("<roots><root val=\"كتب\"></roots>").is_err());
    }
}
