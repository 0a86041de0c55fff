//! Lexical table entries.
use serde::Serialize;
use smol_str::SmolStr;

use crate::tokenizer::strip_diacritics;

/// A prefix or suffix as listed in the affix tables.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AffixEntry {
    /// Unvoweled surface form, e.g. `ال`
    pub surface: SmolStr,
    /// Voweled form, e.g. `الْ`
    pub voweled: SmolStr,
    /// Short grammatical class code, e.g. `C2`, `N1`, `V3`
    pub class: SmolStr,
}

impl AffixEntry {
    pub fn new(
        surface: impl Into<SmolStr>,
        voweled: impl Into<SmolStr>,
        class: impl Into<SmolStr>,
    ) -> AffixEntry {
        AffixEntry {
            surface: surface.into(),
            voweled: voweled.into(),
            class: class.into(),
        }
    }
}

/// A derivational pattern (wazn).
///
/// The template uses ف, ع and ل as root slots; the stripped template is
/// computed once when the entry is built.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PatternEntry {
    pub id: SmolStr,
    /// Template as written in the database, with diacritics
    pub template: SmolStr,
    #[serde(skip)]
    stripped: SmolStr,
    /// Morphological type, e.g. `noun` or `verb`
    #[serde(rename = "type")]
    pub kind: SmolStr,
    pub augmentation: SmolStr,
    pub case: SmolStr,
    pub number_gender: SmolStr,
    pub transitivity: SmolStr,
}

impl PatternEntry {
    pub fn new(
        id: impl Into<SmolStr>,
        template: impl Into<SmolStr>,
        kind: impl Into<SmolStr>,
    ) -> PatternEntry {
        let template = template.into();
        let stripped = SmolStr::from(strip_diacritics(&template));

        PatternEntry {
            id: id.into(),
            template,
            stripped,
            kind: kind.into(),
            augmentation: SmolStr::default(),
            case: SmolStr::default(),
            number_gender: SmolStr::default(),
            transitivity: SmolStr::default(),
        }
    }

    pub fn with_features(
        mut self,
        augmentation: impl Into<SmolStr>,
        case: impl Into<SmolStr>,
        number_gender: impl Into<SmolStr>,
        transitivity: impl Into<SmolStr>,
    ) -> PatternEntry {
        self.augmentation = augmentation.into();
        self.case = case.into();
        self.number_gender = number_gender.into();
        self.transitivity = transitivity.into();
        self
    }

    /// The template without diacritics.
    pub fn stripped(&self) -> &str {
        &self.stripped
    }
}

/// A root of the lexicon.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RootEntry {
    /// Radicals as written in the database, possibly space separated (`ك ت ب`)
    pub radicals: SmolStr,
    /// Auxiliary vector form, opaque to the analyzer
    pub vector: SmolStr,
    #[serde(skip)]
    compact: SmolStr,
}

impl RootEntry {
    pub fn new(radicals: impl Into<SmolStr>, vector: impl Into<SmolStr>) -> RootEntry {
        let radicals = radicals.into();
        let compact = radicals
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<SmolStr>();

        RootEntry {
            radicals,
            vector: vector.into(),
            compact,
        }
    }

    /// The radicals with all whitespace removed.
    pub fn compact(&self) -> &str {
        &self.compact
    }

    pub fn len(&self) -> usize {
        self.compact.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.compact.is_empty()
    }
}

/// A closed-class word, matched exactly.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ToolWordEntry {
    pub surface: SmolStr,
    pub voweled: SmolStr,
    /// Word class, e.g. `حرف جر`
    #[serde(rename = "type")]
    pub kind: SmolStr,
    pub prefix_class: SmolStr,
    pub suffix_class: SmolStr,
}

impl ToolWordEntry {
    pub fn new(
        surface: impl Into<SmolStr>,
        voweled: impl Into<SmolStr>,
        kind: impl Into<SmolStr>,
    ) -> ToolWordEntry {
        ToolWordEntry {
            surface: surface.into(),
            voweled: voweled.into(),
            kind: kind.into(),
            prefix_class: SmolStr::default(),
            suffix_class: SmolStr::default(),
        }
    }

    pub fn with_classes(
        mut self,
        prefix_class: impl Into<SmolStr>,
        suffix_class: impl Into<SmolStr>,
    ) -> ToolWordEntry {
        self.prefix_class = prefix_class.into();
        self.suffix_class = suffix_class.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_compact_ignores_spacing() {
        let root = RootEntry::new("ك ت ب", "");
        assert_eq!(root.compact(), "كتب");
        assert_eq!(root.len(), 3);
        assert_eq!(RootEntry::new("كتب", "").compact(), "كتب");
    }

    #[test]
    fn pattern_template_is_stripped() {
        let pattern = PatternEntry::new("1", "فَاعِل", "noun");
        assert_eq!(pattern.stripped(), "فاعل");
        assert_eq!(pattern.template, "فَاعِل");
    }
}
