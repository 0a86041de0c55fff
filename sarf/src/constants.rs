pub const DEFINITE_ARTICLE: &str = "ال";

/// Stage 1 prefixes: coordinating conjunctions.
pub const CONJUNCTIONS: &[&str] = &["و", "ف"];

/// Stage 2 prefixes: inseparable particles.
pub const PARTICLES: &[&str] = &["ب", "ك", "ل", "س"];

/// Stage 1 suffixes: sound plural markers.
pub const PLURAL_MARKERS: &[&str] = &["ون", "ين", "ات"];

/// Stage 2 suffixes: attached pronouns, longest first.
pub const PRONOUNS: &[&str] = &["كما", "هما", "كم", "كن", "هم", "هن", "ها", "ه", "نا", "ي", "ك"];

/// Stem-initial letters that hint at an imperfect verb.
pub const IMPERFECT_MARKERS: &[char] = &['ي', 'ت', 'أ', 'ن'];

pub const WEAK_LETTERS: &[char] = &['ا', 'و', 'ي', 'ى'];

/// Template letters standing for root slots.
pub const ROOT_SLOTS: &[char] = &['ف', 'ع', 'ل'];

/// Plural suffixes every database carries, as (surface, voweled, class).
pub const GUARANTEED_SUFFIXES: &[(&str, &str, &str)] = &[
    ("ون", "ونَ", "C2"),
    ("ين", "ينَ", "C2"),
    ("ات", "اتٌ", "C2"),
];

pub const MIN_ROOT_LENGTH: usize = 3;
pub const MAX_ROOT_LENGTH: usize = 4;

/// Letters that may surround a root in a derived word (سألتمونيها and kin).
pub const AUGMENT_LETTERS: &[char] = &[
    'س', 'إ', 'آ', 'ء', 'ؤ', 'أ', 'ل', 'ت', 'م', 'و', 'ن', 'ي', 'ه', 'ا', 'ى',
];

pub const HAMZA_FORMS: &[char] = &['ء', 'أ', 'إ', 'آ', 'ؤ', 'ئ'];

/// What a و or ي radical may surface as.
pub const WEAK_RADICAL_FORMS: &[char] = &['و', 'ي', 'ا'];

pub const MIN_BRANCH_LENGTH: usize = 3;
pub const MAX_BRANCH_LENGTH: usize = 12;
