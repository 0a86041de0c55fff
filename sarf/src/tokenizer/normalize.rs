/// Harakat, tanween, shadda, sukun, maddah/hamza marks and the superscript alef.
#[inline(always)]
pub fn is_diacritic(ch: char) -> bool {
    matches!(ch, '\u{064B}'..='\u{0655}' | '\u{0670}')
}

/// Anything in the Arabic block, letters and signs alike.
#[inline(always)]
pub fn is_arabic(ch: char) -> bool {
    matches!(ch, '\u{0600}'..='\u{06FF}')
}

/// Base Arabic letters, hamza through yaa.
#[inline(always)]
pub fn is_arabic_letter(ch: char) -> bool {
    matches!(ch, '\u{0621}'..='\u{064A}')
}

pub fn strip_diacritics(text: &str) -> String {
    text.chars().filter(|&ch| !is_diacritic(ch)).collect()
}
