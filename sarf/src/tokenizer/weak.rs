//! Alternate spellings of a stem for roots with weak, hamzated or doubled radicals.
use itertools::Itertools;
use smol_str::SmolStr;

use crate::constants::WEAK_LETTERS;

#[inline(always)]
fn hamza_seat(ch: char) -> Option<Option<char>> {
    match ch {
        'أ' | 'إ' | 'آ' => Some(Some('ا')),
        'ؤ' => Some(Some('و')),
        'ئ' => Some(Some('ي')),
        'ء' => Some(None),
        _ => None,
    }
}

#[inline(always)]
fn is_weak(ch: char) -> bool {
    WEAK_LETTERS.contains(&ch)
}

fn collapse_hamza(chars: &[char]) -> SmolStr {
    chars
        .iter()
        .filter_map(|&ch| match hamza_seat(ch) {
            Some(seat) => seat,
            None => Some(ch),
        })
        .collect()
}

fn substitute(stem: &str, from: char, to: Option<char>) -> SmolStr {
    stem.chars()
        .filter_map(|ch| if ch == from { to } else { Some(ch) })
        .collect()
}

fn without(chars: &[char], index: usize) -> SmolStr {
    chars
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(_, ch)| *ch)
        .collect()
}

/// All alternate spellings of `stem`, the stem itself first, without duplicates.
pub fn weak_variants(stem: &str) -> Vec<SmolStr> {
    let chars = stem.chars().collect::<Vec<_>>();
    let mut forms = vec![SmolStr::new(stem)];

    if chars.iter().any(|&ch| hamza_seat(ch).is_some()) {
        forms.push(collapse_hamza(&chars));
    }

    if chars.contains(&'ى') {
        forms.push(substitute(stem, 'ى', Some('ي')));
    }

    if chars.contains(&'ة') {
        forms.push(substitute(stem, 'ة', Some('ه')));
        forms.push(substitute(stem, 'ة', None));
    }

    // Alef standing in for a waw or yaa radical
    if chars.contains(&'ا') {
        forms.push(substitute(stem, 'ا', Some('و')));
        forms.push(substitute(stem, 'ا', Some('ي')));
    }

    if let Some(&last) = chars.last() {
        if is_weak(last) {
            forms.push(without(&chars, chars.len() - 1));
        }
    }

    for (i, &ch) in chars.iter().enumerate() {
        if is_weak(ch) && i > 0 && i + 1 < chars.len() {
            forms.push(without(&chars, i));
        }
    }

    // Gemination
    for i in 1..chars.len() {
        if chars[i] == chars[i - 1] {
            forms.push(without(&chars, i));
        }
    }

    forms.into_iter().unique().collect()
}
