use unic_segment::WordBoundIndices;
use unic_ucd_category::GeneralCategory;

mod normalize;
pub mod weak;

pub use self::normalize::{is_arabic, is_arabic_letter, is_diacritic, strip_diacritics};

/// Word-bound tokens of a text that contain at least one letter.
pub struct WordIndices<'a> {
    inner: WordBoundIndices<'a>,
}

impl<'a> Iterator for WordIndices<'a> {
    type Item = (usize, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.find(has_letter)
    }
}

pub trait Tokenize {
    fn word_bound_indices(&self) -> WordBoundIndices;
    fn word_indices(&self) -> WordIndices;
}

fn has_letter(token: &(usize, &str)) -> bool {
    token.1.chars().any(|ch| GeneralCategory::of(ch).is_letter())
}

impl Tokenize for str {
    fn word_bound_indices(&self) -> WordBoundIndices {
        WordBoundIndices::new(self)
    }

    fn word_indices(&self) -> WordIndices {
        WordIndices {
            inner: self.word_bound_indices(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_bounds_cover_the_text() {
        let msg = "قال: والكتابُ، في البيتِ (٢٠٢٤) and a tab\there.";
        let tokens = msg.word_bound_indices().collect::<Vec<_>>();

        assert_eq!(tokens.iter().map(|(_, t)| *t).collect::<String>(), msg);
        assert!(tokens.iter().all(|(i, t)| &msg[*i..*i + t.len()] == *t));
        assert!(tokens.contains(&(0, "قال")));
        assert!(tokens.iter().any(|(_, t)| *t == "والكتابُ"));
    }

    #[test]
    fn word_indices_keep_diacritics_and_offsets() {
        let msg = "ذهبَ الطالبُ، إلى المدرسةِ.";

        assert_eq!(
            msg.word_indices().collect::<Vec<(usize, &str)>>(),
            vec![
                (0, "ذهبَ"),
                (9, "الطالبُ"),
                (26, "إلى"),
                (33, "المدرسةِ"),
            ]
        );
    }

    #[test]
    fn word_indices_skip_digits_and_punctuation() {
        let msg = "١٢٣ ، !";
        assert_eq!(msg.word_indices().count(), 0);
    }
}
