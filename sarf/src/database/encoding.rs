//! Byte decoding for table files of unknown encoding.
use encoding_rs::{Encoding, ISO_8859_6, UTF_8, WINDOWS_1256};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

fn candidates() -> [&'static Encoding; 3] {
    [UTF_8, WINDOWS_1256, ISO_8859_6]
}

/// Decodes `bytes` with the first encoding that accepts them without
/// replacement characters.
///
/// windows-1256 assigns every byte value, so anything that isn't UTF-8
/// decodes there. ISO-8859-6 stays last to keep the legacy lookup order, and
/// `None` only comes back if that order changes.
pub fn decode(bytes: &[u8]) -> Option<(String, &'static Encoding)> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    candidates().iter().find_map(|&encoding| {
        encoding
            .decode_without_bom_handling_and_without_replacement(bytes)
            .map(|text| (text.into_owned(), encoding))
    })
}

/// Drops a leading `<?xml ...?>` declaration. The text is already decoded,
/// so whatever encoding it names no longer applies.
pub fn strip_declaration(text: &str) -> &str {
    let trimmed = text.trim_start();
    if trimmed.starts_with("<?xml") {
        if let Some(end) = trimmed.find("?>") {
            return &trimmed[end + 2..];
        }
    }
    trimmed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_with_bom() {
        let mut bytes = UTF8_BOM.to_vec();
        bytes.extend_from_slice("كتب".as_bytes());

        let (text, encoding) = decode(&bytes).unwrap();
        assert_eq!(text, "كتب");
        assert_eq!(encoding, UTF_8);
    }

    #[test]
    fn windows_1256_fallback() {
        let (bytes, _, _) = WINDOWS_1256.encode("كتب");
        let (text, encoding) = decode(&bytes).unwrap();
        assert_eq!(text, "كتب");
        assert_eq!(encoding, WINDOWS_1256);
    }

    #[test]
    fn every_byte_decodes_as_windows_1256() {
        let bytes = (0x80..=0xFFu8).collect::<Vec<_>>();
        let (text, encoding) = decode(&bytes).unwrap();

        assert_eq!(encoding, WINDOWS_1256);
        assert_eq!(text.chars().count(), bytes.len());
    }

    #[test]
    fn declaration_is_removed() {
        let text = "\n<?xml version=\"1.0\" encoding=\"windows-1256\"?>\n<roots/>";
        assert_eq!(strip_declaration(text).trim(), "<roots/>");
        assert_eq!(strip_declaration("<roots/>"), "<roots/>");
    }
}
