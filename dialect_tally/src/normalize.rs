use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Trims the text and applies the canonical composition (NFC).
///
/// Case and accents are preserved. This is the form used for region names.
pub fn normalize(text: &str) -> String {
    text.trim().nfc().collect()
}

/// The key used to look up an answer in the variant table.
///
/// trim -> NFC -> lowercase -> NFD -> drop the combining marks.
pub fn normalize_for_lookup(text: &str) -> String {
    let lower = normalize(text).to_lowercase();
    lower.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_is_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
        assert_eq!(normalize_for_lookup(""), "");
    }

    #[test]
    fn region_keeps_case_and_accents() {
        assert_eq!(normalize("  Český Krumlov \t"), "Český Krumlov");
        // Decomposed 'C' + caron composes into a single code point.
        assert_eq!(normalize("C\u{30C}esky\u{301}"), "Český");
    }

    #[test]
    fn lookup_strips_accents_and_case() {
        assert_eq!(normalize_for_lookup("DÝL"), "dyl");
        assert_eq!(normalize_for_lookup(" Později "), "pozdeji");
        assert_eq!(normalize_for_lookup("pozde\u{30C}ji"), "pozdeji");
        assert_eq!(normalize_for_lookup("xyz"), "xyz");
    }
}
