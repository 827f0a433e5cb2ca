//! HTML entity decoding for provider text.
//!
//! The provider escapes question and answer strings as HTML, using the whole
//! named set as well as decimal and hex references. Decoding is one level
//! deep and anything that is not a known reference is kept as-is.

/// Decode every named, decimal (`&#039;`) and hex (`&#x27;`) reference.
#[must_use]
pub fn decode_html_entities(input: &str) -> String {
    html_escape::decode_html_entities(input).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_common_provider_escapes() {
        assert_eq!(
            decode_html_entities("What does &quot;RAM&quot; stand for?"),
            "What does \"RAM\" stand for?"
        );
        assert_eq!(decode_html_entities("Don&#039;t Panic"), "Don't Panic");
        assert_eq!(decode_html_entities("Tom &amp; Jerry"), "Tom & Jerry");
        assert_eq!(decode_html_entities("Pok&eacute;mon"), "Pokémon");
        assert_eq!(decode_html_entities("&ldquo;Hi&rdquo;"), "\u{201c}Hi\u{201d}");
    }

    #[test]
    fn decodes_hex_references() {
        assert_eq!(decode_html_entities("it&#x27;s"), "it's");
        assert_eq!(decode_html_entities("&#X41;"), "A");
    }

    #[test]
    fn decodes_less_common_named_entities() {
        let cases = [
            ("Caf&eacute;&lrm;", "Caf\u{e9}\u{200e}"),
            ("&rlm;x", "\u{200f}x"),
            ("a&zwnj;b&zwj;c", "a\u{200c}b\u{200d}c"),
            ("&Ocirc;le", "\u{d4}le"),
            ("1&ordm; lugar", "1\u{ba} lugar"),
            ("&epsilon;", "\u{3b5}"),
            ("&Igrave;", "\u{cc}"),
            ("&eth;", "\u{f0}"),
            ("&acute;", "\u{b4}"),
        ];
        for (raw, expected) in cases {
            let decoded = decode_html_entities(raw);
            assert_eq!(decoded, expected, "decoding {raw}");
            assert!(!decoded.contains('&'), "residual entity in {decoded:?}");
        }
    }

    #[test]
    fn leaves_non_entities_alone() {
        assert_eq!(decode_html_entities("AT&T"), "AT&T");
        assert_eq!(decode_html_entities("a & b; c"), "a & b; c");
        assert_eq!(decode_html_entities("&bogus;"), "&bogus;");
        assert_eq!(decode_html_entities("trailing &"), "trailing &");
    }

    #[test]
    fn decodes_only_one_level() {
        assert_eq!(decode_html_entities("&amp;quot;"), "&quot;");
    }

    #[test]
    fn plain_text_is_unchanged() {
        assert_eq!(decode_html_entities("Plain text"), "Plain text");
    }
}
