//! Character reference decoding.

use std::borrow::Cow;

use crate::render::is_xml_char;

/// Longest reference name scanned before giving up on a `&`.
const MAX_REFERENCE_LEN: usize = 32;

/// Decode named and numeric character references.
///
/// Recognizes `&amp;`, `&lt;`, `&gt;`, `&quot;`, `&apos;`, `&nbsp;` and
/// decimal/hex numeric references. Numeric references to characters XML
/// cannot carry (NUL, C0 controls, U+FFFE, U+FFFF, surrogates) become
/// U+FFFD. Anything else, including references without a terminating `;`,
/// is left as written.
pub fn decode_entities(s: &str) -> Cow<'_, str> {
    if !s.contains('&') {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];

        let decoded = after
            .char_indices()
            .take(MAX_REFERENCE_LEN)
            .find(|&(_, c)| c == ';')
            .and_then(|(end, _)| decode_reference(&after[..end]).map(|c| (c, end)));

        match decoded {
            Some((c, end)) => {
                out.push(c);
                rest = &after[end + 1..];
            }
            None => {
                out.push('&');
                rest = after;
            }
        }
    }
    out.push_str(rest);

    Cow::Owned(out)
}

fn decode_reference(name: &str) -> Option<char> {
    if let Some(numeric) = name.strip_prefix('#') {
        let code = match numeric.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => numeric.parse::<u32>().ok()?,
        };
        return match char::from_u32(code) {
            Some(c) if is_xml_char(c) => Some(c),
            _ => Some(char::REPLACEMENT_CHARACTER),
        };
    }

    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_entities() {
        assert_eq!(decode_entities("a &amp; b &lt;c&gt;"), "a & b <c>");
        assert_eq!(decode_entities("&quot;x&apos;"), "\"x'");
        assert_eq!(decode_entities("1&nbsp;2"), "1\u{a0}2");
    }

    #[test]
    fn test_numeric_entities() {
        assert_eq!(decode_entities("&#65;&#x42;&#X43;"), "ABC");
        assert_eq!(decode_entities("&#x4E2D;"), "中");
        assert_eq!(decode_entities("&#0;"), "\u{fffd}");
    }

    #[test]
    fn test_numeric_references_to_forbidden_characters() {
        assert_eq!(decode_entities("a&#1;b"), "a\u{fffd}b");
        assert_eq!(decode_entities("&#x0B;&#xFFFE;&#xFFFF;&#xD800;"), "\u{fffd}\u{fffd}\u{fffd}\u{fffd}");
        assert_eq!(decode_entities("&#9;&#10;&#13;"), "\t\n\r");
        assert_eq!(decode_entities("&#x110000;"), "\u{fffd}");
    }

    #[test]
    fn test_unknown_entities_kept() {
        assert_eq!(decode_entities("&copy; &amp"), "&copy; &amp");
        assert_eq!(decode_entities("AT&T"), "AT&T");
        assert_eq!(decode_entities("&&amp;"), "&&");
    }

    #[test]
    fn test_borrowed_without_ampersand() {
        assert!(matches!(decode_entities("plain"), Cow::Borrowed("plain")));
    }
}
