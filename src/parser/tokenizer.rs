//! HTML tokenizer.
//!
//! Splits markup into start tags, end tags and text. Comments, doctype
//! declarations and processing instructions are skipped; the content of
//! raw-text elements (`script`, `style`, ...) is skipped together with the
//! element itself.

use super::entities::decode_entities;
use crate::error::{Error, Result};
use log::warn;

/// Elements whose content is never markup and never rendered.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "title", "template", "textarea"];

/// A tag attribute with its decoded value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Lowercased attribute name
    pub name: String,
    /// Decoded value (empty for bare attributes)
    pub value: String,
}

/// Kind of token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// `<name attr=value>` or `<name/>`
    StartTag {
        /// Lowercased tag name
        name: String,
        /// Attributes in source order
        attributes: Vec<Attribute>,
        /// Written as `<name/>`
        self_closing: bool,
    },
    /// `</name>`
    EndTag {
        /// Lowercased tag name
        name: String,
    },
    /// Character data with references decoded
    Text(String),
}

/// A token with the byte offset where it starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Token kind
    pub kind: TokenKind,
    /// Byte offset in the input
    pub offset: usize,
}

impl Token {
    /// Value of the named attribute, if present.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        match &self.kind {
            TokenKind::StartTag { attributes, .. } => attributes
                .iter()
                .find(|a| a.name == name)
                .map(|a| a.value.as_str()),
            _ => None,
        }
    }
}

/// Streaming tokenizer over an HTML string.
///
/// In strict mode an unterminated tag, comment or raw-text element yields
/// an error and ends the stream; otherwise the broken construct is dropped.
pub struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
    strict: bool,
}

impl<'a> Tokenizer<'a> {
    /// Create a tokenizer.
    pub fn new(input: &'a str, strict: bool) -> Self {
        Self {
            input,
            pos: 0,
            strict,
        }
    }

    /// Tokenize the whole input.
    pub fn tokenize(input: &'a str, strict: bool) -> Result<Vec<Token>> {
        Self::new(input, strict).collect()
    }

    fn bytes(&self) -> &'a [u8] {
        self.input.as_bytes()
    }

    fn unterminated(&mut self, offset: usize, what: &str) -> Option<Result<Token>> {
        self.pos = self.input.len();
        if self.strict {
            Some(Err(Error::malformed(offset, format!("unterminated {}", what))))
        } else {
            warn!("dropping unterminated {} at byte {}", what, offset);
            None
        }
    }

    /// Skip to just past `terminator`, searching from `from`.
    fn skip_past(&mut self, from: usize, terminator: &str) -> bool {
        match self.input[from..].find(terminator) {
            Some(idx) => {
                self.pos = from + idx + terminator.len();
                true
            }
            None => false,
        }
    }

    fn read_text(&mut self) -> Token {
        let start = self.pos;
        let first_len = self.input[start..].chars().next().map_or(1, char::len_utf8);
        let mut end = start + first_len;
        while end < self.input.len() {
            match self.input[end..].find('<') {
                Some(i) if self.opens_markup(end + i) => {
                    end += i;
                    break;
                }
                // a '<' that does not open markup is literal text
                Some(i) => end += i + 1,
                None => end = self.input.len(),
            }
        }
        let end = end.min(self.input.len());
        self.pos = end;
        Token {
            kind: TokenKind::Text(decode_entities(&self.input[start..end]).into_owned()),
            offset: start,
        }
    }

    fn opens_markup(&self, i: usize) -> bool {
        let bytes = self.bytes();
        match bytes.get(i + 1) {
            Some(b'!' | b'?') => true,
            Some(b'/') => bytes.get(i + 2).is_some_and(u8::is_ascii_alphabetic),
            Some(b) => b.is_ascii_alphabetic(),
            None => false,
        }
    }

    fn read_name(&self, mut i: usize) -> (String, usize) {
        let bytes = self.bytes();
        let start = i;
        while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'-' || bytes[i] == b':') {
            i += 1;
        }
        (self.input[start..i].to_ascii_lowercase(), i)
    }

    fn skip_whitespace(&self, mut i: usize) -> usize {
        let bytes = self.bytes();
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        i
    }

    /// Parse a start tag at `self.pos`. `None` means the tag is unterminated.
    fn read_start_tag(&mut self) -> Option<Token> {
        let bytes = self.bytes();
        let offset = self.pos;
        let (name, mut i) = self.read_name(offset + 1);
        let mut attributes = Vec::new();

        let self_closing = loop {
            i = self.skip_whitespace(i);
            match bytes.get(i)? {
                b'>' => {
                    i += 1;
                    break false;
                }
                b'/' if bytes.get(i + 1) == Some(&b'>') => {
                    i += 2;
                    break true;
                }
                b'/' => {
                    i += 1;
                    continue;
                }
                _ => {}
            }

            let name_start = i;
            while i < bytes.len() && !matches!(bytes[i], b'=' | b'>' | b'/') && !bytes[i].is_ascii_whitespace() {
                i += 1;
            }
            if i == name_start {
                // lone '=' without a name
                i += 1;
                continue;
            }
            let attr_name = self.input[name_start..i].to_ascii_lowercase();

            let mut value = String::new();
            let after_name = self.skip_whitespace(i);
            if bytes.get(after_name) == Some(&b'=') {
                i = self.skip_whitespace(after_name + 1);
                match bytes.get(i)? {
                    quote @ (b'"' | b'\'') => {
                        let close = self.input[i + 1..].find(*quote as char)?;
                        value = decode_entities(&self.input[i + 1..i + 1 + close]).into_owned();
                        i += close + 2;
                    }
                    _ => {
                        let value_start = i;
                        while i < bytes.len() && bytes[i] != b'>' && !bytes[i].is_ascii_whitespace() {
                            i += 1;
                        }
                        value = decode_entities(&self.input[value_start..i]).into_owned();
                    }
                }
            }

            attributes.push(Attribute {
                name: attr_name,
                value,
            });
        };

        self.pos = i;
        Some(Token {
            kind: TokenKind::StartTag {
                name,
                attributes,
                self_closing,
            },
            offset,
        })
    }

    /// Skip the content and end tag of a raw-text element.
    fn skip_raw_text(&mut self, name: &str, offset: usize) -> Option<Result<Token>> {
        let closing = format!("</{}", name);
        let found = self.input[self.pos..].to_ascii_lowercase().find(&closing);
        match found {
            Some(idx) => {
                let close_start = self.pos + idx;
                if !self.skip_past(close_start, ">") {
                    return self.unterminated(close_start, &format!("</{}> tag", name));
                }
                None
            }
            None => self.unterminated(offset, &format!("<{}> element", name)),
        }
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.pos >= self.input.len() {
                return None;
            }
            let start = self.pos;
            let input = self.input;
            let rest = &input[start..];

            if !rest.starts_with('<') {
                return Some(Ok(self.read_text()));
            }

            if rest.starts_with("<!--") {
                if !self.skip_past(start + 4, "-->") {
                    return self.unterminated(start, "comment");
                }
                continue;
            }

            if rest.starts_with("<!") || rest.starts_with("<?") {
                if !self.skip_past(start, ">") {
                    return self.unterminated(start, "declaration");
                }
                continue;
            }

            let next_byte = rest.as_bytes().get(1).copied();
            let closing = next_byte == Some(b'/');
            let name_byte = if closing {
                rest.as_bytes().get(2).copied()
            } else {
                next_byte
            };
            if !name_byte.is_some_and(|b| b.is_ascii_alphabetic()) {
                return Some(Ok(self.read_text()));
            }

            if closing {
                let (name, after) = self.read_name(start + 2);
                if !self.skip_past(after, ">") {
                    return self.unterminated(start, &format!("</{}> tag", name));
                }
                return Some(Ok(Token {
                    kind: TokenKind::EndTag { name },
                    offset: start,
                }));
            }

            let Some(token) = self.read_start_tag() else {
                let (name, _) = self.read_name(start + 1);
                return self.unterminated(start, &format!("<{}> tag", name));
            };

            if let TokenKind::StartTag {
                name,
                self_closing: false,
                ..
            } = &token.kind
            {
                if RAW_TEXT_ELEMENTS.contains(&name.as_str()) {
                    let name = name.clone();
                    if let Some(err) = self.skip_raw_text(&name, start) {
                        return Some(err);
                    }
                    continue;
                }
            }

            return Some(Ok(token));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(html: &str) -> Vec<TokenKind> {
        Tokenizer::tokenize(html, true)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    fn start(name: &str) -> TokenKind {
        TokenKind::StartTag {
            name: name.to_string(),
            attributes: Vec::new(),
            self_closing: false,
        }
    }

    fn end(name: &str) -> TokenKind {
        TokenKind::EndTag {
            name: name.to_string(),
        }
    }

    #[test]
    fn test_basic_tokens() {
        assert_eq!(
            kinds("<P>a &amp; b</P>"),
            vec![start("p"), TokenKind::Text("a & b".to_string()), end("p")]
        );
    }

    #[test]
    fn test_attributes() {
        let tokens = Tokenizer::tokenize(
            r#"<span style="color: red; font-weight:bold" data-x=1 hidden class='a b'>"#,
            true,
        )
        .unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].attribute("style"), Some("color: red; font-weight:bold"));
        assert_eq!(tokens[0].attribute("data-x"), Some("1"));
        assert_eq!(tokens[0].attribute("hidden"), Some(""));
        assert_eq!(tokens[0].attribute("class"), Some("a b"));
        assert_eq!(tokens[0].attribute("id"), None);
    }

    #[test]
    fn test_quoted_gt_in_attribute() {
        let tokens = Tokenizer::tokenize(r#"<p title="a > b">x</p>"#, true).unwrap();
        assert_eq!(tokens[0].attribute("title"), Some("a > b"));
        assert_eq!(tokens[1].kind, TokenKind::Text("x".to_string()));
    }

    #[test]
    fn test_self_closing() {
        assert_eq!(
            kinds("a<br/>b"),
            vec![
                TokenKind::Text("a".to_string()),
                TokenKind::StartTag {
                    name: "br".to_string(),
                    attributes: Vec::new(),
                    self_closing: true,
                },
                TokenKind::Text("b".to_string()),
            ]
        );
    }

    #[test]
    fn test_comments_and_doctype_skipped() {
        assert_eq!(
            kinds("<!DOCTYPE html><!-- <p>hidden</p> --><?xml version=\"1.0\"?><p>x</p>"),
            vec![start("p"), TokenKind::Text("x".to_string()), end("p")]
        );
    }

    #[test]
    fn test_raw_text_skipped() {
        assert_eq!(
            kinds("<style>p { color: red }</style><script>if (a < b) {}</SCRIPT><p>x</p>"),
            vec![start("p"), TokenKind::Text("x".to_string()), end("p")]
        );
    }

    #[test]
    fn test_literal_less_than() {
        assert_eq!(
            kinds("<p>1 < 2</p>"),
            vec![start("p"), TokenKind::Text("1 < 2".to_string()), end("p")]
        );
    }

    #[test]
    fn test_offsets() {
        let tokens = Tokenizer::tokenize("ab<div>", true).unwrap();
        assert_eq!(tokens[0].offset, 0);
        assert_eq!(tokens[1].offset, 2);
    }

    #[test]
    fn test_unterminated_tag_strict() {
        let err = Tokenizer::tokenize("<p>text<div", true).unwrap_err();
        match err {
            Error::MalformedMarkup { offset, message } => {
                assert_eq!(offset, 7);
                assert!(message.contains("<div>"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unterminated_tag_lenient() {
        assert_eq!(
            Tokenizer::tokenize("<p>text<div class=\"x", false)
                .unwrap()
                .into_iter()
                .map(|t| t.kind)
                .collect::<Vec<_>>(),
            vec![start("p"), TokenKind::Text("text".to_string())]
        );
    }

    #[test]
    fn test_unterminated_comment() {
        assert!(Tokenizer::tokenize("<p>x</p><!-- open", true).is_err());
        assert_eq!(Tokenizer::tokenize("<p>x</p><!-- open", false).unwrap().len(), 3);
    }
}
