//! Parser for stringified lists of strings.
//!
//! Dataset cells hold list literals such as `["egg", "flour"]` or
//! `['Preheat oven.', 'Mix.']`. JSON arrays are decoded with `serde_json`;
//! anything JSON rejects goes through a scanner for Python list literals.
//! Anything else (numbers, nested lists, expressions, trailing garbage) is
//! rejected with a [`ListParseError`]; the input is never evaluated.
//!
//! Python escapes that name characters a Rust `String` cannot hold (lone
//! surrogates such as `\ud83e`) and `\N{...}` name escapes are rejected.

use std::iter::Peekable;
use std::str::CharIndices;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ListParseError {
    #[error("expected '[' at offset {0}")]
    ExpectedOpenBracket(usize),

    #[error("expected a quoted string at offset {0}")]
    ExpectedString(usize),

    #[error("expected ',' or ']' at offset {0}")]
    ExpectedSeparator(usize),

    #[error("unterminated string starting at offset {0}")]
    UnterminatedString(usize),

    #[error("invalid escape sequence at offset {0}")]
    InvalidEscape(usize),

    #[error("unexpected trailing input at offset {0}")]
    TrailingInput(usize),

    #[error("unexpected end of input")]
    UnexpectedEnd,
}

/// Parse a list literal of strings into its elements, preserving order
pub fn parse_string_list(input: &str) -> Result<Vec<String>, ListParseError> {
    if let Ok(items) = serde_json::from_str::<Vec<String>>(input) {
        return Ok(items);
    }

    let mut parser = PythonList {
        chars: input.char_indices().peekable(),
        len: input.len(),
    };

    let items = parser.list()?;

    parser.skip_whitespace();
    if let Some(&(offset, _)) = parser.chars.peek() {
        return Err(ListParseError::TrailingInput(offset));
    }

    Ok(items)
}

/// Scanner for Python list-of-string literals
struct PythonList<'a> {
    chars: Peekable<CharIndices<'a>>,
    len: usize,
}

impl PythonList<'_> {
    fn offset(&mut self) -> usize {
        self.chars.peek().map(|&(i, _)| i).unwrap_or(self.len)
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.chars.peek(), Some(&(_, c)) if c.is_whitespace()) {
            self.chars.next();
        }
    }

    fn list(&mut self) -> Result<Vec<String>, ListParseError> {
        self.skip_whitespace();
        match self.chars.next() {
            Some((_, '[')) => {}
            Some((offset, _)) => return Err(ListParseError::ExpectedOpenBracket(offset)),
            None => return Err(ListParseError::UnexpectedEnd),
        }

        let mut items = Vec::new();
        loop {
            self.skip_whitespace();
            // Empty list, or a trailing comma before the closing bracket
            if matches!(self.chars.peek(), Some(&(_, ']'))) {
                self.chars.next();
                return Ok(items);
            }

            items.push(self.string()?);

            self.skip_whitespace();
            match self.chars.next() {
                Some((_, ',')) => {}
                Some((_, ']')) => return Ok(items),
                Some((offset, _)) => return Err(ListParseError::ExpectedSeparator(offset)),
                None => return Err(ListParseError::UnexpectedEnd),
            }
        }
    }

    fn string(&mut self) -> Result<String, ListParseError> {
        let start = self.offset();

        // u'' is an ordinary string; r'' keeps backslashes as written
        let mut raw = false;
        if let Some(&(_, prefix)) = self.chars.peek() {
            match prefix {
                'u' | 'U' => {
                    self.chars.next();
                }
                'r' | 'R' => {
                    self.chars.next();
                    raw = true;
                }
                _ => {}
            }
        }

        let quote = match self.chars.next() {
            Some((_, q @ ('"' | '\''))) => q,
            Some(_) => return Err(ListParseError::ExpectedString(start)),
            None => return Err(ListParseError::UnexpectedEnd),
        };

        let mut value = String::new();
        loop {
            match self.chars.next() {
                Some((_, c)) if c == quote => return Ok(value),
                Some((_, '\\')) if raw => {
                    // A raw string still cannot end on an escaped quote
                    value.push('\\');
                    match self.chars.next() {
                        Some((_, c)) => value.push(c),
                        None => return Err(ListParseError::UnterminatedString(start)),
                    }
                }
                Some((offset, '\\')) => self.escape(offset, &mut value)?,
                Some((_, c)) => value.push(c),
                None => return Err(ListParseError::UnterminatedString(start)),
            }
        }
    }

    fn escape(&mut self, offset: usize, value: &mut String) -> Result<(), ListParseError> {
        let Some((_, c)) = self.chars.next() else {
            return Err(ListParseError::UnexpectedEnd);
        };

        match c {
            '\\' | '\'' | '"' => value.push(c),
            // Line continuation
            '\n' => {}
            'a' => value.push('\u{7}'),
            'b' => value.push('\u{8}'),
            'f' => value.push('\u{c}'),
            'n' => value.push('\n'),
            'r' => value.push('\r'),
            't' => value.push('\t'),
            'v' => value.push('\u{b}'),
            '0'..='7' => value.push(self.octal_char(c, offset)?),
            'x' => value.push(self.hex_char(2, offset)?),
            'u' => value.push(self.hex_char(4, offset)?),
            'U' => value.push(self.hex_char(8, offset)?),
            'N' => return Err(ListParseError::InvalidEscape(offset)),
            // Unknown escapes keep the backslash
            other => {
                value.push('\\');
                value.push(other);
            }
        }

        Ok(())
    }

    /// Up to three octal digits, the first already consumed
    fn octal_char(&mut self, first: char, offset: usize) -> Result<char, ListParseError> {
        let mut code = first.to_digit(8).ok_or(ListParseError::InvalidEscape(offset))?;
        for _ in 0..2 {
            match self.chars.peek().and_then(|&(_, c)| c.to_digit(8)) {
                Some(digit) => {
                    code = code * 8 + digit;
                    self.chars.next();
                }
                None => break,
            }
        }
        char::from_u32(code).ok_or(ListParseError::InvalidEscape(offset))
    }

    fn hex_char(&mut self, digits: usize, offset: usize) -> Result<char, ListParseError> {
        let mut code = 0u32;
        for _ in 0..digits {
            let digit = self
                .chars
                .next()
                .and_then(|(_, c)| c.to_digit(16))
                .ok_or(ListParseError::InvalidEscape(offset))?;
            code = code * 16 + digit;
        }
        char::from_u32(code).ok_or(ListParseError::InvalidEscape(offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_array() {
        assert_eq!(
            parse_string_list(r#"["egg", "flour"]"#).unwrap(),
            vec!["egg", "flour"]
        );
    }

    #[test]
    fn test_parse_python_literal() {
        let parsed = parse_string_list(r#"['Preheat oven.', "Don't burn it.", 'Say \'hi\'']"#)
            .unwrap();
        assert_eq!(parsed, vec!["Preheat oven.", "Don't burn it.", "Say 'hi'"]);
    }

    #[test]
    fn test_parse_empty_and_trailing_comma() {
        assert!(parse_string_list("[]").unwrap().is_empty());
        assert!(parse_string_list("  [ ]  ").unwrap().is_empty());
        assert_eq!(parse_string_list(r#"["a",]"#).unwrap(), vec!["a"]);
    }

    #[test]
    fn test_parse_json_escapes() {
        assert_eq!(
            parse_string_list(r#"["1\/2 cup", "line\nbreak", "café"]"#).unwrap(),
            vec!["1/2 cup", "line\nbreak", "café"]
        );
        assert_eq!(
            parse_string_list(r#"["\ud83e\udd5a", "caf\u00e9"]"#).unwrap(),
            vec!["\u{1f95a}", "caf\u{e9}"]
        );
    }

    #[test]
    fn test_parse_python_escapes() {
        assert_eq!(
            parse_string_list(r"['\x41', 'a\101', 'tab\there', 'café', '\U0001f95a']")
                .unwrap(),
            vec!["A", "aA", "tab\there", "caf\u{e9}", "\u{1f95a}"]
        );
        assert_eq!(parse_string_list(r"['\0', '\7z']").unwrap(), vec!["\0", "\u{7}z"]);
        assert_eq!(parse_string_list("['one \\\ntwo']").unwrap(), vec!["one two"]);
        // Unknown escapes are kept verbatim
        assert_eq!(parse_string_list(r"['a\qb']").unwrap(), vec!["a\\qb"]);
    }

    #[test]
    fn test_parse_string_prefixes() {
        assert_eq!(parse_string_list("[u'egg']").unwrap(), vec!["egg"]);
        assert_eq!(
            parse_string_list(r#"[U"egg", 'flour']"#).unwrap(),
            vec!["egg", "flour"]
        );
        assert_eq!(parse_string_list(r"[r'a\nb']").unwrap(), vec![r"a\nb"]);
        assert_eq!(parse_string_list(r"[r'it\'s']").unwrap(), vec![r"it\'s"]);
        assert!(parse_string_list("[b'egg']").is_err());
    }

    #[test]
    fn test_rejects_unrepresentable_escapes() {
        assert_eq!(
            parse_string_list(r"['\ud83e']"),
            Err(ListParseError::InvalidEscape(2))
        );
        assert!(parse_string_list(r"['\N{BULLET}']").is_err());
    }

    #[test]
    fn test_rejects_non_lists() {
        assert!(parse_string_list("").is_err());
        assert!(parse_string_list("egg, flour").is_err());
        assert!(parse_string_list("__import__('os').system('ls')").is_err());
        assert!(parse_string_list(r#"{"a": "b"}"#).is_err());
    }

    #[test]
    fn test_rejects_malformed_lists() {
        assert_eq!(
            parse_string_list(r#"["egg", 1]"#),
            Err(ListParseError::ExpectedString(8))
        );
        assert!(parse_string_list(r#"[["egg"]]"#).is_err());
        assert!(parse_string_list(r#"["egg" "flour"]"#).is_err());
        assert!(parse_string_list(r#"["egg""#).is_err());
        assert!(parse_string_list(r#"["egg]"#).is_err());
        assert!(parse_string_list(r#"["egg"] + ["flour"]"#).is_err());
        assert!(parse_string_list(r#"["bad \u12"]"#).is_err());
    }
}
