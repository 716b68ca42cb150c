use crate::error::SyntaxError;
use crate::source_position::SourcePosition;
use crate::source_position::Span;
use crate::token::Token;
use crate::token::TokenKind;

/// A hand-written, pull-based GraphQL lexer.
///
/// `advance()` returns the next token and mutates lexer state; there is no
/// separate tokenize-everything-up-front pass, the same pull-based shape as
/// `graphql-js`'s lexer, simplified to a semantic-only token stream (no
/// trivia/whitespace tokens, no syntax-reconstruction layer).
pub struct Lexer<'a> {
    source: &'a str,
    pos: usize,
    line: usize,
    col: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Lexer { source, pos: 0, line: 1, col: 1 }
    }

    fn position(&self) -> SourcePosition {
        SourcePosition { line: self.line, column: self.col }
    }

    fn rest(&self) -> &'a str {
        &self.source[self.pos..]
    }

    fn peek_char(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn peek_char_at(&self, skip: usize) -> Option<char> {
        self.rest().chars().nth(skip)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek_char()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(c)
    }

    fn snippet_for_line(&self, line: usize) -> Option<String> {
        self.source.lines().nth(line.checked_sub(1)?).map(|s| s.to_string())
    }

    fn err(&self, message: impl Into<String>, position: SourcePosition) -> SyntaxError {
        SyntaxError::new(message, position, self.snippet_for_line(position.line))
    }

    fn skip_ignored(&mut self) -> Result<(), SyntaxError> {
        loop {
            match self.peek_char() {
                Some('\u{FEFF}') | Some(' ') | Some('\t') | Some(',') => {
                    self.bump();
                }
                Some('\r') => {
                    self.bump();
                    if self.peek_char() == Some('\n') {
                        self.bump();
                    }
                }
                Some('\n') => {
                    self.bump();
                }
                Some('#') => {
                    // Comments run to end of line (exclusive of the terminator).
                    let bytes = self.rest().as_bytes();
                    let nl = memchr::memchr(b'\n', bytes);
                    match nl {
                        Some(offset) => {
                            for _ in 0..offset {
                                self.bump();
                            }
                        }
                        None => {
                            while self.peek_char().is_some() {
                                self.bump();
                            }
                        }
                    }
                }
                _ => break,
            }
        }
        Ok(())
    }

    fn is_name_start(c: char) -> bool {
        c == '_' || c.is_ascii_alphabetic()
    }

    fn is_name_continue(c: char) -> bool {
        c == '_' || c.is_ascii_alphanumeric()
    }

    fn is_digit(c: char) -> bool {
        c.is_ascii_digit()
    }

    /// Returns the next token, advancing lexer state. Never returns a
    /// trailing-whitespace or comment token; those are consumed silently.
    pub fn advance(&mut self) -> Result<Token, SyntaxError> {
        self.skip_ignored()?;
        let start = self.position();
        let start_byte = self.pos;

        let Some(c) = self.peek_char() else {
            return Ok(Token {
                kind: TokenKind::Eof,
                span: Span::new(start, start, start_byte, start_byte),
            });
        };

        let kind = match c {
            '!' => { self.bump(); TokenKind::Bang }
            '$' => { self.bump(); TokenKind::Dollar }
            '&' => { self.bump(); TokenKind::Ampersand }
            '(' => { self.bump(); TokenKind::ParenOpen }
            ')' => { self.bump(); TokenKind::ParenClose }
            ':' => { self.bump(); TokenKind::Colon }
            '=' => { self.bump(); TokenKind::Equals }
            '@' => { self.bump(); TokenKind::At }
            '[' => { self.bump(); TokenKind::BracketOpen }
            ']' => { self.bump(); TokenKind::BracketClose }
            '{' => { self.bump(); TokenKind::BraceOpen }
            '}' => { self.bump(); TokenKind::BraceClose }
            '|' => { self.bump(); TokenKind::Pipe }
            '.' => {
                if self.peek_char_at(1) == Some('.') && self.peek_char_at(2) == Some('.') {
                    self.bump();
                    self.bump();
                    self.bump();
                    TokenKind::Ellipsis
                } else {
                    return Err(self.err("Unexpected character \".\"", start));
                }
            }
            '"' => self.lex_string(start)?,
            c if Self::is_name_start(c) => self.lex_name(),
            c if Self::is_digit(c) || c == '-' => self.lex_number(start)?,
            other => return Err(self.err(format!("Unexpected character {other:?}"), start)),
        };

        let end = self.position();
        Ok(Token { kind, span: Span::new(start, end, start_byte, self.pos) })
    }

    fn lex_name(&mut self) -> TokenKind {
        let mut name = String::new();
        while let Some(c) = self.peek_char() {
            if Self::is_name_continue(c) {
                name.push(c);
                self.bump();
            } else {
                break;
            }
        }
        TokenKind::Name(name)
    }

    fn lex_number(&mut self, start: SourcePosition) -> Result<TokenKind, SyntaxError> {
        let mut raw = String::new();
        if self.peek_char() == Some('-') {
            raw.push('-');
            self.bump();
        }

        match self.peek_char() {
            Some('0') => {
                raw.push('0');
                self.bump();
                if matches!(self.peek_char(), Some(c) if Self::is_digit(c)) {
                    return Err(self.err("Invalid number, unexpected digit after 0", self.position()));
                }
            }
            Some(c) if Self::is_digit(c) => {
                while let Some(c) = self.peek_char() {
                    if Self::is_digit(c) {
                        raw.push(c);
                        self.bump();
                    } else {
                        break;
                    }
                }
            }
            _ => return Err(self.err("Invalid number, expected digit", self.position())),
        }

        let mut is_float = false;
        if self.peek_char() == Some('.') {
            if !matches!(self.peek_char_at(1), Some(c) if Self::is_digit(c)) {
                return Err(self.err("Invalid number, expected digit after \".\"", self.position()));
            }
            is_float = true;
            raw.push('.');
            self.bump();
            while let Some(c) = self.peek_char() {
                if Self::is_digit(c) {
                    raw.push(c);
                    self.bump();
                } else {
                    break;
                }
            }
        }

        if matches!(self.peek_char(), Some('e') | Some('E')) {
            is_float = true;
            raw.push(self.peek_char().unwrap());
            self.bump();
            if matches!(self.peek_char(), Some('+') | Some('-')) {
                raw.push(self.peek_char().unwrap());
                self.bump();
            }
            if !matches!(self.peek_char(), Some(c) if Self::is_digit(c)) {
                return Err(self.err("Invalid number, expected digit after exponent marker", self.position()));
            }
            while let Some(c) = self.peek_char() {
                if Self::is_digit(c) {
                    raw.push(c);
                    self.bump();
                } else {
                    break;
                }
            }
        }

        // Forbid `0xF1`-style ambiguity: a number may not be immediately
        // followed by a name-start character, another digit, or `.`.
        if let Some(c) = self.peek_char() {
            if Self::is_name_start(c) || Self::is_digit(c) || c == '.' {
                return Err(self.err(
                    format!("Invalid number, unexpected character {c:?} following number"),
                    self.position(),
                ));
            }
        }

        Ok(if is_float { TokenKind::Float(raw) } else { TokenKind::Int(raw) })
    }

    fn lex_string(&mut self, start: SourcePosition) -> Result<TokenKind, SyntaxError> {
        // Opening quote already peeked, not consumed.
        if self.peek_char_at(1) == Some('"') && self.peek_char_at(2) == Some('"') {
            return self.lex_block_string(start);
        }

        self.bump(); // opening quote
        let mut value = String::new();
        loop {
            match self.peek_char() {
                None => return Err(self.err("Unterminated string literal", start)),
                Some('\n') | Some('\r') => return Err(self.err("Unterminated string literal", start)),
                Some('"') => {
                    self.bump();
                    break;
                }
                Some('\\') => {
                    self.bump();
                    match self.peek_char() {
                        Some('"') => { value.push('"'); self.bump(); }
                        Some('\\') => { value.push('\\'); self.bump(); }
                        Some('/') => { value.push('/'); self.bump(); }
                        Some('b') => { value.push('\u{0008}'); self.bump(); }
                        Some('f') => { value.push('\u{000C}'); self.bump(); }
                        Some('n') => { value.push('\n'); self.bump(); }
                        Some('r') => { value.push('\r'); self.bump(); }
                        Some('t') => { value.push('\t'); self.bump(); }
                        Some('u') => {
                            self.bump();
                            let cp = self.read_unicode_escape(start)?;
                            value.push(cp);
                        }
                        Some(other) => {
                            return Err(self.err(format!("Invalid escape sequence \\{other}"), self.position()));
                        }
                        None => return Err(self.err("Unterminated string literal", start)),
                    }
                }
                Some(c) => {
                    value.push(c);
                    self.bump();
                }
            }
        }
        Ok(TokenKind::Str(value))
    }

    fn read_hex4(&mut self) -> Result<u32, SyntaxError> {
        let mut v: u32 = 0;
        for _ in 0..4 {
            let c = self.peek_char().ok_or_else(|| self.err("Invalid \\u escape, expected 4 hex digits", self.position()))?;
            let digit = c.to_digit(16).ok_or_else(|| self.err("Invalid \\u escape, expected hex digit", self.position()))?;
            v = v * 16 + digit;
            self.bump();
        }
        Ok(v)
    }

    fn read_unicode_escape(&mut self, start: SourcePosition) -> Result<char, SyntaxError> {
        let high = self.read_hex4()?;
        if (0xD800..=0xDBFF).contains(&high) {
            // High surrogate: must be followed by a low surrogate.
            if self.peek_char() == Some('\\') && self.peek_char_at(1) == Some('u') {
                self.bump();
                self.bump();
                let low = self.read_hex4()?;
                if !(0xDC00..=0xDFFF).contains(&low) {
                    return Err(self.err("Invalid surrogate pair in \\u escape", start));
                }
                let c = 0x10000 + (high - 0xD800) * 0x400 + (low - 0xDC00);
                return char::from_u32(c).ok_or_else(|| self.err("Invalid surrogate pair in \\u escape", start));
            }
            return Err(self.err("Unpaired high surrogate in \\u escape", start));
        }
        if (0xDC00..=0xDFFF).contains(&high) {
            return Err(self.err("Unpaired low surrogate in \\u escape", start));
        }
        char::from_u32(high).ok_or_else(|| self.err("Invalid \\u escape", start))
    }

    fn lex_block_string(&mut self, start: SourcePosition) -> Result<TokenKind, SyntaxError> {
        self.bump();
        self.bump();
        self.bump();
        let mut raw = String::new();
        loop {
            match self.peek_char() {
                None => return Err(self.err("Unterminated block string literal", start)),
                Some('"') if self.peek_char_at(1) == Some('"') && self.peek_char_at(2) == Some('"') => {
                    self.bump();
                    self.bump();
                    self.bump();
                    break;
                }
                Some('\\')
                    if self.peek_char_at(1) == Some('"')
                        && self.peek_char_at(2) == Some('"')
                        && self.peek_char_at(3) == Some('"') =>
                {
                    // `\"""` is an escaped triple-quote within a block string.
                    self.bump();
                    raw.push_str("\"\"\"");
                    self.bump();
                    self.bump();
                    self.bump();
                }
                Some(c) => {
                    raw.push(c);
                    self.bump();
                }
            }
        }
        Ok(TokenKind::BlockStr(block_string_value(&raw)))
    }

    /// Parses a single token, erroring if any (non-ignored) trailing content
    /// remains after it and before EOF. Mostly useful for tests.
    #[cfg(test)]
    pub(crate) fn lex_one(source: &str) -> Result<Token, SyntaxError> {
        Lexer::new(source).advance()
    }
}

/// Implements the GraphQL spec's `BlockStringValue(rawValue)` algorithm:
/// strips a common leading-whitespace indentation from all lines but the
/// first, then trims fully-blank leading/trailing lines.
pub fn block_string_value(raw: &str) -> String {
    let lines: Vec<&str> = raw.split('\n').map(|l| l.trim_end_matches('\r')).collect();

    let common_indent = lines
        .iter()
        .skip(1)
        .filter_map(|line| {
            let indent = line.len() - line.trim_start_matches([' ', '\t']).len();
            if indent < line.len() { Some(indent) } else { None }
        })
        .min();

    let mut out_lines: Vec<String> = Vec::with_capacity(lines.len());
    for (i, line) in lines.iter().enumerate() {
        if i == 0 {
            out_lines.push(line.to_string());
        } else if let Some(indent) = common_indent {
            out_lines.push(line.chars().skip(indent.min(line.chars().count())).collect());
        } else {
            out_lines.push(line.to_string());
        }
    }

    while out_lines.first().is_some_and(|l| l.trim().is_empty()) {
        out_lines.remove(0);
    }
    while out_lines.last().is_some_and(|l| l.trim().is_empty()) {
        out_lines.pop();
    }

    out_lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn lexes_punctuators() {
        assert_eq!(Lexer::lex_one("!").unwrap().kind, TokenKind::Bang);
        assert_eq!(Lexer::lex_one("...").unwrap().kind, TokenKind::Ellipsis);
        assert_eq!(Lexer::lex_one("&").unwrap().kind, TokenKind::Ampersand);
    }

    #[test]
    fn lone_dot_is_a_syntax_error() {
        assert!(Lexer::lex_one(".").is_err());
    }

    #[test]
    fn zero_is_a_valid_int() {
        assert_eq!(Lexer::lex_one("0").unwrap().kind, TokenKind::Int("0".to_string()));
    }

    #[test]
    fn leading_zero_followed_by_digit_is_an_error() {
        assert!(Lexer::lex_one("01").is_err());
    }

    #[test]
    fn negative_int() {
        assert_eq!(Lexer::lex_one("-42").unwrap().kind, TokenKind::Int("-42".to_string()));
    }

    #[test]
    fn float_with_fraction_and_exponent() {
        assert_eq!(Lexer::lex_one("6.0221413e23").unwrap().kind, TokenKind::Float("6.0221413e23".to_string()));
    }

    #[test]
    fn fraction_requires_a_digit() {
        assert!(Lexer::lex_one("1.").is_err());
    }

    #[test]
    fn number_followed_by_name_start_is_an_error() {
        // `0xF1` is not a hex literal in GraphQL; it's an Int immediately
        // followed by an illegal trailing name, which must error.
        assert!(Lexer::lex_one("0xF1").is_err());
    }

    #[test]
    fn lexes_escaped_string() {
        let tok = Lexer::lex_one(r#""line\nbreak""#).unwrap();
        assert_eq!(tok.kind, TokenKind::Str("line\nbreak".to_string()));
    }

    #[test]
    fn unterminated_string_is_an_error() {
        assert!(Lexer::lex_one("\"abc").is_err());
    }

    #[test]
    fn unicode_escape_decodes_surrogate_pair() {
        let tok = Lexer::lex_one(r#""😀""#).unwrap();
        assert_eq!(tok.kind, TokenKind::Str("\u{1F600}".to_string()));
    }

    #[test]
    fn unpaired_surrogate_is_an_error() {
        assert!(Lexer::lex_one(r#""\uD83D""#).is_err());
    }

    #[test]
    fn block_string_strips_common_indent() {
        let value = block_string_value("\n    Hello,\n      World!\n    \n");
        assert_eq!(value, "Hello,\n  World!");
    }

    proptest! {
        #[test]
        fn int_lexeme_round_trips_through_parse(n in any::<i32>()) {
            let text = n.to_string();
            let tok = Lexer::lex_one(&text).unwrap();
            match tok.kind {
                TokenKind::Int(raw) => prop_assert_eq!(raw.parse::<i32>().unwrap(), n),
                other => prop_assert!(false, "expected Int, got {:?}", other),
            }
        }

        #[test]
        fn float_lexeme_round_trips_through_parse(n in -1e10f64..1e10f64) {
            // Force a literal that always has a decimal point, since bare
            // integral floats (`4.0` formatted as `"4"`) would lex as Int.
            let text = format!("{n:.6}");
            let tok = Lexer::lex_one(&text).unwrap();
            match tok.kind {
                TokenKind::Float(raw) => {
                    let parsed: f64 = raw.parse().unwrap();
                    prop_assert!((parsed - n).abs() < 1e-3);
                }
                other => prop_assert!(false, "expected Float, got {:?}", other),
            }
        }
    }
}
