//! The scanner.
//!
//! Works on byte offsets into the source `&str`. Each call to [`Scanner::scan`]
//! skips leading trivia and produces one token; the parser drives the rescan
//! methods when a token has to be read under a different lexical rule
//! (`>` in type argument lists, `/` as a regular expression, `}` resuming a
//! template, markup text).

use crate::char_codes::*;
use crate::token::{ScanError, ScannerState};
use memchr::{memchr2, memchr3, memmem};
use quill_ast::syntax_kind::SyntaxKind;
use quill_ast::types::{LanguageVariant, TokenFlags};
use quill_diagnostics::{messages, DiagnosticMessage};

const MERGE_CONFLICT_MARKER_LENGTH: usize = 7;

/// Turns source text into tokens.
pub struct Scanner<'a> {
    text: &'a str,
    /// Source bytes, cut off at the end of the scanned range.
    bytes: &'a [u8],
    end: usize,
    /// Current position; also the end of the current token.
    pos: usize,
    /// Start of the current token including leading trivia.
    full_start: usize,
    /// Start of the current token after trivia.
    token_start: usize,
    token: SyntaxKind,
    /// Identifier text, cooked string/template value or raw numeric text.
    token_value: String,
    token_flags: TokenFlags,
    language_variant: LanguageVariant,
    /// Errors not yet collected by the parser.
    errors: Vec<ScanError>,
}

impl<'a> Scanner<'a> {
    pub fn new(text: &'a str, language_variant: LanguageVariant) -> Self {
        Self::with_range(text, language_variant, 0, text.len())
    }

    /// A scanner that only sees `text[start..start + length]`. Offsets stay
    /// relative to the whole text.
    pub fn with_range(
        text: &'a str,
        language_variant: LanguageVariant,
        start: usize,
        length: usize,
    ) -> Self {
        let end = start.saturating_add(length).min(text.len());
        let start = start.min(end);
        Self {
            text,
            bytes: &text.as_bytes()[..end],
            end,
            pos: start,
            full_start: start,
            token_start: start,
            token: SyntaxKind::Unknown,
            token_value: String::new(),
            token_flags: TokenFlags::NONE,
            language_variant,
            errors: Vec::new(),
        }
    }

    #[inline]
    pub fn text(&self) -> &'a str {
        self.text
    }

    #[inline]
    pub fn end(&self) -> usize {
        self.end
    }

    #[inline]
    pub fn language_variant(&self) -> LanguageVariant {
        self.language_variant
    }

    #[inline]
    pub fn token(&self) -> SyntaxKind {
        self.token
    }

    #[inline]
    pub fn token_value(&self) -> &str {
        &self.token_value
    }

    /// Raw source text of the current token.
    pub fn token_text(&self) -> &'a str {
        self.text.get(self.token_start..self.pos).unwrap_or("")
    }

    #[inline]
    pub fn full_start(&self) -> usize {
        self.full_start
    }

    #[inline]
    pub fn token_start(&self) -> usize {
        self.token_start
    }

    #[inline]
    pub fn token_end(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn token_flags(&self) -> TokenFlags {
        self.token_flags
    }

    #[inline]
    pub fn has_preceding_line_break(&self) -> bool {
        self.token_flags.contains(TokenFlags::PRECEDING_LINE_BREAK)
    }

    #[inline]
    pub fn has_preceding_jsdoc_comment(&self) -> bool {
        self.token_flags.contains(TokenFlags::PRECEDING_JSDOC_COMMENT)
    }

    #[inline]
    pub fn is_unterminated(&self) -> bool {
        self.token_flags.contains(TokenFlags::UNTERMINATED)
    }

    #[inline]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Hand over the errors reported since the last call.
    pub fn take_errors(&mut self) -> Vec<ScanError> {
        std::mem::take(&mut self.errors)
    }

    pub fn save_state(&self) -> ScannerState {
        ScannerState {
            pos: self.pos,
            full_start: self.full_start,
            token_start: self.token_start,
            token: self.token,
            token_value: self.token_value.clone(),
            token_flags: self.token_flags,
        }
    }

    /// Return to a saved state. Errors reported after the save are dropped.
    pub fn restore_state(&mut self, state: ScannerState) {
        self.pos = state.pos;
        self.full_start = state.full_start;
        self.token_start = state.token_start;
        self.token = state.token;
        self.token_value = state.token_value;
        self.token_flags = state.token_flags;
        self.errors.clear();
    }

    /// Continue scanning from `pos`. The current token is forgotten.
    pub fn reset_to(&mut self, pos: usize) {
        let pos = pos.min(self.end);
        self.pos = pos;
        self.full_start = pos;
        self.token_start = pos;
        self.token = SyntaxKind::Unknown;
        self.token_value.clear();
        self.token_flags = TokenFlags::NONE;
    }

    fn error(&mut self, message: &'static DiagnosticMessage, pos: usize, length: usize) {
        self.errors.push(ScanError {
            pos: pos as u32,
            length: length as u32,
            message,
        });
    }

    /// Byte at `pos + offset`, or 0 past the end.
    #[inline]
    fn peek(&self, offset: usize) -> u8 {
        self.bytes.get(self.pos + offset).copied().unwrap_or(0)
    }

    #[inline]
    fn char_at(&self, pos: usize) -> Option<char> {
        self.text.get(pos..self.end)?.chars().next()
    }

    #[inline]
    fn advance(&mut self, len: usize, kind: SyntaxKind) -> SyntaxKind {
        self.pos += len;
        kind
    }

    // ========================================================================
    // Main scan
    // ========================================================================

    /// Skip trivia and scan the next token.
    pub fn scan(&mut self) -> SyntaxKind {
        self.full_start = self.pos;
        self.token_flags = TokenFlags::NONE;
        self.token_value.clear();

        loop {
            self.token_start = self.pos;
            if self.pos >= self.end {
                self.token = SyntaxKind::EndOfFileToken;
                return self.token;
            }

            let b = self.bytes[self.pos];
            let kind = match b {
                b'\n' | b'\r' => {
                    self.token_flags |= TokenFlags::PRECEDING_LINE_BREAK;
                    self.pos += 1;
                    continue;
                }
                b' ' | b'\t' | 0x0B | 0x0C => {
                    self.pos += 1;
                    continue;
                }
                b'#' if self.pos == 0 && self.peek(1) == b'!' => {
                    self.pos = find_line_break(self.bytes, 2);
                    continue;
                }
                b'/' => match self.peek(1) {
                    b'/' => {
                        self.pos = find_line_break(self.bytes, self.pos + 2);
                        continue;
                    }
                    b'*' => {
                        self.skip_multi_line_comment();
                        continue;
                    }
                    b'=' => self.advance(2, SyntaxKind::SlashEqualsToken),
                    _ => self.advance(1, SyntaxKind::SlashToken),
                },
                b'<' | b'=' | b'>' | b'|' if is_conflict_marker_trivia(self.bytes, self.pos) => {
                    self.error(
                        &messages::MERGE_CONFLICT_MARKER_ENCOUNTERED,
                        self.pos,
                        MERGE_CONFLICT_MARKER_LENGTH,
                    );
                    self.pos = conflict_marker_end(self.bytes, self.pos);
                    continue;
                }
                b'!' => self.scan_exclamation(),
                b'"' | b'\'' => {
                    self.scan_string(b);
                    SyntaxKind::StringLiteral
                }
                b'`' => self.scan_template(),
                b'%' => self.scan_with_equals(SyntaxKind::PercentToken, SyntaxKind::PercentEqualsToken),
                b'&' => self.scan_doubled(
                    b'&',
                    SyntaxKind::AmpersandToken,
                    SyntaxKind::AmpersandEqualsToken,
                    SyntaxKind::AmpersandAmpersandToken,
                    SyntaxKind::AmpersandAmpersandEqualsToken,
                ),
                b'*' => self.scan_doubled(
                    b'*',
                    SyntaxKind::AsteriskToken,
                    SyntaxKind::AsteriskEqualsToken,
                    SyntaxKind::AsteriskAsteriskToken,
                    SyntaxKind::AsteriskAsteriskEqualsToken,
                ),
                b'|' => self.scan_doubled(
                    b'|',
                    SyntaxKind::BarToken,
                    SyntaxKind::BarEqualsToken,
                    SyntaxKind::BarBarToken,
                    SyntaxKind::BarBarEqualsToken,
                ),
                b'+' => match self.peek(1) {
                    b'+' => self.advance(2, SyntaxKind::PlusPlusToken),
                    b'=' => self.advance(2, SyntaxKind::PlusEqualsToken),
                    _ => self.advance(1, SyntaxKind::PlusToken),
                },
                b'-' => match self.peek(1) {
                    b'-' => self.advance(2, SyntaxKind::MinusMinusToken),
                    b'=' => self.advance(2, SyntaxKind::MinusEqualsToken),
                    _ => self.advance(1, SyntaxKind::MinusToken),
                },
                b'^' => self.scan_with_equals(SyntaxKind::CaretToken, SyntaxKind::CaretEqualsToken),
                b'.' => self.scan_dot(),
                b'0'..=b'9' => self.scan_number(),
                b'<' => self.scan_less_than(),
                b'=' => self.scan_equals(),
                b'>' => self.advance(1, SyntaxKind::GreaterThanToken),
                b'?' => self.scan_question(),
                b'(' => self.advance(1, SyntaxKind::OpenParenToken),
                b')' => self.advance(1, SyntaxKind::CloseParenToken),
                b'[' => self.advance(1, SyntaxKind::OpenBracketToken),
                b']' => self.advance(1, SyntaxKind::CloseBracketToken),
                b'{' => self.advance(1, SyntaxKind::OpenBraceToken),
                b'}' => self.advance(1, SyntaxKind::CloseBraceToken),
                b',' => self.advance(1, SyntaxKind::CommaToken),
                b';' => self.advance(1, SyntaxKind::SemicolonToken),
                b':' => self.advance(1, SyntaxKind::ColonToken),
                b'~' => self.advance(1, SyntaxKind::TildeToken),
                b'@' => self.advance(1, SyntaxKind::AtToken),
                b'#' => self.scan_hash(),
                b'\\' => self.scan_identifier(),
                b'a'..=b'z' | b'A'..=b'Z' | b'_' | b'$' => self.scan_identifier(),
                _ => {
                    let ch = self.char_at(self.pos).unwrap_or('\u{FFFD}');
                    if is_line_break(ch) {
                        self.token_flags |= TokenFlags::PRECEDING_LINE_BREAK;
                        self.pos += ch.len_utf8();
                        continue;
                    }
                    if is_white_space_single_line(ch) {
                        self.pos += ch.len_utf8();
                        continue;
                    }
                    if is_identifier_start(ch) {
                        self.scan_identifier()
                    } else {
                        self.error(&messages::INVALID_CHARACTER, self.pos, 0);
                        self.pos += ch.len_utf8().max(1);
                        SyntaxKind::Unknown
                    }
                }
            };
            self.token = kind;
            return kind;
        }
    }

    fn skip_multi_line_comment(&mut self) {
        let body_start = self.pos + 2;
        if self.peek(2) == b'*' && self.peek(3) != b'/' {
            self.token_flags |= TokenFlags::PRECEDING_JSDOC_COMMENT;
        }
        let (body_end, next) = match memmem::find(&self.bytes[body_start..], b"*/") {
            Some(i) => (body_start + i, body_start + i + 2),
            None => {
                self.error(&messages::ASTERISK_SLASH_EXPECTED, self.end, 0);
                self.token_flags |= TokenFlags::UNTERMINATED;
                (self.end, self.end)
            }
        };
        if find_line_break(&self.bytes[..body_end], body_start) < body_end {
            self.token_flags |= TokenFlags::PRECEDING_LINE_BREAK;
        }
        self.pos = next;
    }

    fn scan_with_equals(&mut self, plain: SyntaxKind, with_equals: SyntaxKind) -> SyntaxKind {
        if self.peek(1) == b'=' {
            self.advance(2, with_equals)
        } else {
            self.advance(1, plain)
        }
    }

    /// Operators of the shape `x`, `x=`, `xx`, `xx=`.
    fn scan_doubled(
        &mut self,
        ch: u8,
        single: SyntaxKind,
        single_equals: SyntaxKind,
        double: SyntaxKind,
        double_equals: SyntaxKind,
    ) -> SyntaxKind {
        match (self.peek(1), self.peek(2)) {
            (c, b'=') if c == ch => self.advance(3, double_equals),
            (c, _) if c == ch => self.advance(2, double),
            (b'=', _) => self.advance(2, single_equals),
            _ => self.advance(1, single),
        }
    }

    fn scan_exclamation(&mut self) -> SyntaxKind {
        match (self.peek(1), self.peek(2)) {
            (b'=', b'=') => self.advance(3, SyntaxKind::ExclamationEqualsEqualsToken),
            (b'=', _) => self.advance(2, SyntaxKind::ExclamationEqualsToken),
            _ => self.advance(1, SyntaxKind::ExclamationToken),
        }
    }

    fn scan_dot(&mut self) -> SyntaxKind {
        if self.peek(1).is_ascii_digit() {
            return self.scan_number();
        }
        if self.peek(1) == b'.' && self.peek(2) == b'.' {
            return self.advance(3, SyntaxKind::DotDotDotToken);
        }
        self.advance(1, SyntaxKind::DotToken)
    }

    fn scan_question(&mut self) -> SyntaxKind {
        match (self.peek(1), self.peek(2)) {
            // `a?.5:b` is a conditional, not an optional chain.
            (b'.', c) if !c.is_ascii_digit() => self.advance(2, SyntaxKind::QuestionDotToken),
            (b'?', b'=') => self.advance(3, SyntaxKind::QuestionQuestionEqualsToken),
            (b'?', _) => self.advance(2, SyntaxKind::QuestionQuestionToken),
            _ => self.advance(1, SyntaxKind::QuestionToken),
        }
    }

    fn scan_less_than(&mut self) -> SyntaxKind {
        match (self.peek(1), self.peek(2)) {
            (b'<', b'=') => self.advance(3, SyntaxKind::LessThanLessThanEqualsToken),
            (b'<', _) => self.advance(2, SyntaxKind::LessThanLessThanToken),
            (b'=', _) => self.advance(2, SyntaxKind::LessThanEqualsToken),
            (b'/', c) if self.language_variant == LanguageVariant::Jsx && c != b'*' => {
                self.advance(2, SyntaxKind::LessThanSlashToken)
            }
            _ => self.advance(1, SyntaxKind::LessThanToken),
        }
    }

    fn scan_equals(&mut self) -> SyntaxKind {
        match (self.peek(1), self.peek(2)) {
            (b'=', b'=') => self.advance(3, SyntaxKind::EqualsEqualsEqualsToken),
            (b'=', _) => self.advance(2, SyntaxKind::EqualsEqualsToken),
            (b'>', _) => self.advance(2, SyntaxKind::EqualsGreaterThanToken),
            _ => self.advance(1, SyntaxKind::EqualsToken),
        }
    }

    fn scan_hash(&mut self) -> SyntaxKind {
        let starts_name = match self.char_at(self.pos + 1) {
            Some('\\') => self.peek_unicode_escape(self.pos + 1).is_some(),
            Some(ch) => is_identifier_start(ch),
            None => false,
        };
        if !starts_name {
            return self.advance(1, SyntaxKind::HashToken);
        }
        self.pos += 1;
        self.scan_identifier();
        self.token_value.insert(0, '#');
        SyntaxKind::PrivateIdentifier
    }

    // ========================================================================
    // Identifiers
    // ========================================================================

    /// Scan an identifier or keyword starting at `pos`. Unicode escapes are
    /// decoded into the token value; an escaped word is never a keyword.
    fn scan_identifier(&mut self) -> SyntaxKind {
        let start = self.pos;
        let mut segment = start;
        let mut cooked: Option<String> = None;

        while self.pos < self.end {
            let first = self.pos == start;
            let b = self.bytes[self.pos];
            if b.is_ascii_alphanumeric() || b == b'_' || b == b'$' {
                if first && b.is_ascii_digit() {
                    break;
                }
                self.pos += 1;
            } else if b == b'\\' {
                match self.peek_unicode_escape(self.pos) {
                    Some((ch, len))
                        if (first && is_identifier_start(ch))
                            || (!first && is_identifier_part(ch)) =>
                    {
                        let buf = cooked.get_or_insert_with(String::new);
                        buf.push_str(&self.text[segment..self.pos]);
                        buf.push(ch);
                        self.pos += len;
                        segment = self.pos;
                    }
                    _ => break,
                }
            } else if b >= 0x80 {
                match self.char_at(self.pos) {
                    Some(ch)
                        if (first && is_identifier_start(ch))
                            || (!first && is_identifier_part(ch)) =>
                    {
                        self.pos += ch.len_utf8();
                    }
                    _ => break,
                }
            } else {
                break;
            }
        }

        if self.pos == start {
            // A backslash that does not begin a usable escape.
            self.error(&messages::INVALID_CHARACTER, start, 0);
            self.pos += 1;
            return SyntaxKind::Unknown;
        }

        match cooked {
            Some(mut buf) => {
                buf.push_str(&self.text[segment..self.pos]);
                self.token_value = buf;
                self.token_flags |= TokenFlags::UNICODE_ESCAPE;
                SyntaxKind::Identifier
            }
            None => {
                self.token_value.push_str(&self.text[start..self.pos]);
                SyntaxKind::from_keyword(&self.token_value).unwrap_or(SyntaxKind::Identifier)
            }
        }
    }

    /// Decode `\uXXXX` or `\u{X...}` at `at` without moving. Returns the
    /// character and the escape's length in bytes.
    fn peek_unicode_escape(&self, at: usize) -> Option<(char, usize)> {
        let bytes = self.bytes;
        if bytes.get(at) != Some(&b'\\') || bytes.get(at + 1) != Some(&b'u') {
            return None;
        }
        if bytes.get(at + 2) == Some(&b'{') {
            let digits_start = at + 3;
            let mut p = digits_start;
            while p < self.end && bytes[p].is_ascii_hexdigit() {
                p += 1;
            }
            if p == digits_start || bytes.get(p) != Some(&b'}') {
                return None;
            }
            let value = u32::from_str_radix(&self.text[digits_start..p], 16).ok()?;
            return char::from_u32(value).map(|ch| (ch, p + 1 - at));
        }
        let digits = self.text.get(at + 2..at + 6)?;
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let value = u32::from_str_radix(digits, 16).ok()?;
        char::from_u32(value).map(|ch| (ch, 6))
    }

    // ========================================================================
    // Literals
    // ========================================================================

    fn scan_string(&mut self, quote: u8) {
        self.pos += 1;
        let mut segment = self.pos;
        loop {
            if self.pos >= self.end {
                self.token_value.push_str(&self.text[segment..self.pos]);
                self.token_flags |= TokenFlags::UNTERMINATED;
                self.error(&messages::UNTERMINATED_STRING_LITERAL, self.pos, 0);
                return;
            }
            let b = self.bytes[self.pos];
            if b == quote {
                self.token_value.push_str(&self.text[segment..self.pos]);
                self.pos += 1;
                return;
            }
            if b == b'\\' {
                self.token_value.push_str(&self.text[segment..self.pos]);
                self.scan_escape_sequence();
                segment = self.pos;
                continue;
            }
            if line_break_len(self.bytes, self.pos) > 0 {
                self.token_value.push_str(&self.text[segment..self.pos]);
                self.token_flags |= TokenFlags::UNTERMINATED;
                self.error(&messages::UNTERMINATED_STRING_LITERAL, self.pos, 0);
                return;
            }
            self.pos += 1;
        }
    }

    /// Decode the escape at `pos` (a backslash) into the token value.
    fn scan_escape_sequence(&mut self) {
        self.pos += 1;
        if self.pos >= self.end {
            self.error(&messages::UNEXPECTED_END_OF_TEXT, self.pos, 0);
            return;
        }
        let b = self.bytes[self.pos];
        self.pos += 1;
        let cooked = match b {
            b'0' => '\0',
            b'b' => '\u{0008}',
            b't' => '\t',
            b'n' => '\n',
            b'v' => '\u{000B}',
            b'f' => '\u{000C}',
            b'r' => '\r',
            b'\'' => '\'',
            b'"' => '"',
            b'x' => match self.scan_exact_hex_digits(2) {
                Some(value) => char::from_u32(value).unwrap_or('\u{FFFD}'),
                None => {
                    self.error(&messages::HEXADECIMAL_DIGIT_EXPECTED, self.pos, 0);
                    return;
                }
            },
            b'u' if self.peek(0) == b'{' => {
                self.pos += 1;
                self.token_flags |= TokenFlags::EXTENDED_UNICODE_ESCAPE;
                match self.scan_extended_unicode_escape() {
                    Some(ch) => ch,
                    None => return,
                }
            }
            b'u' => match self.scan_exact_hex_digits(4) {
                // Lone surrogates cannot live in a Rust string.
                Some(value) => char::from_u32(value).unwrap_or('\u{FFFD}'),
                None => {
                    self.error(&messages::HEXADECIMAL_DIGIT_EXPECTED, self.pos, 0);
                    return;
                }
            },
            // Line continuations.
            b'\r' => {
                if self.peek(0) == b'\n' {
                    self.pos += 1;
                }
                return;
            }
            b'\n' => return,
            _ => {
                self.pos -= 1;
                let ch = self.char_at(self.pos).unwrap_or('\u{FFFD}');
                self.pos += ch.len_utf8();
                if is_line_break(ch) {
                    return;
                }
                ch
            }
        };
        self.token_value.push(cooked);
    }

    fn scan_exact_hex_digits(&mut self, count: usize) -> Option<u32> {
        let digits = self.text.get(self.pos..self.pos + count)?;
        if self.pos + count > self.end || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let value = u32::from_str_radix(digits, 16).ok()?;
        self.pos += count;
        Some(value)
    }

    /// After `\u{`.
    fn scan_extended_unicode_escape(&mut self) -> Option<char> {
        let digits_start = self.pos;
        while self.pos < self.end && self.bytes[self.pos].is_ascii_hexdigit() {
            self.pos += 1;
        }
        if self.pos == digits_start {
            self.error(&messages::HEXADECIMAL_DIGIT_EXPECTED, self.pos, 0);
            return None;
        }
        let value = u32::from_str_radix(&self.text[digits_start..self.pos], 16).unwrap_or(u32::MAX);
        let mut valid = true;
        if value > 0x10FFFF {
            self.error(
                &messages::AN_EXTENDED_UNICODE_ESCAPE_VALUE_MUST_BE_BETWEEN_0X0_AND_0X10FFFF_INCLUSIVE,
                digits_start,
                self.pos - digits_start,
            );
            valid = false;
        }
        if self.peek(0) == b'}' {
            self.pos += 1;
        } else {
            self.error(&messages::UNTERMINATED_UNICODE_ESCAPE_SEQUENCE, self.pos, 0);
            valid = false;
        }
        valid.then(|| char::from_u32(value).unwrap_or('\u{FFFD}'))
    }

    /// Scan a template piece starting at a backtick or at the `}` closing a
    /// substitution. Carriage returns are normalized in the cooked value.
    fn scan_template(&mut self) -> SyntaxKind {
        let started_with_backtick = self.bytes[self.pos] == b'`';
        self.pos += 1;
        let mut segment = self.pos;
        loop {
            if self.pos >= self.end {
                self.token_value.push_str(&self.text[segment..self.pos]);
                self.token_flags |= TokenFlags::UNTERMINATED;
                self.error(&messages::UNTERMINATED_TEMPLATE_LITERAL, self.pos, 0);
                return if started_with_backtick {
                    SyntaxKind::NoSubstitutionTemplateLiteral
                } else {
                    SyntaxKind::TemplateTail
                };
            }
            match self.bytes[self.pos] {
                b'`' => {
                    self.token_value.push_str(&self.text[segment..self.pos]);
                    self.pos += 1;
                    return if started_with_backtick {
                        SyntaxKind::NoSubstitutionTemplateLiteral
                    } else {
                        SyntaxKind::TemplateTail
                    };
                }
                b'$' if self.peek(1) == b'{' => {
                    self.token_value.push_str(&self.text[segment..self.pos]);
                    self.pos += 2;
                    return if started_with_backtick {
                        SyntaxKind::TemplateHead
                    } else {
                        SyntaxKind::TemplateMiddle
                    };
                }
                b'\\' => {
                    self.token_value.push_str(&self.text[segment..self.pos]);
                    self.scan_escape_sequence();
                    segment = self.pos;
                }
                b'\r' => {
                    self.token_value.push_str(&self.text[segment..self.pos]);
                    self.pos += 1;
                    if self.peek(0) == b'\n' {
                        self.pos += 1;
                    }
                    self.token_value.push('\n');
                    segment = self.pos;
                }
                _ => self.pos += 1,
            }
        }
    }

    /// Numeric and bigint literals. The token value keeps the source spelling.
    fn scan_number(&mut self) -> SyntaxKind {
        let start = self.pos;
        if self.bytes[start] == b'0' {
            let radix = match self.peek(1) {
                b'x' | b'X' => Some((16, TokenFlags::HEX_SPECIFIER, &messages::HEXADECIMAL_DIGIT_EXPECTED)),
                b'b' | b'B' => Some((2, TokenFlags::BINARY_SPECIFIER, &messages::BINARY_DIGIT_EXPECTED)),
                b'o' | b'O' => Some((8, TokenFlags::OCTAL_SPECIFIER, &messages::OCTAL_DIGIT_EXPECTED)),
                _ => None,
            };
            if let Some((radix, flag, message)) = radix {
                self.pos += 2;
                self.token_flags |= flag;
                if !self.scan_digits(radix) {
                    self.error(message, self.pos, 0);
                }
                return self.finish_numeric_literal(start, true);
            }
        }

        self.scan_digits(10);
        let integer = &self.bytes[start..self.pos];
        if integer.len() > 1 && integer[0] == b'0' && integer.iter().all(|b| (b'0'..=b'7').contains(b)) {
            self.token_flags |= TokenFlags::OCTAL;
            return self.finish_numeric_literal(start, false);
        }

        let mut is_integer = true;
        if self.peek(0) == b'.' {
            self.pos += 1;
            self.scan_digits(10);
            is_integer = false;
        }
        if matches!(self.peek(0), b'e' | b'E') {
            self.pos += 1;
            self.token_flags |= TokenFlags::SCIENTIFIC;
            if matches!(self.peek(0), b'+' | b'-') {
                self.pos += 1;
            }
            if !self.scan_digits(10) {
                self.error(&messages::DIGIT_EXPECTED, self.pos, 0);
            }
            is_integer = false;
        }
        self.finish_numeric_literal(start, is_integer)
    }

    /// Digits in `radix`, allowing single `_` separators between digits.
    fn scan_digits(&mut self, radix: u32) -> bool {
        let mut any = false;
        let mut after_digit = false;
        while self.pos < self.end {
            let b = self.bytes[self.pos];
            if (b as char).is_digit(radix) {
                any = true;
                after_digit = true;
                self.pos += 1;
            } else if b == b'_' && after_digit && (self.peek(1) as char).is_digit(radix) {
                self.token_flags |= TokenFlags::CONTAINS_SEPARATOR;
                after_digit = false;
                self.pos += 1;
            } else {
                break;
            }
        }
        any
    }

    fn finish_numeric_literal(&mut self, start: usize, allow_bigint: bool) -> SyntaxKind {
        let kind = if allow_bigint && self.peek(0) == b'n' {
            self.pos += 1;
            SyntaxKind::BigIntLiteral
        } else {
            SyntaxKind::NumericLiteral
        };
        self.token_value.push_str(&self.text[start..self.pos]);

        // `3in x` and friends: report the word, leave it for the next scan.
        if let Some(ch) = self.char_at(self.pos).filter(|&ch| is_identifier_start(ch)) {
            let word_start = self.pos;
            let mut p = word_start + ch.len_utf8();
            while let Some(ch) = self.char_at(p).filter(|&ch| is_identifier_part(ch)) {
                p += ch.len_utf8();
            }
            self.error(
                &messages::AN_IDENTIFIER_OR_KEYWORD_CANNOT_IMMEDIATELY_FOLLOW_A_NUMERIC_LITERAL,
                word_start,
                p - word_start,
            );
        }
        kind
    }

    // ========================================================================
    // Rescans
    // ========================================================================

    /// Combine a `>` with what follows into `>=`, `>>`, `>>=`, `>>>` or `>>>=`.
    pub fn rescan_greater_than_token(&mut self) -> SyntaxKind {
        if self.token != SyntaxKind::GreaterThanToken {
            return self.token;
        }
        self.token = match (self.peek(0), self.peek(1), self.peek(2)) {
            (b'>', b'>', b'=') => self.advance(3, SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken),
            (b'>', b'>', _) => self.advance(2, SyntaxKind::GreaterThanGreaterThanGreaterThanToken),
            (b'>', b'=', _) => self.advance(2, SyntaxKind::GreaterThanGreaterThanEqualsToken),
            (b'>', _, _) => self.advance(1, SyntaxKind::GreaterThanGreaterThanToken),
            (b'=', _, _) => self.advance(1, SyntaxKind::GreaterThanEqualsToken),
            _ => SyntaxKind::GreaterThanToken,
        };
        self.token
    }

    /// Reread a `/` or `/=` token as a regular expression literal.
    pub fn rescan_slash_token(&mut self) -> SyntaxKind {
        if !matches!(self.token, SyntaxKind::SlashToken | SyntaxKind::SlashEqualsToken) {
            return self.token;
        }
        let mut p = self.token_start + 1;
        let mut in_escape = false;
        let mut in_class = false;
        loop {
            if p >= self.end || line_break_len(self.bytes, p) > 0 {
                self.token_flags |= TokenFlags::UNTERMINATED;
                self.error(&messages::UNTERMINATED_REGULAR_EXPRESSION_LITERAL, p, 0);
                break;
            }
            let b = self.bytes[p];
            if in_escape {
                in_escape = false;
            } else if b == b'/' && !in_class {
                p += 1;
                break;
            } else if b == b'[' {
                in_class = true;
            } else if b == b'\\' {
                in_escape = true;
            } else if b == b']' {
                in_class = false;
            }
            p += self.char_at(p).map_or(1, char::len_utf8);
        }
        while let Some(ch) = self.char_at(p).filter(|&ch| is_identifier_part(ch)) {
            p += ch.len_utf8();
        }
        self.pos = p;
        self.token_value.clear();
        self.token_value.push_str(&self.text[self.token_start..self.pos]);
        self.token = SyntaxKind::RegularExpressionLiteral;
        self.token
    }

    /// Resume a template after the `}` that closed a substitution.
    pub fn rescan_template_token(&mut self) -> SyntaxKind {
        self.pos = self.token_start;
        self.token_value.clear();
        self.token_flags &= TokenFlags::PRECEDING_LINE_BREAK;
        self.token = self.scan_template();
        self.token
    }

    /// Split `<<` so a type argument list can start at the first `<`.
    pub fn rescan_less_than_token(&mut self) -> SyntaxKind {
        if self.token == SyntaxKind::LessThanLessThanToken {
            self.pos = self.token_start + 1;
            self.token = SyntaxKind::LessThanToken;
        }
        self.token
    }

    // ========================================================================
    // Markup
    // ========================================================================

    /// Scan from the current full start in markup child position.
    pub fn rescan_jsx_token(&mut self) -> SyntaxKind {
        self.pos = self.full_start;
        self.token_start = self.full_start;
        self.scan_jsx_token()
    }

    /// A markup child token: `<`, `</`, `{`, or a run of text.
    pub fn scan_jsx_token(&mut self) -> SyntaxKind {
        self.full_start = self.pos;
        self.token_start = self.pos;
        self.token_flags = TokenFlags::NONE;
        self.token_value.clear();
        if self.pos >= self.end {
            self.token = SyntaxKind::EndOfFileToken;
            return self.token;
        }
        self.token = match self.bytes[self.pos] {
            b'<' if self.peek(1) == b'/' => self.advance(2, SyntaxKind::LessThanSlashToken),
            b'<' => self.advance(1, SyntaxKind::LessThanToken),
            b'{' => self.advance(1, SyntaxKind::OpenBraceToken),
            _ => {
                let text_end = memchr2(b'<', b'{', &self.bytes[self.pos..])
                    .map_or(self.end, |i| self.pos + i);
                self.token_value.push_str(&self.text[self.pos..text_end]);
                self.pos = text_end;
                SyntaxKind::JsxText
            }
        };
        self.token
    }

    /// Extend an identifier or keyword token with `-` and identifier parts,
    /// the way markup tag and attribute names are spelled.
    pub fn scan_jsx_identifier(&mut self) -> SyntaxKind {
        if !self.token.is_identifier_or_keyword() {
            return self.token;
        }
        while self.pos < self.end {
            match self.char_at(self.pos) {
                Some(ch) if ch == '-' || is_identifier_part(ch) => {
                    self.token_value.push(ch);
                    self.pos += ch.len_utf8();
                }
                _ => break,
            }
        }
        self.token = if self.token_flags.contains(TokenFlags::UNICODE_ESCAPE) {
            SyntaxKind::Identifier
        } else {
            SyntaxKind::from_keyword(&self.token_value).unwrap_or(SyntaxKind::Identifier)
        };
        self.token
    }

    /// The value after `=` in a markup attribute. Quoted strings are taken
    /// verbatim, without escapes.
    pub fn scan_jsx_attribute_value(&mut self) -> SyntaxKind {
        self.full_start = self.pos;
        match self.peek(0) {
            quote @ (b'"' | b'\'') => {
                self.token_start = self.pos;
                self.token_flags = TokenFlags::NONE;
                self.token_value.clear();
                let body_start = self.pos + 1;
                match memchr::memchr(quote, &self.bytes[body_start..]) {
                    Some(i) => {
                        self.token_value.push_str(&self.text[body_start..body_start + i]);
                        self.pos = body_start + i + 1;
                    }
                    None => {
                        self.token_value.push_str(&self.text[body_start..self.end]);
                        self.token_flags |= TokenFlags::UNTERMINATED;
                        self.error(&messages::UNTERMINATED_STRING_LITERAL, self.end, 0);
                        self.pos = self.end;
                    }
                }
                self.token = SyntaxKind::StringLiteral;
                self.token
            }
            _ => self.scan(),
        }
    }

    // ========================================================================
    // Documentation comments
    // ========================================================================

    /// A token inside a `/** ... */` block. Whitespace and line breaks come
    /// back as trivia tokens; names may contain `-`.
    pub fn scan_jsdoc_token(&mut self) -> SyntaxKind {
        self.full_start = self.pos;
        self.token_start = self.pos;
        self.token_flags = TokenFlags::NONE;
        self.token_value.clear();
        if self.pos >= self.end {
            self.token = SyntaxKind::EndOfFileToken;
            return self.token;
        }
        let b = self.bytes[self.pos];
        self.token = match b {
            b' ' | b'\t' | 0x0B | 0x0C => {
                while matches!(self.peek(0), b' ' | b'\t' | 0x0B | 0x0C) {
                    self.pos += 1;
                }
                SyntaxKind::WhitespaceTrivia
            }
            b'\r' if self.peek(1) == b'\n' => self.advance(2, SyntaxKind::NewLineTrivia),
            b'\n' | b'\r' => self.advance(1, SyntaxKind::NewLineTrivia),
            b'@' => self.advance(1, SyntaxKind::AtToken),
            b'*' => self.advance(1, SyntaxKind::AsteriskToken),
            b'{' => self.advance(1, SyntaxKind::OpenBraceToken),
            b'}' => self.advance(1, SyntaxKind::CloseBraceToken),
            b'[' => self.advance(1, SyntaxKind::OpenBracketToken),
            b']' => self.advance(1, SyntaxKind::CloseBracketToken),
            b'=' => self.advance(1, SyntaxKind::EqualsToken),
            b',' => self.advance(1, SyntaxKind::CommaToken),
            b'.' => self.advance(1, SyntaxKind::DotToken),
            _ => {
                let ch = self.char_at(self.pos).unwrap_or('\u{FFFD}');
                if is_identifier_start(ch) {
                    let start = self.pos;
                    self.pos += ch.len_utf8();
                    while let Some(ch) = self
                        .char_at(self.pos)
                        .filter(|&ch| ch == '-' || is_identifier_part(ch))
                    {
                        self.pos += ch.len_utf8();
                    }
                    self.token_value.push_str(&self.text[start..self.pos]);
                    SyntaxKind::Identifier
                } else {
                    self.pos += ch.len_utf8().max(1);
                    SyntaxKind::Unknown
                }
            }
        };
        self.token
    }
}

// ============================================================================
// Free helpers
// ============================================================================

/// Length in bytes of the line terminator at `pos`, or 0.
fn line_break_len(bytes: &[u8], pos: usize) -> usize {
    match bytes.get(pos) {
        Some(b'\n') | Some(b'\r') => 1,
        Some(0xE2) if bytes.get(pos + 1) == Some(&0x80) && matches!(bytes.get(pos + 2), Some(0xA8 | 0xA9)) => 3,
        _ => 0,
    }
}

/// Offset of the first line terminator at or after `from`, or `bytes.len()`.
fn find_line_break(bytes: &[u8], from: usize) -> usize {
    let mut p = from;
    while p < bytes.len() {
        match memchr3(b'\n', b'\r', 0xE2, &bytes[p..]) {
            Some(i) => {
                if line_break_len(bytes, p + i) > 0 {
                    return p + i;
                }
                p += i + 1;
            }
            None => break,
        }
    }
    bytes.len()
}

/// Seven `<`, `=`, `>` or `|` at the start of a line. All but `=======` must be
/// followed by a space.
fn is_conflict_marker_trivia(bytes: &[u8], pos: usize) -> bool {
    if pos > 0 && !matches!(bytes[pos - 1], b'\n' | b'\r') {
        return false;
    }
    let Some(marker) = bytes.get(pos..pos + MERGE_CONFLICT_MARKER_LENGTH) else {
        return false;
    };
    let ch = marker[0];
    marker.iter().all(|&b| b == ch)
        && (ch == b'=' || bytes.get(pos + MERGE_CONFLICT_MARKER_LENGTH) == Some(&b' '))
}

/// End of the conflict marker region starting at `pos`. `<<<<<<<` and
/// `>>>>>>>` cover their line; `|||||||` and `=======` run up to the next
/// `=======` or `>>>>>>>` marker.
fn conflict_marker_end(bytes: &[u8], pos: usize) -> usize {
    let ch = bytes[pos];
    if ch == b'<' || ch == b'>' {
        return find_line_break(bytes, pos);
    }
    let mut p = pos;
    while p < bytes.len() {
        let c = bytes[p];
        if (c == b'=' || c == b'>') && c != ch && is_conflict_marker_trivia(bytes, p) {
            break;
        }
        p += 1;
    }
    p
}

/// Offset of the first non-trivia character at or after `pos`.
pub fn skip_trivia(text: &str, mut pos: usize) -> usize {
    let bytes = text.as_bytes();
    loop {
        let Some(&b) = bytes.get(pos) else {
            return pos.min(bytes.len());
        };
        match b {
            b'\n' | b'\r' | b' ' | b'\t' | 0x0B | 0x0C => pos += 1,
            b'/' if bytes.get(pos + 1) == Some(&b'/') => pos = find_line_break(bytes, pos + 2),
            b'/' if bytes.get(pos + 1) == Some(&b'*') => {
                pos = match memmem::find(&bytes[pos + 2..], b"*/") {
                    Some(i) => pos + 2 + i + 2,
                    None => bytes.len(),
                };
            }
            b'#' if pos == 0 && bytes.get(1) == Some(&b'!') => pos = find_line_break(bytes, 2),
            b'<' | b'=' | b'>' | b'|' if is_conflict_marker_trivia(bytes, pos) => {
                pos = conflict_marker_end(bytes, pos);
            }
            0x80..=0xFF => match text.get(pos..).and_then(|rest| rest.chars().next()) {
                Some(ch) if is_white_space_like(ch) => pos += ch.len_utf8(),
                _ => return pos,
            },
            _ => return pos,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standard(text: &str) -> Scanner<'_> {
        Scanner::new(text, LanguageVariant::Standard)
    }

    fn kinds(text: &str) -> Vec<SyntaxKind> {
        let mut scanner = standard(text);
        let mut result = Vec::new();
        loop {
            let kind = scanner.scan();
            if kind == SyntaxKind::EndOfFileToken {
                return result;
            }
            result.push(kind);
        }
    }

    #[test]
    fn test_scan_punctuation() {
        assert_eq!(
            kinds("( ) { } [ ] ; , : ... ?. ?? ??= => @ ~"),
            vec![
                SyntaxKind::OpenParenToken,
                SyntaxKind::CloseParenToken,
                SyntaxKind::OpenBraceToken,
                SyntaxKind::CloseBraceToken,
                SyntaxKind::OpenBracketToken,
                SyntaxKind::CloseBracketToken,
                SyntaxKind::SemicolonToken,
                SyntaxKind::CommaToken,
                SyntaxKind::ColonToken,
                SyntaxKind::DotDotDotToken,
                SyntaxKind::QuestionDotToken,
                SyntaxKind::QuestionQuestionToken,
                SyntaxKind::QuestionQuestionEqualsToken,
                SyntaxKind::EqualsGreaterThanToken,
                SyntaxKind::AtToken,
                SyntaxKind::TildeToken,
            ]
        );
    }

    #[test]
    fn test_scan_operators() {
        assert_eq!(
            kinds("+ ++ += - -- -= * ** **= / /= % === !== == != &&= ||= << <<= >"),
            vec![
                SyntaxKind::PlusToken,
                SyntaxKind::PlusPlusToken,
                SyntaxKind::PlusEqualsToken,
                SyntaxKind::MinusToken,
                SyntaxKind::MinusMinusToken,
                SyntaxKind::MinusEqualsToken,
                SyntaxKind::AsteriskToken,
                SyntaxKind::AsteriskAsteriskToken,
                SyntaxKind::AsteriskAsteriskEqualsToken,
                SyntaxKind::SlashToken,
                SyntaxKind::SlashEqualsToken,
                SyntaxKind::PercentToken,
                SyntaxKind::EqualsEqualsEqualsToken,
                SyntaxKind::ExclamationEqualsEqualsToken,
                SyntaxKind::EqualsEqualsToken,
                SyntaxKind::ExclamationEqualsToken,
                SyntaxKind::AmpersandAmpersandEqualsToken,
                SyntaxKind::BarBarEqualsToken,
                SyntaxKind::LessThanLessThanToken,
                SyntaxKind::LessThanLessThanEqualsToken,
                SyntaxKind::GreaterThanToken,
            ]
        );
    }

    #[test]
    fn test_question_dot_before_digit() {
        assert_eq!(
            kinds("a?.5:b"),
            vec![
                SyntaxKind::Identifier,
                SyntaxKind::QuestionToken,
                SyntaxKind::NumericLiteral,
                SyntaxKind::ColonToken,
                SyntaxKind::Identifier,
            ]
        );
    }

    #[test]
    fn test_scan_identifier_and_keyword() {
        let mut scanner = standard("let x = 42;");
        assert_eq!(scanner.scan(), SyntaxKind::LetKeyword);
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
        assert_eq!(scanner.token_value(), "x");
        assert_eq!(scanner.token_start(), 4);
        assert_eq!(scanner.full_start(), 3);
        assert_eq!(scanner.scan(), SyntaxKind::EqualsToken);
        assert_eq!(scanner.scan(), SyntaxKind::NumericLiteral);
        assert_eq!(scanner.token_value(), "42");
        assert_eq!(scanner.scan(), SyntaxKind::SemicolonToken);
        assert_eq!(scanner.scan(), SyntaxKind::EndOfFileToken);
    }

    #[test]
    fn test_unicode_identifiers_and_escapes() {
        let mut scanner = standard("café \\u0061b \\u{62}reak");
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
        assert_eq!(scanner.token_value(), "café");
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
        assert_eq!(scanner.token_value(), "ab");
        assert!(scanner.token_flags().contains(TokenFlags::UNICODE_ESCAPE));
        // An escaped keyword stays an identifier.
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
        assert_eq!(scanner.token_value(), "break");
    }

    #[test]
    fn test_private_identifier_and_hash() {
        let mut scanner = standard("#count #");
        assert_eq!(scanner.scan(), SyntaxKind::PrivateIdentifier);
        assert_eq!(scanner.token_value(), "#count");
        assert_eq!(scanner.scan(), SyntaxKind::HashToken);
    }

    #[test]
    fn test_scan_string_escapes() {
        let mut scanner = standard(r#""a\tb\x41B\u{1F600}\
c" 'it\'s'"#);
        assert_eq!(scanner.scan(), SyntaxKind::StringLiteral);
        assert_eq!(scanner.token_value(), "a\tbAB\u{1F600}c");
        assert!(scanner.token_flags().contains(TokenFlags::EXTENDED_UNICODE_ESCAPE));
        assert_eq!(scanner.scan(), SyntaxKind::StringLiteral);
        assert_eq!(scanner.token_value(), "it's");
        assert!(!scanner.has_errors());
    }

    #[test]
    fn test_unterminated_string() {
        let mut scanner = standard("'abc\nx");
        assert_eq!(scanner.scan(), SyntaxKind::StringLiteral);
        assert!(scanner.is_unterminated());
        assert_eq!(scanner.token_value(), "abc");
        let errors = scanner.take_errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message.code, messages::UNTERMINATED_STRING_LITERAL.code);
        assert_eq!(errors[0].pos, 4);
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
        assert!(scanner.has_preceding_line_break());
    }

    #[test]
    fn test_extended_escape_out_of_range() {
        let mut scanner = standard(r#""\u{110000}""#);
        scanner.scan();
        let errors = scanner.take_errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message.code, 1198);
    }

    #[test]
    fn test_scan_numbers() {
        let mut scanner = standard("0x1F 0b1010 0o17 017 1_000 1.5e-3 .5 10n");
        assert_eq!(scanner.scan(), SyntaxKind::NumericLiteral);
        assert_eq!(scanner.token_value(), "0x1F");
        assert!(scanner.token_flags().contains(TokenFlags::HEX_SPECIFIER));
        assert_eq!(scanner.scan(), SyntaxKind::NumericLiteral);
        assert!(scanner.token_flags().contains(TokenFlags::BINARY_SPECIFIER));
        assert_eq!(scanner.scan(), SyntaxKind::NumericLiteral);
        assert!(scanner.token_flags().contains(TokenFlags::OCTAL_SPECIFIER));
        assert_eq!(scanner.scan(), SyntaxKind::NumericLiteral);
        assert!(scanner.token_flags().contains(TokenFlags::OCTAL));
        assert_eq!(scanner.scan(), SyntaxKind::NumericLiteral);
        assert!(scanner.token_flags().contains(TokenFlags::CONTAINS_SEPARATOR));
        assert_eq!(scanner.token_value(), "1_000");
        assert_eq!(scanner.scan(), SyntaxKind::NumericLiteral);
        assert!(scanner.token_flags().contains(TokenFlags::SCIENTIFIC));
        assert_eq!(scanner.token_value(), "1.5e-3");
        assert_eq!(scanner.scan(), SyntaxKind::NumericLiteral);
        assert_eq!(scanner.token_value(), ".5");
        assert_eq!(scanner.scan(), SyntaxKind::BigIntLiteral);
        assert_eq!(scanner.token_value(), "10n");
        assert!(!scanner.has_errors());
    }

    #[test]
    fn test_number_errors() {
        let mut scanner = standard("0x 1e+ 3in");
        assert_eq!(scanner.scan(), SyntaxKind::NumericLiteral);
        assert_eq!(scanner.take_errors()[0].message.code, messages::HEXADECIMAL_DIGIT_EXPECTED.code);
        assert_eq!(scanner.scan(), SyntaxKind::NumericLiteral);
        assert_eq!(scanner.take_errors()[0].message.code, messages::DIGIT_EXPECTED.code);
        assert_eq!(scanner.scan(), SyntaxKind::NumericLiteral);
        let errors = scanner.take_errors();
        assert_eq!(errors[0].message.code, 1351);
        assert_eq!((errors[0].pos, errors[0].length), (8, 2));
        assert_eq!(scanner.scan(), SyntaxKind::InKeyword);
    }

    #[test]
    fn test_comments_and_line_breaks() {
        let mut scanner = standard("a // one\n/* two\n */ b /** doc */ c /**/ d");
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
        assert!(!scanner.has_preceding_line_break());
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
        assert!(scanner.has_preceding_line_break());
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
        assert!(scanner.has_preceding_jsdoc_comment());
        assert!(!scanner.has_preceding_line_break());
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
        assert!(!scanner.has_preceding_jsdoc_comment());
    }

    #[test]
    fn test_unterminated_comment() {
        let mut scanner = standard("a /* b");
        scanner.scan();
        assert_eq!(scanner.scan(), SyntaxKind::EndOfFileToken);
        assert_eq!(scanner.take_errors()[0].message.code, messages::ASTERISK_SLASH_EXPECTED.code);
    }

    #[test]
    fn test_shebang_and_conflict_markers() {
        let text = "#!/usr/bin/env node\nx;\n<<<<<<< HEAD\na;\n=======\nb;\n>>>>>>> branch\nc;";
        let mut scanner = standard(text);
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
        assert_eq!(scanner.token_value(), "x");
        assert_eq!(scanner.scan(), SyntaxKind::SemicolonToken);
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
        assert_eq!(scanner.token_value(), "a");
        assert_eq!(scanner.scan(), SyntaxKind::SemicolonToken);
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
        assert_eq!(scanner.token_value(), "c");
        let errors = scanner.take_errors();
        assert_eq!(errors.len(), 3);
        assert!(errors
            .iter()
            .all(|e| e.message.code == messages::MERGE_CONFLICT_MARKER_ENCOUNTERED.code));
    }

    #[test]
    fn test_template_tokens() {
        let mut scanner = standard("`a${x}b${y}c` `plain`");
        assert_eq!(scanner.scan(), SyntaxKind::TemplateHead);
        assert_eq!(scanner.token_value(), "a");
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
        assert_eq!(scanner.scan(), SyntaxKind::CloseBraceToken);
        assert_eq!(scanner.rescan_template_token(), SyntaxKind::TemplateMiddle);
        assert_eq!(scanner.token_value(), "b");
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
        assert_eq!(scanner.scan(), SyntaxKind::CloseBraceToken);
        assert_eq!(scanner.rescan_template_token(), SyntaxKind::TemplateTail);
        assert_eq!(scanner.token_value(), "c");
        assert_eq!(scanner.scan(), SyntaxKind::NoSubstitutionTemplateLiteral);
        assert_eq!(scanner.token_value(), "plain");
    }

    #[test]
    fn test_template_normalizes_carriage_returns() {
        let mut scanner = standard("`a\r\nb`");
        scanner.scan();
        assert_eq!(scanner.token_value(), "a\nb");
    }

    #[test]
    fn test_rescan_greater_than() {
        let mut scanner = standard("a >>>= b >= c >> d");
        scanner.scan();
        assert_eq!(scanner.scan(), SyntaxKind::GreaterThanToken);
        assert_eq!(
            scanner.rescan_greater_than_token(),
            SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken
        );
        scanner.scan();
        scanner.scan();
        assert_eq!(scanner.rescan_greater_than_token(), SyntaxKind::GreaterThanEqualsToken);
        scanner.scan();
        scanner.scan();
        assert_eq!(scanner.rescan_greater_than_token(), SyntaxKind::GreaterThanGreaterThanToken);
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    }

    #[test]
    fn test_rescan_regex() {
        let mut scanner = standard("/[/]\\/x/gi.test");
        assert_eq!(scanner.scan(), SyntaxKind::SlashToken);
        assert_eq!(scanner.rescan_slash_token(), SyntaxKind::RegularExpressionLiteral);
        assert_eq!(scanner.token_value(), "/[/]\\/x/gi");
        assert_eq!(scanner.scan(), SyntaxKind::DotToken);

        let mut scanner = standard("/abc\n");
        scanner.scan();
        scanner.rescan_slash_token();
        assert!(scanner.is_unterminated());
        assert_eq!(
            scanner.take_errors()[0].message.code,
            messages::UNTERMINATED_REGULAR_EXPRESSION_LITERAL.code
        );
    }

    #[test]
    fn test_rescan_less_than() {
        let mut scanner = standard("<<T>");
        assert_eq!(scanner.scan(), SyntaxKind::LessThanLessThanToken);
        assert_eq!(scanner.rescan_less_than_token(), SyntaxKind::LessThanToken);
        assert_eq!(scanner.scan(), SyntaxKind::LessThanToken);
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    }

    #[test]
    fn test_markup_tokens() {
        let text = "<my-el data-x='a\\b'>hi {x}</my-el>";
        let mut scanner = Scanner::new(text, LanguageVariant::Jsx);
        assert_eq!(scanner.scan(), SyntaxKind::LessThanToken);
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
        assert_eq!(scanner.scan_jsx_identifier(), SyntaxKind::Identifier);
        assert_eq!(scanner.token_value(), "my-el");
        scanner.scan();
        scanner.scan_jsx_identifier();
        assert_eq!(scanner.token_value(), "data-x");
        assert_eq!(scanner.scan(), SyntaxKind::EqualsToken);
        assert_eq!(scanner.scan_jsx_attribute_value(), SyntaxKind::StringLiteral);
        assert_eq!(scanner.token_value(), "a\\b");
        assert_eq!(scanner.scan(), SyntaxKind::GreaterThanToken);
        assert_eq!(scanner.scan_jsx_token(), SyntaxKind::JsxText);
        assert_eq!(scanner.token_value(), "hi ");
        assert_eq!(scanner.scan_jsx_token(), SyntaxKind::OpenBraceToken);
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
        assert_eq!(scanner.scan(), SyntaxKind::CloseBraceToken);
        assert_eq!(scanner.scan_jsx_token(), SyntaxKind::LessThanSlashToken);
    }

    #[test]
    fn test_less_than_slash_only_in_markup() {
        assert_eq!(kinds("a </ b")[1], SyntaxKind::LessThanToken);
        let mut scanner = Scanner::new("</a", LanguageVariant::Jsx);
        assert_eq!(scanner.scan(), SyntaxKind::LessThanSlashToken);
        let mut scanner = Scanner::new("</* c */", LanguageVariant::Jsx);
        assert_eq!(scanner.scan(), SyntaxKind::LessThanToken);
    }

    #[test]
    fn test_jsdoc_tokens() {
        let mut scanner = Scanner::new("* @param {x} my-name\r\n", LanguageVariant::Standard);
        let mut seen = Vec::new();
        while scanner.scan_jsdoc_token() != SyntaxKind::EndOfFileToken {
            seen.push(scanner.token());
        }
        assert_eq!(
            seen,
            vec![
                SyntaxKind::AsteriskToken,
                SyntaxKind::WhitespaceTrivia,
                SyntaxKind::AtToken,
                SyntaxKind::Identifier,
                SyntaxKind::WhitespaceTrivia,
                SyntaxKind::OpenBraceToken,
                SyntaxKind::Identifier,
                SyntaxKind::CloseBraceToken,
                SyntaxKind::WhitespaceTrivia,
                SyntaxKind::Identifier,
                SyntaxKind::NewLineTrivia,
            ]
        );
    }

    #[test]
    fn test_invalid_character() {
        let mut scanner = standard("a ¤ b");
        scanner.scan();
        assert_eq!(scanner.scan(), SyntaxKind::Unknown);
        assert_eq!(scanner.take_errors()[0].message.code, messages::INVALID_CHARACTER.code);
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    }

    #[test]
    fn test_save_restore_and_reset() {
        let mut scanner = standard("a b c");
        scanner.scan();
        let state = scanner.save_state();
        scanner.scan();
        scanner.scan();
        scanner.restore_state(state);
        assert_eq!(scanner.token_value(), "a");
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
        assert_eq!(scanner.token_value(), "b");

        scanner.reset_to(3);
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
        assert_eq!(scanner.token_value(), "c");
        assert_eq!(scanner.full_start(), 3);
    }

    #[test]
    fn test_range_limited_scanner() {
        let text = "ignored {number} ignored";
        let mut scanner = Scanner::with_range(text, LanguageVariant::Standard, 8, 8);
        assert_eq!(scanner.scan(), SyntaxKind::OpenBraceToken);
        assert_eq!(scanner.scan(), SyntaxKind::NumberKeyword);
        assert_eq!(scanner.scan(), SyntaxKind::CloseBraceToken);
        assert_eq!(scanner.scan(), SyntaxKind::EndOfFileToken);
        assert_eq!(scanner.token_start(), 16);
    }

    #[test]
    fn test_skip_trivia() {
        let text = "#!shebang\n  // c\n /* d */ x";
        assert_eq!(skip_trivia(text, 0), text.len() - 1);
        assert_eq!(skip_trivia("a", 0), 0);
        assert_eq!(skip_trivia("\u{00A0}\u{2028}b", 0), 5);
        assert_eq!(skip_trivia("  ", 5), 2);
    }
}
