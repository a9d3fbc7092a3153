//! Character classification used by the scanner.

use unicode_xid::UnicodeXID;

#[inline]
pub fn is_line_break(ch: char) -> bool {
    matches!(ch, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// Whitespace other than line terminators.
#[inline]
pub fn is_white_space_single_line(ch: char) -> bool {
    matches!(
        ch,
        ' ' | '\t'
            | '\u{000B}'
            | '\u{000C}'
            | '\u{0085}'
            | '\u{00A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200B}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

#[inline]
pub fn is_white_space_like(ch: char) -> bool {
    is_white_space_single_line(ch) || is_line_break(ch)
}

/// Whether `ch` can start an identifier.
#[inline]
pub fn is_identifier_start(ch: char) -> bool {
    ch.is_ascii_alphabetic()
        || ch == '_'
        || ch == '$'
        || (!ch.is_ascii() && UnicodeXID::is_xid_start(ch))
}

/// Whether `ch` can continue an identifier.
#[inline]
pub fn is_identifier_part(ch: char) -> bool {
    ch.is_ascii_alphanumeric()
        || ch == '_'
        || ch == '$'
        || (!ch.is_ascii()
            && (UnicodeXID::is_xid_continue(ch) || ch == '\u{200C}' || ch == '\u{200D}'))
}

/// Whether `text` is a well-formed identifier: non-empty, an identifier start
/// followed by identifier parts. Keywords are not rejected.
pub fn is_identifier_text(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if is_identifier_start(first) => chars.all(is_identifier_part),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_text() {
        assert!(is_identifier_text("param"));
        assert!(is_identifier_text("$x_1"));
        assert!(is_identifier_text("café"));
        assert!(is_identifier_text("return"));
        assert!(!is_identifier_text(""));
        assert!(!is_identifier_text("1abc"));
        assert!(!is_identifier_text("a-b"));
    }

    #[test]
    fn test_white_space() {
        assert!(is_white_space_single_line('\u{00A0}'));
        assert!(!is_white_space_single_line('\n'));
        assert!(is_line_break('\u{2028}'));
        assert!(is_white_space_like('\r'));
    }
}
