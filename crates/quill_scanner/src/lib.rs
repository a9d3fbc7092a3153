//! quill_scanner: tokens from source text.
//!
//! The scanner works on byte offsets and covers:
//! - trivia, with preceding-line-break and doc-comment tracking
//! - every punctuation, keyword and literal token
//! - rescans for `>` runs, regular expressions and template continuations
//! - markup text, markup names and documentation-comment tokens

mod char_codes;
mod scanner;
mod token;

pub use char_codes::{
    is_identifier_part, is_identifier_start, is_identifier_text, is_line_break,
    is_white_space_like, is_white_space_single_line,
};
pub use scanner::{skip_trivia, Scanner};
pub use token::{ScanError, ScannerState};
