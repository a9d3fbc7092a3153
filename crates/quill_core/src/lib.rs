//! quill_core: shared foundations for the quill parser.
//!
//! Text positions and edits, string interning, and small collections.

pub mod collections;
pub mod intern;
pub mod text;

pub use intern::{InternedString, StringInterner};
pub use text::{LineMap, TextChange, TextPos, TextRange, TextSpan};
