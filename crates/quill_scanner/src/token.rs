//! Values the scanner hands out besides the token kind itself.

use quill_ast::syntax_kind::SyntaxKind;
use quill_ast::types::TokenFlags;
use quill_diagnostics::DiagnosticMessage;

/// A lexical error. The parser turns these into diagnostics as it drains them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanError {
    pub pos: u32,
    pub length: u32,
    pub message: &'static DiagnosticMessage,
}

/// Everything needed to put the scanner back where it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannerState {
    pub(crate) pos: usize,
    pub(crate) full_start: usize,
    pub(crate) token_start: usize,
    pub(crate) token: SyntaxKind,
    pub(crate) token_value: String,
    pub(crate) token_flags: TokenFlags,
}

impl ScannerState {
    /// Offset the scanner will resume from.
    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn token(&self) -> SyntaxKind {
        self.token
    }
}
