//! Flag sets and small enums attached to nodes and tokens.

use crate::syntax_kind::SyntaxKind;
use serde::{Deserialize, Serialize};

bitflags::bitflags! {
    /// Structural flags for a node.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct NodeFlags: u16 {
        const NONE                 = 0;
        const LET                  = 1 << 0;
        const CONST                = 1 << 1;
        const NESTED_NAMESPACE     = 1 << 2;
        const NAMESPACE            = 1 << 3;
        const GLOBAL_AUGMENTATION  = 1 << 4;
        const OPTIONAL_CHAIN       = 1 << 5;
        /// A diagnostic was reported while this node was being parsed.
        const THIS_NODE_HAS_ERROR  = 1 << 6;
        /// Zero-width placeholder synthesized in place of an expected node.
        const MISSING              = 1 << 7;

        const BLOCK_SCOPED = Self::LET.bits() | Self::CONST.bits();
    }
}

bitflags::bitflags! {
    /// Grammar context a node was parsed in. Two nodes with different context
    /// flags may parse differently from the same text.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ContextFlags: u8 {
        const NONE        = 0;
        const DISALLOW_IN = 1 << 0;
        const YIELD       = 1 << 1;
        const AWAIT       = 1 << 2;
        const DECORATOR   = 1 << 3;
        /// Inside an `infer X extends ...` constraint, where a following `?`
        /// belongs to an enclosing conditional type.
        const DISALLOW_CONDITIONAL_TYPES = 1 << 4;
    }
}

bitflags::bitflags! {
    /// Facts the scanner records about the current token.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TokenFlags: u16 {
        const NONE                    = 0;
        const PRECEDING_LINE_BREAK    = 1 << 0;
        const PRECEDING_JSDOC_COMMENT = 1 << 1;
        const UNTERMINATED            = 1 << 2;
        const EXTENDED_UNICODE_ESCAPE = 1 << 3;
        const SCIENTIFIC              = 1 << 4;
        const OCTAL                   = 1 << 5;
        const HEX_SPECIFIER           = 1 << 6;
        const BINARY_SPECIFIER        = 1 << 7;
        const OCTAL_SPECIFIER         = 1 << 8;
        const CONTAINS_SEPARATOR      = 1 << 9;
        const UNICODE_ESCAPE          = 1 << 10;

        const NUMERIC_LITERAL_FLAGS = Self::SCIENTIFIC.bits()
            | Self::OCTAL.bits()
            | Self::HEX_SPECIFIER.bits()
            | Self::BINARY_SPECIFIER.bits()
            | Self::OCTAL_SPECIFIER.bits()
            | Self::CONTAINS_SEPARATOR.bits();
    }
}

bitflags::bitflags! {
    /// Summary of the modifier keywords on a declaration.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ModifierFlags: u16 {
        const NONE      = 0;
        const EXPORT    = 1 << 0;
        const AMBIENT   = 1 << 1;
        const PUBLIC    = 1 << 2;
        const PRIVATE   = 1 << 3;
        const PROTECTED = 1 << 4;
        const STATIC    = 1 << 5;
        const READONLY  = 1 << 6;
        const ABSTRACT  = 1 << 7;
        const ASYNC     = 1 << 8;
        const DEFAULT   = 1 << 9;
        const CONST     = 1 << 10;
        const OVERRIDE  = 1 << 11;
    }
}

impl ModifierFlags {
    pub fn from_kind(kind: SyntaxKind) -> ModifierFlags {
        match kind {
            SyntaxKind::ExportKeyword => ModifierFlags::EXPORT,
            SyntaxKind::DeclareKeyword => ModifierFlags::AMBIENT,
            SyntaxKind::PublicKeyword => ModifierFlags::PUBLIC,
            SyntaxKind::PrivateKeyword => ModifierFlags::PRIVATE,
            SyntaxKind::ProtectedKeyword => ModifierFlags::PROTECTED,
            SyntaxKind::StaticKeyword => ModifierFlags::STATIC,
            SyntaxKind::ReadonlyKeyword => ModifierFlags::READONLY,
            SyntaxKind::AbstractKeyword => ModifierFlags::ABSTRACT,
            SyntaxKind::AsyncKeyword => ModifierFlags::ASYNC,
            SyntaxKind::DefaultKeyword => ModifierFlags::DEFAULT,
            SyntaxKind::ConstKeyword => ModifierFlags::CONST,
            SyntaxKind::OverrideKeyword => ModifierFlags::OVERRIDE,
            _ => ModifierFlags::NONE,
        }
    }
}

/// Whether markup syntax is recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LanguageVariant {
    #[default]
    Standard,
    #[serde(rename = "markup", alias = "jsx")]
    Jsx,
}

/// The kind of file being parsed, normally derived from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScriptKind {
    Unknown,
    Js,
    Jsx,
    #[default]
    Ts,
    Tsx,
    Json,
}

impl ScriptKind {
    pub fn from_file_name(file_name: &str) -> Option<ScriptKind> {
        let ext = file_name.rsplit_once('.')?.1;
        match ext.to_ascii_lowercase().as_str() {
            "js" | "mjs" | "cjs" => Some(ScriptKind::Js),
            "jsx" => Some(ScriptKind::Jsx),
            "ts" | "mts" | "cts" => Some(ScriptKind::Ts),
            "tsx" => Some(ScriptKind::Tsx),
            "json" => Some(ScriptKind::Json),
            _ => None,
        }
    }

    pub fn language_variant(self) -> LanguageVariant {
        match self {
            ScriptKind::Jsx | ScriptKind::Tsx => LanguageVariant::Jsx,
            ScriptKind::Unknown | ScriptKind::Js | ScriptKind::Ts | ScriptKind::Json => {
                LanguageVariant::Standard
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_kind_from_file_name() {
        assert_eq!(ScriptKind::from_file_name("a.tsx"), Some(ScriptKind::Tsx));
        assert_eq!(ScriptKind::from_file_name("dir.v2/a.MTS"), Some(ScriptKind::Ts));
        assert_eq!(ScriptKind::from_file_name("a.jsx"), Some(ScriptKind::Jsx));
        assert_eq!(ScriptKind::from_file_name("README"), None);
        assert_eq!(ScriptKind::Tsx.language_variant(), LanguageVariant::Jsx);
        assert_eq!(ScriptKind::Js.language_variant(), LanguageVariant::Standard);
    }

    #[test]
    fn test_modifier_flags() {
        let flags = ModifierFlags::from_kind(SyntaxKind::ExportKeyword)
            | ModifierFlags::from_kind(SyntaxKind::DeclareKeyword);
        assert!(flags.contains(ModifierFlags::EXPORT | ModifierFlags::AMBIENT));
        assert_eq!(ModifierFlags::from_kind(SyntaxKind::Identifier), ModifierFlags::NONE);
    }
}
