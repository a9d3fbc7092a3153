//! Parse configuration.

use quill_ast::types::{LanguageVariant, ScriptKind};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default limit for nested statements, expressions and types.
pub const DEFAULT_MAX_NESTING_DEPTH: u32 = 200;

/// Options for one parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParseOptions {
    /// Whether markup elements are recognized in expression position.
    pub language_variant: LanguageVariant,
    pub script_kind: ScriptKind,
    /// Nesting beyond this depth is reported and replaced by a missing node.
    pub max_nesting_depth: u32,
    /// Build the parent side-table as part of the parse.
    pub set_parent_nodes: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            language_variant: LanguageVariant::Standard,
            script_kind: ScriptKind::Ts,
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
            set_parent_nodes: false,
        }
    }
}

#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("invalid parse options: {0}")]
    Json(#[from] serde_json::Error),
}

impl ParseOptions {
    pub fn from_json(json: &str) -> Result<Self, OptionsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Options inferred from the file extension. Unknown extensions parse as
    /// standard source.
    pub fn for_file_name(file_name: &str) -> Self {
        let script_kind = ScriptKind::from_file_name(file_name).unwrap_or(ScriptKind::Ts);
        Self {
            language_variant: script_kind.language_variant(),
            script_kind,
            ..Self::default()
        }
    }

    pub fn with_language_variant(mut self, language_variant: LanguageVariant) -> Self {
        self.language_variant = language_variant;
        self
    }

    pub fn with_max_nesting_depth(mut self, depth: u32) -> Self {
        self.max_nesting_depth = depth;
        self
    }

    pub fn with_parent_nodes(mut self, set_parent_nodes: bool) -> Self {
        self.set_parent_nodes = set_parent_nodes;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_json() {
        let options = ParseOptions::from_json("{}").unwrap();
        assert_eq!(options, ParseOptions::default());
        assert_eq!(options.max_nesting_depth, DEFAULT_MAX_NESTING_DEPTH);
    }

    #[test]
    fn test_from_json_camel_case() {
        let options = ParseOptions::from_json(
            r#"{"languageVariant": "markup", "scriptKind": "tsx", "maxNestingDepth": 64, "setParentNodes": true}"#,
        )
        .unwrap();
        assert_eq!(options.language_variant, LanguageVariant::Jsx);
        assert_eq!(options.script_kind, ScriptKind::Tsx);
        assert_eq!(options.max_nesting_depth, 64);
        assert!(options.set_parent_nodes);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        let err = ParseOptions::from_json(r#"{"maxNestingDepth": "deep"}"#).unwrap_err();
        assert!(err.to_string().starts_with("invalid parse options"));
    }

    #[test]
    fn test_for_file_name() {
        let options = ParseOptions::for_file_name("view.tsx");
        assert_eq!(options.language_variant, LanguageVariant::Jsx);
        assert_eq!(options.script_kind, ScriptKind::Tsx);

        let options = ParseOptions::for_file_name("lib.ts");
        assert_eq!(options.language_variant, LanguageVariant::Standard);

        let options = ParseOptions::for_file_name("Makefile");
        assert_eq!(options.script_kind, ScriptKind::Ts);
    }
}
