//! quill_parser: error-tolerant, incremental recursive descent parser.
//!
//! Builds a [`SourceFile`] from source text in the standard or markup
//! variant. Malformed input never fails: it produces diagnostics and
//! placeholder nodes. Edits can be applied to an existing tree with
//! [`update_source_file`], which reuses the parts the edit did not touch.
//! Documentation comments are parsed on demand with
//! [`parse_isolated_jsdoc_comment`].

mod expressions;
mod incremental;
mod jsdoc;
mod jsx;
mod options;
mod parser;
mod precedence;
mod statements;
mod types;
mod utilities;

pub use incremental::{update_source_file, UpdateError};
pub use jsdoc::{parse_isolated_jsdoc_comment, parse_jsdoc_type_expression_for_tests, JsDocParseResult};
pub use options::{OptionsError, ParseOptions, DEFAULT_MAX_NESTING_DEPTH};
pub use parser::Parser;

use quill_ast::SourceFile;
use rayon::prelude::*;
use tracing::instrument;

/// Parse one file.
#[instrument(skip_all, fields(file_name = file_name, len = text.len()))]
pub fn parse_source_file(file_name: &str, text: &str, options: &ParseOptions) -> SourceFile {
    Parser::new(file_name, text, options).parse_source_file()
}

/// Parse several independent files in parallel. Results keep the input
/// order.
pub fn parse_source_files(files: &[(String, String)], options: &ParseOptions) -> Vec<SourceFile> {
    files
        .par_iter()
        .map(|(file_name, text)| parse_source_file(file_name, text, options))
        .collect()
}
