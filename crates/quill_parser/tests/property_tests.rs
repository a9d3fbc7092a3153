//! Property-based tests over token soup.
//!
//! Inputs are built from fragments that open and close constructs in
//! arbitrary order, which drives the parser through most recovery paths.

use proptest::prelude::*;
use quill_core::text::{TextChange, TextSpan};
use quill_parser::{parse_source_file, update_source_file, ParseOptions};

const FRAGMENTS: &[&str] = &[
    "let ", "const ", "x", "y1", "=", "==", "1", "0x", ";", "(", ")", "{", "}", "[", "]", "<", ">", "/",
    "*", "`", "${", "'", "\"", "\n", " ", "class ", "function ", "type ", "=>", "?", "?.", ":", ",",
    ".", "...", "@", "#p", "|", "&", "<div>", "</div>", "<>", "/>", "/**", "*/", "//", "if ", "else ",
    "return ", "import ", "export ", "enum ", "interface ", "async ", "await ", "yield ", "new ",
];

fn source() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(FRAGMENTS), 0..48).prop_map(|parts| parts.concat())
}

/// A base text plus one edit: `(text, start, deleted, inserted)`.
fn edited_source() -> impl Strategy<Value = (String, usize, usize, String)> {
    (source(), any::<prop::sample::Index>(), 0usize..8, source()).prop_map(
        |(text, start, deleted, inserted)| {
            let start = start.index(text.len() + 1);
            let deleted = deleted.min(text.len() - start);
            let inserted: String = inserted.chars().take(12).collect();
            (text, start, deleted, inserted)
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn test_parse_covers_any_input(text in source()) {
        for file_name in ["soup.ts", "soup.tsx"] {
            let file = parse_source_file(file_name, &text, &ParseOptions::for_file_name(file_name));
            let root = file.node(file.root);
            prop_assert_eq!(root.pos(), 0);
            prop_assert_eq!(root.end() as usize, text.len());
            for diagnostic in &file.parse_diagnostics {
                let span = diagnostic.span.expect("parse diagnostics carry a location");
                prop_assert!(span.end() as usize <= text.len());
            }
        }
    }

    #[test]
    fn test_unchanged_update_is_identity(text in source()) {
        let file = parse_source_file("soup.ts", &text, &ParseOptions::default());
        let dump = file.dump();
        let updated = update_source_file(file, &text, TextChange::unchanged(0), true);
        prop_assert!(updated.is_ok());
        prop_assert_eq!(updated.unwrap().dump(), dump);
    }

    #[test]
    fn test_incremental_matches_full_parse((text, start, deleted, inserted) in edited_source()) {
        let change = TextChange::new(TextSpan::new(start as u32, deleted as u32), inserted.len() as u32);
        let new_text = change.apply(&text, &inserted);
        let file = parse_source_file("soup.ts", &text, &ParseOptions::default());
        let updated = update_source_file(file, &new_text, change, true);
        prop_assert!(updated.is_ok(), "{:?} -> {:?}: {:?}", text, new_text, updated.err());
    }

    #[test]
    fn test_chained_updates_match_full_parse(
        (text, start, deleted, inserted) in edited_source(),
        second in source(),
    ) {
        let change = TextChange::new(TextSpan::new(start as u32, deleted as u32), inserted.len() as u32);
        let middle = change.apply(&text, &inserted);
        let file = parse_source_file("soup.tsx", &text, &ParseOptions::for_file_name("soup.tsx"));
        let file = update_source_file(file, &middle, change, true);
        prop_assert!(file.is_ok(), "{:?} -> {:?}", text, middle);

        let last = format!("{second}{middle}");
        let change = TextChange::between(&middle, &last);
        let file = update_source_file(file.unwrap(), &last, change, true);
        prop_assert!(file.is_ok(), "{:?} -> {:?}", middle, last);
    }
}
