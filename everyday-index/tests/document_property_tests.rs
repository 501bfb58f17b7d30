//! Property-based tests for the table document and the engine
//!
//! Run with: cargo test -p everyday-index --test document_property_tests

use everyday_core::{parse_sequence, Markers, SequencingError};
use everyday_index::{compute_widths, display_width, IndexTableEngine, TableDocument, TableRow};
use everyday_test_utils::assertions::{assert_aligned, assert_outside_unchanged};
use everyday_test_utils::fixtures::{date_config, readme_with_ids, sequential_config};
use everyday_test_utils::generators::{arb_cell_text, arb_document, arb_raw_entry};
use everyday_test_utils::EngineError;
use proptest::prelude::*;

// ============================================================================
// ROUND TRIP
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// An unmodified document renders back to its exact bytes.
    #[test]
    fn prop_parse_render_is_identity(generated in arb_document()) {
        let doc = TableDocument::parse(&generated.text, &Markers::default())
            .expect("generated document should parse");
        prop_assert_eq!(doc.render(), generated.text);
        prop_assert!(!doc.is_modified());
    }

    /// Parsing recovers the generated cell values and line ending.
    #[test]
    fn prop_parse_recovers_cells(generated in arb_document()) {
        let doc = TableDocument::parse(&generated.text, &Markers::default())
            .expect("generated document should parse");
        prop_assert_eq!(doc.header(), &generated.header);
        prop_assert_eq!(doc.rows(), generated.rows.as_slice());
        prop_assert_eq!(doc.line_ending(), generated.line_ending);
    }
}

// ============================================================================
// WIDTHS AND ALIGNMENT
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Every width covers the longest value plus padding.
    #[test]
    fn prop_widths_cover_longest_value(generated in arb_document()) {
        let widths = compute_widths(&generated.rows, &generated.header);
        prop_assert_eq!(widths.len(), generated.header.len());
        for (index, width) in widths.iter().enumerate() {
            let longest = generated
                .rows
                .iter()
                .chain(std::iter::once(&generated.header))
                .filter_map(|row| row.cell(index))
                .map(display_width)
                .max()
                .unwrap_or(0);
            prop_assert!(*width >= longest + 2);
            prop_assert!(*width >= 5);
        }
    }

    /// Widths depend only on the set of values.
    #[test]
    fn prop_widths_ignore_row_order(generated in arb_document()) {
        let mut reversed = generated.rows.clone();
        reversed.reverse();
        prop_assert_eq!(
            compute_widths(&generated.rows, &generated.header),
            compute_widths(&reversed, &generated.header)
        );
    }

    /// After a row is appended the whole region is aligned and the rest of
    /// the document is untouched.
    #[test]
    fn prop_push_row_realigns_region(
        generated in arb_document(),
        values in prop::collection::vec(arb_cell_text(), 6),
    ) {
        let markers = Markers::default();
        let mut doc = TableDocument::parse(&generated.text, &markers)
            .expect("generated document should parse");
        let row = TableRow::new(values.into_iter().take(generated.header.len()));
        doc.push_row(row).expect("row has the header's cell count");

        let rendered = doc.render();
        assert_aligned(&rendered, &markers);
        assert_outside_unchanged(&generated.text, &rendered, &markers);

        let reparsed = TableDocument::parse(&rendered, &markers).expect("rendered output parses");
        prop_assert!(reparsed.is_aligned());
        prop_assert_eq!(reparsed.rows().len(), generated.rows.len() + 1);
    }
}

// ============================================================================
// SEQUENCING
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Repeated applies yield contiguous, strictly increasing identifiers.
    #[test]
    fn prop_repeated_apply_is_contiguous(
        entries in prop::collection::vec(arb_raw_entry(), 1..15),
    ) {
        let markers = Markers::default();
        let engine = IndexTableEngine::new(sequential_config(false));
        let mut text = readme_with_ids(&[]);

        for (index, raw) in entries.iter().enumerate() {
            let applied = engine.apply(&text, &markers, raw).expect("apply should succeed");
            prop_assert_eq!(parse_sequence(applied.identifier.as_str()), Some(index as u64 + 1));
            assert_outside_unchanged(&text, &applied.document, &markers);
            assert_aligned(&applied.document, &markers);
            text = applied.document;
        }

        let doc = TableDocument::parse(&text, &markers).expect("final document parses");
        let ids: Vec<u64> = doc
            .rows()
            .iter()
            .filter_map(|row| parse_sequence(row.identifier()))
            .collect();
        prop_assert_eq!(ids, (1..=entries.len() as u64).collect::<Vec<_>>());
    }

    /// Re-applying the same dated submission is rejected as a duplicate of
    /// the row it produced.
    #[test]
    fn prop_reapply_same_day_is_rejected(raw in arb_raw_entry()) {
        let markers = Markers::default();
        let engine = IndexTableEngine::new(date_config());
        let first = engine
            .apply(&readme_with_ids(&[]), &markers, &raw)
            .expect("first apply should succeed");

        let result = engine.apply(&first.document, &markers, &raw);
        let is_duplicate = matches!(
            result,
            Err(EngineError::Sequencing(SequencingError::DuplicateIdentifier { ref identifier }))
                if identifier == first.identifier.as_str()
        );
        prop_assert!(is_duplicate);

        let report = engine.inspect(&first.document, &markers).expect("applied document parses");
        prop_assert_eq!(report.rows, 1);
    }
}
