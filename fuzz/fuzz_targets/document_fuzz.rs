//! Fuzz test for the index table document parser
//!
//! Arbitrary input must either fail with a `ParseError` or parse into a
//! document that renders back to exactly the same text.
//!
//! Run with: cargo +nightly fuzz run document_fuzz -- -max_total_time=60

#![no_main]

use everyday_core::Markers;
use everyday_index::TableDocument;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let markers = Markers::new("<!--s-->", "<!--e-->");
        if let Ok(doc) = TableDocument::parse(input, &markers) {
            assert_eq!(doc.render(), input, "unmodified document must round-trip");

            // Canonical output is stable: rendering it again changes nothing
            let canonical = doc.render_table();
            assert!(canonical.lines().count() >= 2, "header and separator are always kept");
            for line in canonical.lines() {
                assert!(line.starts_with('|') && line.ends_with('|'));
            }
        }
    }
});
