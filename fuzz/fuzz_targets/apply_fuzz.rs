//! Fuzz test for the index table engine
//!
//! Appends a fuzzed title to a fixed document. A successful apply must keep
//! the text outside the markers intact and produce a parseable document.
//!
//! Run with: cargo +nightly fuzz run apply_fuzz -- -max_total_time=60

#![no_main]

use chrono::NaiveDate;
use everyday_core::{Markers, RawEntry, TableConfig, INDEX_END, INDEX_START};
use everyday_index::{IndexTableEngine, TableDocument};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(title) = std::str::from_utf8(data) else {
        return;
    };
    let Some(date) = NaiveDate::from_ymd_opt(2025, 3, 1) else {
        return;
    };

    let prefix = format!("# Journal\n\n{}\n", INDEX_START);
    let suffix = format!("{}\n\nFooter\n", INDEX_END);
    let document = format!(
        "{}| Day | Title | Solution | Site | Difficulty |\n|---|---|---|---|---|\n| 001 | a | b | LeetCode | Easy |\n{}",
        prefix, suffix
    );

    let raw = RawEntry {
        title: Some(title.to_string()),
        site: Some("LeetCode".to_string()),
        ..RawEntry::new(date)
    };

    let markers = Markers::default();
    let engine = IndexTableEngine::new(TableConfig::default());
    if let Ok(applied) = engine.apply(&document, &markers, &raw) {
        assert!(applied.document.starts_with(&prefix));
        assert!(applied.document.ends_with(&suffix));
        let reparsed = TableDocument::parse(&applied.document, &markers)
            .expect("applied document must parse");
        assert_eq!(reparsed.rows().len(), 2);
        assert!(reparsed.is_aligned());
    }
});
