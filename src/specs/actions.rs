// src/specs/actions.rs
//! Scraping *spec* for the per-service "Actions" table.
//!
//! Purpose:
//! - Locate the actions table in a fetched `list_<page>.html` document.
//!   Table ids churn between publishes, so the locator matches the header
//!   text set instead (capitalization varies too, hence lowercase).
//! - Flatten row-span compression (see `specs::flatten`) and shape each
//!   logical row into a typed `ActionRecord`.
//!
//! Non-Responsibilities (by design):
//! - **No networking.** Callers hand in the document.
//! - **No cross-page merging.** One call covers one page.

use std::collections::BTreeSet;

use crate::config::consts::{IGNORE_ROW_MARKER, PERMISSION_ONLY_TAG};
use crate::core::html::{
    inner_after_open_tag, next_tag_block_ci, normalize_entities, normalize_ws, strip_tags,
    to_lower,
};
use crate::error::ScrapeError;
use crate::model::{AccessLevel, ActionRecord};
use crate::specs::flatten::{FlatRow, flatten_table};

/// Lowercased header texts that identify the actions table. Exact set
/// equality: a candidate with extra or missing headers is not the table.
const EXPECTED_HEADERS: [&str; 6] = [
    "actions",
    "description",
    "access level",
    "resource types (*required)",
    "condition keys",
    "dependent actions",
];

/// Find the one table whose `<th>` set matches `EXPECTED_HEADERS`,
/// case-insensitively. Returns the whole `<table>` block.
pub fn locate_actions_table(doc: &str) -> Option<&str> {
    let expected: BTreeSet<String> = EXPECTED_HEADERS.iter().map(|h| s!(*h)).collect();

    let mut pos = 0usize;
    while let Some((s, e)) = next_tag_block_ci(doc, "table", pos) {
        let table = &doc[s..e];
        pos = e;
        if header_set(table) == expected {
            return Some(table);
        }
    }
    None
}

fn header_set(table: &str) -> BTreeSet<String> {
    let mut headers = BTreeSet::new();
    let mut pos = 0usize;
    while let Some((s, e)) = next_tag_block_ci(table, "th", pos) {
        let inner = inner_after_open_tag(&table[s..e]);
        headers.insert(to_lower(&strip_tags(normalize_entities(&inner))));
        pos = e;
    }
    headers
}

/// Shape one flattened row into a record.
///
/// - action: `[permission only]` annotation stripped, must be non-empty
/// - access level: exact lookup against the closed vocabulary
/// - resources: whitespace-split, trailing `*` (the required marker)
///   stripped, deduplicated, sorted
/// - condition keys: whitespace-split, deduplicated, sorted
/// - description: internal whitespace collapsed
pub fn build_record(row: &FlatRow) -> Result<ActionRecord, ScrapeError> {
    let action = normalize_ws(&row[0].replace(PERMISSION_ONLY_TAG, ""));
    if action.is_empty() {
        return Err(ScrapeError::Shape(s!("action cell is empty")));
    }

    let access_level = AccessLevel::parse(row[2].trim())?;

    let resources: Vec<String> = row[3]
        .split_whitespace()
        .map(|t| s!(t.trim_end_matches('*')))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let condition_keys: Vec<String> = row[4]
        .split_whitespace()
        .map(String::from)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    Ok(ActionRecord {
        access_level,
        action,
        condition_keys,
        description: normalize_ws(&row[1]),
        orphan: false,
        resources,
    })
}

/// Flatten the table and build one record per logical row, in document
/// order. Any shape or vocabulary failure aborts the whole page.
pub fn parse_actions(table: &str) -> Result<Vec<ActionRecord>, ScrapeError> {
    let rows = flatten_table(table, |cell| cell.contains(IGNORE_ROW_MARKER))?;
    rows.iter().map(build_record).collect()
}
