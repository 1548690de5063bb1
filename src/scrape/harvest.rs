// src/scrape/harvest.rs
// One page in, records plus diagnostics out. Pages are isolated: whatever
// goes wrong here is converted into a diagnostic and the page simply
// contributes nothing.

use crate::model::{ActionRecord, Diagnostic};
use crate::specs::actions::{locate_actions_table, parse_actions};

/// What one documentation page yielded. Records keep document order; the
/// merge cares about it when the same action shows up twice on a page.
#[derive(Clone, Debug)]
pub struct PageHarvest {
    pub records: Vec<ActionRecord>,
    pub diagnostics: Vec<Diagnostic>,
}

impl PageHarvest {
    /// A page without a usable actions table. Also stands in for pages
    /// that could not be fetched at all.
    pub fn missing(page: &str) -> Self {
        Self {
            records: Vec::new(),
            diagnostics: vec![Diagnostic::warning(format!(
                "Page missing actions table: {page}"
            ))],
        }
    }
}

/// Harvest one fetched page. A missing table is a warning; a shape or
/// vocabulary failure anywhere in the table discards the whole page with
/// one fatal diagnostic.
pub fn harvest_page(page: &str, doc: &str) -> PageHarvest {
    let Some(table) = locate_actions_table(doc) else {
        return PageHarvest::missing(page);
    };

    match parse_actions(table) {
        Ok(records) => PageHarvest { records, diagnostics: Vec::new() },
        Err(e) => PageHarvest {
            records: Vec::new(),
            diagnostics: vec![Diagnostic::fatal(format!(
                "Malformed actions table: {page}: {e}"
            ))],
        },
    }
}
