// src/specs/flatten.rs
//! Row-span flattening.
//!
//! The actions tables compress repeated cells with `rowspan`, so one logical
//! row ("block") can stretch across several physical `<tr>` rows. This module
//! resolves that compression into uniform six-column rows by carrying one
//! remaining-span counter per column through each block.
//!
//! Assumptions, inherited from the source markup:
//! - The first cell of a block's first row declares the block height; later
//!   columns' spans must be consistent with it but are not trusted for height.
//! - A block's first row contains all six cells.
//! - Continuation rows supply exactly one cell per already-exhausted column.

use crate::core::html::{
    attr_ci, inner_after_open_tag, next_tag_block_ci, normalize_entities, strip_tags, to_lower,
};
use crate::error::ScrapeError;

pub const COLS: usize = 6;

/// Six accumulated column strings for one logical row, in document order:
/// action, description, access level, resource types, condition keys,
/// dependent actions.
pub type FlatRow = [String; COLS];

/// One `<td>` before flattening: visible text plus declared row-span.
#[derive(Clone, Debug)]
pub struct Cell {
    pub text: String,
    pub span: usize,
}

fn read_cells(tr: &str) -> Result<Vec<Cell>, ScrapeError> {
    let mut cells = Vec::new();
    let mut pos = 0usize;
    while let Some((s, e)) = next_tag_block_ci(tr, "td", pos) {
        let block = &tr[s..e];
        pos = e;
        let text = strip_tags(normalize_entities(&inner_after_open_tag(block)));
        let span = match attr_ci(block, "rowspan") {
            None => 1,
            Some(v) => v
                .trim()
                .parse::<usize>()
                .map_err(|_| ScrapeError::Shape(format!("bad rowspan {v:?}")))?,
        };
        cells.push(Cell { text, span });
    }
    Ok(cells)
}

/// Resolve a table element into one `FlatRow` per logical block.
///
/// `ignore` is consulted with the first cell's text of each continuation
/// row; matching rows are consumed from the stream (they keep the rowspan
/// bookkeeping honest) but contribute no text anywhere.
pub fn flatten_table(
    table: &str,
    ignore: impl Fn(&str) -> bool,
) -> Result<Vec<FlatRow>, ScrapeError> {
    // Physical rows, in document order. Header rows carry <th> cells and
    // are not part of any block.
    let mut physical: Vec<Vec<Cell>> = Vec::new();
    let mut pos = 0usize;
    while let Some((s, e)) = next_tag_block_ci(table, "tr", pos) {
        let tr = &table[s..e];
        pos = e;
        if to_lower(tr).contains("<th") {
            continue;
        }
        physical.push(read_cells(tr)?);
    }

    let mut rows = physical.into_iter();
    let mut flat = Vec::new();

    while let Some(first) = rows.next() {
        if first.len() != COLS {
            return Err(ScrapeError::Shape(format!(
                "row has {} cells, expected {COLS}",
                first.len()
            )));
        }

        let mut acc: FlatRow = std::array::from_fn(|_| String::new());
        let mut spans = [1usize; COLS];
        for (col, cell) in first.into_iter().enumerate() {
            spans[col] = cell.span;
            acc[col] = cell.text;
        }

        // The block is as tall as its first column says.
        let height = spans[0];
        for _ in 1..height {
            let Some(row) = rows.next() else {
                return Err(ScrapeError::Shape(s!("table ended inside a row-span block")));
            };
            let skip = row.first().is_some_and(|c| ignore(&c.text));
            let mut cells = row.into_iter();
            for col in 0..COLS {
                if spans[col] > 1 {
                    spans[col] -= 1;
                } else if !skip {
                    let cell = cells.next().ok_or_else(|| {
                        ScrapeError::Shape(s!("continuation row is short of cells"))
                    })?;
                    acc[col].push(' ');
                    acc[col].push_str(cell.text.trim());
                }
            }
            if !skip && cells.next().is_some() {
                return Err(ScrapeError::Shape(s!("continuation row has leftover cells")));
            }
        }

        if spans.iter().any(|&s| s != 1) {
            return Err(ScrapeError::Shape(s!("row spans did not close at block end")));
        }
        flat.push(acc);
    }

    Ok(flat)
}
