// src/specs/mod.rs
//! # Scraping “specs” module
//!
//! This module hosts the **page-specific scraping specification** for the
//! service authorization reference. It encodes *where the ground truth lives
//! in the HTML* and *how to extract it robustly*.
//!
//! ## What lives here
//! - **Pure HTML parsing** of a fetched `list_<page>.html` document.
//! - **Locator choice**: the actions table is found by its header text, not
//!   by element id (ids churn between publishes).
//! - **Row-span flattening** into fixed six-column logical rows.
//! - **Record shaping** into typed `model::ActionRecord`s.
//!
//! ## What does **not** live here
//! - **Networking**: callers inject fetched documents (`scrape::PageSource`).
//! - **Cross-page merging and gap detection**: that is `scrape::reconcile`.
//! - **Output formatting**: `export` owns the JSON surface.
//!
//! ## Conventions & invariants
//! - **Case-insensitive** tag detection; no full-document regexes.
//! - Prefer **local scanning within known blocks** (`<table>…</table>`,
//!   `<tr>…</tr>`) via `core::html` helpers.
//! - Return **stable shapes**: every flattened row has exactly six fields in
//!   document order, or the page fails with a `ScrapeError`.

pub mod actions;
pub mod flatten;
