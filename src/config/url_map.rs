// src/config/url_map.rs
//! Service name → ordered documentation page slugs.
//!
//! This is flat configuration data, not logic: the embedded copy ships with
//! the binary (`data/url_map.json`) and `--url-map` swaps in a newer file
//! without a rebuild. Page order matters: the merge keeps the first
//! documented record per action, in this order.

use std::collections::{BTreeMap, BTreeSet};
use std::error::Error;
use std::fs;
use std::path::Path;

pub type UrlMap = BTreeMap<String, Vec<String>>;

const EMBEDDED: &str = include_str!("../../data/url_map.json");

/// The url map compiled into the binary.
pub fn load_default() -> Result<UrlMap, Box<dyn Error>> {
    Ok(serde_json::from_str(EMBEDDED)?)
}

pub fn load_from_path(path: &Path) -> Result<UrlMap, Box<dyn Error>> {
    Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
}

/// Every page slug referenced by any service, for the published-index check.
pub fn all_pages(map: &UrlMap) -> BTreeSet<String> {
    map.values().flatten().cloned().collect()
}
