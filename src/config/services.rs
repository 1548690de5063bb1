// src/config/services.rs
//! Authoritative per-service action sets.
//!
//! Sourced outside this tool (distilled from SDK service definitions) and
//! supplied as JSON. Two shapes are accepted: the full service objects the
//! upstream generator writes (`{"s3": {"Actions": [...], ...}}`) or a bare
//! `{"s3": ["GetObject", ...]}` map.

use std::collections::{BTreeMap, BTreeSet};
use std::error::Error;
use std::fs;
use std::path::Path;

use serde::Deserialize;

pub type ServiceActions = BTreeMap<String, BTreeSet<String>>;

#[derive(Deserialize)]
#[serde(untagged)]
enum Entry {
    Object {
        #[serde(rename = "Actions")]
        actions: Vec<String>,
    },
    List(Vec<String>),
}

pub fn parse(json: &str) -> Result<ServiceActions, Box<dyn Error>> {
    let raw: BTreeMap<String, Entry> = serde_json::from_str(json)?;
    Ok(raw
        .into_iter()
        .map(|(name, entry)| {
            let actions = match entry {
                Entry::Object { actions } | Entry::List(actions) => actions,
            };
            (name, actions.into_iter().collect())
        })
        .collect())
}

pub fn load_from_path(path: &Path) -> Result<ServiceActions, Box<dyn Error>> {
    parse(&fs::read_to_string(path)?)
}
