// src/config/toc.rs
//! Published page index from the reference's `toc-contents.json`.
//!
//! The TOC nests the actions/resources/condition-keys pages three levels
//! deep; each entry's `href` is `list_<page>.html`. The resulting slug set
//! feeds the unmapped-service check only.

use std::collections::BTreeSet;
use std::error::Error;

use serde_json::Value;

use crate::config::consts::{BASE_PATH, HOST, PORT};
use crate::core::net;

pub fn parse_published(json: &str) -> Result<BTreeSet<String>, Box<dyn Error>> {
    let toc: Value = serde_json::from_str(json)?;
    let entries = toc
        .pointer("/contents/0/contents/0/contents")
        .and_then(Value::as_array)
        .ok_or("Unexpected TOC shape")?;

    let mut pages = BTreeSet::new();
    for entry in entries {
        let href = entry.get("href").and_then(Value::as_str).unwrap_or("");
        if href.is_empty() {
            continue;
        }
        let page = href.strip_prefix("list_").unwrap_or(href);
        let page = page.strip_suffix(".html").unwrap_or(page);
        pages.insert(page.to_string());
    }
    Ok(pages)
}

pub fn fetch_published() -> Result<BTreeSet<String>, Box<dyn Error>> {
    let body = net::http_get(HOST, PORT, &join!(BASE_PATH, "/toc-contents.json"))?;
    parse_published(&body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_page_slugs_from_hrefs() {
        let json = r#"{"contents": [{"contents": [{"contents": [
            {"title": "Amazon S3", "href": "list_amazons3.html"},
            {"title": "Amazon EC2", "href": "list_amazonec2.html"},
            {"title": "No href here"}
        ]}]}]}"#;
        let pages = parse_published(json).unwrap();
        assert_eq!(pages.len(), 2);
        assert!(pages.contains("amazons3") && pages.contains("amazonec2"));
    }

    #[test]
    fn rejects_unexpected_shapes() {
        assert!(parse_published(r#"{"contents": []}"#).is_err());
        assert!(parse_published(r#"{}"#).is_err());
    }
}
