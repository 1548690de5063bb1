// src/model.rs
//
// Typed records the rest of the pipeline hands around.
//
// - AccessLevel: closed vocabulary of the "Access level" column.
// - ActionRecord: one documented (or synthesized) action.
// - Diagnostic:  one recorded anomaly; the build never aborts on these.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::consts::UNDOCUMENTED_DESCRIPTION;
use crate::error::ScrapeError;

/// Per-service action map and the full nested catalog. BTreeMaps keep the
/// serialized key order stable across runs.
pub type ActionMap = BTreeMap<String, ActionRecord>;
pub type Catalog = BTreeMap<String, ActionMap>;

/// The closed set of access-level tags the reference uses. Anything else in
/// an access-level cell fails record construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessLevel {
    Read,
    Write,
    Put,
    Delete,
    Get,
    List,
    #[serde(rename = "Permissions management")]
    PermissionsManagement,
    Tagging,
    Replicate,
    None,
    Undocumented,
}

impl AccessLevel {
    /// Exact-string lookup. Unknown values are a vocabulary error, never
    /// coerced to a nearby tag.
    pub fn parse(s: &str) -> Result<Self, ScrapeError> {
        match s {
            "Read" => Ok(Self::Read),
            "Write" => Ok(Self::Write),
            "Put" => Ok(Self::Put),
            "Delete" => Ok(Self::Delete),
            "Get" => Ok(Self::Get),
            "List" => Ok(Self::List),
            "Permissions management" => Ok(Self::PermissionsManagement),
            "Tagging" => Ok(Self::Tagging),
            "Replicate" => Ok(Self::Replicate),
            "None" => Ok(Self::None),
            "Undocumented" => Ok(Self::Undocumented),
            other => Err(ScrapeError::Vocabulary(other.to_string())),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Read => "Read",
            Self::Write => "Write",
            Self::Put => "Put",
            Self::Delete => "Delete",
            Self::Get => "Get",
            Self::List => "List",
            Self::PermissionsManagement => "Permissions management",
            Self::Tagging => "Tagging",
            Self::Replicate => "Replicate",
            Self::None => "None",
            Self::Undocumented => "Undocumented",
        }
    }
}

/// One action as documented by the reference, or synthesized for an action
/// the reference never documents. Declaration order here is the serialized
/// field order; consumers diff these files, so keep it stable.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub access_level: AccessLevel,
    pub action: String,
    pub condition_keys: Vec<String>,
    pub description: String,
    pub orphan: bool,
    pub resources: Vec<String>,
}

impl ActionRecord {
    /// Placeholder for an action present in the authoritative set but
    /// absent from every documentation page.
    pub fn undocumented(action: &str) -> Self {
        Self {
            access_level: AccessLevel::Undocumented,
            action: action.to_string(),
            condition_keys: Vec::new(),
            description: s!(UNDOCUMENTED_DESCRIPTION),
            orphan: true,
            resources: Vec::new(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Warning,
    Fatal,
}

/// One recorded anomaly. Fatal ones mark a page whose contribution was
/// discarded; warnings mark recoverable gaps. Both end up in the same
/// sorted output list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
}

impl Diagnostic {
    pub fn warning(message: impl Into<String>) -> Self {
        Self { severity: Severity::Warning, message: message.into() }
    }

    pub fn fatal(message: impl Into<String>) -> Self {
        Self { severity: Severity::Fatal, message: message.into() }
    }
}

// Output order is lexicographic on the message, independent of the order
// pages happened to be processed in.
impl Ord for Diagnostic {
    fn cmp(&self, other: &Self) -> Ordering {
        self.message
            .cmp(&other.message)
            .then(self.severity.cmp(&other.severity))
    }
}

impl PartialOrd for Diagnostic {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The export surface: diagnostics serialize as their bare messages.
pub fn diagnostic_messages(diagnostics: &[Diagnostic]) -> Vec<&str> {
    diagnostics.iter().map(|d| d.message.as_str()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_level_round_trips_every_tag() {
        for tag in [
            "Read",
            "Write",
            "Put",
            "Delete",
            "Get",
            "List",
            "Permissions management",
            "Tagging",
            "Replicate",
            "None",
            "Undocumented",
        ] {
            let level = AccessLevel::parse(tag).unwrap();
            assert_eq!(level.as_str(), tag);
        }
    }

    #[test]
    fn access_level_rejects_unknown_values() {
        let err = AccessLevel::parse("Maybe").unwrap_err();
        assert_eq!(err, ScrapeError::Vocabulary(s!("Maybe")));
        // Case and whitespace both matter; no coercion.
        assert!(AccessLevel::parse("read").is_err());
        assert!(AccessLevel::parse("Write ").is_err());
    }

    #[test]
    fn record_serializes_in_stable_field_order() {
        let record = ActionRecord {
            access_level: AccessLevel::PermissionsManagement,
            action: s!("PutBucketPolicy"),
            condition_keys: vec![s!("s3:authType")],
            description: s!("Grants permission to add a policy"),
            orphan: false,
            resources: vec![s!("bucket")],
        };
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"access_level":"Permissions management","action":"PutBucketPolicy","condition_keys":["s3:authType"],"description":"Grants permission to add a policy","orphan":false,"resources":["bucket"]}"#
        );
    }

    #[test]
    fn undocumented_record_is_marked_orphan() {
        let record = ActionRecord::undocumented("GetLens");
        assert_eq!(record.access_level, AccessLevel::Undocumented);
        assert_eq!(record.description, UNDOCUMENTED_DESCRIPTION);
        assert!(record.orphan);
        assert!(record.resources.is_empty() && record.condition_keys.is_empty());
    }

    #[test]
    fn diagnostics_sort_by_message() {
        let mut diags = vec![
            Diagnostic::warning("b second"),
            Diagnostic::fatal("a first"),
            Diagnostic::warning("c third"),
        ];
        diags.sort();
        assert_eq!(diagnostic_messages(&diags), vec!["a first", "b second", "c third"]);
    }
}
