// src/scrape/reconcile.rs
// Cross-page merge and gap detection for one service.

use std::collections::BTreeSet;

use crate::model::{ActionMap, ActionRecord, Diagnostic};
use crate::scrape::harvest::PageHarvest;

/// Merge the page harvests for one service, in configured page order, and
/// diff the result against the authoritative action set.
///
/// First documented wins: regional and variant pages repeat actions, so a
/// later duplicate is expected and silently dropped. Authoritative actions
/// no page documented are synthesized as `Undocumented` placeholders, one
/// warning each. The returned map always covers the whole authoritative set.
pub fn reconcile_service(
    service: &str,
    pages: &[String],
    harvests: &[PageHarvest],
    authoritative: &BTreeSet<String>,
) -> (ActionMap, Vec<Diagnostic>) {
    let mut diagnostics = Vec::new();

    if pages.is_empty() {
        diagnostics.push(Diagnostic::warning(format!(
            "Service missing URL map: {service}"
        )));
    }

    let mut actions = ActionMap::new();
    for harvest in harvests {
        diagnostics.extend(harvest.diagnostics.iter().cloned());
        for record in &harvest.records {
            if !actions.contains_key(&record.action) {
                actions.insert(record.action.clone(), record.clone());
            }
        }
    }

    // Anything the SDK knows that no page documented.
    for action in authoritative {
        if !actions.contains_key(action) {
            actions.insert(action.clone(), ActionRecord::undocumented(action));
            diagnostics.push(Diagnostic::warning(format!(
                "Undocumented action found: {service}:{action}"
            )));
        }
    }

    (actions, diagnostics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AccessLevel;

    fn record(action: &str, description: &str) -> ActionRecord {
        ActionRecord {
            access_level: AccessLevel::List,
            action: s!(action),
            condition_keys: Vec::new(),
            description: s!(description),
            orphan: false,
            resources: Vec::new(),
        }
    }

    fn harvest(records: &[ActionRecord]) -> PageHarvest {
        PageHarvest { records: records.to_vec(), diagnostics: Vec::new() }
    }

    fn pages(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("page{i}")).collect()
    }

    #[test]
    fn first_documented_record_wins_silently() {
        let first = harvest(&[record("List", "from page one")]);
        let second = harvest(&[record("List", "from page two")]);
        let authoritative = BTreeSet::from([s!("List")]);

        let (actions, diagnostics) =
            reconcile_service("b", &pages(2), &[first, second], &authoritative);
        assert_eq!(actions["List"].description, "from page one");
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn merging_the_same_page_twice_is_idempotent() {
        let page = harvest(&[record("Get", "x"), record("Put", "y")]);
        let authoritative = BTreeSet::from([s!("Get"), s!("Put")]);

        let (once, d1) =
            reconcile_service("a", &pages(1), &[page.clone()], &authoritative);
        let (twice, d2) =
            reconcile_service("a", &pages(2), &[page.clone(), page], &authoritative);
        assert_eq!(once, twice);
        assert_eq!(d1, d2);
    }

    #[test]
    fn authoritative_gaps_become_orphan_records() {
        let page = harvest(&[record("Get", "documented")]);
        let authoritative = BTreeSet::from([s!("Get"), s!("Put")]);

        let (actions, diagnostics) =
            reconcile_service("a", &pages(1), &[page], &authoritative);
        assert_eq!(actions.len(), 2);
        assert_eq!(actions["Put"].access_level, AccessLevel::Undocumented);
        assert!(actions["Put"].orphan);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].message, "Undocumented action found: a:Put");

        // Gap completeness: merged keys cover the authoritative set.
        assert!(authoritative.iter().all(|a| actions.contains_key(a)));
    }

    #[test]
    fn documented_extras_are_kept_without_diagnostics() {
        // The page documents more than the SDK knows; nothing is dropped.
        let page = harvest(&[record("Get", "x"), record("Legacy", "y")]);
        let authoritative = BTreeSet::from([s!("Get")]);

        let (actions, diagnostics) =
            reconcile_service("a", &pages(1), &[page], &authoritative);
        assert_eq!(actions.len(), 2);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn service_without_pages_is_all_gaps() {
        let authoritative = BTreeSet::from([s!("Get"), s!("Put")]);
        let (actions, diagnostics) = reconcile_service("ghost", &[], &[], &authoritative);

        assert_eq!(actions.len(), 2);
        assert!(actions.values().all(|r| r.orphan));
        assert_eq!(diagnostics.len(), 3);
        assert_eq!(diagnostics[0].message, "Service missing URL map: ghost");
    }

    #[test]
    fn page_diagnostics_flow_through() {
        let broken = PageHarvest::missing("page0");
        let (actions, diagnostics) =
            reconcile_service("a", &pages(1), &[broken], &BTreeSet::new());
        assert!(actions.is_empty());
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].message, "Page missing actions table: page0");
    }
}
