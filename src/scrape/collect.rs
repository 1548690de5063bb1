// src/scrape/collect.rs
// Catalog orchestration: fan page fetches out over a small worker pool,
// then merge per service, serially and in configured page order.

use std::collections::BTreeSet;
use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crate::config::consts::{BASE_PATH, HOST, JITTER_MS, PORT, REQUEST_PAUSE_MS};
use crate::config::services::ServiceActions;
use crate::config::url_map::{self, UrlMap};
use crate::core::net;
use crate::model::{Catalog, Diagnostic};
use crate::progress::Progress;
use crate::scrape::harvest::{PageHarvest, harvest_page};
use crate::scrape::reconcile::reconcile_service;

/// Where page documents come from. The scrape core never opens a socket
/// itself; inject an implementation.
pub trait PageSource: Sync {
    /// Fetch one page's HTML by its slug (e.g. "amazons3").
    fn fetch(&self, page: &str) -> Result<String, Box<dyn Error>>;
}

/// Live fetch from the reference site.
pub struct HttpPages;

impl PageSource for HttpPages {
    fn fetch(&self, page: &str) -> Result<String, Box<dyn Error>> {
        net::http_get(HOST, PORT, &join!(BASE_PATH, "/list_", page, ".html"))
    }
}

/// Pages saved on disk as `list_<page>.html`, for offline runs and tests.
pub struct DirPages(pub PathBuf);

impl PageSource for DirPages {
    fn fetch(&self, page: &str) -> Result<String, Box<dyn Error>> {
        Ok(fs::read_to_string(self.0.join(join!("list_", page, ".html")))?)
    }
}

/// Build the full catalog: every service in `services`, name order, plus
/// the published-index consistency check. Returns the catalog and the
/// complete diagnostics list, lexicographically sorted.
///
/// Page fetching and harvesting run on up to `workers` threads; results
/// land in per-page slots so worker scheduling cannot change the output.
/// The merge itself is order-sensitive (first documented wins) and runs
/// serially per service.
pub fn build_catalog(
    url_map: &UrlMap,
    services: &ServiceActions,
    published: &BTreeSet<String>,
    source: &dyn PageSource,
    workers: usize,
    mut progress: Option<&mut dyn Progress>,
) -> (Catalog, Vec<Diagnostic>) {
    let mut diagnostics: Vec<Diagnostic> = Vec::new();

    // Every published page should be claimed by some service.
    let configured = url_map::all_pages(url_map);
    for page in published.difference(&configured) {
        diagnostics.push(Diagnostic::warning(format!(
            "Unmapped service is being published: {page}"
        )));
    }

    // One job per (service, page). BTreeMap iteration fixes the service order.
    let plan: Vec<(&str, &[String])> = services
        .keys()
        .map(|name| {
            let pages = url_map.get(name).map(Vec::as_slice).unwrap_or(&[]);
            (name.as_str(), pages)
        })
        .collect();
    let jobs: Vec<(usize, usize, &str)> = plan
        .iter()
        .enumerate()
        .flat_map(|(si, &(_, pages))| {
            pages.iter().enumerate().map(move |(pi, page)| (si, pi, page.as_str()))
        })
        .collect();

    if let Some(p) = progress.as_deref_mut() {
        p.begin(jobs.len());
    }

    let mut slots: Vec<Vec<Option<PageHarvest>>> =
        plan.iter().map(|&(_, pages)| vec![None; pages.len()]).collect();

    let cursor = AtomicUsize::new(0);
    let (tx, rx) = mpsc::channel::<(usize, usize, PageHarvest)>();
    let worker_count = workers.min(jobs.len()).max(1);

    thread::scope(|scope| {
        for _ in 0..worker_count {
            let tx = tx.clone();
            let jobs = &jobs;
            let cursor = &cursor;
            scope.spawn(move || {
                loop {
                    let i = cursor.fetch_add(1, Ordering::Relaxed);
                    if i >= jobs.len() {
                        break;
                    }
                    let (si, pi, page) = jobs[i];
                    let result = match source.fetch(page) {
                        Ok(doc) => harvest_page(page, &doc),
                        Err(e) => {
                            // A failed fetch reads the same as a page
                            // without the table; the cause goes to the log.
                            loge!("fetch {page}: {e}");
                            PageHarvest::missing(page)
                        }
                    };
                    let _ = tx.send((si, pi, result));
                    let jitter = (i as u64) % JITTER_MS;
                    thread::sleep(Duration::from_millis(REQUEST_PAUSE_MS + jitter)); // be polite
                }
            });
        }
        drop(tx); // receiving loop below is the sole tx-side gate now

        for (si, pi, harvest) in rx {
            if let Some(p) = progress.as_deref_mut() {
                p.item_done(&plan[si].1[pi]);
            }
            slots[si][pi] = Some(harvest);
        }
    });

    // Serial merge pass, service by service in name order.
    let mut catalog = Catalog::new();
    for (si, &(name, pages)) in plan.iter().enumerate() {
        if let Some(p) = progress.as_deref_mut() {
            p.log(&format!("Generating {name}"));
        }
        let harvests: Vec<PageHarvest> = slots[si]
            .iter_mut()
            .enumerate()
            .map(|(pi, slot)| slot.take().unwrap_or_else(|| PageHarvest::missing(&pages[pi])))
            .collect();
        let Some(authoritative) = services.get(name) else {
            continue;
        };
        let (actions, diags) = reconcile_service(name, pages, &harvests, authoritative);
        catalog.insert(s!(name), actions);
        diagnostics.extend(diags);
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }

    diagnostics.sort();
    (catalog, diagnostics)
}
