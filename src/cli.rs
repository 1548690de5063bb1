// src/cli.rs
use std::{env, error::Error, fs, path::PathBuf};

use crate::config::consts::WORKERS;
use crate::config::{services, toc, url_map};
use crate::export;
use crate::model::diagnostic_messages;
use crate::progress::Progress;
use crate::scrape::{DirPages, HttpPages, PageSource, build_catalog};

pub struct Params {
    pub services_in: Option<PathBuf>,
    pub actions_out: Option<PathBuf>,
    pub errors_out: Option<PathBuf>,
    pub url_map_in: Option<PathBuf>,
    pub toc_in: Option<PathBuf>,
    pub pages_dir: Option<PathBuf>,
    pub workers: usize,
    pub indent: bool,
    pub list_services: bool,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            services_in: None,
            actions_out: None,
            errors_out: None,
            url_map_in: None,
            toc_in: None,
            pages_dir: None,
            workers: WORKERS,
            indent: false,
            list_services: false,
        }
    }
}

/// Prints the per-service "Generating ..." lines; everything noisier goes
/// to the debug log.
struct CliProgress;

impl Progress for CliProgress {
    fn log(&mut self, msg: &str) {
        println!("{msg}");
    }

    fn item_done(&mut self, page: &str) {
        logd!("page done: {page}");
    }
}

pub fn run() -> Result<(), Box<dyn Error>> {
    let mut params = Params::default();
    parse_cli(&mut params)?;

    let url_map = match &params.url_map_in {
        Some(path) => url_map::load_from_path(path)?,
        None => url_map::load_default()?,
    };

    if params.list_services {
        for name in url_map.keys() {
            println!("{name}");
        }
        return Ok(());
    }

    let services_path = params
        .services_in
        .as_ref()
        .ok_or("Missing --services PATH (see --help)")?;
    let services = services::load_from_path(services_path)?;

    let published = match &params.toc_in {
        Some(path) => toc::parse_published(&fs::read_to_string(path)?)?,
        None => toc::fetch_published()?,
    };

    let source: Box<dyn PageSource> = match &params.pages_dir {
        Some(dir) => Box::new(DirPages(dir.clone())),
        None => Box::new(HttpPages),
    };

    let mut progress = CliProgress;
    let (catalog, diagnostics) = build_catalog(
        &url_map,
        &services,
        &published,
        source.as_ref(),
        params.workers,
        Some(&mut progress),
    );

    logf!(
        "catalog built: {} services, {} diagnostics",
        catalog.len(),
        diagnostics.len()
    );

    if let Some(path) = &params.actions_out {
        export::write_catalog(path, &catalog, params.indent)?;
    }
    match &params.errors_out {
        Some(path) => export::write_diagnostics(path, &diagnostics, params.indent)?,
        None => {
            // No diagnostic goes unseen.
            for msg in diagnostic_messages(&diagnostics) {
                eprintln!("{msg}");
            }
        }
    }

    Ok(())
}

fn parse_cli(params: &mut Params) -> Result<(), Box<dyn Error>> {
    let mut args = env::args().skip(1);
    while let Some(a) = args.next() {
        match a.as_str() {
            "-s" | "--services" => {
                params.services_in =
                    Some(PathBuf::from(args.next().ok_or("Missing value for --services")?));
            }
            "-a" | "--actions" => {
                params.actions_out =
                    Some(PathBuf::from(args.next().ok_or("Missing value for --actions")?));
            }
            "-e" | "--errors" => {
                params.errors_out =
                    Some(PathBuf::from(args.next().ok_or("Missing value for --errors")?));
            }
            "--url-map" => {
                params.url_map_in =
                    Some(PathBuf::from(args.next().ok_or("Missing value for --url-map")?));
            }
            "--toc" => {
                params.toc_in = Some(PathBuf::from(args.next().ok_or("Missing value for --toc")?));
            }
            "--pages-dir" => {
                params.pages_dir =
                    Some(PathBuf::from(args.next().ok_or("Missing value for --pages-dir")?));
            }
            "--workers" => {
                let v: usize = args.next().ok_or("Missing value for --workers")?.parse()?;
                if v == 0 {
                    return Err("--workers must be at least 1".into());
                }
                params.workers = v;
            }
            "-i" | "--indent" => params.indent = true,
            "--list-services" => params.list_services = true,
            "-h" | "--help" => {
                eprintln!("{}", include_str!("cli_help.txt"));
                std::process::exit(0);
            }
            _ => return Err(format!("Unknown arg: {}", a).into()),
        }
    }

    Ok(())
}
