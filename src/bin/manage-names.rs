//! manage-names: add a registry to exported image manifests and report tags
//! that point at more than one digest.

use std::{
    io::{self, Write},
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use clap::Parser;

use manifest_names::{
    report::{write_conflicts, write_mapping},
    scan::{resolve_root, scan, ScanOptions},
};

/// Add registry to manifest.json files and report conflicts
#[derive(Debug, Parser)]
#[clap(name = "manage-names", version)]
struct App {
    /// Registry to add to every tag
    #[clap(long, value_name = "REGISTRY", value_parser = parse_registry)]
    add: Option<String>,
    /// Show image name to digest mappings
    #[clap(long)]
    show: bool,
    /// Write changes to manifests
    #[clap(long)]
    write: bool,
    /// Root directory of images, relative to the directory holding this program
    #[clap(long, default_value = "images")]
    root: PathBuf,
}

fn parse_registry(value: &str) -> Result<String, String> {
    if value.is_empty() {
        return Err("registry must not be empty".into());
    }
    if value.contains('/') {
        return Err(format!("registry {value:?} must not contain '/'"));
    }
    Ok(value.to_string())
}

fn program_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("Locating the running executable")?;
    Ok(exe.parent().unwrap_or(Path::new("/")).to_path_buf())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = App::parse();
    let root = resolve_root(&program_dir()?, &args.root);
    let options = ScanOptions {
        registry: args.add,
        write: args.write,
    };

    eprintln!("Checking image manifests...");
    let report =
        scan(&root, &options).with_context(|| format!("Scanning {}", root.display()))?;

    let mut stdout = io::stdout().lock();
    if args.show {
        write_mapping(&mut stdout, &report.index)?;
    }
    stdout.flush()?;

    eprintln!("Checking for conflicts...");
    write_conflicts(&mut stdout, &report.index)?;
    stdout.flush()?;
    eprintln!("Done!");

    if !report.is_success() {
        bail!(
            "{} failure(s) while processing manifests under {}",
            report.failures.len(),
            root.display()
        );
    }
    Ok(())
}
