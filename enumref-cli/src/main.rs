//! enumref CLI - inspect enum reflection tables declared in a manifest.
//!
//! Features:
//! - Reads `enumref.toml` from a directory, or an explicit manifest file
//! - Lists every table forward or backward, as text or JSON
//! - Looks up a single enumerator by name, value or index

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};

use enumref_core::{
    entry_json, entry_plain, init_structured_logging, load_manifest, load_manifest_file,
    log_info, log_warn, lookup_json, parse_integer_literal, print_json, print_plain, Catalog,
    CatalogEntry, Direction, Manifest, MANIFEST_FILE,
};

/// Exit code after an internal panic; 1 is reserved for a lookup miss.
const PANIC_EXIT_CODE: i32 = 2;

fn panic_notice() -> String {
    format!("[PANIC] The process will exit with code {}.", PANIC_EXIT_CODE)
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Inspect enum reflection tables")]
pub struct Cli {
    /// Directory containing enumref.toml
    #[arg(default_value = ".")]
    path: String,

    /// Read this manifest file instead of PATH/enumref.toml
    #[arg(long, value_name = "FILE")]
    manifest: Option<String>,

    /// Only show this enum
    #[arg(long = "enum", value_name = "NAME")]
    enum_name: Option<String>,

    /// List enumerators from last declared to first
    #[arg(long)]
    reverse: bool,

    /// Output results in JSON format
    #[arg(long)]
    json: bool,

    /// Look up the enumerator with this exact name
    #[arg(long, value_name = "NAME", requires = "enum_name")]
    lookup_name: Option<String>,

    /// Look up the first-declared enumerator with this value
    #[arg(long, value_name = "VALUE", requires = "enum_name", allow_hyphen_values = true)]
    lookup_value: Option<String>,

    /// Look up the enumerator at this declaration index
    #[arg(long, value_name = "INDEX", requires = "enum_name")]
    lookup_index: Option<usize>,
}

impl Cli {
    fn direction(&self) -> Direction {
        if self.reverse {
            Direction::Backward
        } else {
            Direction::Forward
        }
    }

    fn lookup_count(&self) -> usize {
        [
            self.lookup_name.is_some(),
            self.lookup_value.is_some(),
            self.lookup_index.is_some(),
        ]
        .iter()
        .filter(|&&set| set)
        .count()
    }
}

/// Loads the manifest named on the command line, or PATH/enumref.toml.
fn read_manifest(cli: &Cli) -> Result<Manifest> {
    if let Some(file) = &cli.manifest {
        let path = PathBuf::from(file);
        return load_manifest_file(&path)
            .with_context(|| format!("Failed to read manifest: {}", path.display()));
    }

    let root = Path::new(&cli.path);
    load_manifest(root)
        .with_context(|| format!("Failed to read manifest in: {}", root.display()))?
        .ok_or_else(|| anyhow!("No {} found in {}", MANIFEST_FILE, root.display()))
}

/// Runs the single lookup requested on the command line.
///
/// Returns whether the lookup found an enumerator.
fn run_lookup(cli: &Cli, entry: &CatalogEntry, json: bool) -> Result<bool> {
    let table = &entry.table;
    let (query, found) = if let Some(name) = &cli.lookup_name {
        (name.clone(), table.find_by_name(name))
    } else if let Some(raw) = &cli.lookup_value {
        let value = parse_integer_literal(raw)
            .ok_or_else(|| anyhow!("Not an integer value: {}", raw))?;
        (raw.clone(), table.find_by_value(value))
    } else if let Some(index) = cli.lookup_index {
        (index.to_string(), table.get(index))
    } else {
        bail!("No lookup requested");
    };

    if json {
        print_json(&lookup_json(&query, found));
    } else {
        match found {
            Some(e) => println!("{}) {} - {}", e.index(), e.value(), e.name()),
            None => println!("No enumerator in {} matches {}", table.type_name(), query),
        }
    }
    if found.is_none() {
        log_warn(&format!("lookup {} in {} found nothing", query, table.type_name()));
    }

    Ok(found.is_some())
}

fn main() -> Result<()> {
    std::panic::set_hook(Box::new(|info| {
        eprintln!("[PANIC] enumref internal error: {}", info);
        eprintln!("{}", panic_notice());
        std::process::exit(PANIC_EXIT_CODE);
    }));

    // JSON logs to stderr, filtered by RUST_LOG
    init_structured_logging();

    let cli = Cli::parse();
    if cli.lookup_count() > 1 {
        bail!("Use only one of --lookup-name, --lookup-value, --lookup-index");
    }

    let manifest = read_manifest(&cli)?;
    let json = cli.json || manifest.wants_json();
    let catalog = Catalog::from_manifest(&manifest).context("Invalid enum declaration")?;
    log_info(&format!("loaded {} enum tables", catalog.len()));

    // Single lookup mode
    if cli.lookup_count() == 1 {
        let name = cli.enum_name.as_deref().unwrap_or_default();
        let entry = catalog.require(name)?;
        let found = run_lookup(&cli, entry, json)?;
        std::process::exit(if found { 0 } else { 1 });
    }

    let entries: Vec<&CatalogEntry> = match &cli.enum_name {
        Some(name) => vec![catalog.require(name)?],
        None => catalog.iter().collect(),
    };

    if json {
        let tables: Vec<_> = entries
            .iter()
            .map(|entry| entry_json(entry, cli.direction()))
            .collect();
        print_json(&serde_json::json!({ "enums": tables }));
    } else if entries.is_empty() {
        println!("No enums declared in manifest.");
    } else {
        for (i, entry) in entries.iter().enumerate() {
            if i > 0 {
                println!();
            }
            print_plain(&entry_plain(entry, cli.direction()));
        }
    }

    Ok(())
}
