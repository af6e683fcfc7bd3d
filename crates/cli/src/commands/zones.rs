//! `zones` command implementation.

use anyhow::{Context, Result};
use tracing::info;

use time_resolver::{TimeResolver, ZoneCatalog, ZoneEntry};

use crate::cli::ZonesArgs;

/// Execute the `zones` command
pub fn run_zones(args: &ZonesArgs) -> Result<()> {
    let resolver = TimeResolver::new();
    let catalog = ZoneCatalog::build(resolver.local_zone_name());
    let entries = select(&catalog, args.filter.as_deref());

    info!(
        total = catalog.len(),
        shown = entries.len(),
        local_zone = resolver.local_zone_name(),
        "Zone catalog built"
    );

    if args.json {
        let json =
            serde_json::to_string_pretty(&entries).context("Failed to serialize zone list")?;
        println!("{}", json);
    } else {
        for entry in &entries {
            let marker = if entry.is_local { "*" } else { " " };
            println!("{} {}", marker, entry.id);
        }
    }

    Ok(())
}

fn select<'a>(catalog: &'a ZoneCatalog, filter: Option<&'a str>) -> Vec<&'a ZoneEntry> {
    match filter {
        Some(needle) => catalog.filter(needle).collect(),
        None => catalog.entries().iter().collect(),
    }
}
