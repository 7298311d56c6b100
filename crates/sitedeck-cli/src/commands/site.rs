//! Catalog browsing handlers

use anyhow::{bail, Result};
use tracing::debug;

use sitedeck_core::{
    group, resolve_content, search_with, CatalogSnapshot, LoadError, SearchOptions, SiteEntry,
    Store,
};

use crate::output::Output;

/// List every site, optionally grouped by primary tag
pub fn list(snapshot: &CatalogSnapshot, by_tag: bool, output: &Output) -> Result<()> {
    let groups = group(snapshot.entries(), by_tag);
    output.print_groups(&groups);
    Ok(())
}

/// Fuzzy search, optionally grouped by primary tag
pub fn search(
    snapshot: &CatalogSnapshot,
    query: String,
    by_tag: bool,
    threshold: Option<f64>,
    output: &Output,
) -> Result<()> {
    let mut options = SearchOptions::default();
    if let Some(threshold) = threshold {
        if !(0.0..=1.0).contains(&threshold) {
            bail!("Threshold must be between 0.0 and 1.0, got {}", threshold);
        }
        options.threshold = threshold;
    }

    let hits = search_with(&query, snapshot.entries(), &options);
    debug!("Search '{}' matched {} of {}", query, hits.len(), snapshot.len());

    let groups = group(hits, by_tag);
    output.print_groups(&groups);
    Ok(())
}

/// Show one site with its detail content
pub async fn show(store: &Store, snapshot: &CatalogSnapshot, id: i64, output: &Output) -> Result<()> {
    let entry = find_entry(snapshot, id)?;

    let content = match resolve_content(entry, store.source()).await {
        Ok(content) => content,
        Err(e) => {
            // The entry is still worth showing without its details
            debug!("Content for entry {} unavailable: {}", id, e);
            output.warning(&format!("Details unavailable: {}", e.user_message()));
            None
        }
    };

    output.print_entry(entry, content.as_deref());
    Ok(())
}

/// List primary tags with counts
pub fn tags(snapshot: &CatalogSnapshot, output: &Output) -> Result<()> {
    output.print_tags(&snapshot.primary_tags());
    Ok(())
}

/// Show site title, contact and counts
pub fn info(store: &Store, snapshot: &CatalogSnapshot, output: &Output) -> Result<()> {
    output.print_info(snapshot, &store.source().to_string());
    Ok(())
}

/// Load the catalog and report the outcome with diagnostic detail
pub async fn check(store: &Store, output: &Output) -> Result<()> {
    match store.load().await {
        Ok(_) => {
            let count = store.snapshot().map(|s| s.len()).unwrap_or(0);
            output.success(&format!(
                "Catalog {} is valid ({} site(s))",
                store.source(),
                count
            ));
            Ok(())
        }
        Err(e) => {
            if output.is_json() {
                let path = match &e {
                    LoadError::Validation(v) => Some(v.path.as_str()),
                    _ => None,
                };
                println!(
                    "{}",
                    serde_json::json!({
                        "status": "error",
                        "kind": e.kind().as_str(),
                        "status_code": e.status(),
                        "path": path,
                        "message": e.to_string()
                    })
                );
            }
            bail!("{}: {}", e.kind(), e)
        }
    }
}

/// Look up a site by id
pub fn find_entry(snapshot: &CatalogSnapshot, id: i64) -> Result<&SiteEntry> {
    match snapshot.entry(id) {
        Some(entry) => Ok(entry),
        None => bail!("Site not found: {}", id),
    }
}
