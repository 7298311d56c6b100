//! Outbound link handlers

use anyhow::{bail, Context, Result};
use tracing::debug;

use sitedeck_core::{has_tracking_params, sanitize, CatalogSnapshot, Persistence, Preferences};

use crate::commands::site::find_entry;
use crate::output::Output;
use crate::prompt::confirm;

/// Open a site's URL in the browser, stripped of tracking parameters
///
/// The first time, the user has to acknowledge that listed sites are run by
/// third parties.
pub fn open(
    snapshot: &CatalogSnapshot,
    prefs: &mut Preferences,
    id: i64,
    print_only: bool,
    output: &Output,
) -> Result<()> {
    let entry = find_entry(snapshot, id)?;
    let url = sanitize(&entry.target_url);
    if url != entry.target_url {
        debug!("Stripped tracking parameters from {}", entry.target_url);
    }

    if print_only {
        output.print_url(&url);
        return Ok(());
    }

    if !prefs.disclaimer_confirmed() {
        if !output.should_prompt() {
            bail!(
                "External links need a one-time confirmation.\n\
                 Run `sitedeck disclaimer --accept` first, or use --print."
            );
        }

        println!("{}", disclaimer_text(&snapshot.config().admin_contact));
        println!();
        if !confirm("Continue to the external site?")? {
            output.message("Cancelled.");
            return Ok(());
        }
        if prefs.confirm_disclaimer() == Persistence::SessionOnly {
            output.warning("Could not save your confirmation; you will be asked again next time.");
        }
    }

    open::that(&url).with_context(|| format!("Failed to open browser for {}", url))?;
    output.success(&format!("Opened {}", url));
    Ok(())
}

/// Print a URL with tracking parameters removed
pub fn clean(url: &str, output: &Output) -> Result<()> {
    if !has_tracking_params(url) {
        debug!("No tracking parameters in {}", url);
    }
    output.print_url(&sanitize(url));
    Ok(())
}

/// Notice shown before the first outbound link is opened
pub fn disclaimer_text(admin_contact: &str) -> String {
    let mut text = String::from(
        "Sites in this directory are operated by third parties. Their content,\n\
         availability and privacy practices are outside this directory's control.",
    );
    if !admin_contact.is_empty() {
        text.push_str(&format!(
            "\nTo report a broken or harmful listing, contact {}.",
            admin_contact
        ));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;

    fn snapshot() -> CatalogSnapshot {
        let raw = serde_json::json!({
            "config": { "siteTitle": "T", "adminContact": "admin@example.com" },
            "sites": [
                { "id": 1, "title": "One", "cover": "",
                  "url": "https://one.example/?utm_source=deck&page=2",
                  "tags": ["a"], "description": "" }
            ]
        });
        sitedeck_core::validate(&raw).unwrap()
    }

    #[test]
    fn test_disclaimer_mentions_contact() {
        assert!(disclaimer_text("admin@example.com").contains("admin@example.com"));
        assert!(!disclaimer_text("").contains("contact"));
    }

    #[test]
    fn test_open_requires_confirmation_when_not_interactive() {
        let snapshot = snapshot();
        let mut prefs = Preferences::in_memory();
        let output = Output::new(OutputFormat::Json);

        let err = open(&snapshot, &mut prefs, 1, false, &output).unwrap_err();
        assert!(err.to_string().contains("disclaimer"));
        assert!(!prefs.disclaimer_confirmed());
    }

    #[test]
    fn test_open_print_only_skips_disclaimer() {
        let snapshot = snapshot();
        let mut prefs = Preferences::in_memory();
        let output = Output::new(OutputFormat::Quiet);

        open(&snapshot, &mut prefs, 1, true, &output).unwrap();
        assert!(!prefs.disclaimer_confirmed());
    }

    #[test]
    fn test_open_unknown_id() {
        let snapshot = snapshot();
        let mut prefs = Preferences::in_memory();
        let output = Output::new(OutputFormat::Quiet);

        assert!(open(&snapshot, &mut prefs, 42, true, &output).is_err());
    }
}
