//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use sitedeck_core::{CatalogSnapshot, Groups, SiteEntry};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Check if output is in quiet mode
    pub fn is_quiet(&self) -> bool {
        matches!(self.format, OutputFormat::Quiet)
    }

    /// Check if output is JSON
    pub fn is_json(&self) -> bool {
        matches!(self.format, OutputFormat::Json)
    }

    /// Print a single entry with its resolved detail content
    pub fn print_entry(&self, entry: &SiteEntry, content: Option<&str>) {
        match self.format {
            OutputFormat::Human => {
                println!("ID:          {}", entry.id);
                println!("Title:       {}", entry.title);
                println!("URL:         {}", entry.target_url);
                if !entry.description.is_empty() {
                    println!("Description: {}", entry.description);
                }
                if !entry.tags.is_empty() {
                    println!("Tags:        {}", entry.tags.join(", "));
                }
                println!(
                    "Cover:       {}",
                    if entry.has_cover() {
                        entry.cover_url.as_str()
                    } else {
                        "(none)"
                    }
                );

                if let Some(content) = content {
                    println!();
                    println!("── Details ──");
                    println!("{}", content.trim_end());
                }
            }
            OutputFormat::Json => {
                let mut value = serde_json::to_value(entry).unwrap_or_default();
                if let (Some(obj), Some(content)) = (value.as_object_mut(), content) {
                    obj.insert("resolvedContent".to_string(), content.into());
                }
                println!("{}", to_pretty(&value));
            }
            OutputFormat::Quiet => {
                println!("{}", entry.target_url);
            }
        }
    }

    /// Print grouped entries
    pub fn print_groups(&self, groups: &Groups<'_>) {
        match self.format {
            OutputFormat::Human => {
                let total: usize = groups.values().map(Vec::len).sum();
                if total == 0 {
                    println!("No sites found.");
                    return;
                }
                for (name, entries) in groups {
                    println!("── {} ({}) ──", name, entries.len());
                    for entry in entries {
                        println!(
                            "{:>5} | {} | {}",
                            entry.id,
                            pad(&truncate(&entry.title, 30), 30),
                            truncate(&entry.target_url, 45)
                        );
                    }
                    println!();
                }
                println!("{} site(s)", total);
            }
            OutputFormat::Json => {
                let json_groups: Vec<_> = groups
                    .iter()
                    .map(|(name, entries)| serde_json::json!({"name": name, "sites": entries}))
                    .collect();
                println!("{}", to_pretty(&json_groups));
            }
            OutputFormat::Quiet => {
                for entry in groups.values().flatten() {
                    println!("{}", entry.id);
                }
            }
        }
    }

    /// Print primary tags with entry counts
    pub fn print_tags(&self, tags: &[(String, usize)]) {
        match self.format {
            OutputFormat::Human => {
                if tags.is_empty() {
                    println!("No tags found.");
                    return;
                }
                for (name, count) in tags {
                    println!("{} ({})", name, count);
                }
                println!("\n{} tag(s)", tags.len());
            }
            OutputFormat::Json => {
                let json_tags: Vec<_> = tags
                    .iter()
                    .map(|(name, count)| serde_json::json!({"name": name, "count": count}))
                    .collect();
                println!("{}", to_pretty(&json_tags));
            }
            OutputFormat::Quiet => {
                for (name, _) in tags {
                    println!("{}", name);
                }
            }
        }
    }

    /// Print catalog-wide information
    pub fn print_info(&self, snapshot: &CatalogSnapshot, source: &str) {
        let config = snapshot.config();
        match self.format {
            OutputFormat::Human => {
                println!(
                    "Site:    {}",
                    if config.site_title.is_empty() {
                        "(untitled)"
                    } else {
                        config.site_title.as_str()
                    }
                );
                println!(
                    "Contact: {}",
                    if config.admin_contact.is_empty() {
                        "(not set)"
                    } else {
                        config.admin_contact.as_str()
                    }
                );
                println!("Sites:   {}", snapshot.len());
                println!("Tags:    {}", snapshot.primary_tags().len());
                println!("Catalog: {}", source);
            }
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({
                        "siteTitle": config.site_title,
                        "adminContact": config.admin_contact,
                        "sites": snapshot.len(),
                        "tags": snapshot.primary_tags().len(),
                        "catalog": source
                    })
                );
            }
            OutputFormat::Quiet => {
                println!("{}", config.site_title);
            }
        }
    }

    /// Print a bare URL (all formats)
    pub fn print_url(&self, url: &str) {
        match self.format {
            OutputFormat::Json => println!("{}", serde_json::json!({"url": url})),
            _ => println!("{}", url),
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Check if we should prompt for confirmation
    pub fn should_prompt(&self) -> bool {
        self.format == OutputFormat::Human
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Print a warning to stderr (suppressed in quiet mode)
    pub fn warning(&self, msg: &str) {
        if !self.is_quiet() {
            eprintln!("⚠ {}", msg);
        }
    }
}

fn to_pretty<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "null".to_string())
}

/// Truncate a string to max characters, adding "..." if truncated
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Right-pad with spaces to a character width
fn pad(s: &str, width: usize) -> String {
    let len = s.chars().count();
    if len >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - len))
    }
}
