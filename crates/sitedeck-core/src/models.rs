//! Data models for SiteDeck
//!
//! Defines the catalog data structures: SiteEntry, CatalogConfig and
//! CatalogSnapshot. Field names follow the catalog JSON format on the wire.

use serde::{Deserialize, Serialize};

/// How an entry's `content` field should be interpreted
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    /// `content` is literal Markdown
    Text,
    /// `content` is a path or URL to a Markdown resource
    File,
}

impl ContentType {
    /// Parse the wire value (`text` or `file`)
    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "text" => Some(ContentType::Text),
            "file" => Some(ContentType::File),
            _ => None,
        }
    }
}

/// A curated site in the directory
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SiteEntry {
    /// Identifier, stable across loads
    pub id: i64,
    /// Display title
    pub title: String,
    /// Short description shown on the card
    pub description: String,
    /// Cover image URL (empty means "use placeholder")
    #[serde(rename = "cover")]
    pub cover_url: String,
    /// The site being linked to
    #[serde(rename = "url")]
    pub target_url: String,
    /// Tags; the first one is the primary tag
    pub tags: Vec<String>,
    /// Markdown text or a Markdown resource location
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Disambiguates `content`
    #[serde(
        default,
        rename = "contentType",
        skip_serializing_if = "Option::is_none"
    )]
    pub content_type: Option<ContentType>,
}

impl SiteEntry {
    /// Create an entry with no tags and no content
    pub fn new(id: i64, title: impl Into<String>, target_url: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: String::new(),
            cover_url: String::new(),
            target_url: target_url.into(),
            tags: Vec::new(),
            content: None,
            content_type: None,
        }
    }

    /// Builder-style description setter
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Builder-style tags setter
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Builder-style content setter
    pub fn with_content(mut self, content: impl Into<String>, content_type: Option<ContentType>) -> Self {
        self.content = Some(content.into());
        self.content_type = content_type;
        self
    }

    /// The tag used for grouping, if any
    pub fn primary_tag(&self) -> Option<&str> {
        self.tags.first().map(String::as_str)
    }

    /// Whether a cover image is set
    pub fn has_cover(&self) -> bool {
        !self.cover_url.is_empty()
    }

    /// Content type with the default applied
    ///
    /// Returns `None` when there is no content at all.
    pub fn effective_content_type(&self) -> Option<ContentType> {
        self.content
            .as_ref()
            .map(|_| self.content_type.unwrap_or(ContentType::Text))
    }
}

/// Global catalog settings
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogConfig {
    #[serde(rename = "siteTitle")]
    pub site_title: String,
    #[serde(rename = "adminContact")]
    pub admin_contact: String,
}

/// An immutable, fully validated catalog
///
/// Produced only by the validator. The store replaces snapshots wholesale and
/// never mutates one in place.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct CatalogSnapshot {
    config: CatalogConfig,
    #[serde(rename = "sites")]
    entries: Vec<SiteEntry>,
}

impl CatalogSnapshot {
    pub(crate) fn new(config: CatalogConfig, entries: Vec<SiteEntry>) -> Self {
        Self { config, entries }
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    pub fn entries(&self) -> &[SiteEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by id
    pub fn entry(&self, id: i64) -> Option<&SiteEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Distinct primary tags with entry counts, in first-appearance order
    pub fn primary_tags(&self) -> Vec<(String, usize)> {
        let mut counts: indexmap::IndexMap<&str, usize> = indexmap::IndexMap::new();
        for tag in self.entries.iter().filter_map(SiteEntry::primary_tag) {
            *counts.entry(tag).or_insert(0) += 1;
        }
        counts
            .into_iter()
            .map(|(tag, count)| (tag.to_string(), count))
            .collect()
    }
}
