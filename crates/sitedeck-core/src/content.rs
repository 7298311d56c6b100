//! Entry detail content
//!
//! An entry's Markdown body is either stored inline or referenced by path.
//! Rendering is left to the caller; this module only produces the raw text.

use tracing::debug;

use crate::error::LoadResult;
use crate::models::{ContentType, SiteEntry};
use crate::source::CatalogSource;

/// Resolve the Markdown body for an entry
///
/// `catalog` is where the catalog itself was loaded from; file references
/// are resolved relative to it. Returns `None` when the entry has no content.
pub async fn resolve_content(
    entry: &SiteEntry,
    catalog: &CatalogSource,
) -> LoadResult<Option<String>> {
    let Some(content) = entry.content.as_deref() else {
        return Ok(None);
    };

    match entry.effective_content_type() {
        Some(ContentType::File) => {
            let location = catalog.resolve(content)?;
            debug!("Fetching content for entry {} from {}", entry.id, location);
            location.fetch_text().await.map(Some)
        }
        _ => Ok(Some(content.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoadErrorKind;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_no_content() {
        let entry = SiteEntry::new(1, "a", "https://a.com");
        let source = CatalogSource::parse("sites.json");
        assert_eq!(resolve_content(&entry, &source).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_inline_text_defaults() {
        let entry = SiteEntry::new(1, "a", "https://a.com").with_content("# Title\n\nBody", None);
        let source = CatalogSource::parse("sites.json");
        assert_eq!(
            resolve_content(&entry, &source).await.unwrap().as_deref(),
            Some("# Title\n\nBody")
        );
    }

    #[tokio::test]
    async fn test_file_relative_to_catalog() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::create_dir(temp_dir.path().join("pages")).unwrap();
        std::fs::write(temp_dir.path().join("pages/a.md"), "## From file").unwrap();

        let source = CatalogSource::File(temp_dir.path().join("sites.json"));
        let entry = SiteEntry::new(1, "a", "https://a.com")
            .with_content("pages/a.md", Some(ContentType::File));

        assert_eq!(
            resolve_content(&entry, &source).await.unwrap().as_deref(),
            Some("## From file")
        );
    }

    #[tokio::test]
    async fn test_missing_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let source = CatalogSource::File(temp_dir.path().join("sites.json"));
        let entry = SiteEntry::new(1, "a", "https://a.com")
            .with_content("missing.md", Some(ContentType::File));

        let err = resolve_content(&entry, &source).await.unwrap_err();
        assert_eq!(err.kind(), LoadErrorKind::Network);
    }
}
