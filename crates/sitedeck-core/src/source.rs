//! Catalog and content locations
//!
//! A catalog is read either from the local filesystem or over HTTP. Markdown
//! resources referenced by entries resolve relative to the catalog's own
//! location.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::debug;
use url::Url;

use crate::error::{LoadError, LoadResult};

/// Fetch timeout in seconds
const FETCH_TIMEOUT: u64 = 10;

/// Where a catalog (or a resource next to it) lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    File(PathBuf),
    Http(Url),
}

impl CatalogSource {
    /// Interpret a location string
    ///
    /// `http://` and `https://` URLs are fetched over the network; `file://`
    /// URLs and everything else are treated as filesystem paths.
    pub fn parse(location: &str) -> Self {
        match Url::parse(location) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => CatalogSource::Http(url),
            Ok(url) if url.scheme() == "file" => match url.to_file_path() {
                Ok(path) => CatalogSource::File(path),
                Err(()) => CatalogSource::File(PathBuf::from(location)),
            },
            _ => CatalogSource::File(PathBuf::from(location)),
        }
    }

    /// Resolve a reference found inside the catalog against this location
    ///
    /// Absolute URLs win; otherwise the reference is relative to the
    /// directory (or URL) the catalog was loaded from.
    pub fn resolve(&self, reference: &str) -> LoadResult<CatalogSource> {
        if let Ok(url) = Url::parse(reference) {
            if matches!(url.scheme(), "http" | "https") {
                return Ok(CatalogSource::Http(url));
            }
        }

        match self {
            CatalogSource::Http(base) => base
                .join(reference)
                .map(CatalogSource::Http)
                .map_err(|e| LoadError::network(reference, e)),
            CatalogSource::File(path) => {
                let reference = Path::new(reference);
                if reference.is_absolute() {
                    return Ok(CatalogSource::File(reference.to_path_buf()));
                }
                let base = path.parent().unwrap_or_else(|| Path::new(""));
                Ok(CatalogSource::File(base.join(reference)))
            }
        }
    }

    /// Read the full text at this location
    pub async fn fetch_text(&self) -> LoadResult<String> {
        match self {
            CatalogSource::File(path) => {
                debug!("Reading {:?}", path);
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|e| LoadError::network(path.display().to_string(), e))
            }
            CatalogSource::Http(url) => fetch_http(url).await,
        }
    }
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogSource::File(path) => write!(f, "{}", path.display()),
            CatalogSource::Http(url) => write!(f, "{}", url),
        }
    }
}

async fn fetch_http(url: &Url) -> LoadResult<String> {
    let location = url.to_string();
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(FETCH_TIMEOUT))
        .user_agent(concat!("SiteDeck/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| LoadError::network(&location, e))?;

    debug!("GET {}", location);
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|e| LoadError::network(&location, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(LoadError::Network {
            location,
            status: Some(status.as_u16()),
            message: status
                .canonical_reason()
                .unwrap_or("unexpected status")
                .to_string(),
        });
    }

    response
        .text()
        .await
        .map_err(|e| LoadError::network(&location, e))
}
