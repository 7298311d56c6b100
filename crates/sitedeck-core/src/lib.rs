//! SiteDeck Core Library
//!
//! This crate provides the core functionality for SiteDeck, a curated
//! website directory backed by a static JSON catalog.
//!
//! # Data flow
//!
//! raw JSON -> `validate` -> `Store` -> `search` / `group` -> presentation
//!
//! `sanitize` is independent and runs whenever a link is about to be opened.
//!
//! # Quick Start
//!
//! ```text
//! let store = Store::new(CatalogSource::parse("data/sites.json"));
//! store.load().await?;
//!
//! let snapshot = store.snapshot().unwrap();
//! let hits = search("rust", snapshot.entries());
//! let groups = group(hits, true);
//! ```
//!
//! # Modules
//!
//! - `store`: Catalog store and load sequence (main entry point)
//! - `models`: Site entries, catalog config and snapshots
//! - `validate`: Structural validation of catalog JSON
//! - `search`: Weighted fuzzy search
//! - `group`: Primary-tag grouping
//! - `sanitize`: Tracking parameter removal
//! - `source`: Catalog and content locations
//! - `content`: Markdown detail content
//! - `prefs`: Theme and disclaimer preferences
//! - `theme`: Theme selection and resolution
//! - `config`: Application configuration

pub mod config;
pub mod content;
pub mod error;
pub mod group;
pub mod models;
pub mod prefs;
pub mod sanitize;
pub mod search;
pub mod source;
pub mod store;
pub mod theme;
pub mod validate;

pub use config::Config;
pub use content::resolve_content;
pub use error::{LoadError, LoadErrorKind, LoadResult, ValidationError};
pub use group::{group, Groups, ALL_GROUP};
pub use models::{CatalogConfig, CatalogSnapshot, ContentType, SiteEntry};
pub use prefs::{Persistence, Preferences};
pub use sanitize::{has_tracking_params, sanitize};
pub use search::{search, search_scored, search_with, SearchHit, SearchOptions};
pub use source::CatalogSource;
pub use store::{LoadOutcome, Store};
pub use theme::{Environment, ResolvedTheme, Theme};
pub use validate::validate;
