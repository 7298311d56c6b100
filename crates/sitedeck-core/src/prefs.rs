//! User preferences
//!
//! Two values are remembered between sessions: the theme and whether the
//! outbound-link disclaimer has been confirmed. Storage is best-effort. When
//! the preference file can't be used, values live in memory for the session
//! and writes report [`Persistence::SessionOnly`] instead of failing.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::theme::Theme;

/// Key for the theme preference
pub const THEME_KEY: &str = "theme";
/// Key for the disclaimer flag
pub const DISCLAIMER_KEY: &str = "disclaimerConfirmed";

/// Whether a write will survive the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Persistence {
    Persisted,
    SessionOnly,
}

/// Key-value storage behind [`Preferences`]
pub trait PreferenceBackend: Send {
    fn get(&self, key: &str) -> Option<String>;
    /// Store a value; `None` removes the key
    ///
    /// The value is visible to `get` even when this returns an error.
    fn set(&mut self, key: &str, value: Option<&str>) -> Result<()>;
    fn is_persistent(&self) -> bool;
}

/// Session-only storage
#[derive(Debug, Default)]
pub struct MemoryBackend {
    values: BTreeMap<String, String>,
}

impl PreferenceBackend for MemoryBackend {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Option<&str>) -> Result<()> {
        match value {
            Some(v) => self.values.insert(key.to_string(), v.to_string()),
            None => self.values.remove(key),
        };
        Ok(())
    }

    fn is_persistent(&self) -> bool {
        false
    }
}

/// JSON file storage
#[derive(Debug)]
pub struct FileBackend {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileBackend {
    /// Open the store, loading existing values if the file exists
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let values = if path.exists() {
            let json = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read preferences: {:?}", path))?;
            serde_json::from_str(&json)
                .with_context(|| format!("Failed to parse preferences: {:?}", path))?
        } else {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create preferences directory: {:?}", parent)
                })?;
            }
            BTreeMap::new()
        };

        Ok(Self { path, values })
    }

    fn save(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.values)?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write preferences: {:?}", self.path))
    }
}

impl PreferenceBackend for FileBackend {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Option<&str>) -> Result<()> {
        match value {
            Some(v) => self.values.insert(key.to_string(), v.to_string()),
            None => self.values.remove(key),
        };
        self.save()
    }

    fn is_persistent(&self) -> bool {
        true
    }
}

/// Theme and disclaimer preferences
///
/// Created once at startup and handed to whatever needs it.
pub struct Preferences {
    backend: Box<dyn PreferenceBackend>,
}

impl Preferences {
    /// Open file-backed preferences, falling back to memory
    pub fn open(path: &Path) -> Self {
        match FileBackend::open(path) {
            Ok(backend) => {
                debug!("Preferences loaded from {:?}", path);
                Self::with_backend(Box::new(backend))
            }
            Err(e) => {
                warn!("Preferences unavailable, using session storage: {:#}", e);
                Self::in_memory()
            }
        }
    }

    /// Preferences that last only for this session
    pub fn in_memory() -> Self {
        Self::with_backend(Box::new(MemoryBackend::default()))
    }

    pub fn with_backend(backend: Box<dyn PreferenceBackend>) -> Self {
        Self { backend }
    }

    /// Whether writes are expected to survive the session
    pub fn is_persistent(&self) -> bool {
        self.backend.is_persistent()
    }

    /// Stored theme; missing or unrecognized values read as the default
    pub fn theme(&self) -> Theme {
        self.backend
            .get(THEME_KEY)
            .and_then(|v| v.parse().ok())
            .unwrap_or_default()
    }

    pub fn set_theme(&mut self, theme: Theme) -> Persistence {
        self.write(THEME_KEY, Some(theme.as_str()))
    }

    pub fn disclaimer_confirmed(&self) -> bool {
        self.backend.get(DISCLAIMER_KEY).as_deref() == Some("true")
    }

    pub fn confirm_disclaimer(&mut self) -> Persistence {
        self.write(DISCLAIMER_KEY, Some("true"))
    }

    pub fn reset_disclaimer(&mut self) -> Persistence {
        self.write(DISCLAIMER_KEY, None)
    }

    fn write(&mut self, key: &str, value: Option<&str>) -> Persistence {
        if !self.backend.is_persistent() {
            // Memory writes can't fail
            let _ = self.backend.set(key, value);
            return Persistence::SessionOnly;
        }
        match self.backend.set(key, value) {
            Ok(()) => Persistence::Persisted,
            Err(e) => {
                warn!("Could not persist preference '{}': {:#}", key, e);
                Persistence::SessionOnly
            }
        }
    }
}
