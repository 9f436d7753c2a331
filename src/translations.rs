use std::collections::HashMap;
use std::path::Path;

use tracing::{info, instrument, warn};

use crate::error::TranslationError;

/// Canonical English name -> display name. Unknown names pass through unchanged.
#[derive(Debug, Clone, Default)]
pub struct TranslationTable {
    names: HashMap<String, String>,
}

impl TranslationTable {
    pub fn new(names: HashMap<String, String>) -> Self {
        Self { names }
    }

    /// Parse a flat JSON object of string -> string.
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<HashMap<String, String>>(body).map(Self::new)
    }

    #[instrument(level = "info")]
    pub fn load(path: &Path) -> Result<Self, TranslationError> {
        let path_str = path.display().to_string();
        let body = std::fs::read_to_string(path)
            .map_err(|source| TranslationError::Read { path: path_str.clone(), source })?;
        let table = Self::from_json(&body)
            .map_err(|source| TranslationError::Parse { path: path_str.clone(), source })?;
        if table.is_empty() {
            warn!(path = %path_str, "Translation table is empty, names will pass through");
        } else {
            info!(path = %path_str, entries = table.len(), "Loaded translation table");
        }
        Ok(table)
    }

    pub fn translate<'a>(&'a self, name: &'a str) -> &'a str {
        self.names.get(name).map(|s| s.as_str()).unwrap_or(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Both lookup tables used when rendering a report.
#[derive(Debug, Clone, Default)]
pub struct Translations {
    pub leagues: TranslationTable,
    pub teams: TranslationTable,
}

impl Translations {
    pub fn load(leagues_path: &Path, teams_path: &Path) -> Result<Self, TranslationError> {
        Ok(Self {
            leagues: TranslationTable::load(leagues_path)?,
            teams: TranslationTable::load(teams_path)?,
        })
    }
}
