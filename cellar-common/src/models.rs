//! Wine record model
//!
//! A wine as stored in the cellar. Every taxonomic field is free text and may
//! be absent; consumers must degrade gracefully rather than reject a record.

use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

use crate::Result;

/// One bottle line in the cellar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WineRecord {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub subregion: Option<String>,
    #[serde(default)]
    pub commune: Option<String>,
    #[serde(default)]
    pub cru: Option<String>,
    #[serde(default)]
    pub vintage: Option<i32>,
    #[serde(default)]
    pub producer: Option<String>,
    #[serde(default)]
    pub appellation: Option<String>,
    #[serde(default)]
    pub vineyard: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
}

impl Default for WineRecord {
    fn default() -> Self {
        Self::new()
    }
}

impl WineRecord {
    /// Create an empty record with a fresh id
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            color: None,
            region: None,
            subregion: None,
            commune: None,
            cru: None,
            vintage: None,
            producer: None,
            appellation: None,
            vineyard: None,
            size: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn with_subregion(mut self, subregion: impl Into<String>) -> Self {
        self.subregion = Some(subregion.into());
        self
    }

    pub fn with_commune(mut self, commune: impl Into<String>) -> Self {
        self.commune = Some(commune.into());
        self
    }

    pub fn with_cru(mut self, cru: impl Into<String>) -> Self {
        self.cru = Some(cru.into());
        self
    }

    pub fn with_vintage(mut self, vintage: i32) -> Self {
        self.vintage = Some(vintage);
        self
    }

    pub fn with_producer(mut self, producer: impl Into<String>) -> Self {
        self.producer = Some(producer.into());
        self
    }

    pub fn with_appellation(mut self, appellation: impl Into<String>) -> Self {
        self.appellation = Some(appellation.into());
        self
    }

    pub fn with_vineyard(mut self, vineyard: impl Into<String>) -> Self {
        self.vineyard = Some(vineyard.into());
        self
    }

    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }
}

/// Load a JSON array of wine records from disk
///
/// Records without an `id` get a fresh one.
pub fn load_wines_json(path: &Path) -> Result<Vec<WineRecord>> {
    let content = std::fs::read_to_string(path)?;
    let wines: Vec<WineRecord> = serde_json::from_str(&content)?;
    tracing::debug!("Loaded {} wines from {}", wines.len(), path.display());
    Ok(wines)
}
