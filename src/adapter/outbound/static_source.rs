//! Deterministic demo catalog.
//!
//! Needs no network. Used for offline runs and as the second source in
//! tests, behind the same [`ItemSource`] contract as the live scraper.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::domain::{parse_price, ProductKey, RawItem, SourceKind};
use crate::error::SourceError;
use crate::port::outbound::source::{ItemSource, Query};

/// One listing of the static catalog, price as display text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    pub price: String,
    #[serde(default)]
    pub url: Option<String>,
}

impl CatalogEntry {
    fn new(name: &str, price: &str, url: &str) -> Self {
        Self {
            name: name.to_string(),
            price: price.to_string(),
            url: Some(url.to_string()),
        }
    }
}

/// Configuration for the static source.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StaticSourceConfig {
    #[serde(default = "default_catalog")]
    pub catalog: Vec<CatalogEntry>,
}

impl Default for StaticSourceConfig {
    fn default() -> Self {
        Self {
            catalog: default_catalog(),
        }
    }
}

/// The built-in demo catalog.
#[must_use]
pub fn default_catalog() -> Vec<CatalogEntry> {
    vec![
        CatalogEntry::new("USB Cable", "£9.99", "http://example.com/product1"),
        CatalogEntry::new("HDMI Cable", "£14.99", "http://example.com/product2"),
        CatalogEntry::new("Wireless Mouse", "£24.99", "http://example.com/product3"),
        CatalogEntry::new("iPhone 16 128GB", "£830", "http://example.com/product4"),
        CatalogEntry::new("iPhone 16 256GB", "£900", "http://example.com/product5"),
    ]
}

/// In-process item source backed by a fixed catalog.
#[derive(Debug, Clone)]
pub struct StaticSource {
    items: Vec<RawItem>,
}

impl StaticSource {
    /// Normalize the catalog once. Entries whose price or name do not
    /// survive normalization are skipped.
    #[must_use]
    pub fn new(config: &StaticSourceConfig) -> Self {
        let items = config
            .catalog
            .iter()
            .filter_map(|entry| {
                let price = match parse_price(&entry.price) {
                    Ok(price) => price,
                    Err(e) => {
                        warn!(name = %entry.name, error = %e, "Skipping catalog entry");
                        return None;
                    }
                };
                match RawItem::try_new(SourceKind::Static, &entry.name, price, entry.url.clone()) {
                    Ok(item) => Some(item),
                    Err(e) => {
                        warn!(name = %entry.name, error = %e, "Skipping catalog entry");
                        None
                    }
                }
            })
            .collect();
        Self { items }
    }

    /// Normalized catalog, in declaration order.
    #[must_use]
    pub fn items(&self) -> &[RawItem] {
        &self.items
    }
}

impl Default for StaticSource {
    fn default() -> Self {
        Self::new(&StaticSourceConfig::default())
    }
}

#[async_trait]
impl ItemSource for StaticSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Static
    }

    async fn fetch(&self, query: &Query) -> Result<Vec<RawItem>, SourceError> {
        let target = query.target.trim();
        let wanted = (!target.is_empty() && target != "*").then(|| ProductKey::from_name(target));

        let items: Vec<RawItem> = self
            .items
            .iter()
            .filter(|item| {
                wanted
                    .as_ref()
                    .map_or(true, |key| ProductKey::from_name(item.name()) == *key)
            })
            .map(|item| {
                item.clone()
                    .with_name_override(query.name_override.as_deref())
            })
            .collect();

        if items.is_empty() {
            return Err(SourceError::NotFound {
                query: query.target.clone(),
            });
        }
        debug!(query = %query, items = items.len(), "Static catalog matched");
        Ok(items)
    }
}
