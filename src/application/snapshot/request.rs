//! Scrape request descriptor handed in by inbound adapters.

use crate::domain::SourceKind;
use crate::port::outbound::source::Query;

/// What to scrape: live product URLs, their optional display names, and
/// whether to include the whole static catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrapeRequest {
    pub urls: Vec<String>,
    /// Display names paired with `urls` by position. Extra names are
    /// ignored; URLs past the last name keep their scraped titles.
    pub names: Vec<String>,
    pub include_static: bool,
    pub snapshot_name: Option<String>,
}

impl ScrapeRequest {
    /// Expand the request into per-source queries, live URLs first.
    #[must_use]
    pub fn queries(&self) -> Vec<Query> {
        let mut queries: Vec<Query> = self
            .urls
            .iter()
            .enumerate()
            .map(|(i, url)| {
                let query = Query::new(SourceKind::Amazon, url.trim());
                match self.names.get(i) {
                    Some(name) => query.with_name(name.as_str()),
                    None => query,
                }
            })
            .collect();

        if self.include_static {
            queries.push(Query::static_catalog());
        }
        queries
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty() && !self.include_static
    }
}
