//! Database model types for Diesel ORM.
//!
//! Amounts are stored as decimal text and timestamps as fixed-width RFC 3339
//! text, so string order matches chronological order.

use diesel::prelude::*;

use super::schema::{items, opportunities, snapshots};

/// Database row for a snapshot header.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = snapshots)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SnapshotRow {
    pub id: String,
    pub name: String,
    pub created_at: String,
}

/// Database row for an item.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = items)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ItemRow {
    pub id: String,
    pub snapshot_id: String,
    /// Scrape order within the snapshot.
    pub position: i32,
    pub source: String,
    pub name: String,
    pub price: String,
    pub url: Option<String>,
    pub scraped_at: String,
}

/// Database row for an opportunity.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = opportunities)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct OpportunityRow {
    pub id: String,
    pub snapshot_id: String,
    pub item_name: String,
    pub buy_item_id: String,
    pub buy_source: String,
    pub buy_price: String,
    pub buy_url: Option<String>,
    pub sell_item_id: String,
    pub sell_source: String,
    pub sell_price: String,
    pub sell_url: Option<String>,
    pub profit_amount: String,
    pub profit_percent: String,
    pub detected_at: String,
}
