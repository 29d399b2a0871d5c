//! SQLite snapshot and opportunity store.
//!
//! Provides persistent storage for snapshots, their items and detected
//! opportunities using SQLite and Diesel ORM.

use std::collections::HashMap;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;

use crate::adapter::outbound::sqlite::database::connection::{create_pool, run_migrations, DbPool};
use crate::adapter::outbound::sqlite::database::model::{ItemRow, OpportunityRow, SnapshotRow};
use crate::adapter::outbound::sqlite::database::schema::{items, opportunities, snapshots};
use crate::domain::{
    Item, ItemId, Opportunity, OpportunityId, Snapshot, SnapshotId, SnapshotSummary, SourceKind,
};
use crate::error::{Error, Result};
use crate::port::outbound::store::{
    sort_by_profit, ItemFilter, OpportunityFilter, OpportunityStore, SaveReport, SnapshotStore,
};

/// SQLite-backed store.
///
/// Implements both [`SnapshotStore`] and [`OpportunityStore`] over one
/// connection pool.
pub struct SqliteStore {
    /// Database connection pool.
    pool: DbPool,
}

impl SqliteStore {
    /// Create a new SQLite store with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Open (or create) a database file and bring its schema up to date.
    ///
    /// # Errors
    /// Returns `StorageUnavailable` if the file cannot be opened or migrated.
    pub fn open(database: &str) -> Result<Self> {
        let pool = create_pool(database)?;
        run_migrations(&pool)?;
        Ok(Self::new(pool))
    }

    fn load_items(conn: &mut SqliteConnection, snapshot_id: &str) -> Result<Vec<Item>> {
        let rows: Vec<ItemRow> = items::table
            .filter(items::snapshot_id.eq(snapshot_id))
            .order(items::position.asc())
            .select(ItemRow::as_select())
            .load(conn)?;
        rows.into_iter().map(item_from_row).collect()
    }

    fn load_snapshot(conn: &mut SqliteConnection, row: SnapshotRow) -> Result<Snapshot> {
        let items = Self::load_items(conn, &row.id)?;
        let created_at = parse_timestamp(&row.created_at)?;
        Ok(Snapshot::from_parts(
            SnapshotId::from(row.id),
            row.name,
            created_at,
            items,
        )?)
    }
}

impl SnapshotStore for SqliteStore {
    async fn save_snapshot(&self, snapshot: &Snapshot) -> Result<()> {
        let header = SnapshotRow {
            id: snapshot.id().to_string(),
            name: snapshot.name().to_string(),
            created_at: timestamp(snapshot.created_at()),
        };
        let rows = snapshot
            .items()
            .iter()
            .enumerate()
            .map(|(position, item)| item_row(item, position))
            .collect::<Result<Vec<_>>>()?;

        let mut conn = self.pool.get()?;
        conn.transaction::<_, Error, _>(|conn| {
            let existing: i64 = snapshots::table
                .filter(snapshots::id.eq(header.id.as_str()))
                .count()
                .get_result(conn)?;
            if existing > 0 {
                return Err(Error::SnapshotExists(snapshot.id().clone()));
            }

            diesel::insert_into(snapshots::table)
                .values(&header)
                .execute(conn)?;
            for row in &rows {
                diesel::insert_into(items::table)
                    .values(row)
                    .execute(conn)?;
            }
            Ok(())
        })
    }

    async fn get_snapshot(&self, id: &SnapshotId) -> Result<Option<Snapshot>> {
        let mut conn = self.pool.get()?;

        let row: Option<SnapshotRow> = snapshots::table
            .filter(snapshots::id.eq(id.as_str()))
            .select(SnapshotRow::as_select())
            .first(&mut conn)
            .optional()?;

        row.map(|row| Self::load_snapshot(&mut conn, row))
            .transpose()
    }

    async fn get_latest_snapshot(&self) -> Result<Option<Snapshot>> {
        let mut conn = self.pool.get()?;

        let row: Option<SnapshotRow> = snapshots::table
            .order((snapshots::created_at.desc(), snapshots::id.desc()))
            .select(SnapshotRow::as_select())
            .first(&mut conn)
            .optional()?;

        row.map(|row| Self::load_snapshot(&mut conn, row))
            .transpose()
    }

    async fn list_snapshots(&self, limit: usize) -> Result<Vec<SnapshotSummary>> {
        let mut conn = self.pool.get()?;

        let rows: Vec<SnapshotRow> = snapshots::table
            .order((snapshots::created_at.desc(), snapshots::id.desc()))
            .limit(sql_limit(limit))
            .select(SnapshotRow::as_select())
            .load(&mut conn)?;

        let ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
        let counts: HashMap<String, i64> = items::table
            .filter(items::snapshot_id.eq_any(ids))
            .group_by(items::snapshot_id)
            .select((items::snapshot_id, diesel::dsl::count(items::id)))
            .load::<(String, i64)>(&mut conn)?
            .into_iter()
            .collect();

        rows.into_iter()
            .map(|row| {
                let item_count = counts.get(&row.id).copied().unwrap_or(0);
                Ok(SnapshotSummary {
                    created_at: parse_timestamp(&row.created_at)?,
                    item_count: usize::try_from(item_count)
                        .map_err(|e| Error::Parse(e.to_string()))?,
                    id: SnapshotId::from(row.id),
                    name: row.name,
                })
            })
            .collect()
    }

    async fn query_items(&self, filter: &ItemFilter) -> Result<Vec<Item>> {
        let mut conn = self.pool.get()?;

        let mut query = items::table
            .inner_join(snapshots::table)
            .select(ItemRow::as_select())
            .order((
                snapshots::created_at.desc(),
                snapshots::id.desc(),
                items::position.asc(),
            ))
            .limit(sql_limit(filter.limit))
            .into_boxed();

        if let Some(id) = &filter.snapshot_id {
            query = query.filter(items::snapshot_id.eq(id.as_str()));
        }
        if let Some(source) = filter.source {
            query = query.filter(items::source.eq(source.as_str()));
        }

        let rows: Vec<ItemRow> = query.load(&mut conn)?;
        rows.into_iter().map(item_from_row).collect()
    }
}

impl OpportunityStore for SqliteStore {
    async fn save_opportunities(&self, found: &[Opportunity]) -> Result<SaveReport> {
        let rows: Vec<OpportunityRow> = found.iter().map(opportunity_row).collect();
        let mut conn = self.pool.get()?;

        let inserted = conn.transaction::<_, Error, _>(|conn| {
            let mut inserted = 0;
            for row in &rows {
                inserted += diesel::insert_or_ignore_into(opportunities::table)
                    .values(row)
                    .execute(conn)?;
            }
            Ok(inserted)
        })?;

        Ok(SaveReport {
            inserted,
            skipped: rows.len() - inserted,
        })
    }

    async fn query_opportunities(&self, filter: &OpportunityFilter) -> Result<Vec<Opportunity>> {
        let mut conn = self.pool.get()?;

        let mut query = opportunities::table
            .select(OpportunityRow::as_select())
            .order((opportunities::detected_at.desc(), opportunities::id.asc()))
            .into_boxed();

        if let Some(id) = &filter.snapshot_id {
            query = query.filter(opportunities::snapshot_id.eq(id.as_str()));
        }
        if let Some(since) = filter.since {
            query = query.filter(opportunities::detected_at.ge(timestamp(since)));
        }

        let rows: Vec<OpportunityRow> = query.load(&mut conn)?;
        let mut found = rows
            .into_iter()
            .map(opportunity_from_row)
            .collect::<Result<Vec<_>>>()?;

        // Amounts are text columns; thresholds compare as decimals here.
        found.retain(|o| filter.admits(o));
        sort_by_profit(&mut found);
        found.truncate(filter.limit);
        Ok(found)
    }
}

fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(raw)
        .map_err(|e| Error::Parse(format!("timestamp {raw:?}: {e}")))?
        .with_timezone(&Utc))
}

fn parse_decimal(raw: &str) -> Result<Decimal> {
    Decimal::from_str(raw).map_err(|e| Error::Parse(format!("amount {raw:?}: {e}")))
}

fn parse_source(raw: &str) -> Result<SourceKind> {
    raw.parse().map_err(|e| Error::Parse(format!("{e}")))
}

fn sql_limit(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}

fn item_row(item: &Item, position: usize) -> Result<ItemRow> {
    Ok(ItemRow {
        id: item.id.to_string(),
        snapshot_id: item.snapshot_id.to_string(),
        position: i32::try_from(position).map_err(|e| Error::Parse(e.to_string()))?,
        source: item.source.as_str().to_string(),
        name: item.name.clone(),
        price: item.price.to_string(),
        url: item.url.clone(),
        scraped_at: timestamp(item.scraped_at),
    })
}

fn item_from_row(row: ItemRow) -> Result<Item> {
    Ok(Item {
        source: parse_source(&row.source)?,
        price: parse_decimal(&row.price)?,
        scraped_at: parse_timestamp(&row.scraped_at)?,
        id: ItemId::from(row.id),
        snapshot_id: SnapshotId::from(row.snapshot_id),
        name: row.name,
        url: row.url,
    })
}

fn opportunity_row(o: &Opportunity) -> OpportunityRow {
    OpportunityRow {
        id: o.id().to_string(),
        snapshot_id: o.snapshot_id().to_string(),
        item_name: o.item_name().to_string(),
        buy_item_id: o.buy_item_id().to_string(),
        buy_source: o.buy_source().as_str().to_string(),
        buy_price: o.buy_price().to_string(),
        buy_url: o.buy_url().map(str::to_string),
        sell_item_id: o.sell_item_id().to_string(),
        sell_source: o.sell_source().as_str().to_string(),
        sell_price: o.sell_price().to_string(),
        sell_url: o.sell_url().map(str::to_string),
        profit_amount: o.profit_amount().to_string(),
        profit_percent: o.profit_percent().to_string(),
        detected_at: timestamp(o.detected_at()),
    }
}

fn opportunity_from_row(row: OpportunityRow) -> Result<Opportunity> {
    Ok(Opportunity {
        buy_source: parse_source(&row.buy_source)?,
        buy_price: parse_decimal(&row.buy_price)?,
        sell_source: parse_source(&row.sell_source)?,
        sell_price: parse_decimal(&row.sell_price)?,
        profit_amount: parse_decimal(&row.profit_amount)?,
        profit_percent: parse_decimal(&row.profit_percent)?,
        detected_at: parse_timestamp(&row.detected_at)?,
        id: OpportunityId::from(row.id),
        snapshot_id: SnapshotId::from(row.snapshot_id),
        item_name: row.item_name,
        buy_item_id: ItemId::from(row.buy_item_id),
        buy_url: row.buy_url,
        sell_item_id: ItemId::from(row.sell_item_id),
        sell_url: row.sell_url,
    })
}
