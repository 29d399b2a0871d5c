use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;

use arbitrack::domain::{RawItem, Snapshot, SourceKind};

pub fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, 4, hour, minute, 0)
        .single()
        .expect("valid timestamp")
}

pub fn raw(source: SourceKind, name: &str, price: Decimal) -> RawItem {
    RawItem::try_new(source, name, price, None).expect("valid raw item")
}

pub fn amazon(name: &str, price: Decimal) -> RawItem {
    raw(SourceKind::Amazon, name, price)
}

pub fn catalog(name: &str, price: Decimal) -> RawItem {
    raw(SourceKind::Static, name, price)
}

pub fn snapshot(name: &str, created_at: DateTime<Utc>, items: Vec<RawItem>) -> Snapshot {
    Snapshot::create(Some(name), created_at, items)
}
