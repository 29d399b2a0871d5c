//! Report rendering for opportunities, snapshots, and items.
//!
//! Every renderer returns the finished report as a string; [`emit`] decides
//! whether it lands on stdout or in a file.

use std::path::Path;

use serde::Serialize;
use tabled::{Table, Tabled};

use super::command::OutputFormat;
use super::output;
use crate::domain::{Item, Opportunity, SnapshotSummary};
use crate::error::Result;

const NAME_WIDTH: usize = 40;
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Print a report to stdout, or write it to `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn emit(report: &str, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, report)?;
            output::success(&format!(
                "Results written to {}",
                output::highlight(path.display())
            ));
        }
        None => {
            if report.ends_with('\n') {
                print!("{report}");
            } else {
                println!("{report}");
            }
        }
    }
    Ok(())
}

#[derive(Tabled)]
struct OpportunityRow {
    #[tabled(rename = "Product")]
    product: String,
    #[tabled(rename = "Buy From")]
    buy_from: String,
    #[tabled(rename = "Buy Price")]
    buy_price: String,
    #[tabled(rename = "Sell To")]
    sell_to: String,
    #[tabled(rename = "Sell Price")]
    sell_price: String,
    #[tabled(rename = "Profit")]
    profit: String,
    #[tabled(rename = "Profit %")]
    percent: String,
}

impl OpportunityRow {
    fn new(opp: &Opportunity) -> Self {
        Self {
            product: truncate(opp.item_name(), NAME_WIDTH),
            buy_from: opp.buy_source().to_string(),
            buy_price: money(opp.buy_price()),
            sell_to: opp.sell_source().to_string(),
            sell_price: money(opp.sell_price()),
            profit: money(opp.profit_amount()),
            percent: percent(opp.profit_percent()),
        }
    }
}

#[derive(Tabled)]
struct HistoryRow {
    #[tabled(inline)]
    opportunity: OpportunityRow,
    #[tabled(rename = "Detected")]
    detected: String,
}

#[derive(Tabled)]
struct SnapshotRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Created")]
    created: String,
    #[tabled(rename = "Items")]
    items: usize,
}

#[derive(Tabled)]
struct ItemRow {
    #[tabled(rename = "Source")]
    source: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "URL")]
    url: String,
    #[tabled(rename = "Snapshot")]
    snapshot: String,
}

/// Render opportunities. `with_timestamp` adds the detection time column,
/// used when showing history.
///
/// # Errors
///
/// Returns an error only if JSON serialization fails.
pub fn opportunities(
    opportunities: &[Opportunity],
    format: OutputFormat,
    with_timestamp: bool,
) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(opportunities),
        OutputFormat::Csv => {
            let mut header = vec![
                "Product",
                "Buy From",
                "Buy Price",
                "Sell To",
                "Sell Price",
                "Profit",
                "Profit %",
            ];
            if with_timestamp {
                header.push("Timestamp");
            }
            let rows = opportunities.iter().map(|opp| {
                let mut row = vec![
                    opp.item_name().to_string(),
                    opp.buy_source().to_string(),
                    money(opp.buy_price()),
                    opp.sell_source().to_string(),
                    money(opp.sell_price()),
                    money(opp.profit_amount()),
                    percent(opp.profit_percent()),
                ];
                if with_timestamp {
                    row.push(opp.detected_at().format(TIMESTAMP_FORMAT).to_string());
                }
                row
            });
            Ok(csv(&header, rows))
        }
        _ if opportunities.is_empty() => Ok("No arbitrage opportunities found.".to_string()),
        OutputFormat::Text => {
            let mut lines = vec![format!("Found {} opportunities:", opportunities.len())];
            for (i, opp) in opportunities.iter().enumerate() {
                lines.push(String::new());
                lines.push(format!("{}. {}", i + 1, opp.item_name()));
                lines.push(format!(
                    "   Buy from {} for {}",
                    opp.buy_source(),
                    money(opp.buy_price())
                ));
                lines.push(format!(
                    "   Sell to {} for {}",
                    opp.sell_source(),
                    money(opp.sell_price())
                ));
                lines.push(format!(
                    "   Profit: {} ({})",
                    money(opp.profit_amount()),
                    percent(opp.profit_percent())
                ));
                if with_timestamp {
                    lines.push(format!(
                        "   Date: {}",
                        opp.detected_at().format(TIMESTAMP_FORMAT)
                    ));
                }
            }
            Ok(lines.join("\n"))
        }
        OutputFormat::Table if with_timestamp => Ok(Table::new(opportunities.iter().map(|opp| {
            HistoryRow {
                opportunity: OpportunityRow::new(opp),
                detected: opp.detected_at().format("%Y-%m-%d %H:%M").to_string(),
            }
        }))
        .to_string()),
        OutputFormat::Table => {
            Ok(Table::new(opportunities.iter().map(OpportunityRow::new)).to_string())
        }
    }
}

/// Render snapshot headers.
///
/// # Errors
///
/// Returns an error only if JSON serialization fails.
pub fn snapshots(snapshots: &[SnapshotSummary], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(snapshots),
        OutputFormat::Csv => Ok(csv(
            &["ID", "Name", "Created", "Items"],
            snapshots.iter().map(|s| {
                vec![
                    s.id.to_string(),
                    s.name.clone(),
                    s.created_at.to_rfc3339(),
                    s.item_count.to_string(),
                ]
            }),
        )),
        _ if snapshots.is_empty() => Ok("No snapshots found.".to_string()),
        OutputFormat::Text => Ok(snapshots
            .iter()
            .map(|s| {
                format!(
                    "{}  {}  {} ({} items)",
                    s.id,
                    s.created_at.format(TIMESTAMP_FORMAT),
                    s.name,
                    s.item_count
                )
            })
            .collect::<Vec<_>>()
            .join("\n")),
        OutputFormat::Table => Ok(Table::new(snapshots.iter().map(|s| SnapshotRow {
            id: s.id.to_string(),
            name: s.name.clone(),
            created: s.created_at.format(TIMESTAMP_FORMAT).to_string(),
            items: s.item_count,
        }))
        .to_string()),
    }
}

/// Render items.
///
/// # Errors
///
/// Returns an error only if JSON serialization fails.
pub fn items(items: &[Item], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(items),
        OutputFormat::Csv => Ok(csv(
            &["Source", "Name", "Price", "URL", "Snapshot"],
            items.iter().map(|item| {
                vec![
                    item.source.to_string(),
                    item.name.clone(),
                    money(item.price),
                    item.url.clone().unwrap_or_default(),
                    item.snapshot_id.to_string(),
                ]
            }),
        )),
        _ if items.is_empty() => Ok("No items found.".to_string()),
        OutputFormat::Text => {
            let mut lines = Vec::with_capacity(items.len() * 2);
            for (i, item) in items.iter().enumerate() {
                lines.push(format!("{}. [{}] {}", i + 1, item.source, item.name));
                match &item.url {
                    Some(url) => lines.push(format!("   Price: {}  {}", money(item.price), url)),
                    None => lines.push(format!("   Price: {}", money(item.price))),
                }
            }
            Ok(lines.join("\n"))
        }
        OutputFormat::Table => Ok(Table::new(items.iter().map(|item| ItemRow {
            source: item.source.to_string(),
            name: truncate(&item.name, NAME_WIDTH),
            price: money(item.price),
            url: item.url.clone().unwrap_or_default(),
            snapshot: item.snapshot_id.to_string(),
        }))
        .to_string()),
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn money(value: rust_decimal::Decimal) -> String {
    format!("{value:.2}")
}

fn percent(value: rust_decimal::Decimal) -> String {
    format!("{value:.2}%")
}

fn truncate(name: &str, width: usize) -> String {
    if name.chars().count() <= width {
        return name.to_string();
    }
    let kept: String = name.chars().take(width - 3).collect();
    format!("{kept}...")
}

fn csv<I>(header: &[&str], rows: I) -> String
where
    I: IntoIterator<Item = Vec<String>>,
{
    let mut out = header.join(",");
    out.push('\n');
    for row in rows {
        let cells: Vec<String> = row.iter().map(|cell| csv_field(cell)).collect();
        out.push_str(&cells.join(","));
        out.push('\n');
    }
    out
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
