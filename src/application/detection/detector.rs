//! Pairwise price-gap detection over a snapshot's items.
//!
//! Items are grouped by [`ProductKey`]. Within a group every pair from two
//! different sources is compared; the cheaper item is the buy leg. Profit is
//! computed at money precision before the thresholds are applied, so a gap
//! that rounds to exactly the threshold qualifies.
//!
//! Detection is pure and synchronous: no I/O, no suspension points, and the
//! output is fully determined by the items, thresholds and timestamp.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use tracing::{debug, trace};

use crate::domain::{round_money, Item, Opportunity, ProductKey};
use crate::port::outbound::store::sort_by_profit;

/// Minimum-profit policy for emitted opportunities.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Thresholds {
    /// Inclusive lower bound on `profit_percent`.
    #[serde(default = "default_min_profit_percent")]
    pub min_profit_percent: Decimal,

    /// Inclusive lower bound on `profit_amount`, when set.
    #[serde(default)]
    pub min_profit_amount: Option<Decimal>,
}

fn default_min_profit_percent() -> Decimal {
    dec!(5.0)
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            min_profit_percent: default_min_profit_percent(),
            min_profit_amount: None,
        }
    }
}

impl Thresholds {
    #[must_use]
    pub const fn new(min_profit_percent: Decimal, min_profit_amount: Option<Decimal>) -> Self {
        Self {
            min_profit_percent,
            min_profit_amount,
        }
    }

    /// Whether a candidate meets both bounds.
    ///
    /// Bounds compare at money precision, the same two places the
    /// candidate's derived fields are rounded to.
    #[must_use]
    pub fn admits(&self, opportunity: &Opportunity) -> bool {
        opportunity.profit_percent() >= round_money(self.min_profit_percent)
            && self
                .min_profit_amount
                .map_or(true, |min| opportunity.profit_amount() >= round_money(min))
    }
}

/// Detection engine.
#[derive(Debug, Clone, Default)]
pub struct Detector {
    thresholds: Thresholds,
}

impl Detector {
    #[must_use]
    pub const fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    #[must_use]
    pub const fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Detect opportunities, stamped with the current time.
    #[must_use]
    pub fn detect(&self, items: &[Item]) -> Vec<Opportunity> {
        self.detect_at(items, Utc::now())
    }

    /// Detect opportunities with an explicit detection timestamp.
    ///
    /// Results are sorted by `profit_percent` then `profit_amount`, both
    /// descending; ties keep the order in which the items appeared.
    #[must_use]
    pub fn detect_at(&self, items: &[Item], detected_at: DateTime<Utc>) -> Vec<Opportunity> {
        let mut found = Vec::new();

        for (key, group) in group_by_product(items) {
            if group.len() < 2 {
                continue;
            }
            trace!(product = %key, size = group.len(), "Comparing product group");

            for (i, a) in group.iter().enumerate() {
                for b in &group[i + 1..] {
                    if a.source == b.source || a.price == b.price {
                        continue;
                    }
                    let (buy, sell) = if a.price < b.price { (a, b) } else { (b, a) };

                    // Pairs that cannot form a valid opportunity are simply not candidates.
                    let Ok(opportunity) = Opportunity::builder()
                        .buy(buy)
                        .sell(sell)
                        .detected_at(detected_at)
                        .build()
                    else {
                        continue;
                    };

                    if self.thresholds.admits(&opportunity) {
                        found.push(opportunity);
                    }
                }
            }
        }

        sort_by_profit(&mut found);
        debug!(
            items = items.len(),
            opportunities = found.len(),
            min_profit_percent = %self.thresholds.min_profit_percent,
            "Detection complete"
        );
        found
    }
}

/// Group items by product key, groups and members in first-appearance order.
///
/// Items without a positive price are left out; they cannot be priced
/// against anything.
#[must_use]
pub fn group_by_product(items: &[Item]) -> Vec<(ProductKey, Vec<&Item>)> {
    let mut index: HashMap<ProductKey, usize> = HashMap::new();
    let mut groups: Vec<(ProductKey, Vec<&Item>)> = Vec::new();

    for item in items.iter().filter(|i| i.price > Decimal::ZERO) {
        let key = item.product_key();
        match index.get(&key) {
            Some(&slot) => groups[slot].1.push(item),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push((key, vec![item]));
            }
        }
    }
    groups
}
