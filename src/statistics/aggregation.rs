//! Grouping of expenses into category and vendor breakdowns.
//!
//! Provides functions to bucket expenses by their resolved category, merge
//! vendor totals by decrypted vendor name, and turn the buckets into rows
//! with percentage shares for display.

use std::collections::HashMap;

use serde::Serialize;

use crate::{
    category::{
        CategoryIndex, DEFAULT_ICON, NEUTRAL_GRAY, UNCATEGORIZED_KEY, UNCATEGORIZED_LABEL,
        resolve_category,
    },
    crypto::Decrypt,
    expense::{Expense, VendorTotalRow},
};

/// The number of vendors returned when the client does not ask for a limit.
pub const DEFAULT_VENDOR_LIMIT: usize = 10;

/// The sum of the expenses resolved to one category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryAggregate {
    /// The key of the resolved category: its ID, `name:<lowercased name>` or `uncategorized`.
    pub category_key: String,
    /// The name shown for the category.
    pub display_name: String,
    /// The hex color shown for the category.
    pub color: String,
    /// The icon shown for the category.
    pub icon: String,
    /// The sum of the expense amounts.
    pub total: f64,
    /// The number of expenses.
    pub count: i64,
}

/// A category's row in a breakdown, with its share of the grand total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    /// The resolved category key.
    pub category_id: String,
    /// The name shown for the category.
    pub category_name: String,
    /// The hex color shown for the category.
    pub color: String,
    /// The icon shown for the category.
    pub icon: String,
    /// The sum of the expense amounts.
    pub total: f64,
    /// The number of expenses.
    pub count: i64,
    /// The category's share of the grand total as a percentage, rounded to 2 decimal places.
    pub percentage: f64,
}

/// The sum of the expenses at one decrypted vendor.
#[derive(Debug, Clone, PartialEq)]
pub struct VendorAggregate {
    /// The decrypted vendor name.
    pub vendor_name: String,
    /// The sum of the expense amounts.
    pub total: f64,
    /// The number of expenses.
    pub count: i64,
}

/// A vendor's row in a breakdown, with its share of the grand total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VendorShare {
    /// The decrypted vendor name.
    pub vendor: String,
    /// The sum of the expense amounts.
    pub total: f64,
    /// The number of expenses.
    pub count: i64,
    /// The vendor's share of the grand total as a percentage, rounded to 2 decimal places.
    pub percentage: f64,
}

/// The top vendors by total spend.
#[derive(Debug, Clone, PartialEq)]
pub struct VendorBreakdown {
    /// The sum of the totals of the vendors in `vendors`.
    pub grand_total: f64,
    /// The top vendors, largest total first.
    pub vendors: Vec<VendorShare>,
}

/// Sums expenses by their resolved category.
///
/// Expenses with an amount of exactly zero are skipped. The aggregates are
/// returned in the order their categories were first seen and are keyed by
/// [CategoryAggregate::category_key].
///
/// # Returns
/// At least one aggregate: if no expense was counted, a single empty
/// uncategorized aggregate is returned so callers always have a row to show.
pub fn aggregate_categories(
    expenses: &[Expense],
    index: &CategoryIndex,
    decryptor: &dyn Decrypt,
) -> Vec<CategoryAggregate> {
    let mut aggregates: Vec<CategoryAggregate> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for expense in expenses.iter().filter(|expense| expense.amount != 0.0) {
        let resolved = resolve_category(expense, index, decryptor);
        let key = resolved.key();

        let position = match positions.get(&key) {
            Some(&position) => position,
            None => {
                aggregates.push(CategoryAggregate {
                    category_key: key.clone(),
                    display_name: resolved.display_name().to_owned(),
                    color: resolved.color().to_owned(),
                    icon: resolved.icon().to_owned(),
                    total: 0.0,
                    count: 0,
                });
                positions.insert(key, aggregates.len() - 1);
                aggregates.len() - 1
            }
        };

        let aggregate = &mut aggregates[position];
        aggregate.total += expense.amount;
        aggregate.count += 1;
    }

    if aggregates.is_empty() {
        aggregates.push(CategoryAggregate {
            category_key: UNCATEGORIZED_KEY.to_owned(),
            display_name: UNCATEGORIZED_LABEL.to_owned(),
            color: NEUTRAL_GRAY.to_owned(),
            icon: DEFAULT_ICON.to_owned(),
            total: 0.0,
            count: 0,
        });
    }

    aggregates
}

/// Turns category aggregates into display rows.
///
/// # Returns
/// Tuple of (grand total over all aggregates, rows sorted by descending
/// total). Percentages are zero when the grand total is not positive.
pub fn category_breakdown(aggregates: Vec<CategoryAggregate>) -> (f64, Vec<CategoryShare>) {
    let grand_total: f64 = aggregates.iter().map(|aggregate| aggregate.total).sum();

    let mut rows: Vec<CategoryShare> = aggregates
        .into_iter()
        .map(|aggregate| CategoryShare {
            percentage: percentage_of(aggregate.total, grand_total),
            category_id: aggregate.category_key,
            category_name: aggregate.display_name,
            color: aggregate.color,
            icon: aggregate.icon,
            total: aggregate.total,
            count: aggregate.count,
        })
        .collect();

    rows.sort_by(|a, b| b.total.total_cmp(&a.total));

    (grand_total, rows)
}

/// Merges per-ciphertext vendor totals by decrypted vendor name.
///
/// Rows whose vendor cannot be decrypted are skipped. The merged vendors are
/// returned in the order they were first seen.
pub fn aggregate_vendors(rows: &[VendorTotalRow], decryptor: &dyn Decrypt) -> Vec<VendorAggregate> {
    let mut aggregates: Vec<VendorAggregate> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for row in rows {
        let vendor_name = match decryptor.decrypt(&row.vendor) {
            Ok(vendor_name) => vendor_name,
            Err(error) => {
                tracing::debug!("skipping vendor that could not be decrypted: {error}");
                continue;
            }
        };

        match positions.get(&vendor_name) {
            Some(&position) => {
                let aggregate = &mut aggregates[position];
                aggregate.total += row.total;
                aggregate.count += row.count;
            }
            None => {
                positions.insert(vendor_name.clone(), aggregates.len());
                aggregates.push(VendorAggregate {
                    vendor_name,
                    total: row.total,
                    count: row.count,
                });
            }
        }
    }

    aggregates
}

/// Picks the `limit` vendors with the largest totals.
///
/// Percentages and the grand total only count the vendors that made the
/// cut, so the returned percentages add up to 100% even if other vendors
/// were left out.
pub fn top_vendors(mut aggregates: Vec<VendorAggregate>, limit: usize) -> VendorBreakdown {
    aggregates.sort_by(|a, b| b.total.total_cmp(&a.total));
    aggregates.truncate(limit);

    let grand_total: f64 = aggregates.iter().map(|aggregate| aggregate.total).sum();

    let vendors = aggregates
        .into_iter()
        .map(|aggregate| VendorShare {
            percentage: percentage_of(aggregate.total, grand_total),
            vendor: aggregate.vendor_name,
            total: aggregate.total,
            count: aggregate.count,
        })
        .collect();

    VendorBreakdown {
        grand_total,
        vendors,
    }
}

/// Rounds `value` to 2 decimal places.
pub(super) fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn percentage_of(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        round_to_cents(part / whole * 100.0)
    } else {
        0.0
    }
}
