//! Grouped summaries over the transaction table.
//!
//! Every function here is pure: same records in, bit-identical maps out.
//! `BTreeMap` keys give ascending iteration order without extra sorting.

use crate::dataset::{PaymentMethod, Transaction};
use std::collections::BTreeMap;

/// Which numeric column a sum runs over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Price,
    /// quantity × price
    TotalSales,
}

impl Metric {
    fn of(&self, t: &Transaction) -> f64 {
        match self {
            Metric::Price => t.price,
            Metric::TotalSales => t.total_sales(),
        }
    }
}

/// Mean price per (age, category), ascending by the pair.
pub fn mean_by_age_and_category(records: &[Transaction]) -> BTreeMap<(u32, String), f64> {
    let mut sums: BTreeMap<(u32, String), (f64, u64)> = BTreeMap::new();
    for t in records {
        let entry = sums.entry((t.age, t.category.clone())).or_insert((0.0, 0));
        entry.0 += t.price;
        entry.1 += 1;
    }
    sums.into_iter()
        .map(|(key, (sum, n))| (key, sum / n as f64))
        .collect()
}

pub fn sum_by_category(records: &[Transaction], metric: Metric) -> BTreeMap<String, f64> {
    let mut totals = BTreeMap::new();
    for t in records {
        *totals.entry(t.category.clone()).or_insert(0.0) += metric.of(t);
    }
    totals
}

/// Total sales per payment method plus the cross-method mean, the
/// reference value for the "average line" overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentTotals {
    pub totals: BTreeMap<PaymentMethod, f64>,
    pub mean: f64,
}

pub fn sum_by_payment_method(records: &[Transaction]) -> PaymentTotals {
    let mut totals: BTreeMap<PaymentMethod, f64> = BTreeMap::new();
    for t in records {
        *totals.entry(t.payment_method).or_insert(0.0) += t.total_sales();
    }
    let mean = if totals.is_empty() {
        0.0
    } else {
        totals.values().sum::<f64>() / totals.len() as f64
    };
    PaymentTotals { totals, mean }
}

pub fn median_by_payment_method(records: &[Transaction]) -> BTreeMap<PaymentMethod, f64> {
    let mut prices: BTreeMap<PaymentMethod, Vec<f64>> = BTreeMap::new();
    for t in records {
        prices.entry(t.payment_method).or_default().push(t.price);
    }
    prices
        .into_iter()
        .map(|(method, mut values)| {
            values.sort_by(f64::total_cmp);
            (method, median_of_sorted(&values))
        })
        .collect()
}

/// Per-record `price − median(payment_method)`, in dataset order.
///
/// This is a derived value, not a further aggregate, and it is
/// median-centered on purpose: within a group the differences do not
/// average to zero.
pub fn difference_from_median(records: &[Transaction]) -> Vec<(&Transaction, f64)> {
    let medians = median_by_payment_method(records);
    records
        .iter()
        .map(|t| {
            let median = medians.get(&t.payment_method).copied().unwrap_or(0.0);
            (t, t.price - median)
        })
        .collect()
}

/// Transaction count per (mall, category). The caller passes the
/// category-filtered view, see [`crate::dataset::Dataset::of_category`].
pub fn count_by_mall_and_category<'a, I>(records: I) -> BTreeMap<(String, String), u64>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut counts = BTreeMap::new();
    for t in records {
        *counts
            .entry((t.shopping_mall.clone(), t.category.clone()))
            .or_insert(0) += 1;
    }
    counts
}

/// Five-number summary of a distribution.
#[derive(Debug, Clone, PartialEq)]
pub struct FiveNum {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

pub fn price_quartiles_by_category(records: &[Transaction]) -> BTreeMap<String, FiveNum> {
    let mut prices: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for t in records {
        prices.entry(t.category.clone()).or_default().push(t.price);
    }
    prices
        .into_iter()
        .map(|(category, mut values)| {
            values.sort_by(f64::total_cmp);
            let summary = FiveNum {
                min: values[0],
                q1: quantile_of_sorted(&values, 0.25),
                median: median_of_sorted(&values),
                q3: quantile_of_sorted(&values, 0.75),
                max: values[values.len() - 1],
            };
            (category, summary)
        })
        .collect()
}

/// Pairs of a map, largest value first. Drives the descending-total
/// histogram ordering.
pub fn by_value_desc(map: &BTreeMap<String, f64>) -> Vec<(String, f64)> {
    let mut pairs: Vec<(String, f64)> = map.iter().map(|(k, v)| (k.clone(), *v)).collect();
    pairs.sort_by(|a, b| b.1.total_cmp(&a.1));
    pairs
}

fn median_of_sorted(values: &[f64]) -> f64 {
    let n = values.len();
    if n == 0 {
        0.0
    } else if n % 2 == 1 {
        values[n / 2]
    } else {
        (values[n / 2 - 1] + values[n / 2]) / 2.0
    }
}

/// Linear interpolation between the two nearest ranks.
fn quantile_of_sorted(values: &[f64], q: f64) -> f64 {
    let position = q * (values.len() - 1) as f64;
    let below = position.floor() as usize;
    let above = position.ceil() as usize;
    if below == above {
        values[below]
    } else {
        let weight = position - below as f64;
        values[below] * (1.0 - weight) + values[above] * weight
    }
}
