use crate::aggregate::{by_value_desc, count_by_mall_and_category, sum_by_category, Metric};
use crate::dataset::Dataset;
use crate::pages::page;
use maud::{html, Markup};
use std::collections::BTreeMap;

/// The headline numbers, computed from the dataset instead of quoted,
/// so the page cannot drift from the data.
pub fn insights(dataset: &Dataset) -> Markup {
    let totals = by_value_desc(&sum_by_category(dataset.records(), Metric::TotalSales));
    let top = totals.first().cloned();
    let bottom = totals.last().cloned();

    let mut mall_counts: BTreeMap<String, u64> = BTreeMap::new();
    for ((mall, _), count) in count_by_mall_and_category(dataset.records()) {
        *mall_counts.entry(mall).or_insert(0) += count;
    }
    let busiest = mall_counts
        .iter()
        .max_by_key(|(_, count)| **count)
        .map(|(mall, count)| (mall.clone(), *count));

    let card_style = "background-color: #d9edf7; padding: 15px; border-radius: 10px; \
                      margin: 10px; width: 30%; display: inline-block; text-align: center;";

    let content = html! {
        h2 { "Critical Insights" }

        div {
            @if let Some((category, total)) = &top {
                div style=(card_style) {
                    h4 { (category) " Sales" }
                    p { "Top-selling category with " (amount(*total)) " in revenue." }
                }
            }
            @if let Some((category, total)) = &bottom {
                div style=(card_style) {
                    h4 { (category) " Sales" }
                    p { "Least popular category with " (amount(*total)) " in revenue." }
                }
            }
            @if let Some((mall, count)) = &busiest {
                div style=(card_style) {
                    h4 { (mall) }
                    p { "Highest transactions among all malls (" (count) ")." }
                }
            }
        }

        h3 { "Strategic Takeaways" }
        ul {
            @if let Some((category, _)) = &top {
                li { "Focus marketing efforts on " b { (category) } ", the top-performing category." }
            }
            li { "Enhance cash payment facilities to accommodate customer preferences." }
            @if let Some((mall, _)) = &busiest {
                li { "Leverage the footfall of " b { (mall) } " for promotional campaigns." }
            }
            li { "Target specific age groups, given no clear trends in spending by age." }
        }
    };

    page(content, "")
}

/// Short human form of a money amount: $174K, $31.2M.
fn amount(value: f64) -> String {
    if value >= 1_000_000.0 {
        format!("${:.1}M", value / 1_000_000.0)
    } else if value >= 1_000.0 {
        format!("${:.0}K", value / 1_000.0)
    } else {
        format!("${:.0}", value)
    }
}
