use crate::aggregate::{
    by_value_desc, difference_from_median, mean_by_age_and_category, price_quartiles_by_category,
    sum_by_category, sum_by_payment_method, Metric,
};
use crate::charts::{self, Chart, Color, Kind, Value};
use crate::dataset::{Dataset, PaymentMethod, Transaction};
use crate::pages::Page;
use std::collections::BTreeSet;

/// The static visualizations, built once from the whole dataset.
pub fn distributions(dataset: &Dataset) -> Page {
    let records = dataset.records();
    Page {
        title: "Data Visualizations".to_string(),
        description: "Spending by age, totals per category and payment method, \
                      median differences and price distributions."
            .to_string(),
        permalink: "distributions".to_string(),
        charts: vec![
            age_category_line(records),
            category_totals_histogram(records),
            payment_totals_bar(records),
            median_difference_scatter(records),
            price_box_by_category(records),
        ],
        notes: vec![
            "The key takeaway from the line plot is that Technology has the \
             highest average price, while Food & Beverage has the minimum \
             average price."
                .to_string(),
            "The key takeaway from the histogram is that Clothing has the \
             highest total number of sales, whereas Souvenir has the least."
                .to_string(),
            "The key takeaway from the bar chart is that Cash is the most \
             popular payment method, resulting in the highest total sales, \
             followed by Credit Card and then Debit Card."
                .to_string(),
            "The key takeaway from the scatter plot is that all payment \
             methods have a very similar median price. Most spending amounts \
             are close to the median, although there are some outliers."
                .to_string(),
            "The box plot shows the price distribution per category; wide \
             boxes mean uneven spending within the category."
                .to_string(),
        ],
    }
}

/// Mean price by customer age, one line per category.
pub fn age_category_line(records: &[Transaction]) -> Chart {
    let means = mean_by_age_and_category(records);
    let ages: BTreeSet<u32> = means.keys().map(|(age, _)| *age).collect();
    let categories: BTreeSet<&String> = means.keys().map(|(_, category)| category).collect();

    let labels: Vec<String> = ages.iter().map(|age| age.to_string()).collect();
    let mut chart = Chart::new(
        "Spending Amount vs. Customer Age Across Different Product Categories".to_string(),
        Kind::Line,
        labels,
    );
    for (category, color) in categories.iter().zip(Color::rainbow().into_iter().cycle()) {
        // ages with no observation for this category leave a gap
        let data: Vec<Value> = ages
            .iter()
            .map(|age| {
                means
                    .get(&(*age, (*category).clone()))
                    .map(|mean| Value::Num(*mean))
                    .unwrap_or(Value::Null)
            })
            .collect();
        chart.add_dataset(charts::Dataset {
            label: (*category).clone(),
            data,
            background_color: vec![color],
            border_color: vec![color],
            ..Default::default()
        });
    }
    chart
}

/// Total value per category, largest first, extremes highlighted.
pub fn category_totals_histogram(records: &[Transaction]) -> Chart {
    let totals = by_value_desc(&sum_by_category(records, Metric::TotalSales));
    let labels: Vec<String> = totals.iter().map(|(category, _)| category.clone()).collect();
    let data: Vec<Value> = totals.iter().map(|(_, total)| Value::Num(*total)).collect();
    // first is the max, last is the min
    let background_color: Vec<Color> = (0..totals.len())
        .map(|i| {
            if i == 0 {
                Color::Green
            } else if i + 1 == totals.len() {
                Color::Red
            } else {
                Color::Blue
            }
        })
        .collect();

    let mut chart = Chart::new(
        "Total Value per Product Category".to_string(),
        Kind::Bar,
        labels,
    );
    chart.add_dataset(charts::Dataset {
        label: "total value".to_string(),
        data,
        background_color,
        ..Default::default()
    });
    chart
}

/// Total sales per payment method with the cross-method average as a
/// dashed reference line.
pub fn payment_totals_bar(records: &[Transaction]) -> Chart {
    let per_method = sum_by_payment_method(records);
    let labels: Vec<String> = per_method.totals.keys().map(|m| m.to_string()).collect();
    let data: Vec<Value> = per_method.totals.values().map(|v| Value::Num(*v)).collect();

    let mut chart = Chart::new(
        "Total Sales by Payment Method".to_string(),
        Kind::Bar,
        labels,
    );
    chart.add_dataset(charts::Dataset {
        label: "total sales".to_string(),
        data,
        background_color: vec![Color::Blue],
        ..Default::default()
    });
    chart.add_dataset(charts::Dataset {
        label: "Average Sales".to_string(),
        data: vec![Value::Num(per_method.mean); per_method.totals.len()],
        border_color: vec![Color::Red],
        border_dash: Some([5, 5]),
        kind: Some(Kind::Line),
        ..Default::default()
    });
    chart
}

/// Price per payment method, each point colored by its difference from
/// the method's median on a diverging scale.
pub fn median_difference_scatter(records: &[Transaction]) -> Chart {
    let differences = difference_from_median(records);
    let extent = differences
        .iter()
        .map(|(_, d)| d.abs())
        .fold(0.0, f64::max);

    let labels: Vec<String> = PaymentMethod::ALL.iter().map(|m| m.to_string()).collect();
    let mut data = Vec::with_capacity(differences.len());
    let mut background_color = Vec::with_capacity(differences.len());
    for (t, difference) in &differences {
        let x = PaymentMethod::ALL
            .iter()
            .position(|m| *m == t.payment_method)
            .unwrap_or(0) as f64;
        data.push(Value::xy(x, t.price));
        background_color.push(Color::diverging(*difference, extent));
    }

    let mut chart = Chart::new(
        "Spending Amount with Difference from Median Spending".to_string(),
        Kind::Scatter,
        labels,
    );
    chart.add_dataset(charts::Dataset {
        label: "difference from median".to_string(),
        data,
        background_color,
        ..Default::default()
    });
    chart
}

/// Price distribution per category as five-number boxes.
pub fn price_box_by_category(records: &[Transaction]) -> Chart {
    let quartiles = price_quartiles_by_category(records);
    let labels: Vec<String> = quartiles.keys().cloned().collect();
    let data: Vec<Value> = quartiles
        .values()
        .map(|q| Value::Box {
            min: q.min,
            q1: q.q1,
            median: q.median,
            q3: q.q3,
            max: q.max,
        })
        .collect();

    let mut chart = Chart::new(
        "Price Distribution per Product Category".to_string(),
        Kind::Box,
        labels,
    );
    chart.add_dataset(charts::Dataset {
        label: "price".to_string(),
        data,
        background_color: Color::rainbow(),
        ..Default::default()
    });
    chart
}
