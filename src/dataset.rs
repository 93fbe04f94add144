use chrono::NaiveDate;
use log::info;
use serde::{Deserialize, Deserializer};
use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::Read;
use thiserror::Error;

/// The transactions feed could not be turned into a [`Dataset`].
///
/// Fatal at startup, no partial dashboard is served.
#[derive(Debug, Error)]
pub enum DataUnavailable {
    #[error("data source unreachable: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error("cannot read data source: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot parse data source: {0}")]
    Parse(#[from] csv::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
pub enum PaymentMethod {
    Cash,
    #[serde(rename = "Credit Card")]
    CreditCard,
    #[serde(rename = "Debit Card")]
    DebitCard,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 3] = [
        PaymentMethod::Cash,
        PaymentMethod::CreditCard,
        PaymentMethod::DebitCard,
    ];
}

impl Display for PaymentMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::CreditCard => "Credit Card",
            PaymentMethod::DebitCard => "Debit Card",
        };
        write!(f, "{}", label)
    }
}

/// One row of the feed. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Transaction {
    pub invoice_no: String,
    pub customer_id: String,
    pub gender: String,
    pub age: u32,
    pub category: String,
    pub quantity: u32,
    pub price: f64,
    pub payment_method: PaymentMethod,
    #[serde(deserialize_with = "date_dmy")]
    pub invoice_date: NaiveDate,
    pub shopping_mall: String,
}

impl Transaction {
    pub fn total_sales(&self) -> f64 {
        self.quantity as f64 * self.price
    }
}

fn date_dmy<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    NaiveDate::parse_from_str(s.trim(), "%d/%m/%Y").map_err(serde::de::Error::custom)
}

/// The full in-memory transaction table, read-only after load.
///
/// The category and mall domains are kept in first-observed order, the
/// explorer's initial selection depends on it being deterministic.
#[derive(Debug)]
pub struct Dataset {
    records: Vec<Transaction>,
    categories: Vec<String>,
    malls: Vec<String>,
}

impl Dataset {
    pub fn new(records: Vec<Transaction>) -> Dataset {
        let categories = first_observed(records.iter().map(|t| &t.category));
        let malls = first_observed(records.iter().map(|t| &t.shopping_mall));
        Dataset {
            records,
            categories,
            malls,
        }
    }

    /// Materialize the table from a CSV file path or an http(s) URL.
    ///
    /// The fetch is blocking, it happens once before the server starts.
    pub fn load(source: &str) -> Result<Dataset, DataUnavailable> {
        if source.starts_with("http://") || source.starts_with("https://") {
            info!("fetching {}", source);
            let body = reqwest::blocking::get(source)?.error_for_status()?.bytes()?;
            Dataset::from_reader(body.as_ref())
        } else {
            info!("reading {}", source);
            Dataset::from_reader(File::open(source)?)
        }
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Dataset, DataUnavailable> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();
        for row in csv_reader.deserialize() {
            records.push(row?);
        }
        Ok(Dataset::new(records))
    }

    pub fn records(&self) -> &[Transaction] {
        &self.records
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn malls(&self) -> &[String] {
        &self.malls
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Borrowing view over the records of one category.
    pub fn of_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Transaction> {
        self.records.iter().filter(move |t| t.category == category)
    }
}

fn first_observed<'a>(values: impl Iterator<Item = &'a String>) -> Vec<String> {
    let mut domain: Vec<String> = Vec::new();
    for value in values {
        if !domain.iter().any(|v| v == value) {
            domain.push(value.clone());
        }
    }
    domain
}
