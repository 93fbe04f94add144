mod about;
mod distributions;
mod filter;
mod insights;

use crate::charts::Chart;
use crate::now;
use maud::{html, Markup, PreEscaped, DOCTYPE};

pub use about::about;
pub use distributions::distributions;
pub use filter::filter;
pub use insights::insights;

/// A view made of charts, each with its takeaway paragraph.
pub struct Page {
    pub title: String,
    pub description: String,
    pub permalink: String,
    pub charts: Vec<Chart>,
    pub notes: Vec<String>,
}

const NBSP: PreEscaped<&str> = PreEscaped("&nbsp;");

/// Pages headers.
fn header() -> Markup {
    html! {
        head {
            meta charset="utf-8";
            meta name="viewport" content="width=device-width, initial-scale=1.0";

            script src="https://cdn.jsdelivr.net/npm/chart.js" { }
            script src="https://cdn.jsdelivr.net/npm/@sgratzl/chartjs-chart-boxplot" { }

            title { "Istanbul Shopping Data Insights" }
        }
    }
}

/// A static footer.
fn footer() -> Markup {
    html! {
        p { (NBSP) }
        footer {
            p {
                a href="/" { "Home" } " | "
                a href="/about" { "About" } " | "
                a href="/distributions" { "Distributions" } " | "
                a href="/filter" { "Explorer" } " | "
                a href="/insights" { "Insights" }
            }
            p { "Page created " (now()) }
        }

    }
}

/// The final Markup, including `header` and `footer`.
pub fn page(content: Markup, text: &str) -> Markup {
    html! {
        (DOCTYPE)
        html lang = "en" {
            (header())
            body style="font-family: Arial, Helvetica, sans-serif;" {
                h1 { a href="/" { "Istanbul Shopping Data Insights" } }
                p { (NBSP) }
                (content)
                p { (text) }

                (footer())
            }
        }
    }
}

impl Page {
    pub fn to_html(&self) -> Markup {
        let charts = html! {
            h2 { (self.title) }
            p { (self.description) }
            @for (i, chart) in self.charts.iter().enumerate() {
                (chart.to_html())
                @if let Some(note) = self.notes.get(i) {
                    div {
                        h3 { "Takeaway" }
                        p { (note) }
                    }
                }
                p { (NBSP) }
            }
        };
        page(charts, "")
    }
}

/// The home/default view, also served for unknown paths.
pub fn home() -> Markup {
    let content = html! {
        h2 { "Welcome to Istanbul Shopping Data Insights" }
        p { "Use the links below to explore the dataset and visualizations." }
        ul {
            li {
                p {
                    a href="/about" { "About the Dataset" }
                    " - "
                    "Where the transactions come from and what each column holds."
                }
            }
            li {
                p {
                    a href="/distributions" { "Data Visualizations" }
                    " - "
                    "Spending by age, totals per category and payment method, median differences."
                }
            }
            li {
                p {
                    a href="/filter" { "Product Category Trends" }
                    " - "
                    "Pick a category and watch the two linked charts update."
                }
            }
            li {
                p {
                    a href="/insights" { "Critical Insights" }
                    " - "
                    "The headline numbers and what to do about them."
                }
            }
        }
    };
    page(content, "")
}

#[cfg(test)]
mod test {
    use crate::charts::test::{mock_bar_chart, mock_scatter_chart};
    use crate::pages::{home, page, Page};

    #[test]
    fn test_home_links_every_view() {
        let html = home().into_string();
        for route in ["/about", "/distributions", "/filter", "/insights"] {
            assert!(html.contains(&format!("href=\"{}\"", route)), "{}", route);
        }
    }

    #[test]
    fn test_page_chrome() {
        let html = page(mock_scatter_chart().to_html(), "some text").into_string();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("chart.js"));
        assert!(html.contains("chartjs-chart-boxplot"));
        assert!(html.contains("some text"));
    }

    #[test]
    fn test_page_notes_follow_charts() {
        let page = Page {
            title: "t".to_string(),
            description: "d".to_string(),
            permalink: "p".to_string(),
            charts: vec![mock_bar_chart(), mock_scatter_chart()],
            notes: vec!["first note".to_string(), "second note".to_string()],
        };
        let html = page.to_html().into_string();
        assert!(html.contains("first note"));
        assert!(html.contains("second note"));
        assert_eq!(html.matches("<canvas").count(), 2);
    }
}
