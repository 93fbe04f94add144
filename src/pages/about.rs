use crate::pages::page;
use maud::{html, Markup};

pub fn about() -> Markup {
    let content = html! {
        h2 { "About the Dataset" }

        p {
            "This dataset contains shopping transaction data from 10 shopping malls \
             in Istanbul, collected between 2021 and 2023. It provides detailed \
             information on customer behavior, including demographics, payment \
             methods, product categories, quantities purchased, and the shopping \
             mall location."
        }
        p { "Key attributes include:" }
        ul {
            li { "Invoice numbers" }
            li { "Customer IDs" }
            li { "Age, Gender" }
            li { "Product categories" }
            li { "Price" }
            li { "Payment method" }
            li { "Transaction date" }
            li { "Shopping mall names" }
        }
        p {
            "This dataset is a valuable resource for analyzing shopping trends, \
             patterns, and customer preferences in Istanbul."
        }
    };

    page(content, "")
}

#[cfg(test)]
mod test {
    use super::about;

    #[test]
    fn test_about_renders() {
        let html = about().into_string();
        assert!(html.contains("About the Dataset"));
        assert!(html.contains("Istanbul"));
    }
}
