use crate::dataset::Dataset;
use crate::explorer::SelectionState;
use crate::pages::page;
use maud::{html, Markup};

/// The interactive explorer view: a category selector and the two
/// linked chart regions, rendered from the session's selection state.
pub fn filter(dataset: &Dataset, state: &SelectionState) -> Markup {
    let view = state.view(dataset);
    let content = html! {
        h2 { "Interactive Visualizations" }
        h3 { "Select a category to update the visualizations:" }

        form action="/filter" method="get" {
            select name="category" onchange="this.form.submit()" {
                @for category in dataset.categories() {
                    option value=(category) selected[category == state.category()] {
                        (category)
                    }
                }
            }
            noscript { button type="submit" { "Update" } }
        }

        @if state.selected().is_some() {
            p {
                a href={ "/filter?category=" (urlencoding::encode(state.category())) } {
                    "Clear selection"
                }
            }
        }

        div style="width: 48%; display: inline-block;" {
            (view.overview.to_html())
        }
        div style="width: 48%; display: inline-block;" {
            (view.detail.to_html())
        }
    };
    page(content, "")
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::dataset::test::small_dataset;
    use crate::explorer::Event;

    #[test]
    fn test_selector_lists_domain_and_marks_current() {
        let dataset = small_dataset();
        let mut state = SelectionState::new(&dataset);
        state.apply(Event::CategoryChanged("Shoes".to_string()));
        let html = filter(&dataset, &state).into_string();
        for category in dataset.categories() {
            assert!(html.contains(&format!("option value=\"{}\"", category)));
        }
        assert!(html.contains("value=\"Shoes\" selected"));
        assert_eq!(html.matches("<canvas").count(), 2);
    }

    #[test]
    fn test_clear_link_only_when_selected() {
        let dataset = small_dataset();
        let mut state = SelectionState::new(&dataset);
        assert!(!filter(&dataset, &state)
            .into_string()
            .contains("Clear selection"));
        state.apply(Event::PointSelected("Shoes".to_string()));
        let html = filter(&dataset, &state).into_string();
        assert!(html.contains("Clear selection"));
        assert!(html.contains("/filter?category=Shoes"));
    }
}
