//! The category explorer: a per-session selection driving two linked
//! charts.
//!
//! The state lives in the request, never in the process: every render
//! starts from [`SelectionState::new`] and replays the events encoded
//! in the URL, so one viewer's choice cannot leak into another's view
//! and re-entering the page resets to the initial category.

use crate::aggregate::count_by_mall_and_category;
use crate::charts::{self, Chart, Color, Kind, Value};
use crate::dataset::Dataset;

/// Clicking a rendered point navigates back with the clicked series'
/// category, which the server maps to [`Event::PointSelected`].
const ON_CLICK_JS: &str = "function(e, elements, chart) { \
if (elements.length > 0) { \
var label = chart.data.datasets[elements[0].datasetIndex].label; \
window.location = '/filter?category=' + encodeURIComponent(label) + \
'&selected=' + encodeURIComponent(label); } }";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    CategoryChanged(String),
    PointSelected(String),
    SelectionCleared,
}

/// The current category choice plus the transient point selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    category: String,
    selected: Option<String>,
}

impl SelectionState {
    /// Initial state: the first category of the dataset's domain, in
    /// first-observed order.
    pub fn new(dataset: &Dataset) -> SelectionState {
        SelectionState {
            category: dataset.categories().first().cloned().unwrap_or_default(),
            selected: None,
        }
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn apply(&mut self, event: Event) {
        match event {
            Event::CategoryChanged(category) => {
                self.category = category;
                self.selected = None;
            }
            // selection on one chart drives the other into sync
            Event::PointSelected(category) => {
                self.category = category.clone();
                self.selected = Some(category);
            }
            Event::SelectionCleared => {
                self.selected = None;
            }
        }
    }

    /// Recompute both charts from the current state.
    ///
    /// The pair is built together and replaces the previous one
    /// wholesale, a viewer never sees a half-updated page. A category
    /// outside the dataset's domain yields empty charts, not an error.
    pub fn view(&self, dataset: &Dataset) -> ExplorerView {
        if !dataset.categories().iter().any(|c| c == &self.category) {
            return ExplorerView {
                overview: Chart::new(
                    "Overview Visualization".to_string(),
                    Kind::Scatter,
                    vec![],
                ),
                detail: Chart::new("Transactions per mall".to_string(), Kind::Bar, vec![]),
            };
        }
        ExplorerView {
            overview: overview_scatter(dataset, &self.category, self.selected.as_deref()),
            detail: mall_bars(dataset, &self.category),
        }
    }
}

pub struct ExplorerView {
    pub overview: Chart,
    pub detail: Chart,
}

/// Age/price scatter over the whole dataset, one series per category,
/// the current one in red and the rest in grey.
pub fn overview_scatter(dataset: &Dataset, category: &str, selected: Option<&str>) -> Chart {
    let mut chart = Chart::new(
        format!("Overview Visualization for {}", category),
        Kind::Scatter,
        vec![],
    );
    for cat in dataset.categories() {
        let current = cat == category;
        let data: Vec<Value> = dataset
            .of_category(cat)
            .map(|t| Value::xy(t.age as f64, t.price))
            .collect();
        chart.add_dataset(charts::Dataset {
            label: cat.clone(),
            data,
            background_color: vec![if current { Color::Red } else { Color::Grey }],
            // the transient point selection adds a border to the
            // highlighted series; clearing it restores the base chart
            border_color: if current && selected.is_some() {
                vec![Color::Red]
            } else {
                vec![]
            },
            ..Default::default()
        });
    }
    chart.set_on_click(ON_CLICK_JS);
    chart
}

/// Transaction counts per mall for the chosen category.
pub fn mall_bars(dataset: &Dataset, category: &str) -> Chart {
    let counts = count_by_mall_and_category(dataset.of_category(category));
    let labels: Vec<String> = counts.keys().map(|(mall, _)| mall.clone()).collect();
    let data: Vec<Value> = counts.values().map(|c| Value::Num(*c as f64)).collect();
    let mut chart = Chart::new(
        format!("Transactions per mall for {}", category),
        Kind::Bar,
        labels,
    );
    chart.add_dataset(charts::Dataset {
        label: category.to_string(),
        data,
        background_color: vec![Color::Green],
        ..Default::default()
    });
    chart.set_on_click(ON_CLICK_JS);
    chart
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::dataset::test::small_dataset;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_initial_category_is_deterministic() {
        let dataset = small_dataset();
        let state = SelectionState::new(&dataset);
        assert_eq!(state.category(), "Clothing");
        assert_eq!(state.selected(), None);
    }

    #[test]
    fn test_category_changed_updates_both_charts() {
        let dataset = small_dataset();
        let mut state = SelectionState::new(&dataset);
        let before = state.view(&dataset);
        state.apply(Event::CategoryChanged("Shoes".to_string()));
        let after = state.view(&dataset);
        assert_ne!(
            before.overview.to_json_dict(),
            after.overview.to_json_dict()
        );
        assert_ne!(before.detail.to_json_dict(), after.detail.to_json_dict());
        assert!(after.detail.to_json_dict().contains("Shoes"));
    }

    #[test]
    fn test_point_selected_is_category_change() {
        let dataset = small_dataset();
        let mut by_event = SelectionState::new(&dataset);
        by_event.apply(Event::PointSelected("Shoes".to_string()));
        assert_eq!(by_event.category(), "Shoes");
        assert_eq!(by_event.selected(), Some("Shoes"));

        // the detail chart is the same as after a plain category change
        let mut by_change = SelectionState::new(&dataset);
        by_change.apply(Event::CategoryChanged("Shoes".to_string()));
        assert_eq!(
            by_event.view(&dataset).detail.to_json_dict(),
            by_change.view(&dataset).detail.to_json_dict()
        );
    }

    #[test]
    fn test_clear_selection_is_idempotent_render() {
        let dataset = small_dataset();
        let mut selected = SelectionState::new(&dataset);
        selected.apply(Event::PointSelected("Shoes".to_string()));
        let highlighted = selected.view(&dataset);
        selected.apply(Event::SelectionCleared);
        assert_eq!(selected.category(), "Shoes");

        let mut plain = SelectionState::new(&dataset);
        plain.apply(Event::CategoryChanged("Shoes".to_string()));

        // cleared state renders exactly like the never-selected one
        assert_eq!(
            selected.view(&dataset).overview.to_json_dict(),
            plain.view(&dataset).overview.to_json_dict()
        );
        // and the selection highlight did make a difference before
        assert_ne!(
            highlighted.overview.to_json_dict(),
            selected.view(&dataset).overview.to_json_dict()
        );
    }

    #[test]
    fn test_unknown_category_yields_empty_charts() {
        let dataset = small_dataset();
        let mut state = SelectionState::new(&dataset);
        state.apply(Event::CategoryChanged("Souvenir".to_string()));
        let view = state.view(&dataset);
        assert!(view.overview.datasets().is_empty());
        assert!(view.detail.datasets().is_empty());
        assert!(view.detail.labels().is_empty());
    }

    #[test]
    fn test_detail_counts_only_selected_category() {
        let dataset = small_dataset();
        let chart = mall_bars(&dataset, "Shoes");
        assert_eq!(chart.labels(), &["Forum Istanbul", "Metropol AVM"]);
        let json = chart.to_json_dict();
        assert!(json.contains("\"data\":[1.0,1.0]"));
    }

    #[test]
    fn test_overview_has_one_series_per_category() {
        let dataset = small_dataset();
        let chart = overview_scatter(&dataset, "Clothing", None);
        assert_eq!(chart.datasets().len(), dataset.categories().len());
    }

    #[test]
    fn test_empty_dataset_degrades() {
        let dataset = crate::dataset::Dataset::new(vec![]);
        let state = SelectionState::new(&dataset);
        assert_eq!(state.category(), "");
        let view = state.view(&dataset);
        assert!(view.overview.datasets().is_empty());
    }
}
