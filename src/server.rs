use axum::extract::{Query, State};
use axum::response::Html;
use axum::routing::get;
use axum::Router;
use log::info;
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;

use crate::dataset::Dataset;
use crate::explorer::{Event, SelectionState};
use crate::pages;

/// Immutable per-process state: the dataset and the pages that never
/// change after startup. Shared read-only across sessions, no locking.
pub struct Site {
    dataset: Dataset,
    home: String,
    about: String,
    distributions: String,
    insights: String,
}

impl Site {
    pub fn new(dataset: Dataset) -> Site {
        let home = pages::home().into_string();
        let about = pages::about().into_string();
        let distributions_page = pages::distributions(&dataset);
        info!("built static page /{}", distributions_page.permalink);
        let distributions = distributions_page.to_html().into_string();
        let insights = pages::insights(&dataset).into_string();
        Site {
            dataset,
            home,
            about,
            distributions,
            insights,
        }
    }

    /// The explorer is the only per-request render: the query string
    /// carries the session's events, so selection state never crosses
    /// sessions.
    pub fn render_filter(&self, params: &FilterParams) -> String {
        let mut state = SelectionState::new(&self.dataset);
        if let Some(category) = &params.category {
            state.apply(Event::CategoryChanged(category.clone()));
        }
        if let Some(point) = &params.selected {
            state.apply(Event::PointSelected(point.clone()));
        }
        pages::filter(&self.dataset, &state).into_string()
    }
}

/// Query parameters of the explorer route, the wire form of the
/// controller events.
#[derive(Debug, Default, Deserialize)]
pub struct FilterParams {
    pub category: Option<String>,
    pub selected: Option<String>,
}

pub fn router(site: Arc<Site>) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/about", get(about))
        .route("/distributions", get(distributions))
        .route("/filter", get(filter))
        .route("/insights", get(insights))
        // unknown paths render the home content, never an error page
        .fallback(home)
        .with_state(site)
}

pub async fn serve(site: Arc<Site>, addr: SocketAddr) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening on http://{}", addr);
    axum::serve(listener, router(site)).await
}

async fn home(State(site): State<Arc<Site>>) -> Html<String> {
    Html(site.home.clone())
}

async fn about(State(site): State<Arc<Site>>) -> Html<String> {
    Html(site.about.clone())
}

async fn distributions(State(site): State<Arc<Site>>) -> Html<String> {
    Html(site.distributions.clone())
}

async fn insights(State(site): State<Arc<Site>>) -> Html<String> {
    Html(site.insights.clone())
}

async fn filter(
    State(site): State<Arc<Site>>,
    Query(params): Query<FilterParams>,
) -> Html<String> {
    Html(site.render_filter(&params))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::dataset::test::small_dataset;
    use pretty_assertions::assert_eq;

    fn site() -> Site {
        Site::new(small_dataset())
    }

    #[test]
    fn test_static_pages_render_once() {
        let site = site();
        assert!(site.home.contains("Welcome"));
        assert!(site.about.contains("About the Dataset"));
        assert!(site.distributions.contains("<canvas"));
        assert!(site.insights.contains("Critical Insights"));
    }

    #[test]
    fn test_filter_defaults_to_first_category() {
        let site = site();
        let html = site.render_filter(&FilterParams::default());
        assert!(html.contains("value=\"Clothing\" selected"));
    }

    #[test]
    fn test_filter_params_drive_events() {
        let site = site();
        let with_category = site.render_filter(&FilterParams {
            category: Some("Shoes".to_string()),
            selected: None,
        });
        assert!(with_category.contains("value=\"Shoes\" selected"));
        assert!(!with_category.contains("Clear selection"));

        let with_selection = site.render_filter(&FilterParams {
            category: None,
            selected: Some("Shoes".to_string()),
        });
        assert!(with_selection.contains("value=\"Shoes\" selected"));
        assert!(with_selection.contains("Clear selection"));
    }

    #[test]
    fn test_unknown_category_still_renders() {
        let site = site();
        let html = site.render_filter(&FilterParams {
            category: Some("Souvenir".to_string()),
            selected: None,
        });
        assert!(html.contains("Interactive Visualizations"));
    }

    #[tokio::test]
    async fn test_unknown_path_renders_home() {
        use axum::body::Body;
        use axum::http::Request;
        use http_body_util::BodyExt;
        use tower::ServiceExt;

        let app = router(Arc::new(site()));
        let home = app
            .clone()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let unknown = app
            .oneshot(
                Request::builder()
                    .uri("/no-such-page")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let home_body = home.into_body().collect().await.unwrap().to_bytes();
        let unknown_body = unknown.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(home_body, unknown_body);
    }
}
