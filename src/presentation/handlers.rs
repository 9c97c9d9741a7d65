// HTTP request handlers
use crate::presentation::app_state::AppState;
use crate::presentation::overlay::render_overlay_svg;
use crate::presentation::page::render_page;
use crate::presentation::view::DashboardView;
use axum::{
    Json, Router,
    extract::State,
    http::header,
    response::{
        Html, IntoResponse,
        sse::{Event, KeepAlive, Sse},
    },
    routing::get,
};
use std::{convert::Infallible, sync::Arc};
use tokio_stream::{Stream, StreamExt, wrappers::WatchStream};
use tower_http::trace::TraceLayer;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(dashboard_page))
        .route("/healthz", get(health_check))
        .route("/api/dashboard", get(dashboard_json))
        .route("/api/events", get(dashboard_events))
        .route("/overlay.svg", get(overlay_svg))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

pub async fn dashboard_page(State(state): State<Arc<AppState>>) -> Html<String> {
    let view = DashboardView::from_data(&state.dashboard.current());
    Html(render_page(&view, &state.stream_url))
}

/// Current view model as JSON
pub async fn dashboard_json(State(state): State<Arc<AppState>>) -> Json<DashboardView> {
    Json(DashboardView::from_data(&state.dashboard.current()))
}

/// Server-sent view updates: the current view on connect, then one event
/// per replaced snapshot
pub async fn dashboard_events(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let stream = WatchStream::new(state.dashboard.subscribe()).filter_map(|data| {
        match Event::default().json_data(DashboardView::from_data(&data)) {
            Ok(event) => Some(Ok(event)),
            Err(e) => {
                tracing::warn!("Failed to encode dashboard event: {}", e);
                None
            }
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}

/// Trail overlay redrawn from the latest movement samples
pub async fn overlay_svg(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let data = state.dashboard.current();
    (
        [
            (header::CONTENT_TYPE, "image/svg+xml"),
            (header::CACHE_CONTROL, "no-store"),
        ],
        render_overlay_svg(&data.trail),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dashboard_state::DashboardState;
    use crate::domain::metrics::{MetricSnapshot, Reading};
    use crate::domain::movement::{MovementSample, Trail};
    use chrono::{TimeZone, Utc};

    async fn serve(state: Arc<AppState>) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router(state)).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn app_state() -> Arc<AppState> {
        Arc::new(AppState {
            dashboard: DashboardState::new(),
            stream_url: "http://camera/video_feed".to_string(),
        })
    }

    #[tokio::test]
    async fn test_health_check() {
        let base = serve(app_state()).await;
        let body = reqwest::get(format!("{}/healthz", base))
            .await
            .unwrap()
            .text()
            .await
            .unwrap();
        assert_eq!(body, "ok");
    }

    #[tokio::test]
    async fn test_json_reflects_latest_snapshot() {
        let state = app_state();
        state.dashboard.replace(
            1,
            MetricSnapshot::from_readings(
                Reading::new(120.456, 80.0),
                Reading::default(),
                Reading::default(),
                Reading::default(),
            ),
            Trail::empty(),
        );
        let base = serve(state).await;

        let view: serde_json::Value = reqwest::get(format!("{}/api/dashboard", base))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        assert_eq!(view["cards"][0]["current"], "120.46m");
        assert_eq!(view["cards"][0]["standard"], "80.00m");
        assert_eq!(view["cards"][0]["percentage"], 100.0);
        assert_eq!(view["cards"][0]["color"], "#ff9800");
    }

    /// Read until one complete SSE frame has arrived
    async fn next_event(response: &mut reqwest::Response) -> String {
        let mut frame = String::new();
        while !frame.contains("\n\n") {
            let chunk = response.chunk().await.unwrap().expect("stream closed");
            frame.push_str(&String::from_utf8_lossy(&chunk));
        }
        frame
    }

    #[tokio::test]
    async fn test_events_push_each_replacement() {
        let state = app_state();
        let base = serve(state.clone()).await;

        let mut response = reqwest::get(format!("{}/api/events", base)).await.unwrap();
        assert_eq!(
            response.headers()[reqwest::header::CONTENT_TYPE],
            "text/event-stream"
        );

        let initial = next_event(&mut response).await;
        assert!(initial.starts_with("data:"));
        assert!(initial.contains(r#""current":"0.00m""#));

        state.dashboard.replace(
            1,
            MetricSnapshot::from_readings(
                Reading::new(120.456, 80.0),
                Reading::default(),
                Reading::default(),
                Reading::default(),
            ),
            Trail::empty(),
        );

        let update = next_event(&mut response).await;
        assert!(update.contains(r#""current":"120.46m""#));
        assert!(update.contains(r#""band":"High""#));
        assert!(update.contains(r#""cycle":1"#));
    }

    #[tokio::test]
    async fn test_overlay_svg() {
        let state = app_state();
        let at = Utc.with_ymd_and_hms(2025, 5, 20, 10, 0, 0).unwrap();
        state.dashboard.replace(
            1,
            MetricSnapshot::default(),
            Trail::from_samples(vec![
                MovementSample::new(10.0, 10.0, at),
                MovementSample::new(20.0, 20.0, at + chrono::Duration::seconds(5)),
            ]),
        );
        let base = serve(state).await;

        let response = reqwest::get(format!("{}/overlay.svg", base)).await.unwrap();
        assert_eq!(
            response.headers()[reqwest::header::CONTENT_TYPE],
            "image/svg+xml"
        );
        let svg = response.text().await.unwrap();
        assert_eq!(svg.matches("<circle").count(), 4);
        assert!(svg.contains("r=\"60\""));
    }

    #[tokio::test]
    async fn test_page_renders() {
        let base = serve(app_state()).await;
        let html = reqwest::get(base).await.unwrap().text().await.unwrap();
        assert!(html.contains("http://camera/video_feed"));
        assert!(html.contains("Sleeping"));
    }
}
