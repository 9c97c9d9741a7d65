// HTTP repository implementation for the activity backend
use crate::application::activity_repository::{
    ActivityRepository, DietInfo, Endpoint, RecentMovements, SleepInfo, TrackingInfo, WaterInfo,
};
use crate::infrastructure::config::endpoint_url;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HttpActivityRepository {
    base_url: String,
    client: reqwest::Client,
}

impl HttpActivityRepository {
    pub fn new(base_url: String, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    async fn fetch<T: DeserializeOwned>(&self, endpoint: Endpoint) -> Result<T> {
        let url = endpoint_url(&self.base_url, endpoint.path());

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .with_context(|| format!("Failed to send request to {}", url))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("{} returned status {}: {}", endpoint, status, body);
        }

        response
            .json::<T>()
            .await
            .with_context(|| format!("Failed to parse {} response", endpoint))
    }
}

#[async_trait]
impl ActivityRepository for HttpActivityRepository {
    async fn tracking_info(&self) -> Result<TrackingInfo> {
        self.fetch(Endpoint::Tracking).await
    }

    async fn recent_movements(&self) -> Result<RecentMovements> {
        self.fetch(Endpoint::RecentMovements).await
    }

    async fn diet_info(&self) -> Result<DietInfo> {
        self.fetch(Endpoint::Diet).await
    }

    async fn water_info(&self) -> Result<WaterInfo> {
        self.fetch(Endpoint::Water).await
    }

    async fn sleep_info(&self) -> Result<SleepInfo> {
        self.fetch(Endpoint::Sleep).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::poller::Poller;
    use axum::{Json, Router, http::StatusCode, routing::get};
    use serde_json::json;
    use std::sync::Arc;

    fn backend(sleep_ok: bool) -> Router {
        let router = Router::new()
            .route(
                "/get_tracking_info",
                get(|| async {
                    Json(json!({"total_movement_today": 120.456, "avg_movement_past_7days": 80.0}))
                }),
            )
            .route(
                "/recent_movements",
                get(|| async {
                    Json(json!({"recent_movements": [
                        {"x": "320", "y": "240", "timestamp": "Tue, 20 May 2025 10:00:05 GMT"},
                        {"x": 100, "y": 80, "timestamp": "Tue, 20 May 2025 10:00:00 GMT"}
                    ]}))
                }),
            )
            .route(
                "/get_diet_info",
                get(|| async { Json(json!({"total_diet": 35.4, "prev_avg_diet": 40})) }),
            )
            .route(
                "/get_water_info",
                get(|| async { Json(json!({"total_water": 12, "prev_avg_water": 10.6})) }),
            );

        if sleep_ok {
            router.route(
                "/get_sleep_info",
                get(|| async { Json(json!({"total_sleep": 27000, "prev_avg_sleep": 28800})) }),
            )
        } else {
            router.route(
                "/get_sleep_info",
                get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "database unavailable") }),
            )
        }
    }

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/", addr)
    }

    #[tokio::test]
    async fn test_fetches_each_endpoint() {
        let base = serve(backend(true)).await;
        let repo = HttpActivityRepository::new(base, None).unwrap();

        let tracking = repo.tracking_info().await.unwrap();
        assert_eq!(tracking.total_movement_today, 120.456);

        let recent = repo.recent_movements().await.unwrap();
        assert_eq!(recent.recent_movements.len(), 2);
        assert_eq!(recent.recent_movements[0].x, 320.0);

        let sleep = repo.sleep_info().await.unwrap();
        assert_eq!(sleep.prev_avg_sleep, 28800.0);
    }

    #[tokio::test]
    async fn test_full_cycle_over_http() {
        let base = serve(backend(true)).await;
        let repo = Arc::new(HttpActivityRepository::new(base, None).unwrap());

        let (snapshot, trail) = Poller::new(repo, Duration::from_secs(10))
            .poll_once()
            .await
            .unwrap();

        assert_eq!(snapshot.water_baseline, 10.6);
        assert_eq!(snapshot.sleep_today, 7.5);
        assert_eq!(trail.samples()[0].x, 100.0);
        assert_eq!(trail.samples()[1].x, 320.0);
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        let base = serve(backend(false)).await;
        let repo = HttpActivityRepository::new(base, None).unwrap();

        let err = repo.sleep_info().await.unwrap_err();
        let message = err.to_string();
        assert!(message.contains("get_sleep_info"));
        assert!(message.contains("500"));
    }

    #[tokio::test]
    async fn test_unreachable_backend_fails() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let repo = HttpActivityRepository::new(
            format!("http://{}", addr),
            Some(Duration::from_secs(2)),
        )
        .unwrap();
        assert!(repo.tracking_info().await.is_err());
    }
}
