use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_BACKEND_URL: &str = "https://macro-coil-459205-d6.du.r.appspot.com/";
pub const DEFAULT_STREAM_URL: &str = "http://192.168.0.86:5005/video_feed";
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 10;
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DashboardConfig {
    pub backend_url: String,
    pub stream_url: String,
    pub poll_interval_secs: u64,
    pub listen_addr: String,
    /// Per-request timeout; the transport default applies when unset
    pub request_timeout_secs: Option<u64>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            stream_url: DEFAULT_STREAM_URL.to_string(),
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            request_timeout_secs: None,
        }
    }
}

impl DashboardConfig {
    pub fn poll_interval(&self) -> Duration {
        // interval() panics on a zero period
        Duration::from_secs(self.poll_interval_secs.max(1))
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

/// Load `config/dashboard.{toml,yaml,json}` if present, otherwise the built-in defaults
pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    load_from("config/dashboard")
}

fn load_from(name: &str) -> anyhow::Result<DashboardConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name(name).required(false))
        .build()?;

    Ok(settings.try_deserialize()?)
}

/// Join a base URL and an endpoint path with exactly one slash
pub fn endpoint_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
