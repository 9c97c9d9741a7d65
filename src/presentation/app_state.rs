// Application state for HTTP handlers
use crate::application::dashboard_state::DashboardState;

#[derive(Clone)]
pub struct AppState {
    pub dashboard: DashboardState,
    pub stream_url: String,
}
