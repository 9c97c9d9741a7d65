// Dashboard state - the latest snapshot and trail, replaced as a unit
use crate::domain::metrics::MetricSnapshot;
use crate::domain::movement::Trail;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::watch;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardData {
    pub snapshot: MetricSnapshot,
    pub trail: Trail,
    /// Poll cycle that produced this data, 0 before the first success
    pub cycle: u64,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Clone)]
pub struct DashboardState {
    tx: Arc<watch::Sender<Arc<DashboardData>>>,
}

impl DashboardState {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Arc::new(DashboardData::default()));
        Self { tx: Arc::new(tx) }
    }

    pub fn current(&self) -> Arc<DashboardData> {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<DashboardData>> {
        self.tx.subscribe()
    }

    /// Swap in the result of a poll cycle.
    ///
    /// Returns false and leaves state untouched when a newer cycle has
    /// already been applied.
    pub fn replace(&self, cycle: u64, snapshot: MetricSnapshot, trail: Trail) -> bool {
        self.tx.send_if_modified(|current| {
            if cycle <= current.cycle {
                return false;
            }
            *current = Arc::new(DashboardData {
                snapshot,
                trail,
                cycle,
                updated_at: Some(Utc::now()),
            });
            true
        })
    }
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new()
    }
}
