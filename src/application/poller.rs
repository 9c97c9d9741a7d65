// Poller - fetches all five resources on a fixed interval
use crate::application::activity_repository::{ActivityRepository, Endpoint};
use crate::application::dashboard_state::DashboardState;
use crate::domain::metrics::{MetricSnapshot, Reading};
use crate::domain::movement::{MovementSample, Trail, parse_timestamp};
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::{AbortHandle, JoinHandle, JoinSet};
use tokio::time::MissedTickBehavior;

/// Cycles allowed to be pending at once. Without a request timeout a stalled
/// backend would otherwise add one task per tick forever.
const MAX_IN_FLIGHT_CYCLES: usize = 3;

/// A poll cycle that could not produce a complete snapshot
#[derive(Debug, thiserror::Error)]
#[error("fetch cycle failed at {endpoint}: {source:#}")]
pub struct FetchError {
    pub endpoint: Endpoint,
    #[source]
    pub source: anyhow::Error,
}

impl FetchError {
    fn at(endpoint: Endpoint) -> impl FnOnce(anyhow::Error) -> Self {
        move |source| Self { endpoint, source }
    }
}

#[derive(Clone)]
pub struct Poller {
    repository: Arc<dyn ActivityRepository>,
    interval: Duration,
}

impl Poller {
    pub fn new(repository: Arc<dyn ActivityRepository>, interval: Duration) -> Self {
        Self {
            repository,
            interval,
        }
    }

    /// Run one cycle. All five requests settle before the result is decided.
    pub async fn poll_once(&self) -> Result<(MetricSnapshot, Trail), FetchError> {
        let repo = &self.repository;
        let (tracking, recent, diet, water, sleep) = tokio::join!(
            repo.tracking_info(),
            repo.recent_movements(),
            repo.diet_info(),
            repo.water_info(),
            repo.sleep_info(),
        );

        let tracking = tracking.map_err(FetchError::at(Endpoint::Tracking))?;
        let recent = recent.map_err(FetchError::at(Endpoint::RecentMovements))?;
        let diet = diet.map_err(FetchError::at(Endpoint::Diet))?;
        let water = water.map_err(FetchError::at(Endpoint::Water))?;
        let sleep = sleep.map_err(FetchError::at(Endpoint::Sleep))?;

        let samples = recent
            .recent_movements
            .into_iter()
            .map(|raw| -> anyhow::Result<MovementSample> {
                Ok(MovementSample::new(raw.x, raw.y, parse_timestamp(&raw.timestamp)?))
            })
            .collect::<anyhow::Result<Vec<_>>>()
            .map_err(FetchError::at(Endpoint::RecentMovements))?;

        let snapshot = MetricSnapshot::from_readings(
            Reading::from(tracking),
            Reading::from(diet),
            Reading::from(water),
            Reading::from(sleep),
        );

        Ok((snapshot, Trail::from_samples(samples)))
    }

    /// Start polling in the background. Dropping the handle stops it.
    pub fn spawn(self, state: DashboardState) -> PollerHandle {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

        let task = tokio::spawn(async move {
            let poller = Arc::new(self);
            let cycles = Arc::new(AtomicU64::new(0));
            let mut in_flight = JoinSet::new();
            let mut pending: VecDeque<AbortHandle> = VecDeque::new();

            let mut ticker = tokio::time::interval(poller.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            tracing::info!("Polling activity backend every {:?}", poller.interval);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        pending.retain(|task| !task.is_finished());
                        // the oldest cycle could only be applied if no newer one finishes
                        if pending.len() >= MAX_IN_FLIGHT_CYCLES {
                            if let Some(oldest) = pending.pop_front() {
                                tracing::warn!(
                                    "{} poll cycles still pending, abandoning the oldest",
                                    MAX_IN_FLIGHT_CYCLES
                                );
                                oldest.abort();
                            }
                        }

                        let cycle = cycles.fetch_add(1, Ordering::Relaxed) + 1;
                        let poller = poller.clone();
                        let state = state.clone();
                        pending.push_back(in_flight.spawn(async move {
                            poller.run_cycle(cycle, &state).await;
                        }));
                    }
                    // Reap finished cycles so the set stays small
                    Some(_) = in_flight.join_next(), if !in_flight.is_empty() => {}
                    _ = shutdown_rx.changed() => break,
                }
            }

            in_flight.abort_all();
            tracing::info!("Poller stopped");
        });

        PollerHandle {
            shutdown_tx,
            task: Some(task),
        }
    }

    async fn run_cycle(&self, cycle: u64, state: &DashboardState) {
        match self.poll_once().await {
            Ok((snapshot, trail)) => {
                let samples = trail.len();
                if state.replace(cycle, snapshot, trail) {
                    tracing::debug!("Cycle {} applied ({} movement samples)", cycle, samples);
                } else {
                    tracing::debug!("Cycle {} finished after a newer one, discarded", cycle);
                }
            }
            Err(e) => {
                tracing::warn!("Cycle {}: {}", cycle, e);
            }
        }
    }
}

/// Owns the background polling task
pub struct PollerHandle {
    shutdown_tx: watch::Sender<bool>,
    task: Option<JoinHandle<()>>,
}

impl PollerHandle {
    /// Stop polling and wait for the task to wind down
    pub async fn shutdown(mut self) {
        let _ = self.shutdown_tx.send(true);
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        let _ = self.shutdown_tx.send(true);
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
