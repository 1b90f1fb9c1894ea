//! Simulated demand forecast refresh on the analytics page.
//!
//! Picking a calendar date shows a loading state, then swaps in a freshly
//! generated week after the refresh delay. A newer pick supersedes an
//! in-flight one.

use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tokio::sync::watch;
use tracing::debug;

use crate::chart::{random_week, smooth_path, DEFAULT_WEEK};
use crate::delay::ScheduledTask;
use crate::error::{CoreError, Result};
use crate::workflow::WorkflowSpec;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastSnapshot {
    pub selected_day: Option<u32>,
    pub loading: bool,
    pub series: Vec<f64>,
}

pub struct DemandForecast {
    state: Arc<watch::Sender<ForecastSnapshot>>,
    delay: Duration,
    rng: StdRng,
    timer: Option<ScheduledTask>,
}

impl DemandForecast {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    pub fn with_rng(rng: StdRng) -> Self {
        let delay = WorkflowSpec::forecast_refresh()
            .delay
            .unwrap_or(Duration::from_millis(600));
        let (tx, _rx) = watch::channel(ForecastSnapshot {
            selected_day: None,
            loading: false,
            series: DEFAULT_WEEK.to_vec(),
        });
        Self {
            state: Arc::new(tx),
            delay,
            rng,
            timer: None,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn snapshot(&self) -> ForecastSnapshot {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ForecastSnapshot> {
        self.state.subscribe()
    }

    /// A calendar day was clicked.
    pub fn select_date(&mut self, day: u32) -> Result<()> {
        if let Some(mut previous) = self.timer.take() {
            previous.cancel();
        }

        let next = random_week(&mut self.rng);
        let state = Arc::clone(&self.state);
        let timer = ScheduledTask::after("forecast-refresh", self.delay, move || {
            state.send_modify(|snapshot| {
                snapshot.series = next;
                snapshot.loading = false;
            });
        })?;

        self.state.send_modify(|snapshot| {
            snapshot.selected_day = Some(day);
            snapshot.loading = true;
        });
        self.timer = Some(timer);
        debug!(day, delay = ?self.delay, "forecast refresh scheduled");
        Ok(())
    }

    /// Wait until no refresh is loading and return the settled snapshot.
    pub async fn settled(&self) -> Result<ForecastSnapshot> {
        let mut rx = self.state.subscribe();
        rx.wait_for(|snapshot| !snapshot.loading)
            .await
            .map(|snapshot| snapshot.clone())
            .map_err(|_| {
                CoreError::invalid_transition("forecast-refresh", "settle", "closed")
            })
    }

    /// SVG path for the series currently displayed.
    pub fn path(&self, width: f64, height: f64) -> String {
        smooth_path(&self.state.borrow().series, width, height)
    }
}

impl Default for DemandForecast {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    fn seeded() -> DemandForecast {
        DemandForecast::with_rng(StdRng::seed_from_u64(42))
    }

    #[tokio::test(start_paused = true)]
    async fn refresh_swaps_series_after_delay() {
        let mut forecast = seeded();
        assert_eq!(forecast.snapshot().series, DEFAULT_WEEK.to_vec());

        forecast.select_date(14).unwrap();
        let loading = forecast.snapshot();
        assert!(loading.loading);
        assert_eq!(loading.selected_day, Some(14));
        assert_eq!(loading.series, DEFAULT_WEEK.to_vec());

        sleep(Duration::from_millis(599)).await;
        assert!(forecast.snapshot().loading);

        let settled = forecast.settled().await.unwrap();
        assert!(!settled.loading);
        assert_eq!(settled.series.len(), 7);
        assert!(settled.series.iter().all(|v| (30.0..80.0).contains(v)));
    }

    #[tokio::test(start_paused = true)]
    async fn newer_selection_supersedes_pending_one() {
        let mut forecast = seeded();
        forecast.select_date(3).unwrap();
        sleep(Duration::from_millis(300)).await;
        forecast.select_date(9).unwrap();

        // The first timer would have fired at 600ms.
        sleep(Duration::from_millis(400)).await;
        assert!(forecast.snapshot().loading);

        let settled = forecast.settled().await.unwrap();
        assert_eq!(settled.selected_day, Some(9));
    }

    #[test]
    fn selection_without_runtime_leaves_snapshot_untouched() {
        let mut forecast = seeded();
        let err = forecast.select_date(5).unwrap_err();
        assert!(matches!(err, CoreError::NoRuntime { .. }));

        let snapshot = forecast.snapshot();
        assert!(!snapshot.loading);
        assert_eq!(snapshot.selected_day, None);
        assert_eq!(snapshot.series, DEFAULT_WEEK.to_vec());
    }

    #[tokio::test]
    async fn path_renders_current_series() {
        let forecast = seeded();
        assert_eq!(forecast.path(600.0, 200.0), smooth_path(&DEFAULT_WEEK, 600.0, 200.0));
    }
}
