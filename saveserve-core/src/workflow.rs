//! Mock action workflows.
//!
//! Every interactive card on the vendor and NGO pages follows the same
//! shape: `idle -> pending -> resolved`, with an undo back to idle. Cards
//! that fake a confirmation round trip hold `pending` for a fixed delay;
//! accept/decline cards resolve immediately.
//!
//! Each [`Workflow`] owns its status. Observers subscribe to a
//! `tokio::sync::watch` channel; the pending timer is a [`ScheduledTask`]
//! that is cancelled when the workflow is cancelled or dropped.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;
use tracing::debug;

use crate::delay::ScheduledTask;
use crate::error::{CoreError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Success,
    Alternate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "outcome", rename_all = "snake_case")]
pub enum WorkflowStatus {
    Idle,
    Pending(Outcome),
    Resolved(Outcome),
}

impl WorkflowStatus {
    pub fn is_resolved(&self) -> bool {
        matches!(self, WorkflowStatus::Resolved(_))
    }
}

impl fmt::Display for WorkflowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkflowStatus::Idle => f.write_str("idle"),
            WorkflowStatus::Pending(_) => f.write_str("pending"),
            WorkflowStatus::Resolved(Outcome::Success) => f.write_str("resolved"),
            WorkflowStatus::Resolved(Outcome::Alternate) => f.write_str("resolved (alternate)"),
        }
    }
}

/// Confirmation copy shown once a workflow resolves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Banner {
    pub title: String,
    pub detail: String,
}

impl Banner {
    pub fn new(title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            detail: detail.into(),
        }
    }
}

/// Static description of one kind of widget.
#[derive(Debug, Clone)]
pub struct WorkflowSpec {
    pub name: String,
    /// Simulated confirmation latency. `None` resolves immediately.
    pub delay: Option<Duration>,
    pub success: Banner,
    /// Present on two-choice widgets only.
    pub alternate: Option<Banner>,
}

impl WorkflowSpec {
    /// Vendor dashboard "Confirm Order".
    pub fn confirm_order() -> Self {
        Self {
            name: "confirm-order".to_string(),
            delay: None,
            success: Banner::new(
                "Order Confirmed",
                "Preparation quantity locked for lunch service.",
            ),
            alternate: None,
        }
    }

    /// Vendor "Dispatch to NGO" card.
    pub fn ngo_dispatch() -> Self {
        Self {
            name: "ngo-dispatch".to_string(),
            delay: Some(Duration::from_millis(1500)),
            success: Banner::new(
                "You're a Hero!",
                "Pickup request sent to FeedIndia. 45 meals saved from the landfill.",
            ),
            alternate: None,
        }
    }

    /// NGO rescue alert with accept/decline.
    pub fn rescue_alert() -> Self {
        Self {
            name: "rescue-alert".to_string(),
            delay: None,
            success: Banner::new(
                "Headed Your Way!",
                "Route locked. Driver dispatched. ETA: 12 mins.",
            ),
            alternate: Some(Banner::new(
                "Pickup Declined",
                "No problem. More requests coming soon.",
            )),
        }
    }

    /// Analytics page forecast refresh after a date is picked.
    pub fn forecast_refresh() -> Self {
        Self {
            name: "forecast-refresh".to_string(),
            delay: Some(Duration::from_millis(600)),
            success: Banner::new("Forecast updated", "Weekly demand regenerated."),
            alternate: None,
        }
    }

    pub fn is_two_choice(&self) -> bool {
        self.alternate.is_some()
    }

    pub fn banner(&self, outcome: Outcome) -> Option<&Banner> {
        match outcome {
            Outcome::Success => Some(&self.success),
            Outcome::Alternate => self.alternate.as_ref(),
        }
    }
}

/// One widget instance.
#[derive(Debug)]
pub struct Workflow {
    spec: WorkflowSpec,
    status: Arc<watch::Sender<WorkflowStatus>>,
    timer: Option<ScheduledTask>,
}

impl Workflow {
    pub fn new(spec: WorkflowSpec) -> Self {
        let (tx, _rx) = watch::channel(WorkflowStatus::Idle);
        Self {
            spec,
            status: Arc::new(tx),
            timer: None,
        }
    }

    pub fn spec(&self) -> &WorkflowSpec {
        &self.spec
    }

    pub fn status(&self) -> WorkflowStatus {
        *self.status.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<WorkflowStatus> {
        self.status.subscribe()
    }

    /// Banner for the current resolved outcome, if resolved.
    pub fn banner(&self) -> Option<&Banner> {
        match self.status() {
            WorkflowStatus::Resolved(outcome) => self.spec.banner(outcome),
            _ => None,
        }
    }

    /// The user pressed an action button.
    ///
    /// Delayed widgets enter `pending` now and resolve when the delay
    /// elapses; others resolve immediately.
    pub fn trigger(&mut self, outcome: Outcome) -> Result<()> {
        let current = self.status();
        if current != WorkflowStatus::Idle {
            return Err(CoreError::invalid_transition(
                &self.spec.name,
                "trigger",
                current.to_string(),
            ));
        }
        if outcome == Outcome::Alternate && !self.spec.is_two_choice() {
            return Err(CoreError::NoAlternate {
                workflow: self.spec.name.clone(),
            });
        }

        match self.spec.delay {
            None => {
                self.status.send_replace(WorkflowStatus::Resolved(outcome));
                debug!(workflow = %self.spec.name, ?outcome, "resolved immediately");
            }
            Some(delay) => {
                let status = Arc::clone(&self.status);
                let name = self.spec.name.clone();
                let timer = ScheduledTask::after(&self.spec.name, delay, move || {
                    let resolved = status.send_if_modified(|current| {
                        if *current == WorkflowStatus::Pending(outcome) {
                            *current = WorkflowStatus::Resolved(outcome);
                            true
                        } else {
                            false
                        }
                    });
                    if resolved {
                        debug!(workflow = %name, ?outcome, "resolved after delay");
                    }
                })?;

                // Pending only once the timer exists, so a failed schedule stays idle.
                self.status.send_replace(WorkflowStatus::Pending(outcome));
                self.timer = Some(timer);
                debug!(workflow = %self.spec.name, ?outcome, ?delay, "pending");
            }
        }
        Ok(())
    }

    /// Back to idle from a resolved card ("Undo", "Edit Prediction").
    pub fn undo(&mut self) -> Result<()> {
        let current = self.status();
        if !current.is_resolved() {
            return Err(CoreError::invalid_transition(
                &self.spec.name,
                "undo",
                current.to_string(),
            ));
        }
        self.timer = None;
        self.status.send_replace(WorkflowStatus::Idle);
        Ok(())
    }

    /// Abort a pending transition and return to idle.
    pub fn cancel(&mut self) -> Result<()> {
        let current = self.status();
        if !matches!(current, WorkflowStatus::Pending(_)) {
            return Err(CoreError::invalid_transition(
                &self.spec.name,
                "cancel",
                current.to_string(),
            ));
        }
        if let Some(mut timer) = self.timer.take() {
            timer.cancel();
        }
        self.status.send_replace(WorkflowStatus::Idle);
        debug!(workflow = %self.spec.name, "pending transition cancelled");
        Ok(())
    }

    /// Wait for the current action to settle and return its outcome.
    pub async fn resolved(&self) -> Result<Outcome> {
        let mut rx = self.status.subscribe();
        let settled = rx
            .wait_for(|status| !matches!(status, WorkflowStatus::Pending(_)))
            .await
            .map(|status| *status)
            .map_err(|_| CoreError::invalid_transition(&self.spec.name, "resolve", "closed"))?;

        match settled {
            WorkflowStatus::Resolved(outcome) => Ok(outcome),
            other => Err(CoreError::invalid_transition(
                &self.spec.name,
                "resolve",
                other.to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{sleep, Instant};

    #[tokio::test(start_paused = true)]
    async fn delayed_widget_holds_pending_for_full_delay() {
        let mut wf = Workflow::new(WorkflowSpec::ngo_dispatch());
        let start = Instant::now();

        wf.trigger(Outcome::Success).unwrap();
        assert_eq!(wf.status(), WorkflowStatus::Pending(Outcome::Success));

        sleep(Duration::from_millis(1499)).await;
        assert_eq!(wf.status(), WorkflowStatus::Pending(Outcome::Success));

        assert_eq!(wf.resolved().await.unwrap(), Outcome::Success);
        assert!(start.elapsed() >= Duration::from_millis(1500));
        assert_eq!(wf.banner().unwrap().title, "You're a Hero!");
    }

    #[tokio::test(start_paused = true)]
    async fn two_choice_widget_skips_pending() {
        let mut wf = Workflow::new(WorkflowSpec::rescue_alert());
        let mut rx = wf.subscribe();

        wf.trigger(Outcome::Alternate).unwrap();
        assert!(rx.has_changed().unwrap());
        assert_eq!(
            *rx.borrow_and_update(),
            WorkflowStatus::Resolved(Outcome::Alternate)
        );
        assert_eq!(wf.banner().unwrap().title, "Pickup Declined");

        wf.undo().unwrap();
        wf.trigger(Outcome::Success).unwrap();
        assert_eq!(wf.banner().unwrap().title, "Headed Your Way!");
    }

    #[tokio::test]
    async fn single_choice_widget_rejects_alternate() {
        let mut wf = Workflow::new(WorkflowSpec::confirm_order());
        assert!(matches!(
            wf.trigger(Outcome::Alternate),
            Err(CoreError::NoAlternate { .. })
        ));
        assert_eq!(wf.status(), WorkflowStatus::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn trigger_only_from_idle() {
        let mut wf = Workflow::new(WorkflowSpec::ngo_dispatch());
        wf.trigger(Outcome::Success).unwrap();
        assert!(wf.trigger(Outcome::Success).is_err());
        assert!(wf.undo().is_err());
    }

    #[test]
    fn delayed_trigger_without_runtime_stays_idle() {
        let mut wf = Workflow::new(WorkflowSpec::ngo_dispatch());
        let err = wf.trigger(Outcome::Success).unwrap_err();
        assert!(matches!(err, CoreError::NoRuntime { ref task } if task == "ngo-dispatch"));
        assert_eq!(wf.status(), WorkflowStatus::Idle);
        assert!(wf.banner().is_none());
    }

    #[test]
    fn immediate_trigger_needs_no_runtime() {
        let mut wf = Workflow::new(WorkflowSpec::rescue_alert());
        wf.trigger(Outcome::Success).unwrap();
        assert_eq!(wf.status(), WorkflowStatus::Resolved(Outcome::Success));
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_prevents_late_resolution() {
        let mut wf = Workflow::new(WorkflowSpec::ngo_dispatch());
        wf.trigger(Outcome::Success).unwrap();
        wf.cancel().unwrap();

        sleep(Duration::from_secs(3)).await;
        assert_eq!(wf.status(), WorkflowStatus::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_workflow_is_never_updated() {
        let wf = {
            let mut wf = Workflow::new(WorkflowSpec::ngo_dispatch());
            wf.trigger(Outcome::Success).unwrap();
            wf
        };
        let rx = wf.subscribe();
        drop(wf);

        sleep(Duration::from_secs(3)).await;
        assert_eq!(*rx.borrow(), WorkflowStatus::Pending(Outcome::Success));
    }

    #[tokio::test(start_paused = true)]
    async fn instances_do_not_share_state() {
        let mut first = Workflow::new(WorkflowSpec::rescue_alert());
        let second = Workflow::new(WorkflowSpec::rescue_alert());

        first.trigger(Outcome::Success).unwrap();
        assert!(first.status().is_resolved());
        assert_eq!(second.status(), WorkflowStatus::Idle);
    }

    #[tokio::test]
    async fn resolved_while_idle_is_an_error() {
        let wf = Workflow::new(WorkflowSpec::confirm_order());
        assert!(wf.resolved().await.is_err());
    }
}
