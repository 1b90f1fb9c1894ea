//! End-to-end contact form submission.
//!
//! validate -> loading -> local log -> relay -> confirmation (or alert).
//! Every call is fire-once: no retries, no backoff.

use saveserve_core::{
    ContactFormState, FieldErrors, SubmissionLog, SubmissionRecord, SubmissionStore, SubmitPhase,
};
use tokio::sync::watch;
use tracing::{info, warn};

use crate::error::{RelayError, Result};
use crate::formsubmit::{FormRelay, RelayPayload};

pub const REJECTED_ALERT: &str = "Something went wrong. Please try again later.";
pub const NETWORK_ALERT: &str = "Please check your internet connection.";

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Validation failed; nothing was sent.
    Invalid(FieldErrors),
    /// Relay accepted. `record` is the local log entry, if the log write worked.
    Submitted { record: Option<SubmissionRecord> },
    /// Relay failed; the string is the alert shown to the user.
    Failed { alert: &'static str },
}

pub struct ContactSubmitter<S, R> {
    state: ContactFormState,
    log: SubmissionLog<S>,
    relay: R,
    phase: watch::Sender<SubmitPhase>,
}

impl<S, R> ContactSubmitter<S, R>
where
    S: SubmissionStore,
    R: FormRelay,
{
    pub fn new(log: SubmissionLog<S>, relay: R) -> Self {
        let (phase, _rx) = watch::channel(SubmitPhase::Editing);
        Self {
            state: ContactFormState::new(),
            log,
            relay,
            phase,
        }
    }

    pub fn state(&self) -> &ContactFormState {
        &self.state
    }

    /// Field edits go through here so errors clear as the user types.
    pub fn state_mut(&mut self) -> &mut ContactFormState {
        &mut self.state
    }

    pub fn log(&self) -> &SubmissionLog<S> {
        &self.log
    }

    /// Observe the submit phase (drives the loading indicator).
    pub fn phases(&self) -> watch::Receiver<SubmitPhase> {
        self.phase.subscribe()
    }

    pub async fn submit(&mut self) -> Result<SubmitOutcome> {
        let form = match self.state.begin_submit()? {
            Ok(form) => form,
            Err(errors) => return Ok(SubmitOutcome::Invalid(errors)),
        };
        self.publish_phase();

        let record = match self.log.append(form.clone()) {
            Ok(record) => Some(record),
            Err(err) => {
                warn!(error = %err, "could not write local submission log");
                None
            }
        };

        let payload = RelayPayload::from_form(&form);
        let outcome = match self.relay.deliver(&payload).await {
            Ok(()) => {
                self.state.finish_submit(true);
                info!(role = %form.role, "contact form submitted");
                SubmitOutcome::Submitted { record }
            }
            Err(err) => {
                self.state.finish_submit(false);
                warn!(error = %err, "contact form relay failed");
                SubmitOutcome::Failed {
                    alert: alert_for(&err),
                }
            }
        };
        self.publish_phase();
        Ok(outcome)
    }

    /// "Submit another response".
    pub fn submit_another(&mut self) {
        self.state.submit_another();
        self.publish_phase();
    }

    fn publish_phase(&self) {
        self.phase.send_replace(self.state.phase());
    }
}

fn alert_for(err: &RelayError) -> &'static str {
    if err.is_network() {
        NETWORK_ALERT
    } else {
        REJECTED_ALERT
    }
}
