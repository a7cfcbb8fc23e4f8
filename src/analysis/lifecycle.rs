// src/analysis/lifecycle.rs
use std::sync::mpsc::{Receiver, TryRecvError};
use std::sync::Arc;

use log::{debug, info, warn};
use thiserror::Error;

use super::{AnalysisRequest, AnalysisResult, ValidationError};
use crate::service::{dispatch, task::spawn_worker, ClassificationService, ServiceError};

#[derive(Debug, Clone, PartialEq)]
pub enum LifecycleState {
    Idle,
    Submitting,
    Succeeded(AnalysisResult),
    Failed(ServiceError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("An analysis is already in progress")]
    Busy,
}

/// Drives one analysis request at a time through
/// `Idle -> Submitting -> Succeeded | Failed`, and back to `Submitting` on the
/// next submission.
///
/// The service call runs on a worker thread; the owning view calls [`poll`]
/// once per frame to pick up the outcome. Dropping the lifecycle drops the
/// receiver, so a response that arrives after teardown goes nowhere.
///
/// [`poll`]: RequestLifecycle::poll
pub struct RequestLifecycle {
    service: Arc<dyn ClassificationService>,
    state: LifecycleState,
    pending: Option<Receiver<Result<AnalysisResult, ServiceError>>>,
}

impl RequestLifecycle {
    pub fn new(service: Arc<dyn ClassificationService>) -> Self {
        Self {
            service,
            state: LifecycleState::Idle,
            pending: None,
        }
    }

    pub fn state(&self) -> &LifecycleState {
        &self.state
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.state, LifecycleState::Submitting)
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match &self.state {
            LifecycleState::Succeeded(result) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ServiceError> {
        match &self.state {
            LifecycleState::Failed(e) => Some(e),
            _ => None,
        }
    }

    /// Starts a new submission.
    ///
    /// Rejected with `Busy` while another submission is in flight, and with a
    /// validation error if the request is empty; in both cases the current
    /// state is left untouched and nothing is sent.
    pub fn submit(&mut self, request: AnalysisRequest) -> Result<(), SubmitError> {
        if self.is_submitting() {
            warn!("Rejected {} submission: another request is in flight", request.kind());
            return Err(SubmitError::Busy);
        }
        request.validate()?;

        info!("Submitting {} analysis request", request.kind());
        let service = Arc::clone(&self.service);
        let worker = format!("{}-analysis", request.kind());
        self.pending = Some(spawn_worker(&worker, move || dispatch(service.as_ref(), &request)));
        self.state = LifecycleState::Submitting;
        Ok(())
    }

    /// Applies a finished response, if any. Returns true when the state
    /// changed.
    pub fn poll(&mut self) -> bool {
        let Some(pending) = &self.pending else {
            return false;
        };
        let outcome = match pending.try_recv() {
            Ok(outcome) => outcome,
            Err(TryRecvError::Empty) => return false,
            Err(TryRecvError::Disconnected) => Err(ServiceError::WorkerLost),
        };
        self.pending = None;

        self.state = match outcome {
            Ok(result) => {
                info!("Analysis request succeeded");
                LifecycleState::Succeeded(result)
            }
            Err(e) => {
                warn!("Analysis request failed: {}", e);
                LifecycleState::Failed(e)
            }
        };
        true
    }

    /// Returns to `Idle`, abandoning any in-flight response.
    pub fn reset(&mut self) {
        if self.pending.take().is_some() {
            debug!("Abandoning in-flight analysis request");
        }
        self.state = LifecycleState::Idle;
    }
}
