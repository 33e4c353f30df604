//! Submission state shared by every controller

use std::time::Duration;

use tokio::time::Instant;
use tracing::debug;

use crate::error::SubmitError;

/// Where a controller is in its submit cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle,
    /// A destructive action was activated once and waits for the second activation
    AwaitingConfirmation,
    Submitting,
    /// Shown until the display window ends
    Success,
    /// Shown until the user edits an input
    Failed(String),
}

/// What a two-step action did when activated
#[derive(Debug, Clone, PartialEq)]
pub enum Activation<T> {
    /// First activation: confirmation is now armed
    Armed,
    /// Second activation: the call went through
    Done(T),
}

/// Phase plus the success display window
#[derive(Debug, Clone)]
pub struct Status {
    phase: Phase,
    shown_since: Option<Instant>,
    display: Duration,
}

impl Status {
    pub fn new(display: Duration) -> Self {
        Self {
            phase: Phase::Idle,
            shown_since: None,
            display,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Message to show inline, if any
    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            Phase::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.phase == Phase::AwaitingConfirmation
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == Phase::Submitting
    }

    pub fn is_success(&self) -> bool {
        self.phase == Phase::Success
    }

    pub fn begin(&mut self) {
        self.set(Phase::Submitting);
    }

    /// A lookup finished; lookups have no success message
    pub fn done(&mut self) {
        self.set(Phase::Idle);
    }

    pub fn succeed(&mut self) {
        self.phase = Phase::Success;
        self.shown_since = Some(Instant::now());
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.set(Phase::Failed(message.into()));
    }

    pub fn arm(&mut self) {
        self.set(Phase::AwaitingConfirmation);
    }

    pub fn disarm(&mut self) {
        if self.is_armed() {
            self.set(Phase::Idle);
        }
    }

    /// An input changed: clear a shown error and disarm
    pub fn edited(&mut self) {
        if matches!(self.phase, Phase::Failed(_) | Phase::AwaitingConfirmation) {
            self.set(Phase::Idle);
        }
    }

    /// Record a failed validation and hand back the error
    pub fn reject(&mut self, message: String) -> SubmitError {
        debug!("Validation failed: {}", message);
        self.fail(message.clone());
        SubmitError::Validation(message)
    }

    /// Record a failed submission and hand back the error
    ///
    /// A rejected session is not shown inline: the application has already
    /// been sent to the login page.
    pub fn report(&mut self, error: SubmitError) -> SubmitError {
        if error.is_unauthorized() {
            self.set(Phase::Idle);
        } else {
            self.fail(error.to_string());
        }
        error
    }

    /// Leave the success state once its display window ended
    ///
    /// Returns true when this call ended the window.
    pub fn poll(&mut self) -> bool {
        match self.shown_since {
            Some(since) if self.phase == Phase::Success && since.elapsed() >= self.display => {
                self.set(Phase::Idle);
                true
            }
            _ => false,
        }
    }

    fn set(&mut self, phase: Phase) {
        self.phase = phase;
        self.shown_since = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::error::RequestError;

    #[tokio::test(start_paused = true)]
    async fn test_success_window() {
        let mut status = Status::new(Duration::from_millis(3000));
        status.begin();
        assert!(status.is_submitting());

        status.succeed();
        assert!(!status.poll());

        tokio::time::advance(Duration::from_millis(2999)).await;
        assert!(!status.poll());
        assert!(status.is_success());

        tokio::time::advance(Duration::from_millis(1)).await;
        assert!(status.poll());
        assert_eq!(status.phase(), &Phase::Idle);
        assert!(!status.poll());
    }

    #[test]
    fn test_edit_clears_error_and_disarms() {
        let mut status = Status::new(Duration::from_secs(2));

        status.fail("Bill not found");
        assert_eq!(status.error(), Some("Bill not found"));
        status.edited();
        assert_eq!(status.phase(), &Phase::Idle);

        status.arm();
        assert!(status.is_armed());
        status.edited();
        assert!(!status.is_armed());
    }

    #[test]
    fn test_edit_keeps_success() {
        let mut status = Status::new(Duration::from_secs(2));
        status.succeed();
        status.edited();
        assert!(status.is_success());
    }

    #[test]
    fn test_unauthorized_is_not_shown() {
        let mut status = Status::new(Duration::from_secs(2));
        status.begin();

        let error = status.report(RequestError::Unauthorized.into());

        assert!(error.is_unauthorized());
        assert_eq!(status.phase(), &Phase::Idle);
    }

    #[test]
    fn test_rejection_is_shown() {
        let mut status = Status::new(Duration::from_secs(2));
        status.begin();

        status.report(
            RequestError::Rejected {
                status: 400,
                message: "Deadline cannot be before bill date".to_string(),
            }
            .into(),
        );

        assert_eq!(status.error(), Some("Deadline cannot be before bill date"));
    }

    #[test]
    fn test_reject_returns_validation_error() {
        let mut status = Status::new(Duration::from_secs(2));
        let error = status.reject("Domain is required".to_string());

        assert!(matches!(error, SubmitError::Validation(ref m) if m == "Domain is required"));
        assert_eq!(status.error(), Some("Domain is required"));
    }
}
