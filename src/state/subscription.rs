//! Subscription Form - Waitlist capture state machine
//!
//! Owns the email input value and the submitted flag shared by every
//! waitlist form on the page.
//!
//! ```text
//!   Entry { email }  --submit (email non-empty, sink accepts)-->  Submitted
//!        ^   |
//!        +---+ input change / empty submit (no-op)
//! ```
//!
//! `submitted` implies `email == ""`. There is no path back to entry.

use std::cell::RefCell;
use std::rc::Rc;

use spark_signals::{signal, Signal};
use tracing::{debug, info, warn};

use crate::error::PageError;

// =============================================================================
// WAITLIST SINK
// =============================================================================

/// Delivery collaborator that receives captured emails.
pub trait WaitlistSink {
    fn deliver(&mut self, email: &str) -> Result<(), PageError>;
}

/// In-memory sink. Always accepts; nothing is durable.
#[derive(Debug, Clone, Default)]
pub struct LocalWaitlist {
    entries: Rc<RefCell<Vec<String>>>,
}

impl LocalWaitlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Captured emails, in submission order.
    pub fn entries(&self) -> Vec<String> {
        self.entries.borrow().clone()
    }
}

impl WaitlistSink for LocalWaitlist {
    fn deliver(&mut self, email: &str) -> Result<(), PageError> {
        self.entries.borrow_mut().push(email.to_string());
        Ok(())
    }
}

// =============================================================================
// INPUT CONSTRAINT
// =============================================================================

/// Whether a value passes the input's own `type=email required` constraint.
///
/// Hosts check this before dispatching a submit, the way a browser blocks
/// the submission natively. The form itself only guards against empty input.
pub fn satisfies_input_constraint(value: &str) -> bool {
    let value = value.trim();
    if value.is_empty() || value.chars().any(char::is_whitespace) {
        return false;
    }

    let mut parts = value.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };

    !local.is_empty()
        && domain.contains('.')
        && domain.split('.').all(|label| !label.is_empty())
}

// =============================================================================
// SUBSCRIPTION FORM
// =============================================================================

/// Result of a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Email handed to the sink; form now shows the acknowledgement.
    Captured(String),
    /// Empty email, nothing to capture.
    Empty,
    /// Form already submitted.
    AlreadySubmitted,
    /// Sink refused the email; state unchanged.
    Rejected,
}

impl SubmitOutcome {
    /// The host's default submit action is suppressed for every outcome.
    pub fn prevents_default(&self) -> bool {
        true
    }
}

pub struct SubscriptionForm {
    email: Signal<String>,
    submitted: Signal<bool>,
    sink: Box<dyn WaitlistSink>,
}

impl SubscriptionForm {
    pub fn new(sink: Box<dyn WaitlistSink>) -> Self {
        Self {
            email: signal(String::new()),
            submitted: signal(false),
            sink,
        }
    }

    /// Set the input value. Ignored once submitted (the input is gone).
    pub fn on_email_change(&mut self, value: impl Into<String>) -> bool {
        if self.is_submitted() {
            return false;
        }
        self.email.set(value.into());
        true
    }

    /// Handle a submission.
    pub fn on_submit(&mut self) -> SubmitOutcome {
        if self.is_submitted() {
            return SubmitOutcome::AlreadySubmitted;
        }

        let email = self.email.get();
        if email.is_empty() {
            debug!("subscription: empty submit ignored");
            return SubmitOutcome::Empty;
        }

        if let Err(err) = self.sink.deliver(&email) {
            warn!("subscription: capture not accepted: {}", err);
            return SubmitOutcome::Rejected;
        }

        self.email.set(String::new());
        self.submitted.set(true);
        info!("subscription: waitlist email captured");
        SubmitOutcome::Captured(email)
    }

    // =========================================================================
    // STATE ACCESS
    // =========================================================================

    pub fn email(&self) -> String {
        self.email.get()
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted.get()
    }

    pub fn email_signal(&self) -> Signal<String> {
        self.email.clone()
    }

    pub fn submitted_signal(&self) -> Signal<bool> {
        self.submitted.clone()
    }
}
