use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::{
    api::{ApiResponse, ClientError, ContactApi},
    dto::ContactRequest,
};

pub const SENDING_LABEL: &str = "Sending...";
pub const SEND_LABEL: &str = "Send Message";

/// Text shown in the status panel after a successful submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuccessText {
    /// Echo the message returned by the server
    Server,
    Fixed(&'static str),
}

/// Per-page behaviour of the contact form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormVariant {
    pub includes_subject: bool,
    pub reset_on_success: bool,
    pub success_text: SuccessText,
    /// Used when the server rejects the submission without a message
    pub rejected_error: &'static str,
    /// Used when the server could not be reached or answered garbage
    pub fallback_error: &'static str,
}

impl FormVariant {
    /// Form embedded on the home page.
    pub const HOME: Self = Self {
        includes_subject: true,
        reset_on_success: true,
        success_text: SuccessText::Fixed("Message sent successfully! I will get back to you soon."),
        rejected_error: "Failed to send message",
        fallback_error: "An error occurred",
    };

    /// Form on the dedicated contact page.
    pub const CONTACT_PAGE: Self = Self {
        includes_subject: false,
        reset_on_success: false,
        success_text: SuccessText::Server,
        rejected_error: "Failed to send message. Please try again.",
        fallback_error: "Failed to send message. Please try again.",
    };
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl FormFields {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn to_request(&self, includes_subject: bool) -> ContactRequest {
        ContactRequest {
            name: self.name.clone(),
            email: self.email.clone(),
            subject: includes_subject.then(|| self.subject.clone()),
            message: self.message.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormStatus {
    #[default]
    None,
    Success(String),
    Error(String),
}

impl FormStatus {
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::None => None,
            Self::Success(message) | Self::Error(message) => Some(message),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A submission was already in flight
    Ignored,
    Settled(FormStatus),
}

#[derive(Debug, Default)]
struct FormState {
    fields: FormFields,
    status: FormStatus,
    is_submitting: bool,
}

/// Contact form controller shared by every page that embeds the form.
///
/// State lives behind a mutex that is never held across an await, so the
/// controller can be shared between tasks and queried while a submission is
/// in flight.
pub struct ContactForm<A> {
    api: A,
    variant: FormVariant,
    state: Mutex<FormState>,
}

impl<A: ContactApi> ContactForm<A> {
    pub fn new(api: A, variant: FormVariant) -> Self {
        Self {
            api,
            variant,
            state: Mutex::default(),
        }
    }

    pub const fn variant(&self) -> FormVariant {
        self.variant
    }

    pub fn edit(&self, f: impl FnOnce(&mut FormFields)) {
        f(&mut self.lock().fields);
    }

    pub fn fields(&self) -> FormFields {
        self.lock().fields.clone()
    }

    pub fn status(&self) -> FormStatus {
        self.lock().status.clone()
    }

    pub fn is_submitting(&self) -> bool {
        self.lock().is_submitting
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_submitting() {
            SENDING_LABEL
        } else {
            SEND_LABEL
        }
    }

    /// Posts the current fields and records the outcome in the status panel.
    ///
    /// Re-entrant calls while a submission is in flight are ignored. The
    /// submitting flag is cleared on every exit path, including when the
    /// returned future is dropped early.
    pub async fn submit(&self) -> SubmitOutcome {
        let request = {
            let mut state = self.lock();
            if state.is_submitting {
                tracing::debug!("Ignoring contact form submit, one is already in flight");
                return SubmitOutcome::Ignored;
            }
            state.is_submitting = true;
            state.fields.to_request(self.variant.includes_subject)
        };
        let _submitting = SubmittingGuard(&self.state);

        let status = self.settle(self.api.submit(&request).await);

        {
            let mut state = self.lock();
            if self.variant.reset_on_success && matches!(status, FormStatus::Success(_)) {
                state.fields.reset();
            }
            state.status = status.clone();
        }

        SubmitOutcome::Settled(status)
    }

    fn settle(&self, response: Result<ApiResponse, ClientError>) -> FormStatus {
        match response {
            Ok(ApiResponse { ok: true, body }) if body.success => match self.variant.success_text {
                SuccessText::Server => FormStatus::Success(body.message),
                SuccessText::Fixed(text) => FormStatus::Success(text.to_string()),
            },
            Ok(ApiResponse { body, .. }) if !body.message.is_empty() => {
                FormStatus::Error(body.message)
            }
            Ok(_) => FormStatus::Error(self.variant.rejected_error.to_string()),
            Err(e) => {
                tracing::error!("Contact form submission failed: {e}");
                FormStatus::Error(self.variant.fallback_error.to_string())
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, FormState> {
        lock_state(&self.state)
    }
}

fn lock_state(state: &Mutex<FormState>) -> MutexGuard<'_, FormState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

struct SubmittingGuard<'a>(&'a Mutex<FormState>);

impl Drop for SubmittingGuard<'_> {
    fn drop(&mut self) {
        lock_state(self.0).is_submitting = false;
    }
}
