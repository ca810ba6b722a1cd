//! Client side of the portfolio contact pipeline: the form controller that
//! collects fields, posts them to the contact service and tracks the status
//! panel shown to the visitor.

pub mod api;
pub mod dto;
pub mod form;

pub use api::{ApiResponse, ClientError, ContactApi, HttpContactApi};
pub use dto::{ContactRequest, SubmissionResult};
pub use form::{ContactForm, FormFields, FormStatus, FormVariant, SubmitOutcome, SuccessText};
