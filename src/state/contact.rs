//! Contact form: field editing, validation and submission status.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::schedule::{Scheduler, TaskHandle};

/// How long a success or error banner stays up.
pub const STATUS_RESET: Duration = Duration::from_secs(5);
const MIN_MESSAGE_LEN: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Subject,
    Message,
}

impl Field {
    pub const ALL: [Self; 4] = [Self::Name, Self::Email, Self::Subject, Self::Message];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Subject => "Subject",
            Self::Message => "Message",
        }
    }

    pub const fn next(self) -> Self {
        match self {
            Self::Name => Self::Email,
            Self::Email => Self::Subject,
            Self::Subject => Self::Message,
            Self::Message => Self::Name,
        }
    }

    pub const fn prev(self) -> Self {
        match self {
            Self::Name => Self::Message,
            Self::Email => Self::Name,
            Self::Subject => Self::Email,
            Self::Message => Self::Subject,
        }
    }
}

/// The record handed to the delivery mechanism.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactMessage {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Subject => &self.subject,
            Field::Message => &self.message,
        }
    }

    fn get_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Subject => &mut self.subject,
            Field::Message => &mut self.message,
        }
    }
}

/// Per-field validation messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    pub name: Option<&'static str>,
    pub email: Option<&'static str>,
    pub subject: Option<&'static str>,
    pub message: Option<&'static str>,
}

impl FormErrors {
    pub const fn get(&self, field: Field) -> Option<&'static str> {
        match field {
            Field::Name => self.name,
            Field::Email => self.email,
            Field::Subject => self.subject,
            Field::Message => self.message,
        }
    }

    const fn clear(&mut self, field: Field) {
        match field {
            Field::Name => self.name = None,
            Field::Email => self.email = None,
            Field::Subject => self.subject = None,
            Field::Message => self.message = None,
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.subject.is_none()
            && self.message.is_none()
    }
}

/// Check every field of `message`.
pub fn validate(message: &ContactMessage) -> FormErrors {
    let name = message.name.trim();
    let email = message.email.trim();
    let subject = message.subject.trim();
    let body = message.message.trim();

    FormErrors {
        name: name.is_empty().then_some("Name is required"),
        email: if email.is_empty() {
            Some("Email is required")
        } else if !is_valid_email(email) {
            Some("Please enter a valid email")
        } else {
            None
        },
        subject: subject.is_empty().then_some("Subject is required"),
        message: if body.is_empty() {
            Some("Message is required")
        } else if body.chars().count() < MIN_MESSAGE_LEN {
            Some("Message must be at least 10 characters")
        } else {
            None
        },
    }
}

/// `local@domain.tld` with no whitespace and exactly one `@`. Some dot in
/// the domain needs text on both sides.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// Transient banner state after a submission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmitStatus {
    #[default]
    Idle,
    Success,
    Error,
}

/// Outcome of a delivery attempt, reported back to the UI loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryReport {
    Delivered,
    Failed(String),
    /// The banner's display time is over.
    ResetStatus,
}

/// Editable contact form.
#[derive(Debug, Default)]
pub struct ContactForm {
    data: ContactMessage,
    errors: FormErrors,
    focus: Option<Field>,
    submitting: bool,
    status: SubmitStatus,
    status_reset: Option<TaskHandle>,
}

impl ContactForm {
    pub const fn data(&self) -> &ContactMessage {
        &self.data
    }

    pub const fn errors(&self) -> &FormErrors {
        &self.errors
    }

    pub const fn status(&self) -> SubmitStatus {
        self.status
    }

    pub const fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Field receiving keystrokes, if editing.
    pub const fn focus(&self) -> Option<Field> {
        self.focus
    }

    pub const fn is_editing(&self) -> bool {
        self.focus.is_some()
    }

    pub const fn start_editing(&mut self) {
        if self.focus.is_none() {
            self.focus = Some(Field::Name);
        }
    }

    pub const fn stop_editing(&mut self) {
        self.focus = None;
    }

    pub fn focus_next(&mut self) {
        self.focus = Some(self.focus.map_or(Field::Name, Field::next));
    }

    pub fn focus_prev(&mut self) {
        self.focus = Some(self.focus.map_or(Field::Message, Field::prev));
    }

    /// Replace a field's value; editing clears that field's error.
    pub fn set(&mut self, field: Field, value: &str) {
        value.clone_into(self.data.get_mut(field));
        self.errors.clear(field);
    }

    pub fn insert_char(&mut self, c: char) {
        if let Some(field) = self.focus {
            self.data.get_mut(field).push(c);
            self.errors.clear(field);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.focus {
            self.data.get_mut(field).pop();
            self.errors.clear(field);
        }
    }

    /// Validate and, if clean, return the message to deliver. Returns `None`
    /// when validation fails or a submission is already in flight.
    pub fn submit(&mut self) -> Option<ContactMessage> {
        if self.submitting {
            return None;
        }
        self.errors = validate(&self.data);
        if !self.errors.is_empty() {
            debug!(errors = ?self.errors, "Contact form rejected");
            return None;
        }
        self.submitting = true;
        self.focus = None;
        Some(self.data.clone())
    }

    /// Apply a delivery report. Success clears the fields; either outcome
    /// arms a reset of the banner, cancelling any earlier reset.
    pub fn apply_report<E>(&mut self, report: DeliveryReport, scheduler: &Scheduler<E>)
    where
        E: From<DeliveryReport> + Send + 'static,
    {
        let status = match report {
            DeliveryReport::ResetStatus => {
                self.status = SubmitStatus::Idle;
                self.status_reset = None;
                return;
            }
            DeliveryReport::Delivered => {
                info!("Contact message delivered");
                self.data = ContactMessage::default();
                SubmitStatus::Success
            }
            DeliveryReport::Failed(reason) => {
                warn!(%reason, "Contact message delivery failed");
                SubmitStatus::Error
            }
        };
        self.submitting = false;
        self.status = status;
        self.status_reset = Some(scheduler.after(STATUS_RESET, DeliveryReport::ResetStatus.into()));
    }
}

#[cfg(test)]
mod tests {
    use tokio::time::{self, Instant};

    use super::*;

    fn filled() -> ContactForm {
        let mut form = ContactForm::default();
        form.set(Field::Name, "Grace");
        form.set(Field::Email, "grace@example.com");
        form.set(Field::Subject, "Hello");
        form.set(Field::Message, "Loved the intro sequence!");
        form
    }

    #[derive(Debug, PartialEq, Eq)]
    struct Ev(DeliveryReport);

    impl From<DeliveryReport> for Ev {
        fn from(report: DeliveryReport) -> Self {
            Self(report)
        }
    }

    #[test]
    fn test_email_shapes() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("first.last@mail.example.org"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("@b.co"));
        assert!(!is_valid_email("a@.co"));
        assert!(!is_valid_email("a@b."));
        assert!(is_valid_email("a@b.c."));
        assert!(is_valid_email("a@b..c"));
        assert!(!is_valid_email("a@."));
        assert!(!is_valid_email("a b@c.de"));
        assert!(!is_valid_email("a@b@c.de"));
    }

    #[test]
    fn test_empty_form_reports_every_field() {
        let errors = validate(&ContactMessage::default());
        assert_eq!(errors.name, Some("Name is required"));
        assert_eq!(errors.email, Some("Email is required"));
        assert_eq!(errors.subject, Some("Subject is required"));
        assert_eq!(errors.message, Some("Message is required"));
    }

    #[test]
    fn test_short_message_is_rejected_after_trim() {
        let mut form = filled();
        form.set(Field::Message, "   too short   ");
        assert!(form.submit().is_none());
        assert_eq!(
            form.errors().message,
            Some("Message must be at least 10 characters")
        );
    }

    #[test]
    fn test_empty_message_blocks_submission() {
        let mut form = filled();
        form.set(Field::Message, "");
        assert_eq!(form.submit(), None);
        assert_eq!(form.errors().message, Some("Message is required"));
        assert!(!form.is_submitting());
        assert!(form.errors().name.is_none());
    }

    #[test]
    fn test_editing_clears_only_that_error() {
        let mut form = ContactForm::default();
        assert!(form.submit().is_none());
        form.start_editing();
        form.insert_char('G');
        assert!(form.errors().name.is_none());
        assert!(form.errors().email.is_some());
    }

    #[test]
    fn test_valid_submit_hands_out_message_once() {
        let mut form = filled();
        let sent = form.submit().expect("valid form");
        assert_eq!(sent.email, "grace@example.com");
        assert!(form.is_submitting());
        assert!(form.submit().is_none(), "in-flight submission blocks a second one");
    }

    #[test]
    fn test_focus_cycles_fields() {
        let mut form = ContactForm::default();
        form.focus_next();
        assert_eq!(form.focus(), Some(Field::Name));
        form.focus_prev();
        assert_eq!(form.focus(), Some(Field::Message));
        form.insert_char('x');
        form.backspace();
        assert_eq!(form.data().message, "");
        form.stop_editing();
        assert!(!form.is_editing());
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_clears_fields_and_resets_after_five_seconds() {
        let (scheduler, mut rx) = Scheduler::<Ev>::new();
        let mut form = filled();
        form.submit().unwrap();
        let start = Instant::now();

        form.apply_report(DeliveryReport::Delivered, &scheduler);
        assert_eq!(form.status(), SubmitStatus::Success);
        assert_eq!(form.data(), &ContactMessage::default());
        assert!(!form.is_submitting());

        let Ev(report) = rx.recv().await.unwrap();
        assert!(start.elapsed() >= STATUS_RESET);
        form.apply_report(report, &scheduler);
        assert_eq!(form.status(), SubmitStatus::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_keeps_fields_and_newer_status_wins() {
        let (scheduler, mut rx) = Scheduler::<Ev>::new();
        let mut form = filled();
        form.submit().unwrap();
        form.apply_report(DeliveryReport::Failed("offline".into()), &scheduler);
        assert_eq!(form.status(), SubmitStatus::Error);
        assert_eq!(form.data().name, "Grace");

        time::advance(Duration::from_secs(3)).await;
        form.submit().unwrap();
        form.apply_report(DeliveryReport::Delivered, &scheduler);
        let start = Instant::now();

        let Ev(report) = rx.recv().await.unwrap();
        assert_eq!(report, DeliveryReport::ResetStatus);
        assert!(
            start.elapsed() >= STATUS_RESET,
            "first reset was cancelled by the newer status"
        );
    }
}
