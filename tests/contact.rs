use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use folio_tui::{
    error::{Error, Result},
    state::{
        delivery::dispatch, ContactForm, ContactMessage, Delivery, DeliveryReport, Field, Outbox,
        Scheduler, SubmitStatus,
    },
};
use futures::future::BoxFuture;
use tokio::time;

#[derive(Default)]
struct Counting {
    calls: AtomicUsize,
    fail: bool,
}

impl Delivery for Counting {
    fn deliver(&self, _message: ContactMessage) -> BoxFuture<'static, Result<()>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let fail = self.fail;
        Box::pin(async move {
            if fail {
                Err(Error::Delivery("mailer offline".into()))
            } else {
                Ok(())
            }
        })
    }
}

fn filled_form(message: &str) -> ContactForm {
    let mut form = ContactForm::default();
    form.set(Field::Name, "Ada");
    form.set(Field::Email, "ada@example.com");
    form.set(Field::Subject, "Collaboration");
    form.set(Field::Message, message);
    form
}

fn submit(form: &mut ContactForm, delivery: &Counting, scheduler: &Scheduler<DeliveryReport>) {
    if let Some(message) = form.submit() {
        dispatch(delivery, message, scheduler.sender());
    }
}

#[tokio::test]
async fn test_empty_message_blocks_delivery() {
    let (scheduler, _rx) = Scheduler::<DeliveryReport>::new();
    let delivery = Counting::default();
    let mut form = filled_form("");

    submit(&mut form, &delivery, &scheduler);

    assert_eq!(form.errors().message, Some("Message is required"));
    assert!(!form.is_submitting());
    assert_eq!(delivery.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn test_success_clears_fields_then_banner_resets() {
    let (scheduler, mut rx) = Scheduler::new();
    let delivery = Counting::default();
    let mut form = filled_form("Would love to work together.");

    submit(&mut form, &delivery, &scheduler);
    assert!(form.is_submitting());
    submit(&mut form, &delivery, &scheduler);
    assert_eq!(delivery.calls.load(Ordering::SeqCst), 1, "in-flight submit is ignored");

    let report = rx.recv().await.unwrap();
    form.apply_report(report, &scheduler);
    assert_eq!(form.status(), SubmitStatus::Success);
    assert_eq!(form.data(), &ContactMessage::default());

    let reset = time::timeout(Duration::from_secs(6), rx.recv()).await.unwrap();
    form.apply_report(reset.unwrap(), &scheduler);
    assert_eq!(form.status(), SubmitStatus::Idle);
}

#[tokio::test]
async fn test_failure_keeps_fields() {
    let (scheduler, mut rx) = Scheduler::new();
    let delivery = Counting {
        fail: true,
        ..Counting::default()
    };
    let mut form = filled_form("Would love to work together.");

    submit(&mut form, &delivery, &scheduler);
    let report = rx.recv().await.unwrap();
    assert_eq!(report, DeliveryReport::Failed("mailer offline".into()));
    form.apply_report(report, &scheduler);

    assert_eq!(form.status(), SubmitStatus::Error);
    assert_eq!(form.data().name, "Ada");
    assert!(!form.is_submitting());
}

#[tokio::test]
async fn test_outbox_spools_envelopes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("spool/outbox.jsonl");
    let outbox = Arc::new(Outbox::new(&path, "me@example.com"));
    let (scheduler, mut rx) = Scheduler::<DeliveryReport>::new();

    for subject in ["First", "Second"] {
        let mut form = filled_form("Would love to work together.");
        form.set(Field::Subject, subject);
        let message = form.submit().unwrap();
        dispatch(outbox.as_ref(), message, scheduler.sender());
        assert_eq!(rx.recv().await, Some(DeliveryReport::Delivered));
    }

    let spool = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<serde_json::Value> = spool
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["to"], "me@example.com");
    assert_eq!(lines[0]["reply_to"], "ada@example.com");
    assert_eq!(lines[1]["subject"], "Portfolio Contact: Second");
}
