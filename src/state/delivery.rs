//! Hand-off of contact messages to an external mailer.

use std::path::{Path, PathBuf};

use futures::future::BoxFuture;
use serde::Serialize;
use tokio::{fs::OpenOptions, io::AsyncWriteExt};
use tracing::{debug, info};

use super::contact::{ContactMessage, DeliveryReport};
use crate::error::{Error, Result};

/// Something that accepts a contact message for delivery.
pub trait Delivery: Send + Sync {
    fn deliver(&self, message: ContactMessage) -> BoxFuture<'static, Result<()>>;
}

/// Envelope written for the mailer.
#[derive(Debug, Serialize)]
struct Envelope {
    to: String,
    reply_to: String,
    from_name: String,
    subject: String,
    body: String,
}

impl Envelope {
    fn new(to: &str, message: ContactMessage) -> Self {
        Self {
            to: to.to_string(),
            reply_to: message.email.trim().to_string(),
            from_name: message.name.trim().to_string(),
            subject: format!("Portfolio Contact: {}", message.subject.trim()),
            body: message.message.trim().to_string(),
        }
    }
}

/// Appends each message as one JSON line to a spool file that a mailer
/// picks up.
#[derive(Debug, Clone)]
pub struct Outbox {
    path: PathBuf,
    recipient: String,
}

impl Outbox {
    pub fn new(path: impl Into<PathBuf>, recipient: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            recipient: recipient.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Delivery for Outbox {
    fn deliver(&self, message: ContactMessage) -> BoxFuture<'static, Result<()>> {
        let path = self.path.clone();
        let envelope = Envelope::new(&self.recipient, message);

        Box::pin(async move {
            let mut line = serde_json::to_string(&envelope)?;
            line.push('\n');

            if let Some(dir) = path.parent() {
                tokio::fs::create_dir_all(dir).await?;
            }
            let mut file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .await?;
            file.write_all(line.as_bytes()).await?;
            file.flush().await?;

            info!(path = %path.display(), subject = %envelope.subject, "Message spooled");
            Ok(())
        })
    }
}

/// Run `delivery` in the background and report the outcome as an event.
pub fn dispatch<E, D>(
    delivery: &D,
    message: ContactMessage,
    events: tokio::sync::mpsc::UnboundedSender<E>,
) where
    D: Delivery + ?Sized,
    E: From<DeliveryReport> + Send + 'static,
{
    let pending = delivery.deliver(message);
    tokio::spawn(async move {
        let report = match pending.await {
            Ok(()) => DeliveryReport::Delivered,
            Err(Error::Delivery(reason)) => DeliveryReport::Failed(reason),
            Err(e) => DeliveryReport::Failed(e.to_string()),
        };
        debug!(?report, "Delivery finished");
        let _ = events.send(report.into());
    });
}
