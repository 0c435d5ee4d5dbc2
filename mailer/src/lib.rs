use std::time::Duration;

use anyhow::Result;
use lettre::{
    message::{MessageBuilder, MultiPart},
    transport::smtp::authentication::Credentials,
    Message, SmtpTransport, Transport,
};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio_util::sync::CancellationToken;
use vx_error::Error;

pub mod template;

pub struct Mailer {
    message_builder: MessageBuilder,
    smtp_transport: SmtpTransport,
    channel_receiver: UnboundedReceiver<MailPayload>,
}

impl Mailer {
    pub fn new(
        smtp_host: &str,
        smtp_username: &str,
        smtp_password: &str,
        sender_name: &str,
        sender_email: &str,
        timeout: &Duration,
    ) -> Result<(Self, MailSender)> {
        vx_log::info(Some("⚡"), "[Mailer] Initializing component");

        let (sender, receiver) = MailSender::channel();

        Ok((
            Self {
                message_builder: Message::builder()
                    .from(format!("{sender_name} <{sender_email}>").parse()?),
                smtp_transport: SmtpTransport::relay(smtp_host)?
                    .credentials(Credentials::new(
                        smtp_username.to_owned(),
                        smtp_password.to_owned(),
                    ))
                    .timeout(Some(*timeout))
                    .build(),
                channel_receiver: receiver,
            },
            sender,
        ))
    }

    pub async fn run(mut self, cancel_token: CancellationToken) -> Result<()> {
        vx_log::info(Some("💫"), "[Mailer] Running component");

        loop {
            tokio::select! {
                _ = cancel_token.cancelled() => break,
                payload = self.channel_receiver.recv() => match payload {
                    Some(payload) => self.deliver(payload).await,
                    None => break,
                },
            }
        }

        vx_log::info(None, "[Mailer] Component stopped");
        Ok(())
    }

    pub async fn run_none() -> Result<()> {
        Ok(())
    }

    async fn deliver(&self, payload: MailPayload) {
        let to = payload.to.clone();
        let subject = payload.subject.clone();

        let message = match self.build_message(payload) {
            Ok(message) => message,
            Err(err) => {
                vx_log::error(
                    None,
                    format!("[Mailer] Failed to build mail '{subject}' to {to}: {err}"),
                );
                return;
            }
        };

        let smtp_transport = self.smtp_transport.clone();
        match tokio::task::spawn_blocking(move || smtp_transport.send(&message)).await {
            Ok(Ok(_)) => vx_log::info(Some("✉️"), format!("[Mailer] Sent '{subject}' to {to}")),
            Ok(Err(err)) => vx_log::error(
                None,
                format!("[Mailer] Failed to send '{subject}' to {to}: {err}"),
            ),
            Err(err) => vx_log::error(None, format!("[Mailer] Send task failed: {err}")),
        }
    }

    fn build_message(&self, payload: MailPayload) -> Result<Message> {
        let builder = self
            .message_builder
            .to_owned()
            .to(payload.to.parse()?)
            .subject(payload.subject);

        Ok(match payload.html {
            Some(html) => builder.multipart(MultiPart::alternative_plain_html(payload.text, html))?,
            None => builder.body(payload.text)?,
        })
    }
}

/// Handle used by request handlers to enqueue mail without waiting for SMTP.
#[derive(Clone)]
pub struct MailSender {
    sender: UnboundedSender<MailPayload>,
}

impl MailSender {
    pub fn channel() -> (Self, UnboundedReceiver<MailPayload>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }

    pub fn send(&self, payload: MailPayload) -> Result<(), Error> {
        self.sender
            .send(payload)
            .map_err(|err| Error::Delivery(format!("Mailer is not running: {err}")))
    }
}

#[derive(Clone, Debug)]
pub struct MailPayload {
    to: String,
    subject: String,
    text: String,
    html: Option<String>,
}

impl MailPayload {
    pub fn new(to: &str, subject: &str, text: &str, html: Option<String>) -> Self {
        Self {
            to: to.to_owned(),
            subject: subject.to_owned(),
            text: text.to_owned(),
            html,
        }
    }

    pub fn to(&self) -> &str {
        &self.to
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn html(&self) -> &Option<String> {
        &self.html
    }
}

#[cfg(test)]
mod tests {
    use super::{MailPayload, MailSender};

    #[tokio::test]
    async fn queued_payload_reaches_receiver() {
        let (sender, mut receiver) = MailSender::channel();

        sender
            .send(MailPayload::new(
                "jane@x.com",
                "Meeting Confirmation - Vortextsoft",
                "Your meeting is confirmed.",
                Some("<p>confirmed</p>".to_owned()),
            ))
            .unwrap();

        let payload = receiver.recv().await.unwrap();
        assert_eq!(payload.to(), "jane@x.com");
        assert_eq!(payload.subject(), "Meeting Confirmation - Vortextsoft");
        assert_eq!(payload.html().as_deref(), Some("<p>confirmed</p>"));
    }

    #[test]
    fn send_after_shutdown_is_a_delivery_error() {
        let (sender, receiver) = MailSender::channel();
        drop(receiver);

        let err = sender
            .send(MailPayload::new("jane@x.com", "s", "t", None))
            .unwrap_err();
        assert_eq!(err.kind(), "DELIVERY");
    }
}
