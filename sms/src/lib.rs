use std::time::Duration;

use anyhow::{Error as AnyError, Result};
use serde::Deserialize;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio_util::sync::CancellationToken;
use vx_error::Error;

/// Delivers text messages to a fixed list of admin phone numbers through a
/// Twilio-compatible messages endpoint.
pub struct SmsClient {
    http: reqwest::Client,
    endpoint: String,
    account_sid: String,
    auth_token: String,
    from_number: String,
    recipients: Vec<String>,
    channel_receiver: UnboundedReceiver<SmsPayload>,
}

impl SmsClient {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        api_base: &str,
        account_sid: &str,
        auth_token: &str,
        from_number: &str,
        recipients: &[String],
        default_country_code: &str,
        timeout: &Duration,
    ) -> Result<(Self, SmsSender)> {
        vx_log::info(Some("⚡"), "[SmsClient] Initializing component");

        let (sender, receiver) = SmsSender::channel();

        Ok((
            Self {
                http: reqwest::Client::builder().timeout(*timeout).build()?,
                endpoint: format!(
                    "{}/2010-04-01/Accounts/{account_sid}/Messages.json",
                    api_base.trim_end_matches('/')
                ),
                account_sid: account_sid.to_owned(),
                auth_token: auth_token.to_owned(),
                from_number: from_number.to_owned(),
                recipients: recipients
                    .iter()
                    .map(|phone| format_phone(phone, default_country_code))
                    .collect(),
                channel_receiver: receiver,
            },
            sender,
        ))
    }

    pub async fn run(mut self, cancel_token: CancellationToken) -> Result<()> {
        vx_log::info(Some("💫"), "[SmsClient] Running component");

        loop {
            tokio::select! {
                _ = cancel_token.cancelled() => break,
                payload = self.channel_receiver.recv() => match payload {
                    Some(payload) => self.deliver(&payload).await,
                    None => break,
                },
            }
        }

        vx_log::info(None, "[SmsClient] Component stopped");
        Ok(())
    }

    pub async fn run_none() -> Result<()> {
        Ok(())
    }

    async fn deliver(&self, payload: &SmsPayload) {
        let mut sent = 0;
        for recipient in &self.recipients {
            match self.send_one(recipient, payload.body()).await {
                Ok(_) => sent += 1,
                Err(err) => vx_log::error(
                    None,
                    format!("[SmsClient] Failed to send message to {recipient}: {err}"),
                ),
            }
        }
        vx_log::info(
            Some("📱"),
            format!("[SmsClient] Sent message to {sent}/{} numbers", self.recipients.len()),
        );
    }

    async fn send_one(&self, to: &str, body: &str) -> Result<()> {
        let res = self
            .http
            .post(&self.endpoint)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&[("To", to), ("From", &self.from_number), ("Body", body)])
            .send()
            .await?;

        if res.status().is_success() {
            return Ok(());
        }

        let status = res.status();
        match res.json::<SmsApiError>().await {
            Ok(err) => Err(AnyError::msg(format!("{status}: {}", err.message))),
            Err(_) => Err(AnyError::msg(status.to_string())),
        }
    }
}

#[derive(Deserialize)]
struct SmsApiError {
    message: String,
}

#[derive(Clone)]
pub struct SmsSender {
    sender: UnboundedSender<SmsPayload>,
}

impl SmsSender {
    pub fn channel() -> (Self, UnboundedReceiver<SmsPayload>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }

    pub fn send(&self, payload: SmsPayload) -> Result<(), Error> {
        self.sender
            .send(payload)
            .map_err(|err| Error::Delivery(format!("SMS client is not running: {err}")))
    }
}

#[derive(Clone, Debug)]
pub struct SmsPayload {
    body: String,
}

impl SmsPayload {
    pub fn new(body: &str) -> Self {
        Self {
            body: body.to_owned(),
        }
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

/// Normalizes a configured phone number to E.164 by swapping a local leading
/// `0` for the default country code.
pub fn format_phone(phone: &str, default_country_code: &str) -> String {
    let phone = phone.trim();
    if phone.starts_with('+') {
        phone.to_owned()
    } else if let Some(local) = phone.strip_prefix('0') {
        format!("{default_country_code}{local}")
    } else {
        format!("{default_country_code}{phone}")
    }
}

#[cfg(test)]
mod tests {
    use super::{format_phone, SmsPayload, SmsSender};

    #[test]
    fn local_numbers_get_country_code() {
        assert_eq!(format_phone("0771234567", "+94"), "+94771234567");
        assert_eq!(format_phone("771234567", "+94"), "+94771234567");
        assert_eq!(format_phone(" +14155550100 ", "+94"), "+14155550100");
    }

    #[tokio::test]
    async fn payload_is_queued() {
        let (sender, mut receiver) = SmsSender::channel();
        sender
            .send(SmsPayload::new("Your login code is 123456"))
            .unwrap();
        assert_eq!(
            receiver.recv().await.unwrap().body(),
            "Your login code is 123456"
        );
    }
}
