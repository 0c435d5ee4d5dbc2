use std::time::Duration;

use serde::Deserialize;

#[derive(Deserialize)]
pub struct MailerConfig {
    smtp_host: String,
    smtp_username: String,
    smtp_password: String,
    sender_name: String,
    sender_email: String,
    notify_email: Option<String>,
    #[serde(
        default = "default_timeout",
        deserialize_with = "duration_str::deserialize_duration"
    )]
    timeout: Duration,
}

impl MailerConfig {
    pub fn smtp_host(&self) -> &str {
        &self.smtp_host
    }

    pub fn smtp_username(&self) -> &str {
        &self.smtp_username
    }

    pub fn smtp_password(&self) -> &str {
        &self.smtp_password
    }

    pub fn sender_name(&self) -> &str {
        &self.sender_name
    }

    pub fn sender_email(&self) -> &str {
        &self.sender_email
    }

    pub fn notify_email(&self) -> &Option<String> {
        &self.notify_email
    }

    pub fn timeout(&self) -> &Duration {
        &self.timeout
    }
}

fn default_timeout() -> Duration {
    Duration::from_secs(10)
}
