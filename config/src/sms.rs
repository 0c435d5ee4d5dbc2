use std::time::Duration;

use serde::Deserialize;

#[derive(Deserialize)]
pub struct SmsConfig {
    account_sid: String,
    auth_token: String,
    from_number: String,
    recipients: Vec<String>,
    #[serde(default = "default_country_code")]
    default_country_code: String,
    #[serde(default = "default_api_base")]
    api_base: String,
    #[serde(
        default = "default_timeout",
        deserialize_with = "duration_str::deserialize_duration"
    )]
    timeout: Duration,
}

impl SmsConfig {
    pub fn account_sid(&self) -> &str {
        &self.account_sid
    }

    pub fn auth_token(&self) -> &str {
        &self.auth_token
    }

    pub fn from_number(&self) -> &str {
        &self.from_number
    }

    pub fn recipients(&self) -> &[String] {
        &self.recipients
    }

    pub fn default_country_code(&self) -> &str {
        &self.default_country_code
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    pub fn timeout(&self) -> &Duration {
        &self.timeout
    }
}

fn default_country_code() -> String {
    "+94".to_owned()
}

fn default_api_base() -> String {
    "https://api.twilio.com".to_owned()
}

fn default_timeout() -> Duration {
    Duration::from_secs(10)
}
