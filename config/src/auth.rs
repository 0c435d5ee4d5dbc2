use std::time::Duration;

use serde::Deserialize;

#[derive(Deserialize)]
pub struct AuthConfig {
    #[serde(
        default = "default_otp_ttl",
        deserialize_with = "duration_str::deserialize_duration"
    )]
    otp_ttl: Duration,
    #[serde(default)]
    admins: Vec<AdminSeedConfig>,
}

impl AuthConfig {
    pub fn otp_ttl(&self) -> &Duration {
        &self.otp_ttl
    }

    pub fn admins(&self) -> &[AdminSeedConfig] {
        &self.admins
    }
}

#[derive(Deserialize)]
pub struct AdminSeedConfig {
    email: String,
    #[serde(default = "default_role")]
    role: String,
}

impl AdminSeedConfig {
    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn role(&self) -> &str {
        &self.role
    }
}

fn default_otp_ttl() -> Duration {
    Duration::from_secs(5 * 60)
}

fn default_role() -> String {
    "admin".to_owned()
}
