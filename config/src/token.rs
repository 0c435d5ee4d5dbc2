use std::time::Duration;

use serde::Deserialize;

#[derive(Deserialize)]
pub struct TokenConfig {
    jwt: JwtTokenConfig,
}

impl TokenConfig {
    pub fn jwt(&self) -> &JwtTokenConfig {
        &self.jwt
    }
}

#[derive(Deserialize)]
pub struct JwtTokenConfig {
    secret: String,
    #[serde(
        default = "default_expiry_duration",
        deserialize_with = "duration_str::deserialize_duration"
    )]
    expiry_duration: Duration,
}

impl JwtTokenConfig {
    pub fn secret(&self) -> &str {
        &self.secret
    }

    pub fn expiry_duration(&self) -> &Duration {
        &self.expiry_duration
    }
}

fn default_expiry_duration() -> Duration {
    Duration::from_secs(60 * 60)
}
