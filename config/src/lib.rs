use std::{fs::File, io::Read};

use serde::Deserialize;

use self::{
    api::ApiConfig, app::AppConfig, auth::AuthConfig, db::DbConfig, log::LogConfig,
    mailer::MailerConfig, sms::SmsConfig, token::TokenConfig, upload::UploadConfig,
};

pub mod api;
pub mod app;
pub mod auth;
pub mod db;
pub mod log;
pub mod mailer;
pub mod sms;
pub mod token;
pub mod upload;

#[derive(Deserialize)]
pub struct Config {
    app: AppConfig,
    log: LogConfig,
    token: TokenConfig,
    auth: AuthConfig,
    mailer: Option<MailerConfig>,
    sms: Option<SmsConfig>,
    db: DbConfig,
    api: ApiConfig,
    upload: UploadConfig,
}

impl Config {
    pub fn app(&self) -> &AppConfig {
        &self.app
    }

    pub fn log(&self) -> &LogConfig {
        &self.log
    }

    pub fn token(&self) -> &TokenConfig {
        &self.token
    }

    pub fn auth(&self) -> &AuthConfig {
        &self.auth
    }

    pub fn mailer(&self) -> &Option<MailerConfig> {
        &self.mailer
    }

    pub fn sms(&self) -> &Option<SmsConfig> {
        &self.sms
    }

    pub fn db(&self) -> &DbConfig {
        &self.db
    }

    pub fn api(&self) -> &ApiConfig {
        &self.api
    }

    pub fn upload(&self) -> &UploadConfig {
        &self.upload
    }
}

pub fn from_path(path: &str) -> Config {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) => panic!("Failed to open config file '{path}': {err}"),
    };
    from_reader(file)
}

pub fn from_reader<R: Read>(reader: R) -> Config {
    match serde_yaml::from_reader::<_, Config>(reader) {
        Ok(config) => config,
        Err(err) => panic!("Failed to parse config file: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{app::AppConfigMode, from_reader};

    const MINIMAL: &str = r#"
app:
  mode: development
log:
  display_level: true
  level_filter: info
token:
  jwt:
    secret: change-me
auth:
  admins:
    - email: admin@vortextsoft.com
db:
  sqlite:
    path: vortext.db
    max_connections: 4
api:
  rest:
    host: 0.0.0.0
    port: 3001
upload:
  path: ./uploads
"#;

    #[test]
    fn minimal_config_fills_defaults() {
        let config = from_reader(MINIMAL.as_bytes());

        assert_eq!(*config.app().mode(), AppConfigMode::Development);
        assert_eq!(*config.auth().otp_ttl(), Duration::from_secs(300));
        assert_eq!(*config.token().jwt().expiry_duration(), Duration::from_secs(3600));
        assert_eq!(*config.db().query_timeout(), Duration::from_secs(10));
        assert_eq!(config.auth().admins()[0].role(), "admin");
        assert_eq!(config.upload().public_path(), "/uploads");
        assert_eq!(*config.upload().max_size(), 100 * 1024 * 1024);
        assert!(config.mailer().is_none());
        assert!(config.sms().is_none());
        assert!(config.db().postgres().is_none());
    }

    #[test]
    fn durations_accept_human_units() {
        let yaml = MINIMAL
            .replace("    secret: change-me", "    secret: change-me\n    expiry_duration: 2h")
            .replace("auth:\n", "auth:\n  otp_ttl: 90s\n");
        let config = from_reader(yaml.as_bytes());

        assert_eq!(*config.token().jwt().expiry_duration(), Duration::from_secs(7200));
        assert_eq!(*config.auth().otp_ttl(), Duration::from_secs(90));
    }

    #[test]
    #[should_panic(expected = "Failed to parse config file")]
    fn missing_section_is_rejected() {
        from_reader("app:\n  mode: production\n".as_bytes());
    }
}
