use serde::Deserialize;

#[derive(Deserialize)]
pub struct AppConfig {
    mode: AppConfigMode,
}

impl AppConfig {
    pub fn mode(&self) -> &AppConfigMode {
        &self.mode
    }
}

#[derive(Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "snake_case")]
pub enum AppConfigMode {
    Development,
    Production,
}

impl AppConfigMode {
    pub fn is_development(&self) -> bool {
        *self == Self::Development
    }
}
