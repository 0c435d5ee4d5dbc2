use serde::Deserialize;

#[derive(Deserialize)]
pub struct LogConfig {
    #[serde(default)]
    display_level: bool,
    /// One of `off`, `error`, `warn`, `info`, `debug`, `trace`.
    #[serde(default = "default_level_filter")]
    level_filter: String,
}

impl LogConfig {
    pub fn display_level(&self) -> &bool {
        &self.display_level
    }

    pub fn level_filter(&self) -> &str {
        &self.level_filter
    }
}

fn default_level_filter() -> String {
    "info".to_owned()
}
