use serde::Deserialize;

#[derive(Deserialize)]
pub struct UploadConfig {
    path: String,
    #[serde(default = "default_public_path")]
    public_path: String,
    #[serde(default = "default_max_size")]
    max_size: usize,
}

impl UploadConfig {
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn public_path(&self) -> &str {
        &self.public_path
    }

    pub fn max_size(&self) -> &usize {
        &self.max_size
    }
}

fn default_public_path() -> String {
    "/uploads".to_owned()
}

fn default_max_size() -> usize {
    100 * 1024 * 1024
}
