use std::fs;

pub fn get() -> String {
    let config_path = match std::env::var("VX_CONFIG_PATH") {
        Ok(path) => path,
        Err(_) => "config.yml".to_owned(),
    };

    if fs::metadata(&config_path).is_err() {
        vx_log::panic(
            None,
            format!("[Vortext] Config file {config_path} not found (set VX_CONFIG_PATH or add config.yml to the working directory)"),
        );
    }

    config_path
}
