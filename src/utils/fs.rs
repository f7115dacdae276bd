use std::{env, path::PathBuf};

const DEFAULT_CONFIG_DIR: &str = "./.imagebox";

/// Directory holding the config files, `$IMAGEBOX_CONFIG_DIR` if set.
pub fn config_dir() -> PathBuf {
    env::var_os("IMAGEBOX_CONFIG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_DIR))
}

pub fn server_config_file() -> PathBuf {
    config_dir().join("server.toml")
}

pub fn client_config_file() -> PathBuf {
    config_dir().join("client.toml")
}
