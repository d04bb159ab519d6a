use std::path::PathBuf;

use once_cell::sync::Lazy;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
    /// Where the API access token is kept between runs.
    #[serde(default = "default_token_path")]
    pub token_path: PathBuf,
}

fn default_token_path() -> PathBuf {
    let home = std::env::var_os("HOME").map(PathBuf::from).unwrap_or_default();
    home.join(".windlog").join("access_token")
}

pub static CONFIG: Lazy<Config> = Lazy::new(|| {
    envy::prefixed("WINDLOG_")
        .from_env::<Config>()
        .expect("Invalid config. Optional env vars: WINDLOG_TOKEN_PATH")
});

pub fn config() -> &'static Config {
    &CONFIG
}
