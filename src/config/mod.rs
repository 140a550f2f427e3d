use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::fetch::{FetchSettings, ARTICLE_TIMEOUT, IMAGE_TIMEOUT};

#[derive(Clone, Debug)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub is_dev: bool,
    pub static_dir: PathBuf,
    pub article_timeout: Duration,
    pub image_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Config {
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3001),
            is_dev: env::var("APP_ENV").as_deref() != Ok("production"),
            static_dir: env::var("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("static")),
            article_timeout: secs_from_env("ARTICLE_TIMEOUT_SECS", ARTICLE_TIMEOUT),
            image_timeout: secs_from_env("IMAGE_TIMEOUT_SECS", IMAGE_TIMEOUT),
        }
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            article_timeout: self.article_timeout,
            image_timeout: self.image_timeout,
            ..FetchSettings::default()
        }
    }
}

fn secs_from_env(key: &str, default: Duration) -> Duration {
    env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .map(Duration::from_secs)
        .unwrap_or(default)
}
