use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use elysian_core::AppError;
use elysian_infrastructure::BasicCredentials;
use tracing_subscriber::EnvFilter;
use url::Url;

/// Where the console reads and writes database administration state.
#[derive(Debug, Clone)]
pub enum DataSource {
    /// A live ElysianDB instance reached over its admin HTTP API.
    Http {
        api_url: Url,
        credentials: Option<BasicCredentials>,
        timeout: Duration,
    },
    /// A seeded in-memory store, for local UI work.
    Memory,
}

#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    pub data_source: DataSource,
    pub frontend_url: String,
    pub console_host: String,
    pub console_port: u16,
}

impl ConsoleConfig {
    pub fn load() -> Result<Self, AppError> {
        let frontend_url =
            env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:5173".to_owned());
        let console_host = env::var("CONSOLE_HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
        let console_port = env::var("CONSOLE_PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(3002);

        let data_source = match env::var("CONSOLE_DATA_SOURCE")
            .unwrap_or_else(|_| "http".to_owned())
            .as_str()
        {
            "http" => load_http_data_source()?,
            "memory" => DataSource::Memory,
            other => {
                return Err(AppError::Validation(format!(
                    "CONSOLE_DATA_SOURCE must be either 'http' or 'memory', got '{other}'"
                )));
            }
        };

        Ok(Self {
            data_source,
            frontend_url,
            console_host,
            console_port,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.console_host).map_err(|error| {
            AppError::Internal(format!(
                "invalid CONSOLE_HOST '{}': {error}",
                self.console_host
            ))
        })?;
        Ok(SocketAddr::from((host, self.console_port)))
    }
}

fn load_http_data_source() -> Result<DataSource, AppError> {
    let raw_url = required_non_empty_env("ELYSIAN_API_URL")?;
    let api_url = Url::parse(raw_url.as_str())
        .map_err(|error| AppError::Validation(format!("invalid ELYSIAN_API_URL: {error}")))?;

    let credentials = match (
        optional_env("ELYSIAN_USERNAME"),
        optional_env("ELYSIAN_PASSWORD"),
    ) {
        (Some(username), Some(password)) => Some(BasicCredentials { username, password }),
        (None, None) => None,
        _ => {
            return Err(AppError::Validation(
                "ELYSIAN_USERNAME and ELYSIAN_PASSWORD must be set together".to_owned(),
            ));
        }
    };

    let timeout_secs = env::var("ELYSIAN_HTTP_TIMEOUT_SECS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(15);

    Ok(DataSource::Http {
        api_url,
        credentials,
        timeout: Duration::from_secs(timeout_secs),
    })
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn required_env(name: &str) -> Result<String, AppError> {
    env::var(name).map_err(|_| AppError::Validation(format!("{name} is required")))
}

fn required_non_empty_env(name: &str) -> Result<String, AppError> {
    let value = required_env(name)?;
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{name} must not be empty")));
    }

    Ok(value)
}

fn optional_env(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}
