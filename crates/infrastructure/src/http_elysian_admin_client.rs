use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use elysian_core::{AppError, AppResult};

mod acl;
mod hooks;
mod records;
mod schema;
mod users;
mod wire;


/// Basic-auth credentials sent with every admin API call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    /// Database username.
    pub username: String,
    /// Database password.
    pub password: String,
}

/// reqwest-based client for the ElysianDB admin HTTP API.
///
/// Implements every console repository port against one database instance.
#[derive(Clone)]
pub struct HttpElysianAdminClient {
    http_client: reqwest::Client,
    base_url: Url,
    credentials: Option<BasicCredentials>,
}

impl HttpElysianAdminClient {
    /// Creates a client for the database reachable at `base_url`.
    #[must_use]
    pub fn new(
        http_client: reqwest::Client,
        base_url: Url,
        credentials: Option<BasicCredentials>,
    ) -> Self {
        Self {
            http_client,
            base_url,
            credentials,
        }
    }

    /// Builds `<base>/api/<segments...>`, percent-encoding each segment.
    fn endpoint(&self, segments: &[&str]) -> AppResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                AppError::Internal(format!(
                    "database url '{}' cannot carry a path",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .push("api")
            .extend(segments);

        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.http_client.request(method, url);
        match &self.credentials {
            Some(credentials) => {
                builder.basic_auth(&credentials.username, Some(&credentials.password))
            }
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> AppResult<Response> {
        let response = builder.send().await.map_err(|error| {
            AppError::Internal(format!("database request transport error: {error}"))
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<response body unavailable>".to_owned());
        Err(error_from_status(status, body.as_str()))
    }

    async fn send_json<T>(&self, builder: RequestBuilder) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        self.send(builder)
            .await?
            .json::<T>()
            .await
            .map_err(|error| AppError::Internal(format!("invalid database response: {error}")))
    }
}

/// Maps a failed admin API response to an application error.
///
/// The database reports failures as `{"error": "..."}`; other bodies are
/// passed through verbatim.
pub(crate) fn error_from_status(status: StatusCode, body: &str) -> AppError {
    let message = serde_json::from_str::<wire::ErrorBody>(body)
        .map(|error| error.error)
        .unwrap_or_else(|_| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                status.to_string()
            } else {
                trimmed.to_owned()
            }
        });

    match status {
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => AppError::Validation(message),
        StatusCode::UNAUTHORIZED => AppError::Unauthorized(message),
        StatusCode::FORBIDDEN => AppError::Forbidden(message),
        StatusCode::NOT_FOUND => AppError::NotFound(message),
        StatusCode::CONFLICT => AppError::Conflict(message),
        _ => AppError::Internal(format!("database responded with {status}: {message}")),
    }
}
