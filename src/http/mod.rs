use crate::config::Config;
use log::debug;
use reqwest::header::{HeaderValue, ACCEPT};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use url::Url;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Errors produced by a single console API call.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The caller's cancellation token fired before the call settled.
    #[error("request {request_id} canceled")]
    Cancelled { request_id: Uuid },

    #[error("invalid API URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("response decoding failed: {0}")]
    Decode(#[source] reqwest::Error),
}

impl HttpError {
    /// Stable diagnostic code, used when logging failures.
    pub fn code(&self) -> &'static str {
        match self {
            HttpError::Cancelled { .. } => "canceled",
            HttpError::InvalidUrl { .. } => "invalid_url",
            HttpError::Transport(_) => "transport_error",
            HttpError::Decode(_) => "decode_error",
            HttpError::Status { status, .. } => match *status {
                StatusCode::BAD_REQUEST => "bad_request",
                StatusCode::UNAUTHORIZED => "unauthorized",
                StatusCode::FORBIDDEN => "forbidden",
                StatusCode::NOT_FOUND => "not_found",
                StatusCode::CONFLICT => "conflict",
                StatusCode::TOO_MANY_REQUESTS => "rate_limited",
                s if s.is_server_error() => "upstream_error",
                _ => "server_error",
            },
        }
    }
}

/// True when `err` was produced by cancelling the call, false for every other failure.
pub fn is_cancel(err: &HttpError) -> bool {
    matches!(err, HttpError::Cancelled { .. })
}

pub fn build_client(cfg: &Config) -> reqwest::Result<Client> {
    // No transport timeout: the caller's cancellation token is the only deadline.
    Client::builder()
        .user_agent(cfg.user_agent.clone())
        .use_rustls_tls()
        .build()
}

/// A client bound to one backend service, e.g. `<api_url>/billing`.
#[derive(Debug, Clone)]
pub struct ApiServer {
    client: Client,
    base: Url,
    id_token: Option<String>,
}

impl ApiServer {
    pub fn new(client: Client, cfg: &Config, service: &str) -> Result<Self, HttpError> {
        let invalid = |reason: String| HttpError::InvalidUrl {
            url: cfg.api_url.clone(),
            reason,
        };
        let mut base = Url::parse(&cfg.api_url).map_err(|e| invalid(e.to_string()))?;
        base.path_segments_mut()
            .map_err(|_| invalid("URL cannot be a base".into()))?
            .pop_if_empty()
            .push(service);
        Ok(Self {
            client,
            base,
            id_token: cfg.id_token.clone(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Resolve a request path (e.g. `/plans`) under the service base.
    pub fn url_for(&self, path: &str) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.extend(path.split('/').filter(|s| !s.is_empty()));
        }
        url
    }

    /// GET `path` and decode the JSON body, racing the exchange against `cancel`.
    ///
    /// Cancellation is cooperative: the in-flight request future is dropped once the
    /// token fires. A token that is already cancelled means nothing is sent.
    pub async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        cancel: &CancellationToken,
    ) -> Result<T, HttpError> {
        let request_id = Uuid::new_v4();
        let url = self.url_for(path);
        debug!("GET {} [{}]", url, request_id);
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("GET {} [{}] canceled", url, request_id);
                Err(HttpError::Cancelled { request_id })
            }
            res = self.exchange::<T>(url.clone(), request_id) => res,
        }
    }

    async fn exchange<T: for<'de> Deserialize<'de>>(
        &self,
        url: Url,
        request_id: Uuid,
    ) -> Result<T, HttpError> {
        let mut req = self
            .client
            .get(url)
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .header(REQUEST_ID_HEADER, request_id.to_string());
        if let Some(token) = &self.id_token {
            req = req.bearer_auth(token);
        }

        let res = req.send().await.map_err(HttpError::Transport)?;
        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(HttpError::Status { status, body });
        }
        res.json::<T>().await.map_err(|e| {
            if e.is_decode() {
                HttpError::Decode(e)
            } else {
                HttpError::Transport(e)
            }
        })
    }
}
