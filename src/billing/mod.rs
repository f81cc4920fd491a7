//! Billing service API.

use crate::config::Config;
use crate::http::{ApiServer, HttpError};
use log::{error, info};
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

pub use crate::http::is_cancel;

pub const SERVICE: &str = "billing";

/// Caller-facing failures of the billing API.
///
/// `FetchFailure` keeps the transport cause for diagnostics; its message stays generic.
#[derive(Debug, Error)]
pub enum BillingError {
    #[error("Call aborted")]
    Aborted(#[source] HttpError),

    #[error("Unable to fetch billing plans")]
    FetchFailure(#[source] HttpError),
}

impl BillingError {
    pub fn is_aborted(&self) -> bool {
        matches!(self, BillingError::Aborted(_))
    }

    /// The underlying transport error.
    pub fn cause(&self) -> &HttpError {
        match self {
            BillingError::Aborted(e) | BillingError::FetchFailure(e) => e,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BillingApi {
    server: ApiServer,
}

impl BillingApi {
    pub fn new(client: Client, cfg: &Config) -> Result<Self, HttpError> {
        Ok(Self {
            server: ApiServer::new(client, cfg, SERVICE)?,
        })
    }

    /// Fetch the billing plans. The body is returned exactly as the service sent it.
    ///
    /// Single attempt; no retries and no caching.
    pub async fn fetch_plans(&self, cancel: &CancellationToken) -> Result<Value, BillingError> {
        match self.server.get_json::<Value>("/plans", cancel).await {
            Ok(body) => Ok(body),
            Err(e) if is_cancel(&e) => {
                info!("billing plans request aborted: {}", e);
                Err(BillingError::Aborted(e))
            }
            Err(e) => {
                error!("fetching billing plans failed ({}): {}", e.code(), e);
                Err(BillingError::FetchFailure(e))
            }
        }
    }
}
