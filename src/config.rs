use std::env;

/// Runtime configuration for the console API clients.
/// Values are sourced from environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub id_token: Option<String>,
    pub user_agent: String,
}

impl Config {
    /// Config pointing at `api_url` with no token and the default user agent.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            id_token: None,
            user_agent: default_user_agent(),
        }
    }

    /// Load configuration from environment.
    ///
    /// Env vars:
    /// - SAAS_BOOST_API_URL [required]
    /// - SAAS_BOOST_ID_TOKEN (optional bearer token)
    /// - SAAS_BOOST_USER_AGENT (default: saas-boost-console/<version>)
    pub fn from_env() -> Result<Self, String> {
        let api_url = env::var("SAAS_BOOST_API_URL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| "Missing SAAS_BOOST_API_URL".to_string())?;
        let id_token = env::var("SAAS_BOOST_ID_TOKEN")
            .ok()
            .filter(|s| !s.trim().is_empty());
        let user_agent = env::var("SAAS_BOOST_USER_AGENT").unwrap_or_else(|_| default_user_agent());

        Ok(Self {
            api_url,
            id_token,
            user_agent,
        })
    }
}

fn default_user_agent() -> String {
    format!("saas-boost-console/{}", env!("CARGO_PKG_VERSION"))
}
