use std::time::Duration;

use reqwest::Url;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{
    error::{GoogleMapsError, Result},
    params::QueryParams,
    signing::UrlSigner,
};

pub const GOOGLE_MAPS_BASE_URL: &str = "https://maps.googleapis.com";
pub const API_KEY_ENV_VAR: &str = "GOOGLE_MAPS_API_KEY";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Keys the context adds to every request; callers cannot set them.
const RESERVED_KEYS: [&str; 3] = ["key", "client", "signature"];

#[derive(Clone)]
pub enum Credentials {
    ApiKey(String),
    /// Premium plan client id, requests are signed with the client secret.
    ClientId {
        client_id: String,
        signer: UrlSigner,
    },
}

impl Credentials {
    pub fn api_key(key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(GoogleMapsError::invalid_argument("API key must not be empty"));
        }
        Ok(Credentials::ApiKey(key))
    }

    pub fn client_id(client_id: impl Into<String>, secret: &str) -> Result<Self> {
        let client_id = client_id.into();
        if client_id.trim().is_empty() {
            return Err(GoogleMapsError::invalid_argument(
                "client id must not be empty",
            ));
        }
        Ok(Credentials::ClientId {
            client_id,
            signer: UrlSigner::new(secret)?,
        })
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credentials::ApiKey(_) => f.write_str("ApiKey(..)"),
            Credentials::ClientId { client_id, .. } => f
                .debug_struct("ClientId")
                .field("client_id", client_id)
                .finish_non_exhaustive(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ContextParams {
    pub credentials: Credentials,
    /// Scheme and host, optionally with a path prefix.
    pub base_url: String,
    pub timeout: Duration,
}

impl ContextParams {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            base_url: GOOGLE_MAPS_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Credentials plus the HTTP transport used to issue requests.
#[derive(Debug, Clone)]
pub struct Context {
    credentials: Credentials,
    base_url: String,
    client: reqwest::Client,
}

impl Context {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_params(ContextParams::new(Credentials::api_key(api_key)?))
    }

    pub fn with_params(params: ContextParams) -> Result<Self> {
        let base_url = params.base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url).map_err(|err| {
            GoogleMapsError::invalid_argument(format!("invalid base url {base_url}: {err}"))
        })?;

        let client = reqwest::Client::builder()
            .timeout(params.timeout)
            .build()?;

        Ok(Self {
            credentials: params.credentials,
            base_url,
            client,
        })
    }

    /// Reads the API key from `GOOGLE_MAPS_API_KEY`, loading `.env` first.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        let api_key = std::env::var(API_KEY_ENV_VAR)?;
        Self::new(api_key)
    }

    /// Builds the full request url for `path`, adding the credentials and,
    /// for client id credentials, the trailing signature.
    pub fn request_url(&self, path: &str, params: &QueryParams) -> Result<Url> {
        if let Some(reserved) = RESERVED_KEYS.iter().find(|k| params.contains_key(k)) {
            return Err(GoogleMapsError::invalid_argument(format!(
                "{reserved} is set by the context and cannot be passed as a parameter"
            )));
        }

        let mut url = Url::parse(&format!("{}{}", self.base_url, path)).map_err(|err| {
            GoogleMapsError::invalid_argument(format!("invalid request path {path}: {err}"))
        })?;

        {
            let mut query = url.query_pairs_mut();
            for (key, value) in params.iter() {
                query.append_pair(key, value);
            }

            match &self.credentials {
                Credentials::ApiKey(key) => {
                    query.append_pair("key", key);
                }
                Credentials::ClientId { client_id, .. } => {
                    query.append_pair("client", client_id);
                }
            }
        }

        if let Credentials::ClientId { signer, .. } = &self.credentials {
            let path_and_query = format!("{}?{}", url.path(), url.query().unwrap_or_default());
            let signature = signer.sign(&path_and_query);
            url.query_pairs_mut().append_pair("signature", &signature);
        }

        Ok(url)
    }

    /// Issues a GET request and deserializes the JSON body.
    ///
    /// Non-success HTTP statuses surface as transport errors; the service
    /// level status in the body is left to the caller.
    pub async fn get_json<T>(&self, path: &str, params: &QueryParams) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let url = self.request_url(path, params)?;

        debug!(
            "GoogleMapsApi: GET {} with {} parameters",
            path,
            params.len()
        );

        let response = self.client.get(url).send().await?.error_for_status()?;
        let body = response.bytes().await?;

        debug!("GoogleMapsApi: received {} bytes from {}", body.len(), path);

        Ok(serde_json::from_slice(&body)?)
    }
}
