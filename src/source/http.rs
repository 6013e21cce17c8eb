//! HTTP + JSON postal-code providers.
//!
//! # Responsibilities
//! - Build the provider-specific lookup URL
//! - Issue exactly one GET per fetch, bounded by the per-call timeout
//! - Map transport, status and decode failures onto `FetchError`

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::{HttpConfig, ProviderConfig};
use crate::resilience::with_timeout;
use crate::source::record::{Address, OpenCepAddress, Record, ViaCepAddress};
use crate::source::types::{FetchError, FetchResult, LookupKey};
use crate::source::DataSource;

/// Supported provider schemas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// `{base}/ws/{cep}/json/`
    ViaCep,
    /// `{base}/v1/{cep}.json`
    OpenCep,
}

impl ProviderKind {
    pub fn lookup_url(&self, base_url: &str, key: &LookupKey) -> String {
        let base = base_url.trim_end_matches('/');
        match self {
            ProviderKind::ViaCep => format!("{}/ws/{}/json/", base, key),
            ProviderKind::OpenCep => format!("{}/v1/{}.json", base, key),
        }
    }

    pub fn decode(&self, body: &[u8]) -> FetchResult<Address> {
        match self {
            ProviderKind::ViaCep => ViaCepAddress::from_json(body).map(Address::ViaCep),
            ProviderKind::OpenCep => OpenCepAddress::from_json(body).map(Address::OpenCep),
        }
    }
}

/// Build the HTTP client shared by all providers.
pub fn build_client(config: &HttpConfig) -> Result<reqwest::Client, reqwest::Error> {
    let mut builder = reqwest::Client::builder()
        .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
        .user_agent(config.user_agent.clone());
    if !config.use_system_proxy {
        builder = builder.no_proxy();
    }
    builder.build()
}

/// A provider reached over HTTP.
#[derive(Clone)]
pub struct HttpSource {
    id: String,
    kind: ProviderKind,
    base_url: String,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(
        id: impl Into<String>,
        kind: ProviderKind,
        base_url: impl Into<String>,
        client: reqwest::Client,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            base_url: base_url.into(),
            client,
        }
    }

    pub fn from_config(config: &ProviderConfig, client: reqwest::Client) -> Self {
        Self::new(config.name.clone(), config.kind, config.base_url.clone(), client)
    }

    async fn get(&self, url: &str, timeout: Duration) -> FetchResult<Address> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| map_transport_error(e, timeout))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::BadStatus(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| map_transport_error(e, timeout))?;
        self.kind.decode(&body)
    }
}

fn map_transport_error(err: reqwest::Error, timeout: Duration) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout(timeout)
    } else if err.is_decode() {
        FetchError::Decode(err.to_string())
    } else {
        FetchError::Network(err.to_string())
    }
}

impl std::fmt::Debug for HttpSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpSource")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl DataSource for HttpSource {
    fn id(&self) -> &str {
        &self.id
    }

    async fn fetch(&self, key: &LookupKey, timeout: Duration) -> FetchResult<Record> {
        let url = self.kind.lookup_url(&self.base_url, key);
        tracing::debug!(source = %self.id, url = %url, timeout_ms = timeout.as_millis() as u64, "Fetching");

        let address = with_timeout(timeout, self.get(&url, timeout)).await?;
        Ok(Record { url, address })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_client_from_defaults() {
        assert!(build_client(&HttpConfig::default()).is_ok());
    }

    #[test]
    fn test_lookup_urls() {
        let key = LookupKey::new("22735140");
        assert_eq!(
            ProviderKind::ViaCep.lookup_url("https://viacep.com.br", &key),
            "https://viacep.com.br/ws/22735140/json/"
        );
        assert_eq!(
            ProviderKind::OpenCep.lookup_url("https://opencep.com/", &key),
            "https://opencep.com/v1/22735140.json"
        );
    }

    #[test]
    fn test_decode_picks_variant_by_kind() {
        let body = br#"{"cep": "22735-140", "uf": "RJ"}"#;
        assert!(matches!(ProviderKind::ViaCep.decode(body), Ok(Address::ViaCep(_))));
        assert!(matches!(ProviderKind::OpenCep.decode(body), Ok(Address::OpenCep(_))));
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let client = reqwest::Client::builder().no_proxy().build().unwrap();
        let base_url = format!("http://127.0.0.1:{}", port);
        let source = HttpSource::new("local", ProviderKind::OpenCep, base_url, client);

        let err = source
            .fetch(&LookupKey::new("22735140"), Duration::from_secs(2))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Network(_)), "got {err:?}");
    }
}
