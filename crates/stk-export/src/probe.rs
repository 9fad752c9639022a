//! # HTTP Connectivity Probe
//!
//! Fetches one URL. Any HTTP response, whatever its status, counts as
//! online; only transport failures and timeouts count as offline.

use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use crate::config::ExportConfig;
use crate::error::ProbeError;
use crate::gate::ConnectivityProbe;

/// [`ConnectivityProbe`] backed by a reqwest client.
#[derive(Debug, Clone)]
pub struct HttpProbe {
    client: reqwest::Client,
    url: Url,
    timeout_secs: u64,
}

impl HttpProbe {
    pub fn new(url: Url, timeout_secs: u64) -> Result<Self, ProbeError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ProbeError::Unreachable(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            url,
            timeout_secs,
        })
    }

    pub fn from_config(config: &ExportConfig) -> Result<Self, ProbeError> {
        Self::new(config.probe_url.clone(), config.probe_timeout_secs)
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl ConnectivityProbe for HttpProbe {
    async fn probe(&self) -> Result<(), ProbeError> {
        let resp = self
            .client
            .get(self.url.clone())
            .header(reqwest::header::CACHE_CONTROL, "no-store")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProbeError::Timeout(self.timeout_secs)
                } else {
                    ProbeError::Unreachable(e.to_string())
                }
            })?;
        tracing::debug!(url = %self.url, status = %resp.status(), "connectivity probe answered");
        Ok(())
    }

    fn name(&self) -> &str {
        "HttpProbe"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn probe_for(server: &MockServer, timeout_secs: u64) -> HttpProbe {
        let url = Url::parse(&format!("{}/favicon.ico", server.uri())).unwrap();
        HttpProbe::new(url, timeout_secs).unwrap()
    }

    #[tokio::test]
    async fn any_response_is_online() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/favicon.ico"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        probe_for(&server, 5).probe().await.unwrap();
    }

    #[tokio::test]
    async fn slow_server_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
            .mount(&server)
            .await;

        let err = probe_for(&server, 1).probe().await.unwrap_err();
        assert!(matches!(err, ProbeError::Timeout(1)));
    }

    #[tokio::test]
    async fn closed_port_is_unreachable() {
        let url = Url::parse("http://127.0.0.1:9/favicon.ico").unwrap();
        let err = HttpProbe::new(url, 2).unwrap().probe().await.unwrap_err();
        assert!(matches!(
            err,
            ProbeError::Unreachable(_) | ProbeError::Timeout(_)
        ));
    }
}
