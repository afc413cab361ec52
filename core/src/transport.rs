//! Blocking `Transport` backed by a ureq agent.

use tracing::debug;
use ureq::tls::TlsConfig;
use ureq::{Agent, RequestBuilder};

use crate::config::ClientConfig;
use crate::error::WpError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};

/// Executes requests with ureq.
///
/// ureq's automatic status-code-as-error behavior is disabled so 4xx/5xx
/// responses come back as data and the client decides what they mean.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    pub fn new(config: &ClientConfig) -> Self {
        let tls = TlsConfig::builder()
            .disable_verification(!config.verify_tls)
            .build();
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .tls_config(tls)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(&ClientConfig::default())
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, WpError> {
        let url = request.url.as_str();
        let result = match request.method {
            HttpMethod::Head => with_parts(self.agent.head(url), request).call(),
            HttpMethod::Get => with_parts(self.agent.get(url), request).call(),
            HttpMethod::Delete => with_parts(self.agent.delete(url), request).call(),
            HttpMethod::Post => {
                let builder = with_parts(self.agent.post(url), request);
                match &request.body {
                    Some(body) => builder.send(body.as_bytes()),
                    None => builder.send_empty(),
                }
            }
        };
        let mut response = result.map_err(|e| WpError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = match request.method {
            HttpMethod::Head => String::new(),
            _ => response
                .body_mut()
                .read_to_string()
                .map_err(|e| WpError::Transport(e.to_string()))?,
        };
        debug!(status, url, "response received");

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

fn with_parts<B>(builder: RequestBuilder<B>, request: &HttpRequest) -> RequestBuilder<B> {
    let builder = request
        .query
        .iter()
        .fold(builder, |b, (key, value)| b.query(key, value));
    request
        .headers
        .iter()
        .fold(builder, |b, (key, value)| b.header(key.as_str(), value.as_str()))
}
