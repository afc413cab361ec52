//! The `WordPress` client and its request primitives.
//!
//! # Design
//! `WordPress` is a cheap `Clone` around an `Arc` holding the API root, the
//! configuration and the transport; nothing in it changes after
//! construction. Every operation builds an `HttpRequest` under
//! `<root>/wp/v2/<endpoint>`, hands it to the transport, checks the status
//! and decodes the JSON body. Resource operations live in `crate::api`.
//!
//! Models keep a `ClientHandle`, a `Weak` reference to the same `Arc`, so a
//! parsed post never keeps its client alive.

use std::fmt;
use std::sync::{Arc, Weak};

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::discovery;
use crate::error::WpError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};
use crate::transport::UreqTransport;

/// Version segment of the core REST namespace.
pub const API_VERSION: &str = "v2";

/// Blocking client for one WordPress site.
#[derive(Clone)]
pub struct WordPress {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    api_root: String,
    config: ClientConfig,
    transport: Box<dyn Transport>,
}

impl WordPress {
    /// Discover the API root of `site_url` and build a client with the
    /// default configuration and `UreqTransport`.
    pub fn discover(site_url: &str) -> Result<Self, WpError> {
        let config = ClientConfig::default();
        let transport = UreqTransport::new(&config);
        Self::discover_with(site_url, config, transport)
    }

    /// Discover the API root of `site_url` through `transport`.
    ///
    /// Fails with `WpError::Discovery` when the site's HEAD response carries
    /// no `rel="https://api.w.org/"` link.
    pub fn discover_with(
        site_url: &str,
        config: ClientConfig,
        transport: impl Transport + 'static,
    ) -> Result<Self, WpError> {
        let api_root = discovery::discover(&transport, &config, site_url)?;
        Ok(Self::with_api_root(&api_root, config, transport))
    }

    /// Build a client for an already known API root such as
    /// `https://example.org/wp-json/`.
    pub fn with_api_root(
        api_root: &str,
        config: ClientConfig,
        transport: impl Transport + 'static,
    ) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                api_root: api_root.trim_end_matches('/').to_string(),
                config,
                transport: Box::new(transport),
            }),
        }
    }

    pub fn api_root(&self) -> &str {
        &self.inner.api_root
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Absolute URL of `endpoint` under the `wp/v2` namespace.
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!(
            "{}/wp/{API_VERSION}/{}",
            self.inner.api_root,
            endpoint.trim_start_matches('/')
        )
    }

    /// GET `endpoint`; the response must be 200.
    pub fn get(&self, endpoint: &str, query: Vec<(String, String)>) -> Result<Value, WpError> {
        let request = self.build(HttpMethod::Get, endpoint, query, None);
        self.send(request, &[200])
    }

    /// POST `data` as JSON to `endpoint`; the response must be 200 or 201.
    pub fn post<T: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        data: &T,
        query: Vec<(String, String)>,
    ) -> Result<Value, WpError> {
        let body =
            serde_json::to_string(data).map_err(|e| WpError::Serialization(e.to_string()))?;
        let request = self.build(HttpMethod::Post, endpoint, query, Some(body));
        self.send(request, &[200, 201])
    }

    /// DELETE `endpoint`; the response must be 200.
    pub fn delete(&self, endpoint: &str, query: Vec<(String, String)>) -> Result<Value, WpError> {
        let request = self.build(HttpMethod::Delete, endpoint, query, None);
        self.send(request, &[200])
    }

    pub(crate) fn handle(&self) -> ClientHandle {
        ClientHandle(Some(Arc::downgrade(&self.inner)))
    }

    fn build(
        &self,
        method: HttpMethod,
        endpoint: &str,
        query: Vec<(String, String)>,
        body: Option<String>,
    ) -> HttpRequest {
        let mut headers = self.inner.config.headers();
        if body.is_some() {
            headers.push(("content-type".to_string(), "application/json".to_string()));
        }
        HttpRequest {
            method,
            url: self.endpoint_url(endpoint),
            query,
            headers,
            body,
        }
    }

    fn send(&self, request: HttpRequest, expected: &[u16]) -> Result<Value, WpError> {
        debug!(
            method = request.method.as_str(),
            url = %request.url,
            params = request.query.len(),
            "sending request"
        );
        let response = self.inner.transport.execute(&request)?;
        check_status(&request, &response, expected)?;
        serde_json::from_str(&response.body).map_err(|e| WpError::Deserialization(e.to_string()))
    }
}

impl fmt::Debug for WordPress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WordPress")
            .field("api_root", &self.inner.api_root)
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

/// Map unexpected status codes to the appropriate `WpError` variant.
fn check_status(
    request: &HttpRequest,
    response: &HttpResponse,
    expected: &[u16],
) -> Result<(), WpError> {
    if expected.contains(&response.status) {
        return Ok(());
    }
    warn!(
        method = request.method.as_str(),
        url = %request.url,
        status = response.status,
        "unexpected status"
    );
    if response.status == 404 {
        return Err(WpError::NotFound {
            url: request.url.clone(),
            body: response.body.clone(),
        });
    }
    Err(WpError::Http {
        status: response.status,
        body: response.body.clone(),
    })
}

/// Weak back-reference from a model to the client that parsed it.
#[derive(Clone, Default)]
pub struct ClientHandle(Option<Weak<ClientInner>>);

impl ClientHandle {
    pub(crate) fn from_client(client: Option<&WordPress>) -> Self {
        client.map(WordPress::handle).unwrap_or_default()
    }

    /// The client, if the model had one and it is still alive.
    pub fn client(&self) -> Result<WordPress, WpError> {
        self.0
            .as_ref()
            .and_then(Weak::upgrade)
            .map(|inner| WordPress { inner })
            .ok_or(WpError::DetachedModel)
    }

    pub fn is_attached(&self) -> bool {
        self.0.as_ref().is_some_and(|weak| weak.strong_count() > 0)
    }
}

impl fmt::Debug for ClientHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_attached() {
            f.write_str("ClientHandle(attached)")
        } else {
            f.write_str("ClientHandle(detached)")
        }
    }
}
