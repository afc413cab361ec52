//! In-memory transport for unit tests.

use std::sync::{Arc, Mutex};

use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::WpError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};
use crate::WordPress;

pub(crate) const API_ROOT: &str = "http://example.org/wp-json/";

/// Records every request and answers from canned responses keyed by
/// endpoint (the part after `wp/v2/`). Unknown endpoints answer 404.
#[derive(Clone, Default)]
pub(crate) struct RecordingTransport {
    state: Arc<Mutex<State>>,
}

#[derive(Default)]
struct State {
    requests: Vec<HttpRequest>,
    routes: Vec<(String, u16, String)>,
    head_links: Vec<String>,
}

impl RecordingTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(&self, endpoint: &str, status: u16, body: Value) -> &Self {
        self.respond_raw(endpoint, status, &body.to_string())
    }

    pub(crate) fn respond_raw(&self, endpoint: &str, status: u16, body: &str) -> &Self {
        let mut state = self.state.lock().unwrap();
        state
            .routes
            .push((format!("/wp/v2/{endpoint}"), status, body.to_string()));
        self
    }

    /// `Link` header values returned for HEAD requests.
    pub(crate) fn head_links(&self, links: &[&str]) {
        let mut state = self.state.lock().unwrap();
        state.head_links = links.iter().map(|l| l.to_string()).collect();
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.state.lock().unwrap().requests.clone()
    }
}

impl Transport for RecordingTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, WpError> {
        let mut state = self.state.lock().unwrap();
        state.requests.push(request.clone());

        if request.method == HttpMethod::Head {
            return Ok(HttpResponse {
                status: 200,
                headers: state
                    .head_links
                    .iter()
                    .map(|l| ("link".to_string(), l.clone()))
                    .collect(),
                body: String::new(),
            });
        }

        let route = state
            .routes
            .iter()
            .find(|(suffix, _, _)| request.url.ends_with(suffix.as_str()));
        Ok(match route {
            Some((_, status, body)) => HttpResponse {
                status: *status,
                headers: Vec::new(),
                body: body.clone(),
            },
            None => HttpResponse {
                status: 404,
                headers: Vec::new(),
                body: r#"{"code":"rest_no_route","message":"No route was found"}"#.to_string(),
            },
        })
    }
}

pub(crate) fn attached_client(transport: &RecordingTransport) -> WordPress {
    WordPress::with_api_root(API_ROOT, ClientConfig::default(), transport.clone())
}
