//! HTTP transport types.
//!
//! # Design
//! Requests and responses are plain data. `WordPress` builds `HttpRequest`
//! values and interprets `HttpResponse` values; the round-trip itself is
//! delegated to a `Transport`. Swapping the transport (the ureq agent in
//! production, a recording stub in tests) never changes request building.
//!
//! All fields use owned types (`String`, `Vec`) so requests can be recorded
//! and compared without lifetime concerns.

use crate::error::WpError;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Head,
    Get,
    Post,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Head => "HEAD",
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// An HTTP request described as plain data.
///
/// `url` is absolute; `query` pairs are appended by the transport, so values
/// are stored unencoded.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Value of the first query pair named `key`.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    /// All values of the header `name`, compared case-insensitively.
    pub fn header_values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.headers
            .iter()
            .filter(move |(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Executes a request and returns whatever the server answered.
///
/// Implementations must return non-success statuses as `Ok` responses;
/// status interpretation belongs to the client. `Err` is reserved for
/// failures where no response exists (DNS, connection, TLS, I/O).
pub trait Transport: Send + Sync {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, WpError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_values_ignore_case() {
        let response = HttpResponse {
            status: 200,
            headers: vec![
                ("Link".to_string(), "<a>; rel=\"one\"".to_string()),
                ("content-type".to_string(), "text/html".to_string()),
                ("link".to_string(), "<b>; rel=\"two\"".to_string()),
            ],
            body: String::new(),
        };
        let links: Vec<&str> = response.header_values("LINK").collect();
        assert_eq!(links, vec!["<a>; rel=\"one\"", "<b>; rel=\"two\""]);
    }

    #[test]
    fn query_value_finds_first_pair() {
        let mut req = HttpRequest::new(HttpMethod::Get, "http://localhost/posts");
        req.query.push(("page".to_string(), "2".to_string()));
        assert_eq!(req.query_value("page"), Some("2"));
        assert_eq!(req.query_value("per_page"), None);
    }
}
