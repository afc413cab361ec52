//! API-root discovery.
//!
//! A WordPress site advertises its REST root in a `Link` header:
//!
//! ```text
//! Link: <https://example.org/wp-json/>; rel="https://api.w.org/"
//! ```
//!
//! Discovery issues a HEAD against the human-facing site URL and reads that
//! relation. Sites may send several `Link` headers, or several links in one
//! header, so every value is scanned.

use tracing::{debug, info};

use crate::config::ClientConfig;
use crate::error::WpError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};

/// Link relation naming the REST API root.
pub const API_REL: &str = "https://api.w.org/";

/// One `<uri>; rel=...` entry of a `Link` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub uri: String,
    pub rels: Vec<String>,
}

/// Parse a single `Link` header value into its entries.
///
/// Entries without a `<uri>` part are skipped.
pub fn parse_link_header(value: &str) -> Vec<Link> {
    split_outside(value, ',')
        .into_iter()
        .filter_map(parse_link)
        .collect()
}

/// The target of the first link in `response` carrying relation `rel`.
pub fn find_link(response: &HttpResponse, rel: &str) -> Option<String> {
    response
        .header_values("link")
        .flat_map(parse_link_header)
        .find(|link| link.rels.iter().any(|r| r == rel))
        .map(|link| link.uri)
}

/// HEAD `site_url` and return the advertised API root.
pub(crate) fn discover(
    transport: &dyn Transport,
    config: &ClientConfig,
    site_url: &str,
) -> Result<String, WpError> {
    let mut request = HttpRequest::new(HttpMethod::Head, site_url);
    request.headers = config.headers();
    debug!(url = site_url, "discovering API root");

    let response = transport.execute(&request)?;
    match find_link(&response, API_REL) {
        Some(root) => {
            info!(site = site_url, api_root = %root, "discovered API root");
            Ok(root)
        }
        None => Err(WpError::Discovery {
            url: site_url.to_string(),
            reason: format!(
                "HEAD returned {} without a rel=\"{API_REL}\" link",
                response.status
            ),
        }),
    }
}

fn parse_link(entry: &str) -> Option<Link> {
    let entry = entry.trim();
    let rest = entry.strip_prefix('<')?;
    let end = rest.find('>')?;
    let uri = rest[..end].trim().to_string();

    let mut rels = Vec::new();
    for param in split_outside(&rest[end + 1..], ';') {
        let Some((key, value)) = param.split_once('=') else {
            continue;
        };
        if key.trim().eq_ignore_ascii_case("rel") {
            let value = value.trim().trim_matches('"');
            rels.extend(value.split_whitespace().map(str::to_string));
        }
    }
    Some(Link { uri, rels })
}

/// Split on `sep`, ignoring separators inside `<...>` or double quotes.
fn split_outside(value: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut in_angle = false;
    let mut in_quote = false;
    let mut start = 0;
    for (i, c) in value.char_indices() {
        match c {
            '<' if !in_quote => in_angle = true,
            '>' if !in_quote => in_angle = false,
            '"' if !in_angle => in_quote = !in_quote,
            c if c == sep && !in_angle && !in_quote => {
                parts.push(&value[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&value[start..]);
    parts.into_iter().filter(|p| !p.trim().is_empty()).collect()
}
