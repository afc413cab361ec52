//! Client configuration.

/// Identifying `User-Agent` sent with every request: name/version +homepage.
pub const DEFAULT_USER_AGENT: &str = concat!(
    env!("CARGO_PKG_NAME"),
    "/",
    env!("CARGO_PKG_VERSION"),
    " +",
    env!("CARGO_PKG_HOMEPAGE"),
);

/// Settings shared by a `WordPress` client and its default transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Value of the `User-Agent` header attached to every request.
    pub user_agent: String,
    /// Verify the site's TLS certificate. Only consulted by `UreqTransport`.
    pub verify_tls: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            verify_tls: true,
        }
    }
}

impl ClientConfig {
    pub(crate) fn headers(&self) -> Vec<(String, String)> {
        vec![("user-agent".to_string(), self.user_agent.clone())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_user_agent_names_library_version_and_homepage() {
        let config = ClientConfig::default();
        assert!(config.user_agent.starts_with("wp-core/"));
        assert!(config.user_agent.contains(env!("CARGO_PKG_VERSION")));
        assert!(config.user_agent.contains(" +https://"));
        assert!(config.verify_tls);
    }
}
