// PS3MAPI connection management
//
// Owns the HTTP transport and turns typed requests into GET round trips.
// Session state stays with the caller and is passed into every call.

use crate::protocol::{MapiError, MapiResult, Request};
use crate::session::Session;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Blocking "GET path with query, give me the body" capability
pub trait Transport {
    fn get(&self, base_url: &Url, path: &str, query: &[(&'static str, String)]) -> MapiResult<String>;
}

/// Settings for the HTTP transport
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Whole-request timeout; `None` waits forever
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Some(Duration::from_secs(10)),
            user_agent: format!("ps3mapi-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// `Transport` over a blocking reqwest client
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> MapiResult<Self> {
        let mut builder = reqwest::blocking::Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }
}

impl Transport for HttpTransport {
    fn get(&self, base_url: &Url, path: &str, query: &[(&'static str, String)]) -> MapiResult<String> {
        let url = base_url
            .join(path)
            .map_err(|e| MapiError::InvalidHost(format!("{}{}: {}", base_url, path, e)))?;

        let response = self.client.get(url).query(query).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(MapiError::Status {
                path: path.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.text()?)
    }
}

#[derive(Debug)]
pub struct Ps3Mapi<T = HttpTransport> {
    transport: T,
}

impl Ps3Mapi<HttpTransport> {
    /// Client over HTTP with the given settings
    pub fn http(config: &ClientConfig) -> MapiResult<Self> {
        Ok(Self::new(HttpTransport::new(config)?))
    }
}

impl<T: Transport> Ps3Mapi<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send one request and return its body.
    ///
    /// An empty body counts as failure.
    pub fn send(&self, session: &Session, request: &Request<'_>) -> MapiResult<String> {
        let base_url = session.base_url().ok_or(MapiError::NotConnected)?;
        let path = request.path();

        debug!("GET {}{}", base_url, path);
        let body = self
            .transport
            .get(base_url, path, &request.query())
            .map_err(|e| {
                warn!("Request to {} failed: {}", path, e);
                e
            })?;

        if body.is_empty() {
            warn!("Empty response from {}", path);
            return Err(MapiError::EmptyResponse(path.to_string()));
        }

        Ok(body)
    }
}


#[cfg(test)]
mod tests {
    use super::mock::*;
    use super::*;
    use crate::protocol::ErrorKind;

    #[test]
    fn test_send_builds_url() {
        let client = client(&["ok"]);
        let body = client.send(&session(), &Request::Reboot).unwrap();

        assert_eq!(body, "ok");
        let calls = client.transport().calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].url, "http://192.168.1.50/reboot.ps3");
        assert!(calls[0].query.is_empty());
    }

    #[test]
    fn test_send_without_host() {
        let client = client(&[]);
        let err = client.send(&Session::new(), &Request::Home).unwrap_err();

        assert!(matches!(err, MapiError::NotConnected));
        assert_eq!(err.kind(), ErrorKind::Session);
        assert!(client.transport().calls().is_empty());
    }

    #[test]
    fn test_empty_body_is_failure() {
        let client = client(&[""]);
        let err = client.send(&session(), &Request::Home).unwrap_err();

        assert!(matches!(err, MapiError::EmptyResponse(_)));
        assert_eq!(err.kind(), ErrorKind::Transport);
    }

    #[test]
    fn test_status_error_passes_through() {
        let client = client(&[]);
        client.transport().push(None);

        let err = client.send(&session(), &Request::Home).unwrap_err();
        assert!(matches!(err, MapiError::Status { status: 500, .. }));
    }

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout, Some(Duration::from_secs(10)));
        assert!(config.user_agent.starts_with("ps3mapi-client/"));
    }
}
