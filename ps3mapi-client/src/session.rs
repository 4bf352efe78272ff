// Client-side session state
//
// Tracks which console the client talks to and which process on it is attached.
// The session is owned by the caller and handed to every operation.

use crate::protocol::{MapiError, MapiResult};
use crate::types::{ProcessId, UNBOUND_PROCESS};
use tracing::debug;
use url::Url;

#[derive(Debug, Clone)]
pub struct Session {
    host: String,
    base_url: Option<Url>,
    process_id: ProcessId,
}

impl Session {
    /// A disconnected session with no process attached
    pub fn new() -> Self {
        Self {
            host: String::new(),
            base_url: None,
            process_id: UNBOUND_PROCESS,
        }
    }

    /// Convenience for `new()` followed by `set_host()`
    pub fn with_host(host: &str) -> MapiResult<Self> {
        let mut session = Self::new();
        session.set_host(host)?;
        Ok(session)
    }

    /// Point the session at a console.
    ///
    /// The attached process id is kept. On error the session is unchanged.
    pub fn set_host(&mut self, host: &str) -> MapiResult<()> {
        if host.is_empty() {
            return Err(MapiError::InvalidHost("host is empty".to_string()));
        }

        let base_url = Url::parse(&format!("http://{}/", host))
            .map_err(|e| MapiError::InvalidHost(format!("{}: {}", host, e)))?;

        // Reject anything that smuggles a path, query or fragment past the host
        if base_url.host_str().is_none()
            || base_url.path() != "/"
            || base_url.query().is_some()
            || base_url.fragment().is_some()
        {
            return Err(MapiError::InvalidHost(host.to_string()));
        }

        debug!("Session host set to {}", base_url);
        self.host = host.to_string();
        self.base_url = Some(base_url);
        Ok(())
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn base_url(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }

    pub fn is_connected(&self) -> bool {
        self.base_url.is_some()
    }

    pub fn process_id(&self) -> ProcessId {
        self.process_id
    }

    pub fn is_attached(&self) -> bool {
        self.process_id != UNBOUND_PROCESS
    }

    /// Manually bind a process id. Nothing checks that it is live.
    pub fn set_process_id(&mut self, process_id: ProcessId) {
        self.process_id = process_id;
    }

    /// Forget host and process. Safe to call repeatedly.
    pub fn disconnect(&mut self) {
        self.host.clear();
        self.base_url = None;
        self.process_id = UNBOUND_PROCESS;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
