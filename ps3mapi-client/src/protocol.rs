// PS3MAPI protocol definitions and request encoding
//
// Every command is a single HTTP GET with query parameters and no body.
// Integer parameters travel as decimal text.

use crate::commands::{params, paths};
use crate::types::{BuzzerMode, LightColor, LightMode, ProcessId};
use thiserror::Error;

pub type MapiResult<T> = Result<T, MapiError>;

#[derive(Debug, Error)]
pub enum MapiError {
    #[error("Invalid host: {0}")]
    InvalidHost(String),

    #[error("Not connected: no host set")]
    NotConnected,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{path} returned status {status}")]
    Status { path: String, status: u16 },

    #[error("Empty response from {0}")]
    EmptyResponse(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Coarse failure category, for callers that branch on the cause
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No usable host in the session
    Session,
    /// Arguments rejected before anything was sent
    Validation,
    /// Connection failure, bad status, or empty body
    Transport,
    /// Response body lacked the expected structure
    Parse,
}

impl MapiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            MapiError::InvalidHost(_) | MapiError::NotConnected => ErrorKind::Session,
            MapiError::Validation(_) => ErrorKind::Validation,
            MapiError::Http(_) | MapiError::Status { .. } | MapiError::EmptyResponse(_) => {
                ErrorKind::Transport
            }
            MapiError::Parse(_) => ErrorKind::Parse,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request<'a> {
    Home,
    Shutdown,
    Reboot,
    Notify {
        message: &'a str,
    },
    SetLights {
        color: LightColor,
        mode: LightMode,
    },
    RingBuzzer {
        mode: BuzzerMode,
    },
    SetIdentity {
        idps1: &'a str,
        idps2: &'a str,
        psid1: &'a str,
        psid2: &'a str,
    },
    SetMemory {
        process_id: ProcessId,
        address: &'a str,
        value: &'a str,
    },
    GetMemory {
        process_id: ProcessId,
        address: &'a str,
        length: u32,
    },
}

impl Request<'_> {
    pub fn path(&self) -> &'static str {
        match self {
            Request::Home => paths::HOME,
            Request::Shutdown => paths::SHUTDOWN,
            Request::Reboot => paths::REBOOT,
            Request::Notify { .. } => paths::NOTIFY,
            Request::SetLights { .. } => paths::LED,
            Request::RingBuzzer { .. } => paths::BUZZER,
            Request::SetIdentity { .. } => paths::SET_ID,
            Request::SetMemory { .. } => paths::SET_MEMORY,
            Request::GetMemory { .. } => paths::GET_MEMORY,
        }
    }

    /// Query parameters in wire order
    pub fn query(&self) -> Vec<(&'static str, String)> {
        match *self {
            Request::Home | Request::Shutdown | Request::Reboot => Vec::new(),
            Request::Notify { message } => vec![(params::MESSAGE, message.to_string())],
            Request::SetLights { color, mode } => vec![
                (params::COLOR, color.code().to_string()),
                (params::MODE, mode.code().to_string()),
            ],
            Request::RingBuzzer { mode } => vec![(params::MODE, mode.code().to_string())],
            Request::SetIdentity { idps1, idps2, psid1, psid2 } => vec![
                (params::IDPS1, idps1.to_string()),
                (params::IDPS2, idps2.to_string()),
                (params::PSID1, psid1.to_string()),
                (params::PSID2, psid2.to_string()),
            ],
            Request::SetMemory { process_id, address, value } => vec![
                (params::PROCESS, process_id.to_string()),
                (params::ADDRESS, address.to_string()),
                (params::VALUE, value.to_string()),
            ],
            Request::GetMemory { process_id, address, length } => vec![
                (params::PROCESS, process_id.to_string()),
                (params::ADDRESS, address.to_string()),
                (params::LENGTH, length.to_string()),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(request: &Request) -> Vec<&'static str> {
        request.query().into_iter().map(|(k, _)| k).collect()
    }

    #[test]
    fn test_bare_requests() {
        assert_eq!(Request::Home.path(), "home.ps3mapi");
        assert_eq!(Request::Shutdown.path(), "shutdown.ps3");
        assert_eq!(Request::Reboot.path(), "reboot.ps3");

        assert!(Request::Home.query().is_empty());
        assert!(Request::Shutdown.query().is_empty());
        assert!(Request::Reboot.query().is_empty());
    }

    #[test]
    fn test_lights_encoding() {
        let request = Request::SetLights {
            color: LightColor::Yellow,
            mode: LightMode::BlinkSlow,
        };

        assert_eq!(request.path(), "led.ps3mapi");
        assert_eq!(
            request.query(),
            vec![("color", "2".to_string()), ("mode", "3".to_string())]
        );
    }

    #[test]
    fn test_identity_param_order() {
        let request = Request::SetIdentity {
            idps1: "a",
            idps2: "b",
            psid1: "c",
            psid2: "d",
        };

        assert_eq!(request.path(), "setidps.ps3mapi");
        assert_eq!(keys(&request), vec!["idps1", "idps2", "psid1", "psid2"]);
    }

    #[test]
    fn test_memory_encoding() {
        // Unbound process id still goes out as decimal text
        let request = Request::SetMemory {
            process_id: -1,
            address: "10050000",
            value: "FF",
        };
        assert_eq!(request.path(), "setmem.ps3mapi");
        assert_eq!(
            request.query(),
            vec![
                ("proc", "-1".to_string()),
                ("addr", "10050000".to_string()),
                ("val", "FF".to_string()),
            ]
        );

        let request = Request::GetMemory {
            process_id: 16842752,
            address: "1A2B",
            length: 5,
        };
        assert_eq!(request.path(), "getmem.ps3mapi");
        assert_eq!(keys(&request), vec!["proc", "addr", "len"]);
        assert_eq!(request.query()[0].1, "16842752");
        assert_eq!(request.query()[2].1, "5");
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(MapiError::NotConnected.kind(), ErrorKind::Session);
        assert_eq!(MapiError::Validation("x".into()).kind(), ErrorKind::Validation);
        assert_eq!(MapiError::EmptyResponse("x".into()).kind(), ErrorKind::Transport);
        assert_eq!(
            MapiError::Status { path: "x".into(), status: 404 }.kind(),
            ErrorKind::Transport
        );
        assert_eq!(MapiError::Parse("x".into()).kind(), ErrorKind::Parse);
    }
}
