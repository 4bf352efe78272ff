// PS3MAPI client library for webMAN MOD consoles
//
// Implements the web command interface exposed by webMAN MOD:
// - Session management (host, attached process)
// - Power control and notifications
// - LED and buzzer control
// - IDPS/PSID spoofing
// - Process attachment and memory read/write
//
// Every operation is a single blocking HTTP GET.

pub mod connection;
pub mod protocol;
pub mod commands;
pub mod types;
pub mod reader;
pub mod session;
pub mod validate;
pub mod system;
pub mod process;
pub mod memory;

pub use connection::{ClientConfig, HttpTransport, Ps3Mapi, Transport};
pub use protocol::{ErrorKind, MapiError, MapiResult, Request};
pub use session::Session;
pub use types::{BuzzerMode, LightColor, LightMode, ProcessEntry, ProcessId};
pub use validate::is_hex_string;
/// Base URL type in the `Transport::get` signature, re-exported for implementors
pub use url::Url;
