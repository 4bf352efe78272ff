// Process memory access
//
// Reads and writes go to the process bound in the session. Addresses and
// values are bare hex strings (no 0x prefix).

use crate::connection::{Ps3Mapi, Transport};
use crate::protocol::{MapiResult, Request};
use crate::reader::parse_memory_output;
use crate::session::Session;
use crate::validate::{require_hex, validate_read_length};
use tracing::{debug, warn};

impl<T: Transport> Ps3Mapi<T> {
    /// Write `value` at `address` in the attached process
    pub fn set_memory(&self, session: &Session, address: &str, value: &str) -> MapiResult<()> {
        require_hex("address and value", &format!("{}{}", address, value))?;
        warn_if_unbound(session);

        self.send(
            session,
            &Request::SetMemory {
                process_id: session.process_id(),
                address,
                value,
            },
        )?;
        debug!("Wrote {} at {} in process {}", value, address, session.process_id());
        Ok(())
    }

    /// Read `length` bytes at `address` in the attached process, as hex text
    pub fn get_memory(&self, session: &Session, address: &str, length: u32) -> MapiResult<String> {
        require_hex("address", address)?;
        validate_read_length(length)?;
        warn_if_unbound(session);

        let html = self.send(
            session,
            &Request::GetMemory {
                process_id: session.process_id(),
                address,
                length,
            },
        )?;

        let value = parse_memory_output(&html)?;
        debug!("Read {} byte(s) at {}: {}", length, address, value);
        Ok(value)
    }
}

// The service is still asked; it decides what an unbound id means
fn warn_if_unbound(session: &Session) {
    if !session.is_attached() {
        warn!("No process attached, sending proc={}", session.process_id());
    }
}
