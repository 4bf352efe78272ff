// Process discovery and attachment
//
// The home page lists running processes in a selection widget. Attaching
// means picking the EBOOT entry and remembering its id in the session.

use crate::connection::{Ps3Mapi, Transport};
use crate::protocol::{MapiResult, Request};
use crate::reader::{find_eboot_process, parse_process_list};
use crate::session::Session;
use crate::types::{ProcessEntry, ProcessId};
use tracing::info;

impl<T: Transport> Ps3Mapi<T> {
    /// Find the running EBOOT process and bind it to the session.
    ///
    /// The session is only touched when a process is found.
    pub fn attach(&self, session: &mut Session) -> MapiResult<ProcessId> {
        let html = self.send(session, &Request::Home)?;
        let process_id = find_eboot_process(&html)?;

        session.set_process_id(process_id);
        info!("Attached to process {} on {}", process_id, session.host());
        Ok(process_id)
    }

    /// All processes the console reports, without attaching
    pub fn list_processes(&self, session: &Session) -> MapiResult<Vec<ProcessEntry>> {
        let html = self.send(session, &Request::Home)?;
        parse_process_list(&html)
    }
}
