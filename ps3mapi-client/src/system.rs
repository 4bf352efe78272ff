// System command implementations
//
// Power, notification, LED, buzzer and identity commands. None of these
// parse the response; a non-empty body means the console accepted it.

use crate::commands::CONNECT_BANNER;
use crate::connection::{Ps3Mapi, Transport};
use crate::protocol::{MapiResult, Request};
use crate::session::Session;
use crate::types::{BuzzerMode, LightColor, LightMode};
use crate::validate::validate_identity;
use tracing::info;

impl<T: Transport> Ps3Mapi<T> {
    /// Check the console answers by showing a banner notification
    pub fn connect(&self, session: &Session) -> MapiResult<()> {
        info!("Connecting to PS3MAPI at {}", session.host());
        self.notify(session, CONNECT_BANNER)?;
        info!("Connected to {}", session.host());
        Ok(())
    }

    /// Power off the console. Clears the session on success.
    pub fn shutdown(&self, session: &mut Session) -> MapiResult<()> {
        self.send(session, &Request::Shutdown)?;
        info!("Shutdown accepted by {}", session.host());
        session.disconnect();
        Ok(())
    }

    /// Hard reboot the console. Clears the session on success.
    pub fn reboot(&self, session: &mut Session) -> MapiResult<()> {
        self.send(session, &Request::Reboot)?;
        info!("Reboot accepted by {}", session.host());
        session.disconnect();
        Ok(())
    }

    pub fn notify(&self, session: &Session, message: &str) -> MapiResult<()> {
        self.send(session, &Request::Notify { message })?;
        Ok(())
    }

    pub fn set_lights(&self, session: &Session, color: LightColor, mode: LightMode) -> MapiResult<()> {
        self.send(session, &Request::SetLights { color, mode })?;
        Ok(())
    }

    pub fn ring_buzzer(&self, session: &Session, mode: BuzzerMode) -> MapiResult<()> {
        self.send(session, &Request::RingBuzzer { mode })?;
        Ok(())
    }

    /// Set IDPS and PSID, each given as two 16-character hex halves
    pub fn set_identity(
        &self,
        session: &Session,
        idps1: &str,
        idps2: &str,
        psid1: &str,
        psid2: &str,
    ) -> MapiResult<()> {
        validate_identity(idps1, idps2, psid1, psid2)?;

        self.send(
            session,
            &Request::SetIdentity {
                idps1,
                idps2,
                psid1,
                psid2,
            },
        )?;
        info!("IDPS/PSID updated on {}", session.host());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::connection::mock::*;
    use crate::protocol::{ErrorKind, MapiError};
    use crate::session::Session;
    use crate::types::*;

    const IDPS1: &str = "0000000100850009";
    const IDPS2: &str = "1405a1b2c3d4e5f6";
    const PSID1: &str = "FEDCBA9876543210";
    const PSID2: &str = "0123456789abcdef";

    #[test]
    fn test_connect_sends_banner() {
        let client = client(&["<html>ok</html>"]);
        client.connect(&session()).unwrap();

        let calls = client.transport().calls();
        assert_eq!(calls[0].url, "http://192.168.1.50/notify.ps3mapi");
        assert_eq!(calls[0].query, vec![("msg", "PS3MAPI Device Connected".to_string())]);
    }

    #[test]
    fn test_connect_without_host() {
        let client = client(&[]);
        let err = client.connect(&Session::new()).unwrap_err();
        assert!(matches!(err, MapiError::NotConnected));
    }

    #[test]
    fn test_shutdown_clears_session() {
        let client = client(&["bye"]);
        let mut session = session();
        session.set_process_id(1002);

        client.shutdown(&mut session).unwrap();
        assert_eq!(session.host(), "");
        assert_eq!(session.process_id(), -1);
        assert_eq!(client.transport().calls()[0].url, "http://192.168.1.50/shutdown.ps3");
    }

    #[test]
    fn test_reboot_empty_body_keeps_session() {
        let client = client(&[""]);
        let mut session = session();
        session.set_process_id(1002);

        let err = client.reboot(&mut session).unwrap_err();
        assert!(matches!(err, MapiError::EmptyResponse(_)));
        assert_eq!(session.host(), "192.168.1.50");
        assert_eq!(session.process_id(), 1002);
    }

    #[test]
    fn test_reboot_clears_session() {
        let client = client(&["rebooting"]);
        let mut session = session();

        client.reboot(&mut session).unwrap();
        assert!(!session.is_connected());
        assert_eq!(client.transport().calls()[0].url, "http://192.168.1.50/reboot.ps3");
    }

    #[test]
    fn test_shutdown_failure_keeps_session() {
        let client = client(&[]);
        client.transport().push(None);
        let mut session = session();

        assert!(client.shutdown(&mut session).is_err());
        assert!(session.is_connected());
    }

    #[test]
    fn test_lights_and_buzzer() {
        let client = client(&["ok", "ok"]);
        let session = session();

        client.set_lights(&session, LightColor::Green, LightMode::BlinkFast).unwrap();
        client.ring_buzzer(&session, BuzzerMode::Triple).unwrap();

        let calls = client.transport().calls();
        assert_eq!(calls[0].url, "http://192.168.1.50/led.ps3mapi");
        assert_eq!(
            calls[0].query,
            vec![("color", "1".to_string()), ("mode", "2".to_string())]
        );
        assert_eq!(calls[1].url, "http://192.168.1.50/buzzer.ps3mapi");
        assert_eq!(calls[1].query, vec![("mode", "3".to_string())]);
    }

    #[test]
    fn test_set_identity() {
        let client = client(&["ok"]);
        client.set_identity(&session(), IDPS1, IDPS2, PSID1, PSID2).unwrap();

        let calls = client.transport().calls();
        assert_eq!(calls[0].url, "http://192.168.1.50/setidps.ps3mapi");
        assert_eq!(
            calls[0].query,
            vec![
                ("idps1", IDPS1.to_string()),
                ("idps2", IDPS2.to_string()),
                ("psid1", PSID1.to_string()),
                ("psid2", PSID2.to_string()),
            ]
        );
    }

    #[test]
    fn test_set_identity_short_part_never_sent() {
        let client = client(&[]);
        let err = client
            .set_identity(&session(), &IDPS1[..15], IDPS2, PSID1, PSID2)
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(client.transport().calls().is_empty());
    }

    #[test]
    fn test_set_identity_non_hex_never_sent() {
        let client = client(&[]);
        let err = client
            .set_identity(&session(), IDPS1, IDPS2, "XYZ0000000000000", PSID2)
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(client.transport().calls().is_empty());
    }
}
