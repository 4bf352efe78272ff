// Console session management
//
// One client and one session per server. The client is blocking, so every
// operation runs on tokio's blocking pool with the session locked.

use ps3mapi_client::{MapiResult, Ps3Mapi, Session, Transport};
use std::sync::{Arc, Mutex};

pub struct SessionManager<T> {
    client: Arc<Ps3Mapi<T>>,
    session: Arc<Mutex<Session>>,
}

impl<T> SessionManager<T>
where
    T: Transport + Send + Sync + 'static,
{
    pub fn new(client: Ps3Mapi<T>, session: Session) -> Self {
        Self {
            client: Arc::new(client),
            session: Arc::new(Mutex::new(session)),
        }
    }

    /// Run a client operation against the session off the async runtime
    pub async fn run<R, F>(&self, op: F) -> Result<R, String>
    where
        F: FnOnce(&Ps3Mapi<T>, &mut Session) -> MapiResult<R> + Send + 'static,
        R: Send + 'static,
    {
        let client = Arc::clone(&self.client);
        let session = Arc::clone(&self.session);

        tokio::task::spawn_blocking(move || {
            let mut session = session
                .lock()
                .map_err(|_| "Session state is unavailable".to_string())?;
            op(client.as_ref(), &mut *session).map_err(|e| e.to_string())
        })
        .await
        .map_err(|e| format!("Console worker failed: {}", e))?
    }

    /// Change session state without touching the wire
    pub fn update<R>(&self, f: impl FnOnce(&mut Session) -> R) -> Result<R, String> {
        let mut session = self
            .session
            .lock()
            .map_err(|_| "Session state is unavailable".to_string())?;
        Ok(f(&mut *session))
    }

    pub fn snapshot(&self) -> Result<Session, String> {
        self.update(|session| session.clone())
    }
}
