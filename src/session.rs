//! Server-side sessions.
//!
//! Each browser gets a random id in a private cookie. The id keys a
//! [`SessionState`] held by the [`SessionRegistry`]: the in-memory lists (when
//! the session backend is selected) and the one-shot flash messages. A session
//! left idle longer than the configured lifetime is dropped the next time the
//! registry is touched.

use chrono::{DateTime, Duration, Utc};
use rocket::http::{Cookie, Status};
use rocket::request::{FromRequest, Outcome, Request};
use serde::Serialize;
use uuid::Uuid;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::internal_error::{InternalError, InternalResult};
use crate::todo::data::List;

pub const SESSION_COOKIE: &str = "todo_session";

pub type SessionID = Uuid;
pub type SharedSessionState = Arc<Mutex<SessionState>>;

#[derive(Serialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct FlashMessages {
    pub error: Option<String>,
    pub success: Option<String>,
}

#[derive(Debug, Default)]
pub struct SessionState {
    pub lists: Vec<List>,
    flash: FlashMessages,
}

impl SessionState {
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.flash.error = Some(message.into());
    }

    pub fn set_success(&mut self, message: impl Into<String>) {
        self.flash.success = Some(message.into());
    }

    /// Hands out the pending messages and clears them.
    pub fn take_flash(&mut self) -> FlashMessages {
        std::mem::take(&mut self.flash)
    }
}

struct SessionEntry {
    state: SharedSessionState,
    last_seen: DateTime<Utc>,
}

pub struct SessionRegistry {
    sessions: Mutex<HashMap<SessionID, SessionEntry>>,
    idle_timeout: Duration,
}

impl SessionRegistry {
    pub fn new(idle_timeout: Duration) -> SessionRegistry {
        SessionRegistry {
            sessions: Mutex::new(HashMap::new()),
            idle_timeout,
        }
    }

    /// Resumes the session `id` if it is still live, otherwise starts an empty
    /// one under a fresh id.
    pub fn open(&self, id: Option<SessionID>) -> InternalResult<(SessionID, SharedSessionState)> {
        self.open_at(id, Utc::now())
    }

    fn open_at(
        &self,
        id: Option<SessionID>,
        now: DateTime<Utc>,
    ) -> InternalResult<(SessionID, SharedSessionState)> {
        let mut sessions = self.sessions.lock()?;

        let idle_timeout = self.idle_timeout;
        sessions.retain(|session_id, entry| {
            let live = now - entry.last_seen <= idle_timeout;
            if !live {
                log::debug!("session {} expired", session_id);
            }
            live
        });

        if let Some(id) = id {
            if let Some(entry) = sessions.get_mut(&id) {
                entry.last_seen = now;
                return Ok((id, entry.state.clone()));
            }
        }

        let id = Uuid::new_v4();
        let state = SharedSessionState::default();
        sessions.insert(
            id,
            SessionEntry {
                state: state.clone(),
                last_seen: now,
            },
        );
        log::debug!("session {} started", id);

        Ok((id, state))
    }

    #[cfg(test)]
    fn len(&self) -> InternalResult<usize> {
        Ok(self.sessions.lock()?.len())
    }
}

/// The caller's session, resolved once per request.
#[derive(Clone)]
pub struct Session {
    state: SharedSessionState,
}

impl Session {
    pub fn state(&self) -> SharedSessionState {
        self.state.clone()
    }

    pub fn flash_error(&self, message: impl Into<String>) -> InternalResult<()> {
        self.state.lock()?.set_error(message);
        Ok(())
    }

    pub fn flash_success(&self, message: impl Into<String>) -> InternalResult<()> {
        self.state.lock()?.set_success(message);
        Ok(())
    }

    pub fn take_flash(&self) -> InternalResult<FlashMessages> {
        Ok(self.state.lock()?.take_flash())
    }
}

fn resolve_session(request: &Request<'_>) -> InternalResult<Session> {
    let registry = request
        .rocket()
        .state::<SessionRegistry>()
        .ok_or(InternalError::from("session registry is not managed"))?;

    let cookies = request.cookies();
    let presented = cookies
        .get_private(SESSION_COOKIE)
        .and_then(|cookie| Uuid::parse_str(cookie.value()).ok());

    let (id, state) = registry.open(presented)?;
    if presented != Some(id) {
        cookies.add_private(Cookie::new(SESSION_COOKIE, id.to_string()));
    }

    Ok(Session { state })
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for Session {
    type Error = String;

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let resolved = request.local_cache(|| resolve_session(request).map_err(|e| e.to_string()));

        match resolved {
            Ok(session) => Outcome::Success(session.clone()),
            Err(e) => {
                log::error!("{}", e);
                Outcome::Error((Status::InternalServerError, e.clone()))
            }
        }
    }
}
