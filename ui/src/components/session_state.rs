use dioxus::prelude::*;

use satchel_common::session::{AuthToken, Session};

/// localStorage key for the JSON user record the login page writes.
#[cfg(target_family = "wasm")]
const USER_STORAGE_KEY: &str = "satchel_user";
/// localStorage key for the bearer token the login page writes.
#[cfg(target_family = "wasm")]
const TOKEN_STORAGE_KEY: &str = "satchel_token";

/// The signed-in identity, read from client storage once at startup and
/// injected as context from the app root. Components below never touch
/// storage themselves.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionState {
    pub session: Session,
    pub token: AuthToken,
}

/// Read the stored session, if the login page left one behind.
#[cfg(target_family = "wasm")]
pub fn load_session() -> Option<SessionState> {
    let storage = web_sys::window()?.local_storage().ok()??;
    let user_json = storage.get_item(USER_STORAGE_KEY).ok()??;
    let token = storage.get_item(TOKEN_STORAGE_KEY).ok()??;
    let session: Session = match serde_json::from_str(&user_json) {
        Ok(session) => session,
        Err(err) => {
            tracing::warn!("Stored user record is unreadable: {err}");
            return None;
        }
    };
    Some(SessionState {
        session,
        token: AuthToken(token),
    })
}

#[cfg(not(target_family = "wasm"))]
pub fn load_session() -> Option<SessionState> {
    None
}

/// Shared session context, provided at the top of the app.
pub fn use_session() -> Signal<Option<SessionState>> {
    use_context::<Signal<Option<SessionState>>>()
}
