//! # Authentication and sessions
//!
//! Staff authentication backed by Argon2 password hashes and an in-memory
//! session store keyed by a random token carried in an HttpOnly cookie.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use argon2::{
    Argon2,
    password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use axum::{
    extract::{FromRef, FromRequestParts, Request, State},
    http::{HeaderMap, StatusCode, header, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Duration, Utc};
use rand::RngCore;

use crate::error::{ApiError, unauthorized};
use crate::server::AppState;

/// Name of the session cookie issued on login.
pub const SESSION_COOKIE: &str = "hotel_session";

/// Hash a plaintext password for storage.
pub fn hash_password(password: &str) -> Result<String, password_hash::Error> {
    let salt = SaltString::generate(&mut rand::rngs::OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored hash.
///
/// A malformed stored hash is treated as a mismatch rather than an error.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    match PasswordHash::new(password_hash) {
        Ok(hash) => Argon2::default()
            .verify_password(password.as_bytes(), &hash)
            .is_ok(),
        Err(_) => false,
    }
}

/// Snapshot of the authenticated staff member, inserted into request
/// extensions by the session middleware.
#[derive(Debug, Clone)]
pub struct SessionUser {
    pub id: i32,
    pub login: String,
    pub name: String,
    pub surname: String,
    pub position: String,
}

#[derive(Debug, Clone)]
struct Session {
    user: SessionUser,
    expires_at: DateTime<Utc>,
}

/// In-memory session store. Sessions do not survive a restart, which
/// simply forces staff to log in again.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<String, Session>>>,
    max_age: Duration,
}

impl SessionStore {
    pub fn new(max_age_seconds: u64) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            max_age: Duration::seconds(max_age_seconds as i64),
        }
    }

    /// Creates a session for the given user and returns its token.
    pub fn create(&self, user: SessionUser) -> String {
        let token = generate_token();
        let session = Session {
            user,
            expires_at: Utc::now() + self.max_age,
        };
        let mut sessions = match self.sessions.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        sessions.insert(token.clone(), session);
        token
    }

    /// Resolves a token to its user, dropping the session if expired.
    pub fn resolve(&self, token: &str) -> Option<SessionUser> {
        let mut sessions = match self.sessions.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        match sessions.get(token) {
            Some(session) if session.expires_at > Utc::now() => Some(session.user.clone()),
            Some(_) => {
                sessions.remove(token);
                None
            }
            None => None,
        }
    }

    /// Removes a session (logout).
    pub fn remove(&self, token: &str) {
        let mut sessions = match self.sessions.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        sessions.remove(token);
    }

    /// Drops every session belonging to the given user, e.g. after a
    /// password change or account deletion.
    pub fn remove_for_user(&self, user_id: i32) {
        let mut sessions = match self.sessions.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        sessions.retain(|_, session| session.user.id != user_id);
    }
}

fn generate_token() -> String {
    let mut bytes = [0u8; 32];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Extracts the session token from the Cookie header, if present.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE).then(|| value.to_string())
    })
}

/// Builds the Set-Cookie value for a freshly issued session token.
pub fn session_cookie(token: &str, max_age_seconds: u64) -> String {
    format!(
        "{}={}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}",
        SESSION_COOKIE, token, max_age_seconds
    )
}

/// Builds the Set-Cookie value that clears the session cookie.
pub fn clear_session_cookie() -> String {
    format!("{}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0", SESSION_COOKIE)
}

impl FromRef<AppState> for SessionStore {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.sessions.clone()
    }
}

/// Middleware guarding JSON API endpoints: unauthenticated requests get a
/// 401 problem response.
pub async fn require_staff_api(
    State(sessions): State<SessionStore>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(user) = authenticated_user(&sessions, request.headers()) else {
        return Err(unauthorized(Some("Authentication required")));
    };

    tracing::debug!(user = %user.login, "Authenticated staff request");

    let mut request = request;
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Middleware guarding admin pages: unauthenticated browsers are redirected
/// to the login page. HTMX fragment requests get the redirect as an
/// `HX-Redirect` header instead, since a 303 would be swallowed by the
/// fragment swap.
pub async fn require_staff_page(
    State(sessions): State<SessionStore>,
    request: Request,
    next: Next,
) -> Response {
    let Some(user) = authenticated_user(&sessions, request.headers()) else {
        if request.headers().contains_key("HX-Request") {
            return ([(header::HeaderName::from_static("hx-redirect"), "/login")],
                StatusCode::UNAUTHORIZED)
                .into_response();
        }
        return (StatusCode::SEE_OTHER, [(header::LOCATION, "/login")]).into_response();
    };

    let mut request = request;
    request.extensions_mut().insert(user);
    next.run(request).await
}

fn authenticated_user(sessions: &SessionStore, headers: &HeaderMap) -> Option<SessionUser> {
    let token = session_token(headers)?;
    sessions.resolve(&token)
}

/// Extractor yielding the authenticated staff member inside guarded routes.
pub struct CurrentUser(pub SessionUser);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionUser>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| unauthorized(Some("Authentication required")))
    }
}
