//! Embedded stub of the user-management service.
//!
//! An in-process implementation of the remote contract, so the suites run
//! without a live deployment. Protected users 1 through 5 are seeded, with
//! user 2 holding the well-known credentials the suites log in with.

#![allow(clippy::expect_used)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Form, Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use axum::routing::{get, post};
use serde_json::json;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use uuid::Uuid;

/// Highest user id the service refuses to delete.
const PROTECTED_MAX_ID: u64 = 5;

const MIN_FIELD_LEN: usize = 2;
const MAX_FIELD_LEN: usize = 250;
const REQUIRED_FIELDS: [&str; 5] = ["password", "username", "firstName", "lastName", "email"];
const NAME_FIELDS: [&str; 3] = ["username", "firstName", "lastName"];

#[derive(Debug, Clone)]
struct UserRecord {
    username: String,
    first_name: String,
    last_name: String,
    email: String,
    password: String,
}

#[derive(Debug, Clone)]
struct Session {
    user_id: u64,
    token: String,
}

#[derive(Debug)]
struct StubState {
    users: Mutex<HashMap<u64, UserRecord>>,
    sessions: Mutex<HashMap<String, Session>>,
    next_id: AtomicU64,
}

impl StubState {
    /// Seeds the protected users, including the well-known account.
    fn seeded() -> Self {
        let mut users = HashMap::new();
        for id in 1..=PROTECTED_MAX_ID {
            users.insert(
                id,
                UserRecord {
                    username: format!("testuser{id}"),
                    first_name: format!("Test{id}"),
                    last_name: "User".to_string(),
                    email: format!("testuser{id}@example.com"),
                    password: "1234".to_string(),
                },
            );
        }
        users.insert(
            2,
            UserRecord {
                username: "vinkotov".to_string(),
                first_name: "Vitalii".to_string(),
                last_name: "Kotov".to_string(),
                email: "vinkotov@example.com".to_string(),
                password: "1234".to_string(),
            },
        );
        Self {
            users: Mutex::new(users),
            sessions: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(PROTECTED_MAX_ID + 1),
        }
    }
}

/// Handle for the embedded stub service.
///
/// Dropping the handle shuts the service down.
pub struct StubHandle {
    base_url: String,
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl StubHandle {
    /// Boots the stub on an ephemeral local port.
    pub async fn spawn() -> Self {
        let state = Arc::new(StubState::seeded());
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind the stub listener");
        let addr = listener.local_addr().expect("stub listener has no address");
        let (shutdown, rx) = oneshot::channel();
        let app = router(state);
        let task = tokio::spawn(async move {
            let server = axum::serve(listener, app).with_graceful_shutdown(async {
                let _ = rx.await;
            });
            if let Err(e) = server.await {
                tracing::error!("stub service failed: {e}");
            }
        });
        Self {
            base_url: format!("http://{addr}"),
            shutdown: Some(shutdown),
            task: Some(task),
        }
    }

    /// Returns the stub's base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Drop for StubHandle {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

fn router(state: Arc<StubState>) -> Router {
    Router::new()
        .route("/user/", post(register))
        .route("/user/login", post(login))
        .route("/user/auth", get(auth_check))
        .route("/user/{id}", get(get_user).put(edit_user).delete(delete_user))
        .with_state(state)
}

/// Plain-text validation error, as the registration endpoint reports them.
fn plain_error(message: impl Into<String>) -> Response {
    let message: String = message.into();
    (StatusCode::BAD_REQUEST, message).into_response()
}

/// JSON validation error, as the edit and delete endpoints report them.
fn json_error(message: impl Into<String>) -> Response {
    let message: String = message.into();
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
}

/// Looks up the caller's user id from the CSRF header and session cookie.
fn authenticated_user(state: &StubState, headers: &HeaderMap) -> Option<u64> {
    let token = headers.get("x-csrf-token")?.to_str().ok()?;
    let cookie_header = headers.get(header::COOKIE)?.to_str().ok()?;
    let sid = cookie_header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == "auth_sid")
        .map(|(_, value)| value)?;
    let sessions = state.sessions.lock().expect("session state poisoned");
    let session = sessions.get(sid)?;
    (session.token == token).then_some(session.user_id)
}

fn validate_name_fields(fields: &HashMap<String, String>) -> Option<Response> {
    for field in NAME_FIELDS {
        if let Some(value) = fields.get(field) {
            let len = value.chars().count();
            if len < MIN_FIELD_LEN {
                return Some(plain_error(format!(
                    "The value of '{field}' field is too short"
                )));
            }
            if len > MAX_FIELD_LEN {
                return Some(plain_error(format!(
                    "The value of '{field}' field is too long"
                )));
            }
        }
    }
    None
}

async fn register(
    State(state): State<Arc<StubState>>,
    Form(fields): Form<HashMap<String, String>>,
) -> Response {
    for field in REQUIRED_FIELDS {
        if !fields.contains_key(field) {
            return plain_error(format!("The following required params are missed: {field}"));
        }
    }
    let email = fields["email"].clone();
    if !email.contains('@') {
        return plain_error("Invalid email format");
    }
    if let Some(rejection) = validate_name_fields(&fields) {
        return rejection;
    }

    let mut users = state.users.lock().expect("user state poisoned");
    if users.values().any(|user| user.email == email) {
        return plain_error(format!("Users with email '{email}' already exists"));
    }
    let id = state.next_id.fetch_add(1, Ordering::SeqCst);
    users.insert(
        id,
        UserRecord {
            username: fields["username"].clone(),
            first_name: fields["firstName"].clone(),
            last_name: fields["lastName"].clone(),
            email,
            password: fields["password"].clone(),
        },
    );
    Json(json!({ "id": id })).into_response()
}

async fn login(
    State(state): State<Arc<StubState>>,
    Form(fields): Form<HashMap<String, String>>,
) -> Response {
    let (Some(email), Some(password)) = (fields.get("email"), fields.get("password")) else {
        return plain_error("Invalid username/password supplied");
    };
    let user_id = {
        let users = state.users.lock().expect("user state poisoned");
        users
            .iter()
            .find(|(_, user)| &user.email == email && &user.password == password)
            .map(|(id, _)| *id)
    };
    let Some(user_id) = user_id else {
        return plain_error("Invalid username/password supplied");
    };

    let sid = Uuid::now_v7().simple().to_string();
    let token = Uuid::now_v7().simple().to_string();
    state
        .sessions
        .lock()
        .expect("session state poisoned")
        .insert(sid.clone(), Session { user_id, token: token.clone() });

    let mut response = Json(json!({ "user_id": user_id })).into_response();
    let headers = response.headers_mut();
    headers.insert(
        "x-csrf-token",
        token.parse().expect("token is a valid header value"),
    );
    headers.insert(
        header::SET_COOKIE,
        format!("auth_sid={sid}; Path=/; HttpOnly")
            .parse()
            .expect("cookie is a valid header value"),
    );
    response
}

async fn auth_check(State(state): State<Arc<StubState>>, headers: HeaderMap) -> Response {
    let user_id = authenticated_user(&state, &headers).unwrap_or(0);
    Json(json!({ "user_id": user_id })).into_response()
}

async fn get_user(
    State(state): State<Arc<StubState>>,
    Path(id): Path<u64>,
    headers: HeaderMap,
) -> Response {
    let caller = authenticated_user(&state, &headers);
    let users = state.users.lock().expect("user state poisoned");
    let Some(user) = users.get(&id) else {
        return (StatusCode::NOT_FOUND, "User not found").into_response();
    };
    if caller == Some(id) {
        Json(json!({
            "username": user.username,
            "email": user.email,
            "firstName": user.first_name,
            "lastName": user.last_name,
        }))
        .into_response()
    } else {
        Json(json!({ "username": user.username })).into_response()
    }
}

async fn edit_user(
    State(state): State<Arc<StubState>>,
    Path(id): Path<u64>,
    headers: HeaderMap,
    Form(fields): Form<HashMap<String, String>>,
) -> Response {
    let Some(caller) = authenticated_user(&state, &headers) else {
        return json_error("Auth token not supplied");
    };
    if caller != id {
        return json_error("This user can only edit their own data.");
    }
    if let Some(email) = fields.get("email") {
        if !email.contains('@') {
            return json_error("Invalid email format");
        }
    }
    for field in NAME_FIELDS {
        if let Some(value) = fields.get(field) {
            let len = value.chars().count();
            if len < MIN_FIELD_LEN {
                return json_error(format!("The value of '{field}' field is too short"));
            }
            if len > MAX_FIELD_LEN {
                return json_error(format!("The value of '{field}' field is too long"));
            }
        }
    }

    let mut users = state.users.lock().expect("user state poisoned");
    let Some(user) = users.get_mut(&id) else {
        return (StatusCode::NOT_FOUND, "User not found").into_response();
    };
    if let Some(username) = fields.get("username") {
        user.username.clone_from(username);
    }
    if let Some(first_name) = fields.get("firstName") {
        user.first_name.clone_from(first_name);
    }
    if let Some(last_name) = fields.get("lastName") {
        user.last_name.clone_from(last_name);
    }
    if let Some(email) = fields.get("email") {
        user.email.clone_from(email);
    }
    if let Some(password) = fields.get("password") {
        user.password.clone_from(password);
    }
    Json(json!({})).into_response()
}

async fn delete_user(
    State(state): State<Arc<StubState>>,
    Path(id): Path<u64>,
    headers: HeaderMap,
) -> Response {
    let Some(caller) = authenticated_user(&state, &headers) else {
        return json_error("Auth token not supplied");
    };
    if id <= PROTECTED_MAX_ID {
        return json_error("Please, do not delete test users with ID 1, 2, 3, 4 or 5.");
    }
    if caller != id {
        return json_error("This user can only delete their own account.");
    }

    let removed = state.users.lock().expect("user state poisoned").remove(&id);
    if removed.is_none() {
        return (StatusCode::NOT_FOUND, "User not found").into_response();
    }
    Json(json!({})).into_response()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_seeded_state_has_protected_users() {
        let state = StubState::seeded();
        let users = state.users.lock().expect("user state poisoned");
        assert_eq!(users.len(), PROTECTED_MAX_ID as usize);
        assert_eq!(users[&2].email, "vinkotov@example.com");
        assert_eq!(users[&2].password, "1234");
    }

    #[test]
    fn test_fresh_ids_start_above_protected_range() {
        let state = StubState::seeded();
        assert!(state.next_id.load(Ordering::SeqCst) > PROTECTED_MAX_ID);
    }

    #[test]
    fn test_authenticated_user_requires_matching_token() {
        let state = StubState::seeded();
        state.sessions.lock().expect("session state poisoned").insert(
            "sid-1".to_string(),
            Session {
                user_id: 9,
                token: "token-1".to_string(),
            },
        );

        let mut headers = HeaderMap::new();
        headers.insert("x-csrf-token", "token-1".parse().expect("header value"));
        headers.insert(header::COOKIE, "auth_sid=sid-1".parse().expect("header value"));
        assert_eq!(authenticated_user(&state, &headers), Some(9));

        headers.insert("x-csrf-token", "wrong".parse().expect("header value"));
        assert_eq!(authenticated_user(&state, &headers), None);
    }
}
