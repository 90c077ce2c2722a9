//! WASM HTTP client for the school messaging API.
//!
//! Calls the `/api/messages/*` endpoints. The base URL comes from the
//! `?api=<url>` query parameter, falling back to the compile-time
//! `SATCHEL_API_URL` env var, then to the local dev server.

use serde::{Deserialize, Serialize};

use satchel_common::gateway::{ApiError, MessagesGateway};
use satchel_common::message::Message;
use satchel_common::roster::{ClassRecord, StudentRecord, UserRecord};
use satchel_common::session::AuthToken;

/// Where the API lives when nothing overrides it.
const DEFAULT_API_URL: &str = "http://localhost:4000";

/// Resolve the messaging API base URL.
pub fn api_base_url() -> String {
    // Runtime override via ?api=<url> query parameter
    // (e.g. ?api=http://localhost:5050), for pointing a deployed UI at a
    // local server.
    #[cfg(target_family = "wasm")]
    {
        let runtime_url = web_sys::window()
            .and_then(|w| w.location().search().ok())
            .and_then(|qs| {
                web_sys::UrlSearchParams::new_with_str(&qs)
                    .ok()?
                    .get("api")
            })
            .filter(|url| !url.is_empty());
        if let Some(url) = runtime_url {
            return url;
        }
    }

    option_env!("SATCHEL_API_URL")
        .filter(|url| !url.is_empty())
        .unwrap_or(DEFAULT_API_URL)
        .to_string()
}

// ─── Endpoint paths ──────────────────────────────────────────────────────────

const STUDENTS_PATH: &str = "/api/messages/students";
const ADMIN_USERS_PATH: &str = "/api/messages/users/admins";

fn inbox_path(user_id: &str) -> String {
    format!("/api/messages/inbox?userId={user_id}")
}

fn teacher_classes_path(teacher_id: &str) -> String {
    format!("/api/messages/classes/teacher/{teacher_id}")
}

fn student_by_email_path(email: &str) -> String {
    format!(
        "/api/messages/students/by-email?email={}",
        query_encode(email)
    )
}

/// Simple percent-encoding for URL query values. Addresses routinely
/// carry `+`, which would otherwise decode to a space server-side.
fn query_encode(value: &str) -> String {
    value
        .bytes()
        .map(|b| match b {
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                (b as char).to_string()
            }
            _ => format!("%{b:02X}"),
        })
        .collect()
}

fn class_path(class_id: &str) -> String {
    format!("/api/messages/classes/{class_id}")
}

// ─── Request/Response types ──────────────────────────────────────────────────

/// Body of the batch student lookup.
#[derive(Serialize)]
struct StudentsByClassesRequest<'a> {
    #[serde(rename = "classIds")]
    class_ids: &'a [String],
}

/// Error body shape the API uses for non-success responses.
#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Pull the `message` field out of an error body, when there is one.
#[allow(dead_code)] // called from the WASM transport
fn server_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|body| body.message)
        .filter(|message| !message.is_empty())
}

// ─── Client ──────────────────────────────────────────────────────────────────

/// Messaging gateway over HTTP, authenticated with the session's bearer
/// token.
#[derive(Clone, Debug)]
pub struct HttpGateway {
    base_url: String,
    token: AuthToken,
}

impl HttpGateway {
    pub fn new(base_url: String, token: AuthToken) -> Self {
        Self { base_url, token }
    }

    /// Gateway against the configured base URL.
    pub fn from_config(token: AuthToken) -> Self {
        Self::new(api_base_url(), token)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let text = fetch_json(&self.base_url, path, "GET", &self.token, None).await?;
        serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn post_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T, ApiError> {
        let body = serde_json::to_string(body).map_err(|e| ApiError::Decode(e.to_string()))?;
        let text = fetch_json(&self.base_url, path, "POST", &self.token, Some(body)).await?;
        serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

impl MessagesGateway for HttpGateway {
    async fn inbox(&self, user_id: &str) -> Result<Vec<Message>, ApiError> {
        self.get_json(&inbox_path(user_id)).await
    }

    async fn classes_for_teacher(&self, teacher_id: &str) -> Result<Vec<ClassRecord>, ApiError> {
        self.get_json(&teacher_classes_path(teacher_id)).await
    }

    async fn students_in_classes(&self, class_ids: &[String]) -> Result<Vec<StudentRecord>, ApiError> {
        self.post_json(STUDENTS_PATH, &StudentsByClassesRequest { class_ids })
            .await
    }

    async fn admin_users(&self) -> Result<Vec<UserRecord>, ApiError> {
        self.get_json(ADMIN_USERS_PATH).await
    }

    async fn student_by_email(&self, email: &str) -> Result<Option<StudentRecord>, ApiError> {
        // A student the server does not know is Ok(None), not a failure;
        // the load sequence decides what a missing record means.
        match self.get_json(&student_by_email_path(email)).await {
            Ok(student) => Ok(student),
            Err(ApiError::Status { code: 404, .. }) => Ok(None),
            Err(err) => Err(err),
        }
    }

    async fn class(&self, class_id: &str) -> Result<ClassRecord, ApiError> {
        self.get_json(&class_path(class_id)).await
    }
}

// ─── HTTP transport (WASM) ───────────────────────────────────────────────────

#[cfg(target_family = "wasm")]
async fn fetch_json(
    base_url: &str,
    path: &str,
    method: &str,
    token: &AuthToken,
    body: Option<String>,
) -> Result<String, ApiError> {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;

    let url = format!("{base_url}{path}");

    let opts = web_sys::RequestInit::new();
    opts.set_method(method);
    opts.set_mode(web_sys::RequestMode::Cors);

    if let Some(ref b) = body {
        opts.set_body(&wasm_bindgen::JsValue::from_str(b));
    }

    let request = web_sys::Request::new_with_str_and_init(&url, &opts)
        .map_err(|e| ApiError::Network(format!("Failed to create request: {:?}", e)))?;

    let headers = request.headers();
    headers
        .set("Authorization", &token.header_value())
        .map_err(|e| ApiError::Network(format!("Failed to set header: {:?}", e)))?;
    if body.is_some() {
        headers
            .set("Content-Type", "application/json")
            .map_err(|e| ApiError::Network(format!("Failed to set header: {:?}", e)))?;
    }

    let window = web_sys::window().ok_or(ApiError::Network("No window".into()))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| ApiError::Network(format!("Fetch failed: {:?}", e)))?;

    let resp: web_sys::Response = resp_value
        .dyn_into()
        .map_err(|_| ApiError::Network("Response is not a Response object".into()))?;

    let text = JsFuture::from(
        resp.text()
            .map_err(|e| ApiError::Network(format!("Failed to get text: {:?}", e)))?,
    )
    .await
    .map_err(|e| ApiError::Network(format!("Failed to read body: {:?}", e)))?;

    let text_str = text
        .as_string()
        .ok_or(ApiError::Network("Response body is not a string".into()))?;

    let status = resp.status();
    if status >= 400 {
        return Err(ApiError::Status {
            code: status,
            message: server_message(&text_str),
        });
    }

    Ok(text_str)
}

// Non-WASM stub for type checking
#[cfg(not(target_family = "wasm"))]
async fn fetch_json(
    _base_url: &str,
    _path: &str,
    _method: &str,
    _token: &AuthToken,
    _body: Option<String>,
) -> Result<String, ApiError> {
    Err(ApiError::Network(
        "Messaging client only available in WASM".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inbox_path_carries_the_user_id_query() {
        assert_eq!(inbox_path("u-17"), "/api/messages/inbox?userId=u-17");
    }

    #[test]
    fn roster_paths_embed_their_ids() {
        assert_eq!(
            teacher_classes_path("u-17"),
            "/api/messages/classes/teacher/u-17"
        );
        assert_eq!(class_path("c-5b"), "/api/messages/classes/c-5b");
        assert_eq!(
            student_by_email_path("sam@stmarys.example"),
            "/api/messages/students/by-email?email=sam%40stmarys.example"
        );
    }

    #[test]
    fn email_query_value_is_percent_encoded() {
        assert_eq!(
            student_by_email_path("sam+spam@stmarys.example"),
            "/api/messages/students/by-email?email=sam%2Bspam%40stmarys.example"
        );
        assert_eq!(query_encode("a&b=c d"), "a%26b%3Dc%20d");
        assert_eq!(query_encode("zoe.lindqvist-2"), "zoe.lindqvist-2");
    }

    #[test]
    fn students_request_serializes_to_class_ids() {
        let class_ids = vec!["c-1".to_string(), "c-2".to_string()];
        let body = serde_json::to_string(&StudentsByClassesRequest {
            class_ids: &class_ids,
        })
        .unwrap();
        assert_eq!(body, r#"{"classIds":["c-1","c-2"]}"#);
    }

    #[test]
    fn server_message_reads_the_message_field() {
        assert_eq!(
            server_message(r#"{"message":"token expired"}"#),
            Some("token expired".to_string())
        );
        assert_eq!(server_message(r#"{"message":""}"#), None);
        assert_eq!(server_message(r#"{"error":"other shape"}"#), None);
        assert_eq!(server_message("not json"), None);
    }
}
