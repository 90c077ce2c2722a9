use crate::message::Message;
use crate::roster::{ClassRecord, StudentRecord, UserRecord};

/// Fallback toast text for failures the server gave us no words for.
pub const GENERIC_LOAD_ERROR: &str = "Could not load your messages. Please try again.";

/// Errors from the messaging API.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ApiError {
    /// Non-success HTTP status, with the server's own error message
    /// when the response body carried one.
    Status { code: u16, message: Option<String> },
    /// The request never completed (connection refused, CORS, aborted).
    Network(String),
    /// The response body was not the expected shape.
    Decode(String),
    /// A lookup that must yield a record came back empty.
    MissingRecord(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Status {
                code,
                message: Some(message),
            } => write!(f, "HTTP {code}: {message}"),
            Self::Status {
                code,
                message: None,
            } => write!(f, "HTTP {code}"),
            Self::Network(msg) => write!(f, "request failed: {msg}"),
            Self::Decode(msg) => write!(f, "unexpected response: {msg}"),
            Self::MissingRecord(msg) => write!(f, "no record found: {msg}"),
        }
    }
}

impl ApiError {
    /// What the error toast shows: the server's message verbatim when it
    /// sent one, the generic fallback for everything else.
    pub fn user_message(&self) -> String {
        match self {
            Self::Status {
                message: Some(message),
                ..
            } => message.clone(),
            _ => GENERIC_LOAD_ERROR.to_string(),
        }
    }
}

/// The messaging endpoints the inbox needs, behind a trait so the load
/// sequence can be driven natively in tests.
///
/// Implementations authenticate every call with the session's bearer
/// token. Lookups map to the page load:
/// - every role      → `inbox`
/// - teachers        → `classes_for_teacher`, then `students_in_classes`
/// - parents         → `admin_users`
/// - students        → `student_by_email`, then `class`
#[allow(async_fn_in_trait)]
pub trait MessagesGateway {
    /// Messages addressed to the given user, in server order.
    async fn inbox(&self, user_id: &str) -> Result<Vec<Message>, ApiError>;

    /// Classes the teacher runs.
    async fn classes_for_teacher(&self, teacher_id: &str) -> Result<Vec<ClassRecord>, ApiError>;

    /// Students enrolled in any of the given classes, one batch call.
    async fn students_in_classes(&self, class_ids: &[String]) -> Result<Vec<StudentRecord>, ApiError>;

    /// Admin users parents may filter by.
    async fn admin_users(&self) -> Result<Vec<UserRecord>, ApiError>;

    /// The student record matching an email address, if the server
    /// knows one.
    async fn student_by_email(&self, email: &str) -> Result<Option<StudentRecord>, ApiError>;

    /// One class by id.
    async fn class(&self, class_id: &str) -> Result<ClassRecord, ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_server_detail() {
        let err = ApiError::Status {
            code: 403,
            message: Some("token expired".into()),
        };
        assert_eq!(err.to_string(), "HTTP 403: token expired");

        let err = ApiError::Status {
            code: 500,
            message: None,
        };
        assert_eq!(err.to_string(), "HTTP 500");

        let err = ApiError::Network("connection refused".into());
        assert_eq!(err.to_string(), "request failed: connection refused");
    }

    #[test]
    fn user_message_prefers_the_server_text() {
        let err = ApiError::Status {
            code: 403,
            message: Some("token expired".into()),
        };
        assert_eq!(err.user_message(), "token expired");
    }

    #[test]
    fn user_message_falls_back_for_wordless_failures() {
        for err in [
            ApiError::Status {
                code: 502,
                message: None,
            },
            ApiError::Network("timed out".into()),
            ApiError::Decode("expected a list".into()),
            ApiError::MissingRecord("student for x@example.com".into()),
        ] {
            assert_eq!(err.user_message(), GENERIC_LOAD_ERROR);
        }
    }
}
