use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::Role;

/// One of the three recipient dimensions a message can be addressed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RecipientKind {
    Users,
    Classes,
    Students,
}

impl RecipientKind {
    /// Every dimension, in the order the filter row displays them.
    pub const ALL: [RecipientKind; 3] = [
        RecipientKind::Users,
        RecipientKind::Classes,
        RecipientKind::Students,
    ];

    pub fn label(self) -> &'static str {
        match self {
            RecipientKind::Users => "Users",
            RecipientKind::Classes => "Classes",
            RecipientKind::Students => "Students",
        }
    }
}

/// Recipient id lists, one per dimension. The server omits arrays the
/// sender left empty, so each falls back to empty on deserialize.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipients {
    #[serde(default)]
    pub users: Vec<String>,
    #[serde(default)]
    pub classes: Vec<String>,
    #[serde(default)]
    pub students: Vec<String>,
}

impl Recipients {
    pub fn ids(&self, kind: RecipientKind) -> &[String] {
        match kind {
            RecipientKind::Users => &self.users,
            RecipientKind::Classes => &self.classes,
            RecipientKind::Students => &self.students,
        }
    }
}

/// Message author as the server reports it alongside each message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sender {
    pub name: String,
    pub role: Role,
}

/// A message in the signed-in user's inbox.
///
/// Immutable once fetched; the page owns its copy until the next reload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    #[serde(rename = "_id")]
    pub id: String,
    pub sender: Sender,
    #[serde(default)]
    pub recipients: Recipients,
    pub subject: String,
    pub body: String,
    /// Stored file reference, when the sender attached one.
    #[serde(default)]
    pub attachment: Option<String>,
    pub created_at: DateTime<Utc>,
}
