use serde::{Deserialize, Serialize};

/// Account role, as the login flow stores it. Determines which recipient
/// filters the inbox offers and which roster lookups run on load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Teacher,
    Parent,
    Student,
}

impl Role {
    pub fn label(self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Teacher => "Teacher",
            Role::Parent => "Parent",
            Role::Student => "Student",
        }
    }

    /// Admins see the full list unfiltered, so the filter row is not
    /// offered to them at all.
    pub fn filters_offered(self) -> bool {
        !matches!(self, Role::Admin)
    }
}

/// The signed-in user, as the login page wrote it to client storage.
///
/// This crate only ever reads the record; writing it belongs to the
/// login flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// Bearer credential presented on every API request. Opaque here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthToken(pub String);

impl AuthToken {
    pub fn header_value(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_parses_stored_record() {
        let json = r#"{"_id":"u-17","name":"Priya Nair","email":"priya@stmarys.example","role":"teacher"}"#;
        let session: Session = serde_json::from_str(json).unwrap();
        assert_eq!(session.id, "u-17");
        assert_eq!(session.name, "Priya Nair");
        assert_eq!(session.role, Role::Teacher);
    }

    #[test]
    fn unknown_role_is_rejected() {
        let json = r#"{"_id":"u-1","name":"X","email":"x@example.com","role":"janitor"}"#;
        assert!(serde_json::from_str::<Session>(json).is_err());
    }

    #[test]
    fn roles_round_trip_lowercase() {
        for (role, text) in [
            (Role::Admin, "\"admin\""),
            (Role::Teacher, "\"teacher\""),
            (Role::Parent, "\"parent\""),
            (Role::Student, "\"student\""),
        ] {
            assert_eq!(serde_json::to_string(&role).unwrap(), text);
            assert_eq!(serde_json::from_str::<Role>(text).unwrap(), role);
        }
    }

    #[test]
    fn only_admins_skip_filters() {
        assert!(!Role::Admin.filters_offered());
        assert!(Role::Teacher.filters_offered());
        assert!(Role::Parent.filters_offered());
        assert!(Role::Student.filters_offered());
    }

    #[test]
    fn bearer_header_value() {
        let token = AuthToken("abc.def.ghi".into());
        assert_eq!(token.header_value(), "Bearer abc.def.ghi");
    }
}
