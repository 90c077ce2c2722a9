use serde::{Deserialize, Serialize};

use crate::filter::FilterOption;

/// A class as the messaging endpoints return it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
}

/// A student as the messaging endpoints return it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    /// Id of the class the student is enrolled in, when the server
    /// includes it in the payload.
    #[serde(default)]
    pub class: Option<String>,
}

/// A staff user offered as a filter target (the admin list parents see).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
}

impl From<&ClassRecord> for FilterOption {
    fn from(record: &ClassRecord) -> Self {
        FilterOption::new(record.id.clone(), record.name.clone())
    }
}

impl From<&StudentRecord> for FilterOption {
    fn from(record: &StudentRecord) -> Self {
        FilterOption::new(record.id.clone(), record.name.clone())
    }
}

impl From<&UserRecord> for FilterOption {
    fn from(record: &UserRecord) -> Self {
        FilterOption::new(record.id.clone(), record.name.clone())
    }
}
