//! Employee records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An employee belonging to a company
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: String,
    pub company_id: String,
    pub full_name: String,
    pub email: String,
    pub role: String,
    pub hired_at: DateTime<Utc>,
}

/// Payload for creating an employee
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEmployee {
    pub company_id: String,
    pub full_name: String,
    pub email: String,
    pub role: String,
}

/// Partial update; `None` fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}
