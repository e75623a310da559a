//! Internship applications.

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use super::Entity;

/// Status given to an internship when none is supplied.
pub const DEFAULT_STATUS: &str = "Application Pending";

fn default_status() -> String {
    DEFAULT_STATUS.to_string()
}

/// An internship application.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Internship {
    pub company_name: String,
    pub role: String,
    pub deadline: Option<String>,
    pub pay: Option<String>,
    pub description: Option<String>,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(flatten)]
    pub details: InternshipDetails,
}

/// Category-specific internship fields. Serialized under the `type` key.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "lowercase",
    rename_all_fields = "camelCase"
)]
pub enum InternshipDetails {
    Software { tech_stack: Option<String> },
    Hardware { embedded_systems: Option<String> },
    General { department: Option<String> },
}

impl InternshipDetails {
    pub fn category(&self) -> &'static str {
        match self {
            InternshipDetails::Software { .. } => "software",
            InternshipDetails::Hardware { .. } => "hardware",
            InternshipDetails::General { .. } => "general",
        }
    }
}

impl Internship {
    /// New internship with the default status and no optional fields.
    pub fn new(company_name: &str, role: &str, details: InternshipDetails) -> Self {
        Self {
            company_name: company_name.to_string(),
            role: role.to_string(),
            deadline: None,
            pay: None,
            description: None,
            status: default_status(),
            details,
        }
    }
}

impl Entity for Internship {
    const KIND: &'static str = "internship";
    const CATEGORIES: &'static [&'static str] = &["software", "hardware", "general"];

    fn category(&self) -> &str {
        self.details.category()
    }

    fn describe(&self) -> String {
        let mut out = format!(
            "[{}] {} - {} ({})",
            self.category(),
            self.company_name,
            self.role,
            self.status
        );
        if let Some(deadline) = &self.deadline {
            out.push_str(&format!(" | Deadline: {}", deadline));
        }
        if let Some(pay) = &self.pay {
            out.push_str(&format!(" | Pay: {}", pay));
        }
        match &self.details {
            InternshipDetails::Software {
                tech_stack: Some(t),
            } => out.push_str(&format!(" | Tech: {}", t)),
            InternshipDetails::Hardware {
                embedded_systems: Some(e),
            } => out.push_str(&format!(" | Embedded: {}", e)),
            InternshipDetails::General {
                department: Some(d),
            } => out.push_str(&format!(" | Department: {}", d)),
            _ => {}
        }
        out
    }
}
