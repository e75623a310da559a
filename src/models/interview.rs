//! Interviews scheduled for an internship application.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use super::Entity;

/// Date format accepted from and shown to the user.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Time format accepted from and shown to the user.
pub const TIME_FORMAT: &str = "%H:%M";

/// A single interview round. The company and role are copied from the
/// internship the interview was scheduled for.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interview {
    #[serde(rename = "type")]
    pub category: String,
    pub company_name: String,
    pub role: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub email: Option<String>,
    pub notes: Option<String>,
}

impl Entity for Interview {
    const KIND: &'static str = "interview";
    const CATEGORIES: &'static [&'static str] = &["technical", "behavioural", "general"];

    fn category(&self) -> &str {
        &self.category
    }

    fn describe(&self) -> String {
        let mut out = format!(
            "[{}] {} - {} on {} from {} to {}",
            self.category,
            self.company_name,
            self.role,
            self.date.format(DATE_FORMAT),
            self.start_time.format(TIME_FORMAT),
            self.end_time.format(TIME_FORMAT)
        );
        if let Some(email) = &self.email {
            out.push_str(&format!(" | Contact: {}", email));
        }
        if let Some(notes) = &self.notes {
            out.push_str(&format!(" | Notes: {}", notes));
        }
        out
    }
}
