//! Entity kinds tracked by InternSprint.
//!
//! Every kind is partitioned into a fixed, ordered set of categories. The
//! order of `CATEGORIES` is the order used for listing, persisting and for
//! global ordinals.

pub mod internship;
pub mod interview;
pub mod project;

use std::fmt::Debug;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::TrackerError;

pub use internship::{Internship, InternshipDetails};
pub use interview::Interview;
pub use project::{GeneralProject, HardwareProject, Project, ProjectBase, SoftwareProject};

/// Name of the JSON field every persisted record uses as its discriminant.
pub const DISCRIMINANT_FIELD: &str = "type";

/// A persisted, categorized value.
///
/// Entities have no identity beyond their position within a category;
/// equality is by field content.
pub trait Entity: Clone + PartialEq + Debug + Serialize + DeserializeOwned {
    /// Stable lowercase name of the kind, e.g. `"internship"`.
    const KIND: &'static str;

    /// Declared category set, in listing order.
    const CATEGORIES: &'static [&'static str];

    /// Category this entity belongs to.
    fn category(&self) -> &str;

    /// One-line human readable description used in command feedback.
    fn describe(&self) -> String;

    /// Decode one persisted record into the concrete entity.
    ///
    /// Records without a string discriminant are rejected before field
    /// decoding so the error names the real problem.
    fn decode(record: serde_json::Value) -> Result<Self, TrackerError> {
        match record.get(DISCRIMINANT_FIELD) {
            Some(serde_json::Value::String(_)) => {}
            Some(_) => {
                return Err(TrackerError::Decode {
                    kind: Self::KIND,
                    message: format!("'{}' must be a string", DISCRIMINANT_FIELD),
                })
            }
            None => {
                return Err(TrackerError::Decode {
                    kind: Self::KIND,
                    message: format!("missing '{}' field", DISCRIMINANT_FIELD),
                })
            }
        }

        serde_json::from_value(record).map_err(|e| TrackerError::Decode {
            kind: Self::KIND,
            message: e.to_string(),
        })
    }
}

/// Trim an optional flag value, treating blank input as absent.
pub(crate) fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
