//! Portfolio projects, one variant per category.

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use super::Entity;

/// Fields shared by every project variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectBase {
    pub project_name: String,
    pub role: String,
    pub description: String,
    pub objectives: String,
    pub duration: String,
}

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoftwareProject {
    #[serde(flatten)]
    pub base: ProjectBase,
    pub programming_languages: Option<String>,
    pub framework: Option<String>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HardwareProject {
    #[serde(flatten)]
    pub base: ProjectBase,
    pub hardware_components: Option<String>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneralProject {
    #[serde(flatten)]
    pub base: ProjectBase,
    pub department: Option<String>,
}

/// A portfolio project. The variant doubles as the category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Project {
    Software(SoftwareProject),
    Hardware(HardwareProject),
    General(GeneralProject),
}

impl Project {
    pub fn base(&self) -> &ProjectBase {
        match self {
            Project::Software(p) => &p.base,
            Project::Hardware(p) => &p.base,
            Project::General(p) => &p.base,
        }
    }
}

impl Entity for Project {
    const KIND: &'static str = "project";
    const CATEGORIES: &'static [&'static str] = &["software", "hardware", "general"];

    fn category(&self) -> &str {
        match self {
            Project::Software(_) => "software",
            Project::Hardware(_) => "hardware",
            Project::General(_) => "general",
        }
    }

    fn describe(&self) -> String {
        let base = self.base();
        let mut out = format!(
            "[{}] {} - {} ({}): {}",
            self.category(),
            base.project_name,
            base.role,
            base.duration,
            base.description
        );
        match self {
            Project::Software(p) => {
                if let Some(langs) = &p.programming_languages {
                    out.push_str(&format!(" | Languages: {}", langs));
                }
                if let Some(fw) = &p.framework {
                    out.push_str(&format!(" | Framework: {}", fw));
                }
            }
            Project::Hardware(p) => {
                if let Some(components) = &p.hardware_components {
                    out.push_str(&format!(" | Components: {}", components));
                }
            }
            Project::General(p) => {
                if let Some(dept) = &p.department {
                    out.push_str(&format!(" | Department: {}", dept));
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn base() -> ProjectBase {
        ProjectBase {
            project_name: "Line Follower".into(),
            role: "Lead".into(),
            description: "Autonomous robot".into(),
            objectives: "Win the race".into(),
            duration: "3 months".into(),
        }
    }

    #[test]
    fn test_variant_is_discriminant() {
        let project = Project::Hardware(HardwareProject {
            base: base(),
            hardware_components: Some("STM32".into()),
        });
        let value = serde_json::to_value(&project).unwrap();
        assert_eq!(value["type"], "hardware");
        assert_eq!(value["projectName"], "Line Follower");
        assert_eq!(value["hardwareComponents"], "STM32");

        let back = Project::decode(value).unwrap();
        assert_eq!(back, project);
    }

    #[test]
    fn test_unknown_variant_fails() {
        let mut value = serde_json::to_value(Project::General(GeneralProject {
            base: base(),
            department: None,
        }))
        .unwrap();
        value["type"] = json!("quantum");
        assert!(Project::decode(value).is_err());
    }

    #[test]
    fn test_missing_shared_field_fails() {
        let result = Project::decode(json!({
            "type": "software",
            "projectName": "Compiler",
            "role": "Solo"
        }));
        assert!(result.is_err());
    }
}
