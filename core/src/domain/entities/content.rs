//! Portfolio content items managed from the admin surface.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ValidationError;

/// Default gradient for projects created without a color
pub const DEFAULT_PROJECT_COLOR: &str = "from-blue-500 to-cyan-500";

/// Content category, matches the `/api/{category}` path segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Projects,
    Certificates,
    Experience,
}

impl ContentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Projects => "projects",
            ContentKind::Certificates => "certificates",
            ContentKind::Experience => "experience",
        }
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ContentKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "projects" => Ok(ContentKind::Projects),
            "certificates" => Ok(ContentKind::Certificates),
            "experience" => Ok(ContentKind::Experience),
            _ => Err(ValidationError::InvalidFormat {
                field: "category".to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectFields {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateFields {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub issuer: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub verify_url: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceFields {
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub org: String,
    #[serde(default)]
    pub desc: String,
}

/// Category-specific fields of a content item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ContentPayload {
    Project(ProjectFields),
    Certificate(CertificateFields),
    Experience(ExperienceFields),
}

impl ContentPayload {
    /// Parses and validates a JSON body for the given category
    pub fn from_json(kind: ContentKind, value: serde_json::Value) -> Result<Self, ValidationError> {
        let invalid = |_: serde_json::Error| ValidationError::InvalidFormat {
            field: kind.as_str().to_string(),
        };
        let payload = match kind {
            ContentKind::Projects => {
                let mut fields: ProjectFields = serde_json::from_value(value).map_err(invalid)?;
                if fields.color.as_deref().map_or(true, |c| c.trim().is_empty()) {
                    fields.color = Some(DEFAULT_PROJECT_COLOR.to_string());
                }
                ContentPayload::Project(fields)
            }
            ContentKind::Certificates => {
                ContentPayload::Certificate(serde_json::from_value(value).map_err(invalid)?)
            }
            ContentKind::Experience => {
                ContentPayload::Experience(serde_json::from_value(value).map_err(invalid)?)
            }
        };
        payload.validate()?;
        Ok(payload)
    }

    pub fn kind(&self) -> ContentKind {
        match self {
            ContentPayload::Project(_) => ContentKind::Projects,
            ContentPayload::Certificate(_) => ContentKind::Certificates,
            ContentPayload::Experience(_) => ContentKind::Experience,
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        let required: Vec<(&str, &str)> = match self {
            ContentPayload::Project(p) => vec![("title", p.title.as_str()), ("desc", p.desc.as_str())],
            ContentPayload::Certificate(c) => vec![
                ("title", c.title.as_str()),
                ("issuer", c.issuer.as_str()),
                ("date", c.date.as_str()),
            ],
            ContentPayload::Experience(e) => vec![
                ("year", e.year.as_str()),
                ("role", e.role.as_str()),
                ("org", e.org.as_str()),
            ],
        };
        match required.into_iter().find(|(_, value)| value.trim().is_empty()) {
            Some((field, _)) => Err(ValidationError::required(field)),
            None => Ok(()),
        }
    }
}

/// A stored content item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    pub id: Uuid,
    pub kind: ContentKind,
    #[serde(flatten)]
    pub payload: ContentPayload,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ContentItem {
    pub fn new(payload: ContentPayload) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            kind: payload.kind(),
            payload,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces the payload, keeping identity and creation time
    pub fn replace_payload(&mut self, payload: ContentPayload) {
        self.payload = payload;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_parsing() {
        assert_eq!("projects".parse::<ContentKind>().unwrap(), ContentKind::Projects);
        assert_eq!("experience".parse::<ContentKind>().unwrap(), ContentKind::Experience);
        let err = "users".parse::<ContentKind>().unwrap_err();
        assert_eq!(err.field(), "category");
    }

    #[test]
    fn test_project_defaults_color() {
        let payload = ContentPayload::from_json(
            ContentKind::Projects,
            json!({ "title": "Face Recognition", "desc": "Realtime", "tags": ["Python"] }),
        )
        .unwrap();

        match payload {
            ContentPayload::Project(fields) => {
                assert_eq!(fields.color.as_deref(), Some(DEFAULT_PROJECT_COLOR));
                assert_eq!(fields.tags, vec!["Python"]);
            }
            other => panic!("unexpected payload {:?}", other),
        }
    }

    #[test]
    fn test_missing_required_field_is_named() {
        let err = ContentPayload::from_json(ContentKind::Experience, json!({ "year": "2022", "role": "Intern" }))
            .unwrap_err();
        assert_eq!(err, ValidationError::required("org"));
    }

    #[test]
    fn test_wrong_shape_is_invalid_format() {
        let err = ContentPayload::from_json(ContentKind::Projects, json!({ "title": 42 })).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { .. }));
    }

    #[test]
    fn test_item_serializes_flat_camel_case() {
        let payload = ContentPayload::from_json(
            ContentKind::Certificates,
            json!({ "title": "AI Cert", "issuer": "Tech Institute", "date": "2023", "desc": "", "verifyUrl": "#" }),
        )
        .unwrap();
        let item = ContentItem::new(payload);
        let value = serde_json::to_value(&item).unwrap();

        assert_eq!(value["kind"], "certificates");
        assert_eq!(value["issuer"], "Tech Institute");
        assert_eq!(value["verifyUrl"], "#");
        assert!(value.get("createdAt").is_some());
    }
}
