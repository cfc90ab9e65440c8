//! Represents a magazine category (a section of the website).
//!
//! # Actor Framework
//! This struct implements the [`ActorEntity`](actor_framework::ActorEntity) trait,
//! allowing it to be managed by a [`ResourceActor`](actor_framework::ResourceActor).
//!
//! See [`crate::category_store`] for details on:
//! - Creation parameters ([`CategoryCreate`])
//! - Update parameters ([`CategoryUpdate`])
//! - Custom actions ([`CategoryAction`](crate::category_store::CategoryAction))

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::Display;
use utoipa::ToSchema;

use crate::category_store::CategoryError;

/// Longest accepted category name, in characters.
pub const MAX_NAME_LENGTH: usize = 100;

/// Type-safe identifier for Categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct CategoryId(pub u32);

impl From<u32> for CategoryId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for CategoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "category_{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<CategoryId>,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Category {
    /// Creates a new, enabled Category.
    ///
    /// # Arguments
    /// * `id` - Unique identifier (typically set by the actor system)
    /// * `name` - Display name, already normalized
    pub fn new(id: CategoryId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            parent_id: None,
            enabled: true,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    pub fn with_parent(mut self, parent_id: Option<CategoryId>) -> Self {
        self.parent_id = parent_id;
        self
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// DTO for Category creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCreate {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<CategoryId>,
}

impl CategoryCreate {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            parent_id: None,
        }
    }

    pub fn under(mut self, parent_id: CategoryId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }
}

/// DTO for Category updates. Absent fields are left unchanged.
///
/// `parentId` distinguishes "absent" (keep the parent) from `null` (move to the root).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<u32>)]
    pub parent_id: Option<Option<CategoryId>>,
}

fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Trims a category name and checks it is non-empty and at most [`MAX_NAME_LENGTH`]
/// characters long.
pub fn normalize_name(name: &str) -> Result<String, CategoryError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CategoryError::ValidationError(
            "name must not be empty".to_string(),
        ));
    }
    let length = trimmed.chars().count();
    if length > MAX_NAME_LENGTH {
        return Err(CategoryError::ValidationError(format!(
            "name must be at most {MAX_NAME_LENGTH} characters, got {length}"
        )));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_category_serializes_camel_case_without_nulls() {
        let category = Category::new(CategoryId(3), "Travel").with_parent(Some(CategoryId(1)));
        let value = serde_json::to_value(&category).unwrap();

        assert_eq!(value["id"], json!(3));
        assert_eq!(value["parentId"], json!(1));
        assert!(value.get("description").is_none());
        assert!(value.get("updatedAt").is_none());
        // RFC 3339 / ISO-8601
        let created = value["createdAt"].as_str().unwrap();
        assert!(DateTime::parse_from_rfc3339(created).is_ok());
    }

    #[test]
    fn test_update_distinguishes_absent_and_null_parent() {
        let absent: CategoryUpdate = serde_json::from_value(json!({ "name": "News" })).unwrap();
        assert_eq!(absent.parent_id, None);

        let root: CategoryUpdate = serde_json::from_value(json!({ "parentId": null })).unwrap();
        assert_eq!(root.parent_id, Some(None));

        let moved: CategoryUpdate = serde_json::from_value(json!({ "parentId": 4 })).unwrap();
        assert_eq!(moved.parent_id, Some(Some(CategoryId(4))));
    }

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("  Science  ").unwrap(), "Science");
        assert!(matches!(
            normalize_name("   "),
            Err(CategoryError::ValidationError(_))
        ));
        assert!(normalize_name(&"a".repeat(MAX_NAME_LENGTH)).is_ok());
        assert!(normalize_name(&"a".repeat(MAX_NAME_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_id_display() {
        assert_eq!(CategoryId(7).to_string(), "category_7");
    }
}
