use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Listing entity - a classified post offering a recyclable material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub location: String,
    /// "sell", "exchange" or "donate". Not enforced.
    pub action: String,
    pub material: String,
    pub image_reference: Option<String>,
    pub owner_id: Option<i32>,
    pub created_at: DateTime<Utc>,
}

/// The text fields of a listing as submitted by a client.
///
/// Used both for creation, where every field is required, and for partial
/// updates, where `None` means "keep the current value".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingDraft {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub action: Option<String>,
    pub material: Option<String>,
}

/// Validated listing text fields, all non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingContent {
    pub title: String,
    pub description: String,
    pub location: String,
    pub action: String,
    pub material: String,
}

/// Longest accepted values, in characters, matching the column widths.
pub const TITLE_MAX_LEN: usize = 200;
pub const LOCATION_MAX_LEN: usize = 100;
pub const ACTION_MAX_LEN: usize = 20;
pub const MATERIAL_MAX_LEN: usize = 50;

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(|v| v.trim().is_empty())
}

impl ListingDraft {
    fn fields(&self) -> [(&'static str, &Option<String>); 5] {
        [
            ("title", &self.title),
            ("description", &self.description),
            ("location", &self.location),
            ("action", &self.action),
            ("material", &self.material),
        ]
    }

    /// Names of the required fields that are absent or blank.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        self.fields()
            .into_iter()
            .filter(|(_, value)| is_blank(value))
            .map(|(name, _)| name)
            .collect()
    }

    /// Reject supplied fields longer than their column allows.
    fn check_lengths(&self) -> Result<(), DomainError> {
        let limits = [
            ("title", &self.title, TITLE_MAX_LEN),
            ("location", &self.location, LOCATION_MAX_LEN),
            ("action", &self.action, ACTION_MAX_LEN),
            ("material", &self.material, MATERIAL_MAX_LEN),
        ];

        for (name, value, max) in limits {
            if value.as_deref().is_some_and(|v| v.chars().count() > max) {
                return Err(DomainError::Validation(format!(
                    "Field '{name}' must be at most {max} characters"
                )));
            }
        }

        Ok(())
    }

    /// Names of the fields that were supplied but are blank.
    fn blank_supplied_fields(&self) -> Vec<&'static str> {
        self.fields()
            .into_iter()
            .filter(|(_, value)| value.is_some() && is_blank(value))
            .map(|(name, _)| name)
            .collect()
    }

    /// Validate a creation request.
    pub fn into_content(self) -> Result<ListingContent, DomainError> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(DomainError::missing_fields(&missing));
        }
        self.check_lengths()?;

        match self {
            ListingDraft {
                title: Some(title),
                description: Some(description),
                location: Some(location),
                action: Some(action),
                material: Some(material),
            } => Ok(ListingContent {
                title,
                description,
                location,
                action,
                material,
            }),
            _ => Err(DomainError::Internal(
                "listing draft passed validation with absent fields".to_string(),
            )),
        }
    }
}

impl Listing {
    /// Create a new listing with a fresh ID and creation timestamp.
    pub fn new(content: ListingContent, owner_id: Option<i32>, image_reference: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: content.title,
            description: content.description,
            location: content.location,
            action: content.action,
            material: content.material,
            image_reference,
            owner_id,
            created_at: Utc::now(),
        }
    }

    /// Apply a partial update. Omitted fields keep their value; supplied
    /// fields must not be blank. `id`, `owner_id` and `created_at` never change.
    pub fn apply(&mut self, draft: ListingDraft) -> Result<(), DomainError> {
        let blank = draft.blank_supplied_fields();
        if !blank.is_empty() {
            return Err(DomainError::Validation(format!(
                "Fields cannot be empty: {}",
                blank.join(", ")
            )));
        }
        draft.check_lengths()?;

        if let Some(title) = draft.title {
            self.title = title;
        }
        if let Some(description) = draft.description {
            self.description = description;
        }
        if let Some(location) = draft.location {
            self.location = location;
        }
        if let Some(action) = draft.action {
            self.action = action;
        }
        if let Some(material) = draft.material {
            self.material = material;
        }

        Ok(())
    }
}
