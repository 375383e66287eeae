use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

/// A todo item as stored and as returned by the API.
///
/// `owner_id` is fixed at creation time from the authenticated caller and is never
/// part of an update payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    /// Store-generated identifier. Never reused after deletion.
    pub id: i32,
    /// Identifier of the user who owns the item.
    pub owner_id: i32,
    pub title: String,
    pub detail: Option<String>,
    /// `false` while the item is active, `true` once completed.
    pub done: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Todo {
    /// Field-by-field merge: only the fields present in `changes` are replaced.
    pub fn apply(&mut self, changes: &TodoChanges) {
        if let Some(title) = &changes.title {
            self.title = title.clone();
        }
        if let Some(detail) = &changes.detail {
            self.detail = Some(detail.clone());
        }
        if let Some(done) = changes.done {
            self.done = done;
        }
        self.updated_at = Utc::now();
    }
}

/// Payload for `POST /todos`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewTodo {
    /// Required and must not be empty.
    #[validate(length(min = 1, message = "title must be a non-empty string"))]
    pub title: String,
    pub detail: Option<String>,
    /// Initial state; the item starts active when omitted.
    pub done: Option<bool>,
}

/// Payload for `PATCH /todos/{id}`. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_has_changes", skip_on_field_errors = false))]
pub struct TodoChanges {
    /// Any string, including an empty one; only creation requires a non-empty title.
    pub title: Option<String>,
    pub detail: Option<String>,
    pub done: Option<bool>,
}

impl TodoChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.detail.is_none() && self.done.is_none()
    }
}

fn validate_has_changes(changes: &TodoChanges) -> Result<(), ValidationError> {
    if changes.is_empty() {
        let mut err = ValidationError::new("empty_update");
        err.message = Some("at least one of title, detail or done must be provided".into());
        return Err(err);
    }
    Ok(())
}
