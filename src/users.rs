//! User accounts: record shape, request inputs, list filters, and uniqueness rules.
//!
//! E-mail addresses and usernames must be unique among the users that currently exist. Matching
//! is exact and case-sensitive. Passwords are validated on the way in and then dropped; they are
//! never stored or returned.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::store::{Patch, Record, ResourceStore, StoreError};
use crate::validation::{Normalize, trim, trim_opt};

/// Store holding every user account.
pub type UserStore = ResourceStore<User>;

pub(crate) const EMAIL_TAKEN: &str = "Email already registered";
pub(crate) const USERNAME_TAKEN: &str = "Username already taken";

/// A stored user account.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct User {
    /// Unique user identifier.
    #[schema(example = 1)]
    pub id: u64,
    /// E-mail address, unique across users.
    #[schema(example = "john.doe@example.com")]
    pub email: String,
    /// Username, unique across users.
    #[schema(example = "john_doe")]
    pub username: String,
    /// Optional display name.
    #[schema(example = "John Doe")]
    pub full_name: Option<String>,
    /// Whether the account is active.
    pub is_active: bool,
    /// Creation time; never changes.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// Time of the most recent update, `null` until the first one.
    #[serde(with = "time::serde::rfc3339::option")]
    pub updated_at: Option<OffsetDateTime>,
}

/// Registration payload for a new user.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct NewUser {
    /// E-mail address (must be a valid address).
    #[validate(email(message = "value is not a valid email address"))]
    #[schema(example = "john.doe@example.com")]
    pub email: String,
    /// Username (3-50 characters).
    #[validate(length(min = 3, max = 50))]
    #[schema(example = "john_doe", min_length = 3, max_length = 50)]
    pub username: String,
    /// Optional display name (at most 100 characters).
    #[serde(default)]
    #[validate(length(max = 100))]
    #[schema(example = "John Doe", max_length = 100)]
    pub full_name: Option<String>,
    /// Whether the account starts active.
    #[serde(default = "default_active")]
    #[schema(default = true)]
    pub is_active: bool,
    /// Password (8-128 characters). Accepted but never stored.
    #[validate(length(min = 8, max = 128))]
    #[schema(write_only, example = "securepassword123", min_length = 8, max_length = 128)]
    pub password: String,
}

fn default_active() -> bool {
    true
}

impl Normalize for NewUser {
    fn normalize(self) -> Self {
        Self {
            email: trim(self.email),
            username: trim(self.username),
            full_name: trim_opt(self.full_name),
            is_active: self.is_active,
            password: trim(self.password),
        }
    }
}

/// Partial update for a user; only supplied fields change.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UserChanges {
    /// New e-mail address.
    #[serde(default)]
    #[validate(custom(function = "crate::validation::email_patch"))]
    #[schema(value_type = String, required = false)]
    pub email: Patch<String>,
    /// New username.
    #[serde(default)]
    #[validate(custom(function = "crate::validation::username_patch"))]
    #[schema(value_type = String, required = false, min_length = 3, max_length = 50)]
    pub username: Patch<String>,
    /// New display name; `null` clears it.
    #[serde(default)]
    #[validate(custom(function = "crate::validation::full_name_patch"))]
    #[schema(value_type = Option<String>, required = false, max_length = 100)]
    pub full_name: Patch<Option<String>>,
    /// New active flag.
    #[serde(default)]
    #[schema(value_type = bool, required = false)]
    pub is_active: Patch<bool>,
    /// New password. Accepted but never stored.
    #[serde(default)]
    #[validate(custom(function = "crate::validation::password_patch"))]
    #[schema(value_type = String, required = false, write_only)]
    pub password: Patch<String>,
}

impl Normalize for UserChanges {
    fn normalize(self) -> Self {
        Self {
            email: self.email.map(trim),
            username: self.username.map(trim),
            full_name: self.full_name.map(trim_opt),
            is_active: self.is_active,
            password: self.password.map(trim),
        }
    }
}

/// Optional predicates for listing users; present ones are combined with AND.
#[derive(Debug, Clone, Default, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserFilter {
    /// Only users with this active flag.
    pub is_active: Option<bool>,
    /// Only users whose e-mail contains this text (case-insensitive).
    #[validate(length(min = 1, max = 100))]
    pub email_contains: Option<String>,
    /// Only users whose username contains this text (case-insensitive).
    #[validate(length(min = 1, max = 50))]
    pub username_contains: Option<String>,
}

impl Normalize for UserFilter {
    fn normalize(self) -> Self {
        self
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

impl Record for User {
    type Draft = NewUser;
    type Changes = UserChanges;
    type Criteria = UserFilter;

    const KIND: &'static str = "User";

    fn id(&self) -> u64 {
        self.id
    }

    fn create(id: u64, draft: NewUser, created_at: OffsetDateTime) -> Self {
        let NewUser {
            email,
            username,
            full_name,
            is_active,
            password: _,
        } = draft;
        Self {
            id,
            email,
            username,
            full_name,
            is_active,
            created_at,
            updated_at: None,
        }
    }

    fn apply(&mut self, changes: UserChanges) {
        let UserChanges {
            email,
            username,
            full_name,
            is_active,
            password,
        } = changes;
        email.apply_to(&mut self.email);
        username.apply_to(&mut self.username);
        full_name.apply_to(&mut self.full_name);
        is_active.apply_to(&mut self.is_active);
        if password.is_present() {
            tracing::debug!(id = self.id, "Discarding supplied password");
        }
    }

    fn touch(&mut self, updated_at: OffsetDateTime) {
        self.updated_at = Some(updated_at);
    }

    fn matches(&self, criteria: &UserFilter) -> bool {
        criteria
            .is_active
            .is_none_or(|active| self.is_active == active)
            && criteria
                .email_contains
                .as_deref()
                .is_none_or(|needle| contains_ignore_case(&self.email, needle))
            && criteria
                .username_contains
                .as_deref()
                .is_none_or(|needle| contains_ignore_case(&self.username, needle))
    }

    fn check_draft(
        draft: &NewUser,
        existing: &mut dyn Iterator<Item = &Self>,
    ) -> Result<(), StoreError> {
        for user in existing {
            if user.email == draft.email {
                return Err(StoreError::conflict(EMAIL_TAKEN));
            }
            if user.username == draft.username {
                return Err(StoreError::conflict(USERNAME_TAKEN));
            }
        }
        Ok(())
    }

    fn check_changes(
        changes: &UserChanges,
        others: &mut dyn Iterator<Item = &Self>,
    ) -> Result<(), StoreError> {
        let others: Vec<&User> = others.collect();
        if let Some(email) = changes.email.as_present() {
            if others.iter().any(|user| &user.email == email) {
                return Err(StoreError::conflict(EMAIL_TAKEN));
            }
        }
        if let Some(username) = changes.username.as_present() {
            if others.iter().any(|user| &user.username == username) {
                return Err(StoreError::conflict(USERNAME_TAKEN));
            }
        }
        Ok(())
    }
}
