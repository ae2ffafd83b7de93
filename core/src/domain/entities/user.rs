//! User entity representing a registered TaskMaster account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Authority granted to a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    /// Regular account owning its own tasks
    User,
    /// Administrator
    Admin,
}

impl UserRole {
    /// Authority string as carried on the wire (`ROLE_USER`, `ROLE_ADMIN`)
    pub fn authority(&self) -> &'static str {
        match self {
            UserRole::User => "ROLE_USER",
            UserRole::Admin => "ROLE_ADMIN",
        }
    }

    /// Resolve a requested role. Accepts `admin`, `ROLE_ADMIN` and the same for
    /// `user`, case-insensitively; anything else, including an empty value,
    /// falls back to [`UserRole::User`].
    pub fn resolve(requested: Option<&str>) -> Self {
        let Some(raw) = requested.map(str::trim).filter(|r| !r.is_empty()) else {
            return UserRole::User;
        };

        let upper = raw.to_uppercase();
        let name = upper.strip_prefix("ROLE_").unwrap_or(&upper);
        match name {
            "ADMIN" => UserRole::Admin,
            _ => UserRole::User,
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.authority())
    }
}

/// User entity representing a registered user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    pub first_name: String,

    pub last_name: String,

    /// Login identity, stored lower-cased
    pub email: String,

    /// bcrypt hash of the password
    #[serde(skip_serializing)]
    pub password_hash: String,

    pub role: UserRole,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,

    /// Timestamp of the user's last login
    pub last_login_at: Option<DateTime<Utc>>,

    /// Whether the account may sign in
    pub is_active: bool,

    /// Whether the account is locked
    pub is_account_locked: bool,

    /// Soft-delete marker
    pub is_deleted: bool,
}

impl User {
    /// Creates a new active User instance
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
        role: UserRole,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: normalize_email(&email.into()),
            password_hash: password_hash.into(),
            role,
            created_at: now,
            updated_at: now,
            last_login_at: None,
            is_active: true,
            is_account_locked: false,
            is_deleted: false,
        }
    }

    /// Canonical identity string carried as a token subject
    pub fn subject(&self) -> String {
        self.id.to_string()
    }

    /// Roles granted to this user. Admins hold both authorities.
    pub fn roles(&self) -> Vec<UserRole> {
        match self.role {
            UserRole::Admin => vec![UserRole::Admin, UserRole::User],
            UserRole::User => vec![UserRole::User],
        }
    }

    /// Whether the account may authenticate
    pub fn can_authenticate(&self) -> bool {
        self.is_active && !self.is_account_locked && !self.is_deleted
    }

    /// Locks the user account
    pub fn lock(&mut self) {
        self.is_account_locked = true;
        self.updated_at = Utc::now();
    }

    /// Unlocks the user account
    pub fn unlock(&mut self) {
        self.is_account_locked = false;
        self.updated_at = Utc::now();
    }

    /// Soft-deletes the user
    pub fn soft_delete(&mut self) {
        self.is_deleted = true;
        self.updated_at = Utc::now();
    }

    /// Updates the last login timestamp
    pub fn update_last_login(&mut self) {
        let now = Utc::now();
        self.last_login_at = Some(now);
        self.updated_at = now;
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }
}

/// Emails compare case-insensitively
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
