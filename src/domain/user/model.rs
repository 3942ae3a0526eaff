//! Staff user domain entity

use chrono::{DateTime, Utc};

/// Application role carried in the JWT
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserRole {
    /// Back-office administration
    Backoffice,
    /// Operates one or more stations
    StationOperator,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Backoffice => "Backoffice",
            Self::StationOperator => "StationOperator",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Backoffice" => Some(Self::Backoffice),
            "StationOperator" => Some(Self::StationOperator),
            _ => None,
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Staff account
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID
    pub id: String,
    /// Unique login email
    pub email: String,
    /// bcrypt hash; never exposed through the API
    pub password_hash: String,
    pub full_name: String,
    pub role: UserRole,
    /// Disabled accounts cannot log in
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    /// Store revision, bumped on every replace
    pub version: u64,
}

impl User {
    pub fn new(
        id: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
        full_name: impl Into<String>,
        role: UserRole,
    ) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            full_name: full_name.into(),
            role,
            is_active: true,
            created_at: Utc::now(),
            version: 0,
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_user_is_active() {
        let u = User::new("u-1", "ops@evcharge.lk", "$2b$12$hash", "Ops", UserRole::Backoffice);
        assert!(u.is_active);
        assert_eq!(u.role, UserRole::Backoffice);
    }

    #[test]
    fn role_parse_roundtrip() {
        for role in &[UserRole::Backoffice, UserRole::StationOperator] {
            assert_eq!(UserRole::parse(role.as_str()), Some(*role));
        }
        assert_eq!(UserRole::parse("admin"), None);
    }
}
