//! User entity - a registered member of the campus platform

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::value_objects::{College, EnumParseError};

/// Account role, used for ownership-check bypass and profile badges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    Student,
    Creator,
    Business,
    Club,
    Faculty,
    Admin,
}

impl UserRole {
    /// Get the canonical string form used in storage and on the wire
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "Student",
            Self::Creator => "Creator",
            Self::Business => "Business",
            Self::Club => "Club",
            Self::Faculty => "Faculty",
            Self::Admin => "Admin",
        }
    }
}

impl Default for UserRole {
    fn default() -> Self {
        Self::Student
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = EnumParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Student" => Ok(Self::Student),
            "Creator" => Ok(Self::Creator),
            "Business" => Ok(Self::Business),
            "Club" => Ok(Self::Club),
            "Faculty" => Ok(Self::Faculty),
            "Admin" => Ok(Self::Admin),
            other => Err(EnumParseError::new("user role", other)),
        }
    }
}

/// User entity
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub display_name: String,
    pub role: UserRole,
    pub avatar_url: Option<String>,
    pub college: College,
    pub department: String,
    pub bio: Option<String>,
    pub is_verified: bool,
    pub interests: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl User {
    /// Check if this account carries platform-admin privileges
    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// Derive a username from an email's local part
    #[must_use]
    pub fn username_from_email(email: &str) -> String {
        email.split('@').next().unwrap_or(email).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user(role: UserRole) -> User {
        User {
            id: Uuid::new_v4(),
            username: "jdoe".to_string(),
            email: "jdoe@stu.cu.edu.ng".to_string(),
            display_name: "Jane Doe".to_string(),
            role,
            avatar_url: None,
            college: College::Cst,
            department: "Computer Science".to_string(),
            bio: None,
            is_verified: false,
            interests: vec![],
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[test]
    fn test_is_admin() {
        assert!(sample_user(UserRole::Admin).is_admin());
        assert!(!sample_user(UserRole::Student).is_admin());
        assert!(!sample_user(UserRole::Faculty).is_admin());
    }

    #[test]
    fn test_username_from_email() {
        assert_eq!(User::username_from_email("alice@stu.cu.edu.ng"), "alice");
        assert_eq!(User::username_from_email("no-at-sign"), "no-at-sign");
    }

    #[test]
    fn test_role_round_trip() {
        for role in [
            UserRole::Student,
            UserRole::Creator,
            UserRole::Business,
            UserRole::Club,
            UserRole::Faculty,
            UserRole::Admin,
        ] {
            assert_eq!(role.as_str().parse::<UserRole>().unwrap(), role);
        }
        assert!("Professor".parse::<UserRole>().is_err());
    }
}
