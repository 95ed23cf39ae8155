//! Community entity and membership
//!
//! `member_count` is denormalized: it is seeded to 1 when the community is
//! created (the creator is auto-joined as admin) and only ever adjusted by
//! the join/leave operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::value_objects::EnumParseError;

/// Community category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommunityType {
    Academic,
    Interest,
    Official,
}

impl CommunityType {
    /// Get the canonical string form used in storage and on the wire
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Academic => "ACADEMIC",
            Self::Interest => "INTEREST",
            Self::Official => "OFFICIAL",
        }
    }
}

impl fmt::Display for CommunityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommunityType {
    type Err = EnumParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACADEMIC" => Ok(Self::Academic),
            "INTEREST" => Ok(Self::Interest),
            "OFFICIAL" => Ok(Self::Official),
            other => Err(EnumParseError::new("community type", other)),
        }
    }
}

/// Community entity
#[derive(Debug, Clone, PartialEq)]
pub struct Community {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub member_count: i32,
    pub community_type: CommunityType,
    pub image_url: Option<String>,
    pub college: Option<String>,
    pub creator_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Community {
    /// Check if a user is the community creator
    #[inline]
    pub fn is_creator(&self, user_id: Uuid) -> bool {
        self.creator_id == user_id
    }
}

/// Membership association row, unique per (community, user)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommunityMember {
    pub id: Uuid,
    pub community_id: Uuid,
    pub user_id: Uuid,
    pub is_admin: bool,
    pub joined_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_creator() {
        let creator_id = Uuid::new_v4();
        let now = Utc::now();
        let community = Community {
            id: Uuid::new_v4(),
            name: "Robotics Club".to_string(),
            description: "Build robots".to_string(),
            member_count: 1,
            community_type: CommunityType::Interest,
            image_url: None,
            college: None,
            creator_id,
            created_at: now,
            updated_at: now,
        };
        assert!(community.is_creator(creator_id));
        assert!(!community.is_creator(Uuid::new_v4()));
    }

    #[test]
    fn test_type_round_trip() {
        for ty in [
            CommunityType::Academic,
            CommunityType::Interest,
            CommunityType::Official,
        ] {
            assert_eq!(ty.as_str().parse::<CommunityType>().unwrap(), ty);
        }
        assert!("SOCIAL".parse::<CommunityType>().is_err());
    }
}
