//! College value object
//!
//! The institution's colleges. `Global` targets every college at once.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// College identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum College {
    #[serde(rename = "COE")]
    Coe,
    #[serde(rename = "CST")]
    Cst,
    #[serde(rename = "CMSS")]
    Cmss,
    #[serde(rename = "CLDS")]
    Clds,
    #[serde(rename = "GLOBAL")]
    Global,
}

impl College {
    /// Get the canonical string form used in storage and on the wire
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Coe => "COE",
            Self::Cst => "CST",
            Self::Cmss => "CMSS",
            Self::Clds => "CLDS",
            Self::Global => "GLOBAL",
        }
    }
}

impl fmt::Display for College {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error when parsing a stored enum discriminant
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} value: {value}")]
pub struct EnumParseError {
    pub kind: &'static str,
    pub value: String,
}

impl EnumParseError {
    #[must_use]
    pub fn new(kind: &'static str, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}

impl FromStr for College {
    type Err = EnumParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "COE" => Ok(Self::Coe),
            "CST" => Ok(Self::Cst),
            "CMSS" => Ok(Self::Cmss),
            "CLDS" => Ok(Self::Clds),
            "GLOBAL" => Ok(Self::Global),
            other => Err(EnumParseError::new("college", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        for college in [
            College::Coe,
            College::Cst,
            College::Cmss,
            College::Clds,
            College::Global,
        ] {
            assert_eq!(college.as_str().parse::<College>().unwrap(), college);
        }
    }

    #[test]
    fn test_parse_unknown() {
        let err = "ENG".parse::<College>().unwrap_err();
        assert_eq!(err.kind, "college");
        assert_eq!(err.value, "ENG");
    }

    #[test]
    fn test_serde_uses_uppercase() {
        let json = serde_json::to_string(&College::Cst).unwrap();
        assert_eq!(json, "\"CST\"");

        let parsed: College = serde_json::from_str("\"GLOBAL\"").unwrap();
        assert_eq!(parsed, College::Global);
    }
}
