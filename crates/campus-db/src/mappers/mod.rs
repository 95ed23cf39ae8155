//! Model to entity mappers
//!
//! This module provides conversions from database rows (models) to domain
//! entities. Enum discriminants are stored as TEXT, so the conversions are
//! fallible: an unknown discriminant surfaces as a `DomainError` instead of
//! silently defaulting.

mod comment;
mod community;
mod notification;
mod post;
mod user;

pub use community::member_profile_from_model;

use campus_core::error::DomainError;
use campus_core::value_objects::EnumParseError;

/// Convert a stored enum discriminant error into a domain error
pub(crate) fn corrupt_enum(err: EnumParseError) -> DomainError {
    DomainError::InternalError(err.to_string())
}
