//! Value objects shared across entities

mod college;

pub use college::{College, EnumParseError};
