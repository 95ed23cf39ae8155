//! Registration input checks shared by the service layer
//!
//! These rules sit outside the `validator` derive because they depend on
//! runtime configuration (the email domain allow-list) or apply across
//! fields (the interests minimum).

use campus_core::DomainError;

/// Minimum password length accepted at registration
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// When interests are supplied at all, at least this many are required
pub const MIN_INTERESTS: usize = 3;

/// Check that an email's domain ends with one of the allowed domains
///
/// # Errors
/// Returns `DomainError::EmailDomainNotAllowed` on a foreign domain and
/// `DomainError::ValidationError` when the address has no domain part.
pub fn validate_email_domain(email: &str, allowed_domains: &[String]) -> Result<(), DomainError> {
    let domain = email
        .rsplit_once('@')
        .map(|(_, domain)| domain)
        .filter(|d| !d.is_empty())
        .ok_or_else(|| DomainError::ValidationError("Invalid email format".to_string()))?;

    if allowed_domains.iter().any(|allowed| domain.ends_with(allowed)) {
        Ok(())
    } else {
        Err(DomainError::EmailDomainNotAllowed(domain.to_string()))
    }
}

/// Check the minimum password length
///
/// # Errors
/// Returns `DomainError::WeakPassword` for passwords under the minimum.
pub fn validate_password_strength(password: &str) -> Result<(), DomainError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(DomainError::WeakPassword(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}

/// An empty interests list is fine; a non-empty one must have at least
/// `MIN_INTERESTS` entries.
///
/// # Errors
/// Returns `DomainError::TooFewInterests` for a short non-empty list.
pub fn validate_interests(interests: &[String]) -> Result<(), DomainError> {
    if !interests.is_empty() && interests.len() < MIN_INTERESTS {
        return Err(DomainError::TooFewInterests { min: MIN_INTERESTS });
    }
    Ok(())
}
