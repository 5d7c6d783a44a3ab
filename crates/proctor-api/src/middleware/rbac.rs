//! Role checks for route guarding.

use proctor_core::error::AppError;
use proctor_entity::user::UserRole;

use crate::extractors::AuthUser;

/// Checks that the authenticated user holds `role`.
pub fn require_role(auth: &AuthUser, role: UserRole) -> Result<(), AppError> {
    if auth.role != role {
        return Err(AppError::authorization(format!("{} access required", role)));
    }
    Ok(())
}

/// Checks that the authenticated user is an invigilator.
pub fn require_invigilator(auth: &AuthUser) -> Result<(), AppError> {
    require_role(auth, UserRole::Invigilator)
}
