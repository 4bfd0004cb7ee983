//! Role name constants matching the `users.role` CHECK constraint.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_STAFF: &str = "staff";

/// All assignable roles.
pub const VALID_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_STAFF];

/// Validate that `role` is one of [`VALID_ROLES`].
pub fn validate_role(role: &str) -> Result<(), String> {
    if VALID_ROLES.contains(&role) {
        Ok(())
    } else {
        Err(format!(
            "Invalid role '{role}'. Must be one of: {}",
            VALID_ROLES.join(", ")
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_roles_are_valid() {
        assert!(validate_role(ROLE_ADMIN).is_ok());
        assert!(validate_role(ROLE_STAFF).is_ok());
    }

    #[test]
    fn unknown_role_is_rejected() {
        let err = validate_role("client").unwrap_err();
        assert!(err.contains("admin, staff"));
    }
}
