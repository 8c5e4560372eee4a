//! Pure access derivation.
//!
//! Given a fixed enrollment table state, access is a pure function of
//! (enrollment existence, user role, super-admin email match). It is
//! independent of any hint event the client may have seen — hints only
//! exist to refresh this derivation sooner.

use itqan_entity::user::User;

/// Evaluates whether a user may access a course.
#[derive(Debug, Clone)]
pub struct AccessPolicy {
    /// Email granted access to every course regardless of enrollment.
    super_admin_email: String,
}

impl AccessPolicy {
    /// Creates a policy with the configured super-admin email.
    pub fn new(super_admin_email: impl Into<String>) -> Self {
        Self {
            super_admin_email: super_admin_email.into(),
        }
    }

    /// Whether the user's email matches the super-admin bypass.
    pub fn is_super_admin(&self, user: &User) -> bool {
        !self.super_admin_email.is_empty()
            && user.email.eq_ignore_ascii_case(&self.super_admin_email)
    }

    /// Derives access from enrollment existence plus the two bypasses:
    /// users with the ADMIN role (course preview from admin tooling) and
    /// the hardcoded super-admin identity.
    pub fn has_access(&self, user: &User, enrolled: bool) -> bool {
        enrolled || user.is_admin() || self.is_super_admin(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use itqan_entity::user::UserRole;
    use uuid::Uuid;

    fn make_user(email: &str, role: UserRole) -> User {
        User {
            id: Uuid::new_v4(),
            name: "Ahmed Osman".to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
            role,
            profile_image: None,
            cover_image: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_enrollment_grants_access() {
        let policy = AccessPolicy::new("owner@itqan.academy");
        let student = make_user("student@example.com", UserRole::Student);

        assert!(policy.has_access(&student, true));
        assert!(!policy.has_access(&student, false));
    }

    #[test]
    fn test_admin_role_bypass() {
        let policy = AccessPolicy::new("owner@itqan.academy");
        let admin = make_user("staff@example.com", UserRole::Admin);
        assert!(policy.has_access(&admin, false));
    }

    #[test]
    fn test_super_admin_bypass_is_case_insensitive() {
        let policy = AccessPolicy::new("owner@itqan.academy");
        let owner = make_user("Owner@Itqan.Academy", UserRole::Student);
        assert!(policy.has_access(&owner, false));
    }

    #[test]
    fn test_empty_super_admin_email_matches_nobody() {
        let policy = AccessPolicy::new("");
        let student = make_user("", UserRole::Student);
        assert!(!policy.has_access(&student, false));
    }
}
