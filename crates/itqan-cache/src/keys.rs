//! Cache key builders.
//!
//! All keys are namespaced under `itqan:` so that `delete_pattern` can
//! target a whole family without touching unrelated entries.

use uuid::Uuid;

/// Key for the published course list.
pub fn course_list() -> String {
    "itqan:courses:published".to_string()
}

/// Key for the full course list (admin view).
pub fn course_list_all() -> String {
    "itqan:courses:all".to_string()
}

/// Key for a user's enrollment list.
pub fn enrollments(user_id: Uuid) -> String {
    format!("itqan:enrollments:{user_id}")
}

/// Key for a user's personal notification ledger.
pub fn personal_ledger(user_id: Uuid) -> String {
    format!("itqan:ledger:user:{user_id}")
}

/// Key for the global notification ledger.
pub fn global_ledger() -> String {
    "itqan:ledger:global".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_namespaced() {
        let user = Uuid::new_v4();
        assert!(enrollments(user).starts_with("itqan:enrollments:"));
        assert!(personal_ledger(user).starts_with("itqan:ledger:user:"));
        assert!(global_ledger().starts_with("itqan:ledger:"));
    }
}
