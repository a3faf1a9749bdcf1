//! Persisted key layout.
//!
//! | Key | Value |
//! |---|---|
//! | `users` | list of accounts, passwords included |
//! | `user` | current session projection |
//! | `personalData_<accountId>` | personal form |
//! | `professionalData_<accountId>` | professional form |
//! | `businessCards_<accountId>` | ordered card list |

/// Registered accounts.
pub const USERS_KEY: &str = "users";
/// Current session.
pub const SESSION_KEY: &str = "user";

const PERSONAL_PREFIX: &str = "personalData_";
const PROFESSIONAL_PREFIX: &str = "professionalData_";
const CARDS_PREFIX: &str = "businessCards_";

pub fn personal_key(account_id: &str) -> String {
    format!("{PERSONAL_PREFIX}{account_id}")
}

pub fn professional_key(account_id: &str) -> String {
    format!("{PROFESSIONAL_PREFIX}{account_id}")
}

pub fn cards_key(account_id: &str) -> String {
    format!("{CARDS_PREFIX}{account_id}")
}

#[cfg(test)]
mod tests {
    use super::{cards_key, personal_key, professional_key};

    #[test]
    fn per_account_keys_append_the_account_id() {
        assert_eq!(personal_key("17"), "personalData_17");
        assert_eq!(professional_key("17"), "professionalData_17");
        assert_eq!(cards_key("17"), "businessCards_17");
    }
}
