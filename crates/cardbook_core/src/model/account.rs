//! Account and session model.
//!
//! # Responsibility
//! - Define registered accounts and their public session projection.
//! - Derive the public username from a phone number.
//!
//! # Invariants
//! - `username` is always the digits-only form of `phone`.
//! - `Session` never carries the password.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Formatter};

static NON_DIGIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\D").expect("valid non-digit regex"));

/// Stable account identifier (decimal epoch-millisecond token).
pub type AccountId = String;

/// Kind of entity behind an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    /// A single person.
    #[serde(alias = "user")]
    Individual,
    /// A company or other organization.
    #[serde(alias = "company")]
    Organization,
}

impl AccountType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Individual => "individual",
            Self::Organization => "organization",
        }
    }

    /// Human label used by gallery badges.
    pub fn label(self) -> &'static str {
        match self {
            Self::Individual => "Individual",
            Self::Organization => "Company",
        }
    }

    /// Parses both the current and the legacy (`user`/`company`) spellings.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "individual" | "user" => Some(Self::Individual),
            "organization" | "company" => Some(Self::Organization),
            _ => None,
        }
    }
}

/// Registered account, including its opaque password.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    /// Unique key of the credential store.
    pub phone: String,
    /// Stored as entered. Hashing is out of scope for this store.
    pub password: String,
    pub name: String,
    #[serde(rename = "type")]
    pub account_type: AccountType,
    pub username: String,
}

impl Account {
    /// Builds an account and derives its username from `phone`.
    pub fn new(
        id: impl Into<AccountId>,
        phone: impl Into<String>,
        password: impl Into<String>,
        name: impl Into<String>,
        account_type: AccountType,
    ) -> Self {
        let phone = phone.into();
        let username = username_from_phone(&phone);
        Self {
            id: id.into(),
            phone,
            password: password.into(),
            name: name.into(),
            account_type,
            username,
        }
    }

    /// Returns the public projection stored as the current session.
    pub fn session(&self) -> Session {
        Session {
            id: self.id.clone(),
            phone: self.phone.clone(),
            name: self.name.clone(),
            account_type: self.account_type,
            username: self.username.clone(),
        }
    }
}

impl Debug for Account {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("phone", &self.phone)
            .field("password", &"<redacted>")
            .field("name", &self.name)
            .field("account_type", &self.account_type)
            .field("username", &self.username)
            .finish()
    }
}

/// Public projection of the authenticated account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: AccountId,
    pub phone: String,
    pub name: String,
    #[serde(rename = "type")]
    pub account_type: AccountType,
    pub username: String,
}

/// Strips every non-digit character from a phone number.
///
/// `"+1 (555) 010-2000"` becomes `"15550102000"`.
pub fn username_from_phone(phone: &str) -> String {
    NON_DIGIT_RE.replace_all(phone, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::{username_from_phone, Account, AccountType};

    #[test]
    fn username_keeps_digits_only() {
        assert_eq!(username_from_phone("+1 (555) 010-2000"), "15550102000");
        assert_eq!(username_from_phone("no digits"), "");
    }

    #[test]
    fn session_projection_drops_password() {
        let account = Account::new("1", "555-0100", "hunter2", "Ada", AccountType::Individual);
        let json = serde_json::to_string(&account.session()).unwrap();
        assert!(!json.contains("hunter2"));
        assert!(json.contains("\"username\":\"5550100\""));
        assert!(json.contains("\"type\":\"individual\""));
    }

    #[test]
    fn debug_output_redacts_password() {
        let account = Account::new("1", "555", "hunter2", "Ada", AccountType::Individual);
        assert!(!format!("{account:?}").contains("hunter2"));
    }

    #[test]
    fn legacy_account_type_spellings_are_accepted() {
        let company: AccountType = serde_json::from_str("\"company\"").unwrap();
        assert_eq!(company, AccountType::Organization);
        assert_eq!(AccountType::parse("User"), Some(AccountType::Individual));
        assert_eq!(AccountType::parse("robot"), None);
    }
}
