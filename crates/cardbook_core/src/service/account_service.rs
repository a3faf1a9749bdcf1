//! Credential store and session state.
//!
//! # Responsibility
//! - Register accounts keyed by unique phone number.
//! - Authenticate by exact phone/password match.
//! - Persist, rehydrate and clear the current session.
//!
//! # Invariants
//! - No two stored accounts share a phone number.
//! - A rejected registration leaves `users` byte-for-byte unchanged.
//! - The session is never revalidated against `users`; a session whose
//!   account disappeared stays readable until `logout`.

use crate::model::account::{Account, AccountType, Session};
use crate::repo::keys::{SESSION_KEY, USERS_KEY};
use crate::repo::kv_repo::{read_json, write_json, KvRepository, RepoError, RepoResult};
use crate::service::clock::{now_millis, unique_time_token};
use log::{info, warn};
use mockable::{Clock, DefaultClock};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Registration and login failures.
#[derive(Debug)]
pub enum AuthError {
    /// An account with this phone number already exists.
    DuplicatePhone(String),
    /// No account matches the phone/password pair.
    InvalidCredentials,
    Repo(RepoError),
}

impl Display for AuthError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicatePhone(phone) => {
                write!(f, "an account with phone `{phone}` already exists")
            }
            Self::InvalidCredentials => write!(f, "invalid phone number or password"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AuthError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for AuthError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Account/session service over a key/value repository.
pub struct AccountService<R: KvRepository> {
    repo: R,
    clock: Arc<dyn Clock>,
}

impl<R: KvRepository> AccountService<R> {
    pub fn new(repo: R) -> Self {
        Self::with_clock(repo, Arc::new(DefaultClock))
    }

    pub fn with_clock(repo: R, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    /// Creates an account and makes it the current session.
    ///
    /// # Errors
    /// - `AuthError::DuplicatePhone` when `phone` is already registered.
    pub fn register(
        &self,
        phone: &str,
        password: &str,
        name: &str,
        account_type: AccountType,
    ) -> Result<Account, AuthError> {
        let mut accounts = self.list_accounts()?;
        if accounts.iter().any(|account| account.phone == phone) {
            warn!("event=account_register module=service status=rejected reason=duplicate_phone");
            return Err(AuthError::DuplicatePhone(phone.to_string()));
        }

        let now = now_millis(self.clock.as_ref()).timestamp_millis();
        let id = unique_time_token(now, |candidate| {
            accounts.iter().any(|account| account.id == candidate)
        });
        let account = Account::new(id, phone, password, name, account_type);
        accounts.push(account.clone());
        write_json(&self.repo, USERS_KEY, &accounts)?;
        self.store_session(&account)?;

        info!(
            "event=account_register module=service status=ok account_id={} account_type={}",
            account.id,
            account.account_type.as_str()
        );
        Ok(account)
    }

    /// Authenticates and makes the matching account the current session.
    ///
    /// # Errors
    /// - `AuthError::InvalidCredentials` unless both fields match exactly.
    pub fn login(&self, phone: &str, password: &str) -> Result<Account, AuthError> {
        let found = self
            .list_accounts()?
            .into_iter()
            .find(|account| account.phone == phone && account.password == password);

        let Some(account) = found else {
            warn!("event=account_login module=service status=rejected reason=invalid_credentials");
            return Err(AuthError::InvalidCredentials);
        };

        self.store_session(&account)?;
        info!(
            "event=account_login module=service status=ok account_id={}",
            account.id
        );
        Ok(account)
    }

    /// Returns the last persisted session, if any.
    pub fn current_session(&self) -> RepoResult<Option<Session>> {
        read_json(&self.repo, SESSION_KEY)
    }

    /// Clears the current session. Calling it without a session is a no-op.
    pub fn logout(&self) -> RepoResult<()> {
        if self.repo.remove(SESSION_KEY)? {
            info!("event=account_logout module=service status=ok");
        }
        Ok(())
    }

    /// Lists every registered account in registration order.
    pub fn list_accounts(&self) -> RepoResult<Vec<Account>> {
        Ok(read_json(&self.repo, USERS_KEY)?.unwrap_or_default())
    }

    pub fn find_by_id(&self, account_id: &str) -> RepoResult<Option<Account>> {
        Ok(self
            .list_accounts()?
            .into_iter()
            .find(|account| account.id == account_id))
    }

    /// Finds the first account whose public username matches exactly.
    pub fn find_by_username(&self, username: &str) -> RepoResult<Option<Account>> {
        Ok(self
            .list_accounts()?
            .into_iter()
            .find(|account| account.username == username))
    }

    fn store_session(&self, account: &Account) -> RepoResult<()> {
        write_json(&self.repo, SESSION_KEY, &account.session())
    }
}
