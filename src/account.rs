use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Role tag on an account. Persisted as the `type` discriminator so the
/// data file stays compatible across reloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "User")]
    Standard,
    #[serde(rename = "AdminUser")]
    Admin,
}

impl Role {
    pub fn label(&self) -> &'static str {
        match self {
            Role::Standard => "User",
            Role::Admin => "Admin",
        }
    }
}

/// One user account: credentials, activation state, and a login counter.
///
/// Passwords are stored and compared as plain text. That is a documented
/// property of the data format, not an oversight; changing it would break
/// existing data files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    #[serde(rename = "type")]
    pub role: Role,
    pub username: String,
    pub password: String,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub login_count: u64,
}

fn default_active() -> bool {
    true
}

impl Account {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Username already exists.")]
    DuplicateUsername(String),
}

/// In-memory collection of accounts, in insertion order. Owns every record
/// for the process lifetime; services borrow it per operation.
#[derive(Debug, Default)]
pub struct AccountStore {
    accounts: Vec<Account>,
}

impl AccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from records loaded off disk. Rejects duplicate
    /// usernames so the uniqueness invariant holds from startup.
    pub fn from_accounts(accounts: Vec<Account>) -> Result<Self, StoreError> {
        let mut store = Self::new();
        for account in accounts {
            if store.find(&account.username).is_some() {
                return Err(StoreError::DuplicateUsername(account.username));
            }
            store.accounts.push(account);
        }
        Ok(store)
    }

    /// Insert a new account. Usernames are matched case-sensitively.
    pub fn create(
        &mut self,
        username: &str,
        password: &str,
        role: Role,
    ) -> Result<&Account, StoreError> {
        if self.find(username).is_some() {
            return Err(StoreError::DuplicateUsername(username.to_string()));
        }
        self.accounts.push(Account {
            role,
            username: username.to_string(),
            password: password.to_string(),
            active: true,
            login_count: 0,
        });
        Ok(&self.accounts[self.accounts.len() - 1])
    }

    pub fn find(&self, username: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.username == username)
    }

    pub fn find_mut(&mut self, username: &str) -> Option<&mut Account> {
        self.accounts.iter_mut().find(|a| a.username == username)
    }

    /// All accounts in insertion order, for listing and persistence.
    pub fn list(&self) -> &[Account] {
        &self.accounts
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn has_admin(&self) -> bool {
        self.accounts.iter().any(Account::is_admin)
    }

    /// Number of admin accounts that can currently authenticate.
    pub fn active_admin_count(&self) -> usize {
        self.accounts
            .iter()
            .filter(|a| a.is_admin() && a.active)
            .count()
    }
}
