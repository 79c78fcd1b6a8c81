use crate::account::{Account, AccountStore};
use thiserror::Error;

/// Why a login attempt was refused. Display strings double as the
/// user-facing messages, which stay deliberately terse.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("User not found.")]
    UnknownUser,
    #[error("Invalid credentials.")]
    WrongPassword,
    #[error("Account disabled.")]
    AccountDisabled,
}

/// Validate a username/password pair against the store.
///
/// The activation check runs before the password comparison so a disabled
/// account reports "Account disabled." whether or not the password was
/// right. On success the account's login counter goes up by one; every
/// failure path leaves it untouched.
pub fn authenticate<'a>(
    store: &'a mut AccountStore,
    username: &str,
    password: &str,
) -> Result<&'a Account, AuthError> {
    let account = store.find_mut(username).ok_or(AuthError::UnknownUser)?;
    if !account.active {
        return Err(AuthError::AccountDisabled);
    }
    if account.password != password {
        return Err(AuthError::WrongPassword);
    }
    account.login_count += 1;
    Ok(account)
}
