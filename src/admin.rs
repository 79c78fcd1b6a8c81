use crate::account::{AccountStore, Role};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AdminError {
    #[error("Not authorized.")]
    NotAuthorized,
    #[error("User not found.")]
    UnknownUser,
    #[error("User '{0}' is already inactive.")]
    AlreadyInactive(String),
    #[error("User '{0}' is already active.")]
    AlreadyActive(String),
    #[error("Cannot deactivate '{0}': it is the last active admin.")]
    LastAdmin(String),
}

fn require_admin(actor_role: Role) -> Result<(), AdminError> {
    if actor_role != Role::Admin {
        return Err(AdminError::NotAuthorized);
    }
    Ok(())
}

/// Set a new password for the target account.
pub fn reset_password(
    store: &mut AccountStore,
    actor_role: Role,
    target: &str,
    new_password: &str,
) -> Result<(), AdminError> {
    require_admin(actor_role)?;
    let account = store.find_mut(target).ok_or(AdminError::UnknownUser)?;
    account.password = new_password.to_string();
    Ok(())
}

/// Disable the target account so it can no longer log in.
///
/// Refuses to disable the last active admin: with no delete operation,
/// deactivation is the only way the store could end up admin-less, and an
/// admin-less store would be unmanageable until the next bootstrap.
pub fn deactivate(store: &mut AccountStore, actor_role: Role, target: &str) -> Result<(), AdminError> {
    require_admin(actor_role)?;
    let (target_is_admin, target_active) = match store.find(target) {
        Some(a) => (a.is_admin(), a.active),
        None => return Err(AdminError::UnknownUser),
    };
    if !target_active {
        return Err(AdminError::AlreadyInactive(target.to_string()));
    }
    if target_is_admin && store.active_admin_count() == 1 {
        return Err(AdminError::LastAdmin(target.to_string()));
    }
    if let Some(account) = store.find_mut(target) {
        account.active = false;
    }
    Ok(())
}

/// Re-enable a previously disabled account.
pub fn reactivate(store: &mut AccountStore, actor_role: Role, target: &str) -> Result<(), AdminError> {
    require_admin(actor_role)?;
    let account = store.find_mut(target).ok_or(AdminError::UnknownUser)?;
    if account.active {
        return Err(AdminError::AlreadyActive(target.to_string()));
    }
    account.active = true;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::authenticate;

    fn store() -> AccountStore {
        let mut store = AccountStore::new();
        store.create("admin", "admin123", Role::Admin).unwrap();
        store.create("bob", "pw1", Role::Standard).unwrap();
        store
    }

    #[test]
    fn test_non_admin_actor_is_refused() {
        let mut s = store();
        assert_eq!(
            reset_password(&mut s, Role::Standard, "bob", "new"),
            Err(AdminError::NotAuthorized)
        );
        assert_eq!(
            deactivate(&mut s, Role::Standard, "bob"),
            Err(AdminError::NotAuthorized)
        );
        assert_eq!(
            reactivate(&mut s, Role::Standard, "bob"),
            Err(AdminError::NotAuthorized)
        );
        assert_eq!(s.find("bob").unwrap().password, "pw1");
    }

    #[test]
    fn test_reset_password_then_login() {
        let mut s = store();
        reset_password(&mut s, Role::Admin, "bob", "newpw").unwrap();
        let account = authenticate(&mut s, "bob", "newpw").unwrap();
        assert_eq!(account.login_count, 1);
    }

    #[test]
    fn test_reset_password_unknown_target() {
        let mut s = store();
        assert_eq!(
            reset_password(&mut s, Role::Admin, "ghost", "new"),
            Err(AdminError::UnknownUser)
        );
    }

    #[test]
    fn test_deactivate_and_reactivate() {
        let mut s = store();
        deactivate(&mut s, Role::Admin, "bob").unwrap();
        assert!(!s.find("bob").unwrap().active);
        assert_eq!(
            deactivate(&mut s, Role::Admin, "bob"),
            Err(AdminError::AlreadyInactive("bob".to_string()))
        );
        reactivate(&mut s, Role::Admin, "bob").unwrap();
        assert!(s.find("bob").unwrap().active);
        assert_eq!(
            reactivate(&mut s, Role::Admin, "bob"),
            Err(AdminError::AlreadyActive("bob".to_string()))
        );
    }

    #[test]
    fn test_last_active_admin_cannot_be_deactivated() {
        let mut s = store();
        assert_eq!(
            deactivate(&mut s, Role::Admin, "admin"),
            Err(AdminError::LastAdmin("admin".to_string()))
        );
        assert!(s.find("admin").unwrap().active);
    }

    #[test]
    fn test_admin_may_be_deactivated_when_another_remains() {
        let mut s = store();
        s.create("root", "pw", Role::Admin).unwrap();
        deactivate(&mut s, Role::Admin, "admin").unwrap();
        assert!(!s.find("admin").unwrap().active);
        assert_eq!(s.active_admin_count(), 1);
        // Now "root" is the last one standing.
        assert_eq!(
            deactivate(&mut s, Role::Admin, "root"),
            Err(AdminError::LastAdmin("root".to_string()))
        );
    }
}
