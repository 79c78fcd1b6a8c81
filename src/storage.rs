use crate::account::{Account, AccountStore, Role};
use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

pub const DEFAULT_ADMIN_USER: &str = "admin";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// Load the store from a JSON file. A missing file yields an empty store;
/// anything unparseable is fatal so persisted counters are never silently
/// dropped.
pub fn load(path: &Path) -> Result<AccountStore> {
    if !path.exists() {
        return Ok(AccountStore::new());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let accounts: Vec<Account> = serde_json::from_str(&content)
        .with_context(|| format!("corrupt account data in {}", path.display()))?;
    AccountStore::from_accounts(accounts)
        .map_err(|e| anyhow::anyhow!("corrupt account data in {}: {}", path.display(), e))
}

/// Load the store and guarantee at least one admin record exists,
/// creating the default one when the file had none. Returns the store and
/// whether the default admin was created.
pub fn load_with_bootstrap(path: &Path) -> Result<(AccountStore, bool)> {
    let mut store = load(path)?;
    if store.has_admin() {
        return Ok((store, false));
    }
    store
        .create(DEFAULT_ADMIN_USER, DEFAULT_ADMIN_PASSWORD, Role::Admin)
        .map_err(|e| anyhow::anyhow!("cannot create default admin: {}", e))?;
    Ok((store, true))
}

/// Write every record to `path` in store order, returning the record
/// count. Writes to a temp file in the same directory and renames it into
/// place so a failure mid-write cannot truncate the existing file.
pub fn save(store: &AccountStore, path: &Path) -> Result<usize> {
    let json = serde_json::to_string_pretty(store.list())?;
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("failed to create temp file in {}", dir.display()))?;
    tmp.write_all(json.as_bytes())?;
    tmp.write_all(b"\n")?;
    tmp.persist(path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(store.len())
}
