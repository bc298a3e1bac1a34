//! Account directory repository
//!
//! A single JSON file mapping username to account record. The whole
//! directory is persisted after every mutation. Favorites lists are
//! normalized once during load and the corrected directory written back
//! if anything changed.

use std::path::PathBuf;

use indexmap::IndexMap;
use tokio::sync::Mutex;

use crate::{
    error::AppResult,
    models::account::{Account, AccountRecord},
    store,
};

pub struct AccountsRepository {
    path: PathBuf,
    state: Mutex<IndexMap<String, Account>>,
}

impl AccountsRepository {
    pub fn open(path: PathBuf) -> AppResult<Self> {
        let raw: IndexMap<String, AccountRecord> = store::load_or_default(&path, IndexMap::new());

        let mut changed = false;
        let mut directory = IndexMap::with_capacity(raw.len());
        for (username, record) in raw {
            let (account, corrected) = record.normalize();
            changed |= corrected;
            directory.insert(username, account);
        }
        if changed {
            tracing::warn!(path = %path.display(), "account directory normalized, persisting corrections");
            store::save(&path, &directory)?;
        }

        Ok(Self {
            path,
            state: Mutex::new(directory),
        })
    }

    pub async fn contains(&self, username: &str) -> bool {
        self.state.lock().await.contains_key(username)
    }

    pub async fn get(&self, username: &str) -> Option<Account> {
        self.state.lock().await.get(username).cloned()
    }

    /// Insert a new account and persist the directory. Fails if the
    /// username is already present; accounts are never replaced.
    pub async fn insert(&self, username: &str, account: Account) -> AppResult<()> {
        let mut directory = self.state.lock().await;
        if directory.contains_key(username) {
            return Err(crate::error::AppError::Conflict(
                "Username is already taken".to_string(),
            ));
        }
        directory.insert(username.to_string(), account);
        store::save(&self.path, &*directory)?;
        Ok(())
    }

    /// Favorite ids for a user, empty for an unknown user
    pub async fn favorites(&self, username: &str) -> Vec<String> {
        self.state
            .lock()
            .await
            .get(username)
            .map(|a| a.favorites.clone())
            .unwrap_or_default()
    }

    /// Idempotent add: an already-present id is a no-op and skips the
    /// persist. Unknown users are silently ignored.
    pub async fn add_favorite(&self, username: &str, item_id: &str) -> AppResult<bool> {
        let mut directory = self.state.lock().await;
        let Some(account) = directory.get_mut(username) else {
            return Ok(false);
        };
        if account.favorites.iter().any(|f| f == item_id) {
            return Ok(false);
        }
        account.favorites.push(item_id.to_string());
        store::save(&self.path, &*directory)?;
        Ok(true)
    }

    /// Idempotent remove: an absent id leaves the set unchanged. The
    /// directory is persisted either way.
    pub async fn remove_favorite(&self, username: &str, item_id: &str) -> AppResult<bool> {
        let mut directory = self.state.lock().await;
        let Some(account) = directory.get_mut(username) else {
            return Ok(false);
        };
        let before = account.favorites.len();
        account.favorites.retain(|f| f != item_id);
        let removed = account.favorites.len() != before;
        store::save(&self.path, &*directory)?;
        Ok(removed)
    }
}
