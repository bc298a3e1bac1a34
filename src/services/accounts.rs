//! Account directory service
//!
//! Registration validation runs in a fixed order and stops at the first
//! failure: username format, availability, password length, password
//! confirmation. Login failures never reveal whether the username
//! exists.

use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    catalog::SpeciesCatalog,
    error::{AppError, AppResult},
    models::account::{Account, AccountSummary, RegisterRequest},
    repository::Repository,
};

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_]{3,20}$").expect("valid username regex"));

pub struct AccountsService {
    repository: Arc<Repository>,
    catalog: Arc<SpeciesCatalog>,
}

impl AccountsService {
    pub fn new(repository: Arc<Repository>, catalog: Arc<SpeciesCatalog>) -> Self {
        Self { repository, catalog }
    }

    /// Create a new account with an empty favorites set
    pub async fn register(&self, request: RegisterRequest) -> AppResult<AccountSummary> {
        let username = request.username.trim();

        if !USERNAME_RE.is_match(username) {
            return Err(AppError::Validation(
                "Username must be 3-20 characters: letters, digits and underscore only"
                    .to_string(),
            ));
        }
        if self.repository.accounts.contains(username).await {
            return Err(AppError::Conflict("Username is already taken".to_string()));
        }
        if request.password.len() < 4 {
            return Err(AppError::Validation(
                "Password must be at least 4 characters".to_string(),
            ));
        }
        if request.password != request.password_confirm {
            return Err(AppError::Validation(
                "Password confirmation does not match".to_string(),
            ));
        }

        let account = Account {
            password_hash: hash_password(&request.password)?,
            created_at: Utc::now().date_naive(),
            favorites: Vec::new(),
        };
        self.repository.accounts.insert(username, account).await?;
        tracing::info!(username, "account registered");

        self.summary(username).await
    }

    /// Verify credentials. Unknown usernames and wrong passwords fail
    /// with the same generic message.
    pub async fn authenticate(&self, username: &str, password: &str) -> AppResult<AccountSummary> {
        let invalid = || AppError::Authentication("Invalid username or password".to_string());

        let account = self
            .repository
            .accounts
            .get(username)
            .await
            .ok_or_else(invalid)?;

        if !verify_password(&account.password_hash, password) {
            return Err(invalid());
        }

        Ok(summary_of(username, &account))
    }

    pub async fn summary(&self, username: &str) -> AppResult<AccountSummary> {
        let account = self
            .repository
            .accounts
            .get(username)
            .await
            .ok_or_else(|| AppError::NotFound(format!("No account named {username}")))?;
        Ok(summary_of(username, &account))
    }

    pub async fn favorites(&self, username: &str) -> Vec<String> {
        self.repository.accounts.favorites(username).await
    }

    /// Idempotent add. Ids absent from the catalog are ignored, matching
    /// the not-found policy of favorite operations.
    pub async fn add_favorite(&self, username: &str, item_id: &str) -> AppResult<()> {
        if !self.catalog.contains(item_id) {
            return Ok(());
        }
        self.repository.accounts.add_favorite(username, item_id).await?;
        Ok(())
    }

    /// Idempotent remove, no catalog check: stored ids may predate
    /// catalog changes and must stay removable.
    pub async fn remove_favorite(&self, username: &str, item_id: &str) -> AppResult<()> {
        self.repository
            .accounts
            .remove_favorite(username, item_id)
            .await?;
        Ok(())
    }
}

fn summary_of(username: &str, account: &Account) -> AccountSummary {
    AccountSummary {
        username: username.to_string(),
        created_at: account.created_at,
        favorites_count: account.favorites.len(),
    }
}

fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {e}")))
}

fn verify_password(hash: &str, password: &str) -> bool {
    PasswordHash::new(hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}
