//! Account model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Account as held in memory and written to the directory file.
///
/// Never serialized to API clients directly; handlers return
/// [`AccountSummary`] instead so the password hash stays internal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Argon2 password hash (PHC string)
    pub password_hash: String,
    pub created_at: NaiveDate,
    /// Favorite species ids, insertion order preserved, no duplicates
    pub favorites: Vec<String>,
}

/// Raw on-disk account row, tolerant of malformed favorites entries.
/// Converted to [`Account`] by normalization during directory load.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountRecord {
    pub password_hash: String,
    pub created_at: NaiveDate,
    #[serde(default)]
    pub favorites: Vec<serde_json::Value>,
}

impl AccountRecord {
    /// Normalize the row: drop non-string favorites, drop empty strings,
    /// de-duplicate preserving first occurrence. Returns the clean
    /// account and whether anything was corrected.
    pub fn normalize(self) -> (Account, bool) {
        let raw_len = self.favorites.len();
        let mut favorites: Vec<String> = Vec::with_capacity(raw_len);
        for value in self.favorites {
            if let serde_json::Value::String(s) = value {
                if !s.is_empty() && !favorites.contains(&s) {
                    favorites.push(s);
                }
            }
        }
        let changed = favorites.len() != raw_len;
        (
            Account {
                password_hash: self.password_hash,
                created_at: self.created_at,
                favorites,
            },
            changed,
        )
    }
}

/// Registration request
#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub password_confirm: String,
}

/// Login request
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Public account view returned by the API
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AccountSummary {
    pub username: String,
    pub created_at: NaiveDate,
    pub favorites_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(favorites: Vec<serde_json::Value>) -> AccountRecord {
        AccountRecord {
            password_hash: "$argon2$x".into(),
            created_at: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            favorites,
        }
    }

    #[test]
    fn normalize_drops_non_strings_and_duplicates() {
        let (account, changed) = record(vec![
            json!("orca"),
            json!(7),
            json!("beluga"),
            json!("orca"),
            json!(null),
            json!(""),
        ])
        .normalize();
        assert!(changed);
        assert_eq!(account.favorites, vec!["orca", "beluga"]);
    }

    #[test]
    fn normalize_keeps_clean_lists_untouched() {
        let (account, changed) = record(vec![json!("orca"), json!("beluga")]).normalize();
        assert!(!changed);
        assert_eq!(account.favorites, vec!["orca", "beluga"]);
    }
}
