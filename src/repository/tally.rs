//! Weekly search tally repository

use std::path::PathBuf;

use tokio::sync::Mutex;

use crate::{error::AppResult, models::tally::WeeklyTally, store};

pub struct TallyRepository {
    path: PathBuf,
    state: Mutex<WeeklyTally>,
}

impl TallyRepository {
    pub fn open(path: PathBuf) -> Self {
        let tally: WeeklyTally = store::load_or_default(&path, WeeklyTally::default());
        Self {
            path,
            state: Mutex::new(tally),
        }
    }

    /// Replace the tally with an empty one for `current_week` if the
    /// stored week id differs, persisting the reset. Returns whether a
    /// rollover happened. Must run before any read or write within a
    /// request so the tally never mixes two weeks' data.
    pub async fn reset_if_needed(&self, current_week: &str) -> AppResult<bool> {
        let mut tally = self.state.lock().await;
        if tally.week_id == current_week {
            return Ok(false);
        }
        let old = std::mem::replace(&mut *tally, WeeklyTally::for_week(current_week));
        store::save(&self.path, &*tally)?;
        tracing::info!(from = %old.week_id, to = %current_week, "weekly tally rolled over");
        Ok(true)
    }

    /// Add one to the counter for `item_id` (inserting at 1) and persist
    pub async fn increment(&self, item_id: &str) -> AppResult<u64> {
        let mut tally = self.state.lock().await;
        let count = tally.counts.entry(item_id.to_string()).or_insert(0);
        *count += 1;
        let count = *count;
        store::save(&self.path, &*tally)?;
        Ok(count)
    }

    /// Clone of the current tally
    pub async fn snapshot(&self) -> WeeklyTally {
        self.state.lock().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn rollover_clears_counts_and_sets_week() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("search_counts.json");

        let repo = TallyRepository::open(path.clone());
        assert!(repo.reset_if_needed("2024-W10").await.unwrap());
        repo.increment("orca").await.unwrap();
        repo.increment("orca").await.unwrap();
        assert_eq!(repo.snapshot().await.counts.get("orca"), Some(&2));

        // Same week: no reset.
        assert!(!repo.reset_if_needed("2024-W10").await.unwrap());
        assert_eq!(repo.snapshot().await.total(), 2);

        // New week: counts are gone before any read or write.
        assert!(repo.reset_if_needed("2024-W11").await.unwrap());
        let tally = repo.snapshot().await;
        assert_eq!(tally.week_id, "2024-W11");
        assert!(tally.counts.is_empty());

        // The reset was persisted.
        let repo = TallyRepository::open(path);
        let tally = repo.snapshot().await;
        assert_eq!(tally.week_id, "2024-W11");
        assert!(tally.counts.is_empty());
    }

    #[tokio::test]
    async fn increments_persist_across_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("search_counts.json");

        let repo = TallyRepository::open(path.clone());
        repo.reset_if_needed("2024-W10").await.unwrap();
        assert_eq!(repo.increment("beluga").await.unwrap(), 1);
        assert_eq!(repo.increment("beluga").await.unwrap(), 2);

        let repo = TallyRepository::open(path);
        let tally = repo.snapshot().await;
        assert_eq!(tally.week_id, "2024-W10");
        assert_eq!(tally.counts.get("beluga"), Some(&2));
    }
}
