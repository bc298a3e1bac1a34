//! Visit counter repository

use std::path::PathBuf;

use tokio::sync::Mutex;

use crate::{error::AppResult, models::visit::VisitCounter, store};

pub struct VisitsRepository {
    path: PathBuf,
    state: Mutex<VisitCounter>,
}

impl VisitsRepository {
    pub fn open(path: PathBuf) -> Self {
        let counter: VisitCounter = store::load_or_default(&path, VisitCounter::default());
        Self {
            path,
            state: Mutex::new(counter),
        }
    }

    /// Current total
    pub async fn count(&self) -> u64 {
        self.state.lock().await.count
    }

    /// Increment by one and persist. The lock spans the whole
    /// read-modify-write-persist cycle.
    pub async fn record_visit(&self) -> AppResult<u64> {
        let mut counter = self.state.lock().await;
        counter.count += 1;
        store::save(&self.path, &*counter)?;
        Ok(counter.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn record_visit_increments_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("visitor_count.json");

        let repo = VisitsRepository::open(path.clone());
        assert_eq!(repo.count().await, 0);
        assert_eq!(repo.record_visit().await.unwrap(), 1);
        assert_eq!(repo.record_visit().await.unwrap(), 2);

        // Survives a reload.
        let repo = VisitsRepository::open(path);
        assert_eq!(repo.count().await, 2);
    }
}
