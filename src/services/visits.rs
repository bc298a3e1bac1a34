//! Visit counter service

use std::sync::Arc;

use crate::{error::AppResult, repository::Repository};

pub struct VisitsService {
    repository: Arc<Repository>,
}

impl VisitsService {
    pub fn new(repository: Arc<Repository>) -> Self {
        Self { repository }
    }

    /// Current process-wide total
    pub async fn count(&self) -> u64 {
        self.repository.visits.count().await
    }

    /// Count one more distinct session. Callers are responsible for the
    /// once-per-session dedup (see `Services::touch_visit`).
    pub async fn record_visit(&self) -> AppResult<u64> {
        self.repository.visits.record_visit().await
    }
}
