//! Business logic services

pub mod accounts;
pub mod guestbook;
pub mod sessions;
pub mod tally;
pub mod visits;

use std::sync::Arc;

use uuid::Uuid;

use crate::{catalog::SpeciesCatalog, error::AppResult, repository::Repository};

/// Container for all services
pub struct Services {
    pub visits: visits::VisitsService,
    pub tally: tally::TallyService,
    pub guestbook: guestbook::GuestbookService,
    pub accounts: accounts::AccountsService,
    pub sessions: sessions::SessionsService,
    pub catalog: Arc<SpeciesCatalog>,
}

impl Services {
    /// Create all services over the given repository and catalog
    pub fn new(repository: Repository, catalog: SpeciesCatalog) -> Self {
        let repository = Arc::new(repository);
        let catalog = Arc::new(catalog);
        Self {
            visits: visits::VisitsService::new(repository.clone()),
            tally: tally::TallyService::new(repository.clone(), catalog.clone()),
            guestbook: guestbook::GuestbookService::new(repository.clone()),
            accounts: accounts::AccountsService::new(repository, catalog.clone()),
            sessions: sessions::SessionsService::new(),
            catalog,
        }
    }

    /// Count the visit for a session, at most once. The session store
    /// answers "already counted?" and records the mark; the counter
    /// itself stays free of session mechanics.
    pub async fn touch_visit(&self, session: &Uuid) -> AppResult<()> {
        if self.sessions.visit_counted(session).await {
            return Ok(());
        }
        let total = self.visits.record_visit().await?;
        self.sessions.mark_visit_counted(session).await;
        tracing::debug!(total, "visit counted");
        Ok(())
    }
}
