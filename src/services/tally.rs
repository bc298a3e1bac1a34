//! Weekly search tally service
//!
//! All dates come from the UTC clock so the week boundary is a single
//! fixed reference for the whole process.

use std::cmp::Reverse;
use std::sync::Arc;

use chrono::Utc;

use crate::{
    catalog::SpeciesCatalog,
    error::AppResult,
    models::tally::{week_id_for, RankedSpecies, WeeklyTally},
    repository::Repository,
};

pub struct TallyService {
    repository: Arc<Repository>,
    catalog: Arc<SpeciesCatalog>,
}

impl TallyService {
    pub fn new(repository: Arc<Repository>, catalog: Arc<SpeciesCatalog>) -> Self {
        Self { repository, catalog }
    }

    /// Week token for today
    pub fn current_week_id(&self) -> String {
        week_id_for(Utc::now().date_naive())
    }

    /// Roll the tally over to the current week if needed. Runs on every
    /// request before any tally read or write.
    pub async fn roll_week(&self) -> AppResult<bool> {
        self.repository
            .tally
            .reset_if_needed(&self.current_week_id())
            .await
    }

    /// Record one qualifying search arrival for a species
    pub async fn note_search_hit(&self, item_id: &str) -> AppResult<u64> {
        self.roll_week().await?;
        self.repository.tally.increment(item_id).await
    }

    /// The `n` most searched species this week. Only ids present in the
    /// catalog are ranked; ties break on display name ascending so the
    /// output is deterministic regardless of map iteration order.
    pub async fn top_n(&self, n: usize) -> AppResult<Vec<RankedSpecies>> {
        self.roll_week().await?;
        let tally = self.repository.tally.snapshot().await;
        Ok(self.rank(&tally, n))
    }

    /// Current tally after the rollover check
    pub async fn snapshot(&self) -> AppResult<WeeklyTally> {
        self.roll_week().await?;
        Ok(self.repository.tally.snapshot().await)
    }

    fn rank(&self, tally: &WeeklyTally, n: usize) -> Vec<RankedSpecies> {
        let mut ranked: Vec<RankedSpecies> = tally
            .counts
            .iter()
            .filter_map(|(id, &count)| {
                self.catalog.display_name(id).map(|name| RankedSpecies {
                    id: id.clone(),
                    name: name.to_string(),
                    count,
                })
            })
            .collect();
        ranked.sort_by(|a, b| {
            (Reverse(a.count), &a.name)
                .cmp(&(Reverse(b.count), &b.name))
        });
        ranked.truncate(n);
        ranked
    }
}
