//! Guestbook service

use std::sync::Arc;

use chrono::Utc;

use crate::{
    error::{AppError, AppResult},
    models::guestbook::{GuestbookMessage, TIMESTAMP_FORMAT},
    repository::Repository,
};

/// Read access never returns more than this many entries
pub const RECENT_CAP: usize = 50;

pub struct GuestbookService {
    repository: Arc<Repository>,
}

impl GuestbookService {
    pub fn new(repository: Arc<Repository>) -> Self {
        Self { repository }
    }

    /// Stamp and append a message. Empty or whitespace-only bodies are
    /// rejected before any state is touched.
    pub async fn append(&self, author: &str, body: &str) -> AppResult<GuestbookMessage> {
        let body = body.trim();
        if body.is_empty() {
            return Err(AppError::Validation(
                "Message body must not be empty".to_string(),
            ));
        }

        let message = GuestbookMessage {
            timestamp: Utc::now().format(TIMESTAMP_FORMAT).to_string(),
            author: author.to_string(),
            body: body.to_string(),
        };
        self.repository.guestbook.append(message.clone()).await?;
        Ok(message)
    }

    /// Most recent entries, newest first, capped at [`RECENT_CAP`]
    pub async fn recent(&self, limit: Option<usize>) -> Vec<GuestbookMessage> {
        let limit = limit.unwrap_or(RECENT_CAP).min(RECENT_CAP);
        self.repository.guestbook.recent(limit).await
    }

    pub async fn total(&self) -> usize {
        self.repository.guestbook.len().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(dir: &std::path::Path) -> GuestbookService {
        GuestbookService::new(Arc::new(Repository::open(dir).unwrap()))
    }

    #[tokio::test]
    async fn rejects_blank_bodies_without_mutating() {
        let dir = tempfile::tempdir().unwrap();
        let service = service(dir.path());

        assert!(service.append("alice", "").await.is_err());
        assert!(service.append("alice", "   \n\t ").await.is_err());
        assert_eq!(service.total().await, 0);
    }

    #[tokio::test]
    async fn appends_are_ordered_and_recent_is_reversed() {
        let dir = tempfile::tempdir().unwrap();
        let service = service(dir.path());

        service.append("a", "one").await.unwrap();
        service.append("b", "two").await.unwrap();
        service.append("c", "three").await.unwrap();

        let recent = service.recent(Some(2)).await;
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].author, "c");
        assert_eq!(recent[1].author, "b");
        assert_eq!(service.total().await, 3);
    }

    #[tokio::test]
    async fn recent_is_capped_at_fifty() {
        let dir = tempfile::tempdir().unwrap();
        let service = service(dir.path());

        for i in 0..60 {
            service.append("a", &format!("message {i}")).await.unwrap();
        }

        assert_eq!(service.recent(None).await.len(), RECENT_CAP);
        assert_eq!(service.recent(Some(1000)).await.len(), RECENT_CAP);
        assert_eq!(service.recent(Some(5)).await.len(), 5);
        assert_eq!(service.recent(None).await[0].body, "message 59");
    }
}
