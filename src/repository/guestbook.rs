//! Guestbook log repository
//!
//! The durable form is an append-only CSV file with a
//! `timestamp,author,body` header written once, on first creation. The
//! full log is loaded into memory at startup; appends go to memory and
//! file in one step.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use tokio::sync::Mutex;

use crate::{error::AppResult, models::guestbook::GuestbookMessage};

pub struct GuestbookRepository {
    path: PathBuf,
    state: Mutex<Vec<GuestbookMessage>>,
}

fn load_messages(path: &Path) -> Vec<GuestbookMessage> {
    if !path.exists() {
        return Vec::new();
    }
    let mut reader = match csv::Reader::from_path(path) {
        Ok(reader) => reader,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "guestbook load failed, starting empty");
            return Vec::new();
        }
    };
    match reader.deserialize().collect::<Result<Vec<_>, _>>() {
        Ok(messages) => messages,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "corrupt guestbook log, starting empty");
            Vec::new()
        }
    }
}

impl GuestbookRepository {
    pub fn open(path: PathBuf) -> Self {
        let messages = load_messages(&path);
        Self {
            path,
            state: Mutex::new(messages),
        }
    }

    /// Append a message to the in-memory log and the durable file in one
    /// step. Records are never edited or deleted afterwards.
    pub async fn append(&self, message: GuestbookMessage) -> AppResult<()> {
        let mut messages = self.state.lock().await;

        let needs_header = !self.path.exists();
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(needs_header)
            .from_writer(file);
        writer
            .serialize(&message)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        writer.flush()?;

        messages.push(message);
        Ok(())
    }

    /// The last `limit` entries, newest first. A limit beyond the log
    /// length returns the whole log.
    pub async fn recent(&self, limit: usize) -> Vec<GuestbookMessage> {
        let messages = self.state.lock().await;
        messages.iter().rev().take(limit).cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.state.lock().await.len()
    }
}
