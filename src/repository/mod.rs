//! Repository layer for durable record storage
//!
//! Each durable record gets its own file-backed repository holding the
//! single writable in-memory copy behind a per-record async mutex, so
//! every read-modify-write-persist cycle is mutually exclusive even
//! under multi-threaded request handling.

pub mod accounts;
pub mod guestbook;
pub mod tally;
pub mod visits;

use std::path::Path;

use crate::error::AppResult;

/// File names under the data directory
pub const VISITOR_FILE: &str = "visitor_count.json";
pub const SEARCH_FILE: &str = "search_counts.json";
pub const BBS_FILE: &str = "bbs_messages.csv";
pub const USERS_FILE: &str = "users.json";

/// Main repository struct holding the four record stores
pub struct Repository {
    pub visits: visits::VisitsRepository,
    pub tally: tally::TallyRepository,
    pub guestbook: guestbook::GuestbookRepository,
    pub accounts: accounts::AccountsRepository,
}

impl Repository {
    /// Load all durable records from the data directory. Missing or
    /// corrupt files fall back to empty defaults; account normalization
    /// happens here, once, before any request is served.
    pub fn open(data_dir: &Path) -> AppResult<Self> {
        std::fs::create_dir_all(data_dir)?;
        Ok(Self {
            visits: visits::VisitsRepository::open(data_dir.join(VISITOR_FILE)),
            tally: tally::TallyRepository::open(data_dir.join(SEARCH_FILE)),
            guestbook: guestbook::GuestbookRepository::open(data_dir.join(BBS_FILE)),
            accounts: accounts::AccountsRepository::open(data_dir.join(USERS_FILE))?,
        })
    }
}
