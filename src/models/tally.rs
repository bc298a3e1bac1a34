//! Weekly search tally record

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Search-frequency counters scoped to one ISO calendar week.
///
/// `counts` only ever holds entries accumulated since `week_id` was set;
/// the whole record is replaced when the calendar week changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyTally {
    pub week_id: String,
    #[serde(default)]
    pub counts: HashMap<String, u64>,
}

impl WeeklyTally {
    /// Fresh tally for the given week
    pub fn for_week(week_id: impl Into<String>) -> Self {
        Self {
            week_id: week_id.into(),
            counts: HashMap::new(),
        }
    }

    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }
}

/// Week token for a calendar date, ISO week numbering: "2024-W11".
/// Weeks start Monday; week 1 contains the year's first Thursday.
pub fn week_id_for(date: NaiveDate) -> String {
    let iso = date.iso_week();
    format!("{}-W{:02}", iso.year(), iso.week())
}

/// One entry of the weekly top-N ranking
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RankedSpecies {
    pub id: String,
    pub name: String,
    pub count: u64,
}
