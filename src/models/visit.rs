//! Visit counter record

use serde::{Deserialize, Serialize};

/// Process-wide visit counter. Incremented at most once per session,
/// never decremented.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitCounter {
    pub count: u64,
}
