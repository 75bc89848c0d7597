use crate::error::Result;
use crate::record::Contents;
use async_trait::async_trait;
use std::fmt;

/// A source able to turn a subject name into records.
#[async_trait]
pub trait Scraper: Send + Sync {
    /// Records keyed by store path; a single-page scraper returns one entry
    /// keyed by `subject`.
    async fn scrape(&self, subject: &str) -> Result<Contents>;
}

/// Pipeline position of one scrape call, reported in logs and by
/// [`crate::ScrapeError::stage`].
///
/// `Idle → Fetching → Parsing → Mapping → Done`; only fetching and parsing
/// can end in `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    Fetching,
    Parsing,
    Mapping,
    Done,
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::Idle => "idle",
            Stage::Fetching => "fetching",
            Stage::Parsing => "parsing",
            Stage::Mapping => "mapping",
            Stage::Done => "done",
            Stage::Failed => "failed",
        };
        f.write_str(s)
    }
}
