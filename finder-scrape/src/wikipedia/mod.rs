//! Wikipedia film scraper: fetch the article, read its infobox, map the facts.
//!
//! Fetching and infobox parsing are all-or-nothing; once the infobox is in
//! hand, field mapping always produces a record.
pub mod client;
pub mod types;

pub use client::WikipediaApi;

use crate::error::{Result, ScrapeError};
use crate::fields::map_fields;
use crate::infobox::parse_infobox;
use crate::record::{Content, Contents};
use crate::scraper::{Scraper, Stage};
use async_trait::async_trait;
use finder_config::WikipediaConfig;
use finder_http::HttpError;

pub struct Wikipedia {
    api: WikipediaApi,
    article_base: String,
}

impl Wikipedia {
    pub fn new(api: WikipediaApi, article_base: impl Into<String>) -> Self {
        Self {
            api,
            article_base: article_base.into(),
        }
    }

    pub fn from_config(cfg: &WikipediaConfig) -> std::result::Result<Self, HttpError> {
        Ok(Self::new(WikipediaApi::from_config(cfg)?, &cfg.article_base))
    }

    /// Run the pipeline for one subject and return its record.
    ///
    /// On failure, [`ScrapeError::stage`] names the stage that aborted.
    pub async fn scrape_record(&self, subject: &str) -> Result<Content> {
        match self.run(subject).await {
            Ok(content) => {
                enter(subject, Stage::Done);
                tracing::info!(
                    target: "scrape.wikipedia",
                    subject = %subject,
                    "wikipedia.scrape.done"
                );
                Ok(content)
            }
            Err(err) => {
                enter(subject, Stage::Failed);
                tracing::warn!(
                    target: "scrape.wikipedia",
                    subject = %subject,
                    failed_in = %err.stage(),
                    error = %err,
                    "wikipedia.scrape.failed"
                );
                Err(err)
            }
        }
    }

    async fn run(&self, subject: &str) -> Result<Content> {
        enter(subject, Stage::Fetching);
        let markup = self.api.fetch(subject).await?;

        enter(subject, Stage::Parsing);
        let infobox = parse_infobox(&markup).map_err(|source| ScrapeError::MalformedMarkup {
            subject: subject.to_string(),
            source,
        })?;

        enter(subject, Stage::Mapping);
        Ok(map_fields(subject, &self.article_base, &infobox))
    }
}

fn enter(subject: &str, stage: Stage) {
    tracing::debug!(
        target: "scrape.wikipedia",
        subject = %subject,
        stage = %stage,
        "wikipedia.scrape.stage"
    );
}

#[async_trait]
impl Scraper for Wikipedia {
    async fn scrape(&self, subject: &str) -> Result<Contents> {
        let content = self.scrape_record(subject).await?;
        let mut result = Contents::new();
        result.insert(subject.to_string(), content);
        Ok(result)
    }
}
