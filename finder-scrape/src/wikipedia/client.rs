//! Page fetcher for the MediaWiki `action=parse` endpoint.
//!
//! One GET per call, no retries. The HTTP body is fully consumed inside
//! [`HttpClient::get_json`], so nothing stays open once `fetch` returns.
use crate::error::{Result, ScrapeError};
use crate::wikipedia::types::ApiEnvelope;
use finder_config::WikipediaConfig;
use finder_http::{HttpClient, HttpError, RequestOpts};
use std::borrow::Cow;
use std::time::{Duration, Instant};

#[derive(Clone)]
pub struct WikipediaApi {
    http: HttpClient,
}

impl WikipediaApi {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    pub fn from_config(cfg: &WikipediaConfig) -> std::result::Result<Self, HttpError> {
        let mut http = match cfg.user_agent.as_deref() {
            Some(agent) => HttpClient::with_user_agent(&cfg.endpoint, agent)?,
            None => HttpClient::new(&cfg.endpoint)?,
        };
        if let Some(secs) = cfg.timeout_secs {
            http = http.with_timeout(Duration::from_secs(secs));
        }
        Ok(Self::new(http))
    }

    /// Fetch the rendered HTML of `subject`.
    pub async fn fetch(&self, subject: &str) -> Result<String> {
        let started = Instant::now();
        tracing::info!(
            target: "scrape.wikipedia",
            subject = %subject,
            endpoint = %self.http.base(),
            "wikipedia.fetch.start"
        );

        let params: Vec<(&str, Cow<'_, str>)> = vec![
            ("action", "parse".into()),
            ("page", subject.into()),
            ("format", "json".into()),
        ];
        let opts = RequestOpts {
            query: Some(params),
        };

        let envelope: ApiEnvelope = match self.http.get_json("", opts).await {
            Ok(envelope) => envelope,
            Err(HttpError::Decode(message, snippet)) => {
                tracing::warn!(
                    target: "scrape.wikipedia",
                    subject = %subject,
                    error = %message,
                    "wikipedia.fetch.decode_error"
                );
                return Err(ScrapeError::Decode {
                    subject: subject.to_string(),
                    message: format!("{message}; body: {snippet}"),
                });
            }
            Err(source) => {
                tracing::warn!(
                    target: "scrape.wikipedia",
                    subject = %subject,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    error = %source,
                    "wikipedia.fetch.error"
                );
                return Err(ScrapeError::Fetch {
                    subject: subject.to_string(),
                    source,
                });
            }
        };

        match envelope {
            ApiEnvelope::Parsed(resp) => {
                tracing::info!(
                    target: "scrape.wikipedia",
                    subject = %subject,
                    title = %resp.parse.title,
                    markup_len = resp.parse.text.content.len(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "wikipedia.fetch.success"
                );
                Ok(resp.parse.text.content)
            }
            ApiEnvelope::Failed(failure) => {
                tracing::warn!(
                    target: "scrape.wikipedia",
                    subject = %subject,
                    code = %failure.error.code,
                    info = %failure.error.info,
                    "wikipedia.fetch.api_error"
                );
                Err(ScrapeError::Decode {
                    subject: subject.to_string(),
                    message: format!(
                        "api returned error {}: {}",
                        failure.error.code, failure.error.info
                    ),
                })
            }
        }
    }
}
