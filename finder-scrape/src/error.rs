use crate::markup::MarkupError;
use crate::scraper::Stage;
use finder_http::HttpError;
use thiserror::Error;

/// Fatal failures of a scrape; each variant names the stage that failed.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The request could not be completed or the service answered non-success.
    #[error("getting page response for {subject:?}: {source}")]
    Fetch {
        subject: String,
        #[source]
        source: HttpError,
    },

    /// The response body is not the expected `parse` envelope.
    #[error("decoding page response for {subject:?}: {message}")]
    Decode { subject: String, message: String },

    #[error("parsing infobox for {subject:?}: {source}")]
    MalformedMarkup {
        subject: String,
        #[source]
        source: MarkupError,
    },
}

impl ScrapeError {
    /// The pipeline stage the scrape was in when it failed.
    pub fn stage(&self) -> Stage {
        match self {
            ScrapeError::Fetch { .. } | ScrapeError::Decode { .. } => Stage::Fetching,
            ScrapeError::MalformedMarkup { .. } => Stage::Parsing,
        }
    }

    pub fn subject(&self) -> &str {
        match self {
            ScrapeError::Fetch { subject, .. }
            | ScrapeError::Decode { subject, .. }
            | ScrapeError::MalformedMarkup { subject, .. } => subject,
        }
    }
}

/// Selecting a scraper by name failed before any pipeline ran.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("unknown scraper: {0}")]
    UnknownScraper(String),
    #[error("failed to construct scraper {name:?}: {message}")]
    Construct { name: String, message: String },
}

pub type Result<T, E = ScrapeError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_error_names_its_stage() {
        let decode = ScrapeError::Decode {
            subject: "Memento".into(),
            message: "missing field `parse`".into(),
        };
        assert_eq!(decode.stage(), Stage::Fetching);
        assert_eq!(decode.subject(), "Memento");

        let fetch = ScrapeError::Fetch {
            subject: "Memento".into(),
            source: HttpError::Network("connection refused".into()),
        };
        assert_eq!(fetch.stage(), Stage::Fetching);

        let markup = ScrapeError::MalformedMarkup {
            subject: "Memento".into(),
            source: MarkupError("not a document".into()),
        };
        assert_eq!(markup.stage(), Stage::Parsing);
        assert!(markup.to_string().starts_with("parsing infobox"));
    }
}
