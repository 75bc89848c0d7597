//! Infobox scraping pipeline.
//!
//! A scrape runs three stages in sequence:
//!
//! 1. [`wikipedia::WikipediaApi::fetch`] pulls rendered article HTML through
//!    the `action=parse` query API.
//! 2. [`infobox::parse_infobox`] turns the article's fact panel into raw
//!    label → text pairs.
//! 3. [`fields::map_fields`] maps recognized labels onto a [`Content`] record,
//!    coercing the running time into a [`std::time::Duration`].
//!
//! [`registry::ScraperRegistry`] selects a [`Scraper`] by name from
//! configuration.
//!
//! ```no_run
//! use finder_config::FinderConfig;
//! use finder_scrape::registry::ScraperRegistry;
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let registry = ScraperRegistry::from_config(&FinderConfig::default());
//! let scraper = registry.build("wikipedia")?;
//! let contents = scraper.scrape("Lucky Number Slevin").await?;
//! assert!(contents.contains_key("Lucky Number Slevin"));
//! # Ok(()) }
//! ```

pub mod duration;
pub mod error;
pub mod fields;
pub mod infobox;
pub mod markup;
pub mod record;
pub mod registry;
pub mod scraper;
pub mod wikipedia;

pub use error::{RegistryError, Result, ScrapeError};
pub use record::{Content, Contents};
pub use scraper::Scraper;
