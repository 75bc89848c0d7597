use crate::error::RegistryError;
use crate::scraper::Scraper;
use crate::wikipedia::Wikipedia;
use finder_config::{FinderConfig, ScraperDetails};
use std::collections::HashMap;

/// Zero-argument constructor for one scraper.
pub type ScraperFactory =
    Box<dyn Fn() -> Result<Box<dyn Scraper>, RegistryError> + Send + Sync + 'static>;

/// Name → constructor table, built once at startup and handed to the caller.
///
/// Names are matched case-insensitively.
#[derive(Default)]
pub struct ScraperRegistry {
    factories: HashMap<String, ScraperFactory>,
}

impl ScraperRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// One entry per enabled scraper declared in `cfg`.
    pub fn from_config(cfg: &FinderConfig) -> Self {
        let mut registry = Self::new();
        for spec in cfg.scrapers.iter().filter(|s| s.is_enabled()) {
            let name = spec.name.clone();
            match &spec.details {
                ScraperDetails::Wikipedia { config } => {
                    let config = config.clone();
                    registry.register(&spec.name, move || {
                        let scraper = Wikipedia::from_config(&config).map_err(|e| {
                            RegistryError::Construct {
                                name: name.clone(),
                                message: e.to_string(),
                            }
                        })?;
                        Ok(Box::new(scraper) as Box<dyn Scraper>)
                    });
                }
            }
        }
        registry
    }

    /// Add or replace the constructor for `name`.
    pub fn register<F>(&mut self, name: &str, factory: F)
    where
        F: Fn() -> Result<Box<dyn Scraper>, RegistryError> + Send + Sync + 'static,
    {
        self.factories
            .insert(name.trim().to_lowercase(), Box::new(factory));
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Construct the scraper registered under `name`.
    pub fn build(&self, name: &str) -> Result<Box<dyn Scraper>, RegistryError> {
        let factory = self
            .factories
            .get(&name.trim().to_lowercase())
            .ok_or_else(|| RegistryError::UnknownScraper(name.to_string()))?;
        factory()
    }
}
