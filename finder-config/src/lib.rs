//! Loader for importer configuration with YAML + environment overlays.
//!
//! Sources are merged in this order, later ones winning: inline YAML
//! snippets and files in the order they were attached, then `FINDER_`-prefixed
//! environment variables (`__` separates nesting levels, e.g.
//! `FINDER_LOGGING__LEVEL=debug`). String values may reference `${VAR}`
//! placeholders, which are expanded after merging.
//!
//! Every field has a default, so an empty configuration yields a usable
//! `wikipedia` scraper.
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;
const ENV_PREFIX: &str = "FINDER";

pub const DEFAULT_WIKIPEDIA_ENDPOINT: &str = "https://en.wikipedia.org/w/api.php";
pub const DEFAULT_WIKIPEDIA_ARTICLE_BASE: &str = "https://en.wikipedia.org/wiki/";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Source(#[from] ConfigError),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct FinderConfig {
    #[serde(default)]
    pub version: Option<String>,
    /// Directory receiving one YAML file per scraped subject.
    #[serde(default)]
    pub info_dir: Option<PathBuf>,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default = "default_scrapers")]
    pub scrapers: Vec<ScraperSpec>,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            version: None,
            info_dir: None,
            logging: LoggingConfig::default(),
            scrapers: default_scrapers(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// `text` or `json`.
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default = "default_true")]
    pub emit_stderr: bool,
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            emit_stderr: true,
            dir: None,
        }
    }
}

/// Shared fields + the per-kind “details”
#[derive(Debug, Clone, Deserialize)]
pub struct ScraperSpec {
    /// Selection name, matched case-insensitively.
    pub name: String,
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(flatten)]
    pub details: ScraperDetails,
}

impl ScraperSpec {
    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }
}

/// The tag is `kind`; the payload lives in `config`
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind")]
pub enum ScraperDetails {
    #[serde(rename = "wikipedia")]
    Wikipedia {
        #[serde(default)]
        config: WikipediaConfig,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct WikipediaConfig {
    /// Query endpoint receiving `action=parse&page=..&format=json`.
    #[serde(default = "default_wikipedia_endpoint")]
    pub endpoint: String,
    /// Prefix of the human-readable article URL stored in each record.
    #[serde(default = "default_wikipedia_article_base")]
    pub article_base: String,
    #[serde(default)]
    pub user_agent: Option<String>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for WikipediaConfig {
    fn default() -> Self {
        Self {
            endpoint: default_wikipedia_endpoint(),
            article_base: default_wikipedia_article_base(),
            user_agent: None,
            timeout_secs: None,
        }
    }
}

fn default_scrapers() -> Vec<ScraperSpec> {
    vec![ScraperSpec {
        name: "wikipedia".into(),
        enabled: None,
        details: ScraperDetails::Wikipedia {
            config: WikipediaConfig::default(),
        },
    }]
}
fn default_log_level() -> String {
    "info".into()
}
fn default_log_format() -> String {
    "text".into()
}
fn default_true() -> bool {
    true
}
fn default_wikipedia_endpoint() -> String {
    DEFAULT_WIKIPEDIA_ENDPOINT.into()
}
fn default_wikipedia_article_base() -> String {
    DEFAULT_WIKIPEDIA_ARTICLE_BASE.into()
}

fn expand_env_in_value(v: &mut Value) {
    match v {
        Value::String(s) => {
            if s.contains('$') {
                let mut cur = std::mem::take(s);
                for _ in 0..MAXIMUM_ENV_EXPANSION_DEPTH {
                    let expanded = match shellexpand::env(&cur) {
                        Ok(cow) => cow.into_owned(),
                        Err(_) => cur.clone(),
                    };
                    if expanded == cur {
                        break;
                    }
                    cur = expanded;
                }
                *s = cur;
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(expand_env_in_value),
        Value::Object(obj) => obj.values_mut().for_each(expand_env_in_value),
        _ => {}
    }
}

fn validate(cfg: &FinderConfig) -> Result<(), LoadError> {
    let mut seen = HashSet::new();
    for spec in &cfg.scrapers {
        let key = spec.name.trim().to_lowercase();
        if key.is_empty() {
            return Err(LoadError::Invalid("scraper name must not be empty".into()));
        }
        if !seen.insert(key) {
            return Err(LoadError::Invalid(format!(
                "scraper {:?} is declared more than once",
                spec.name
            )));
        }
        match &spec.details {
            ScraperDetails::Wikipedia { config } => {
                if config.endpoint.trim().is_empty() {
                    return Err(LoadError::Invalid(format!(
                        "scraper {:?}: endpoint must not be empty",
                        spec.name
                    )));
                }
            }
        }
    }
    Ok(())
}

/// Builder hides the `config` crate wiring (YAML + env overrides).
pub struct FinderConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
}

impl Default for FinderConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl FinderConfigLoader {
    /// Start empty; `FINDER_` env overrides are applied last by [`Self::load`].
    ///
    /// ```
    /// use finder_config::FinderConfigLoader;
    ///
    /// let config = FinderConfigLoader::new()
    ///     .with_yaml_str("version: '1'\nscrapers: []")
    ///     .load()
    ///     .expect("valid config");
    ///
    /// assert_eq!(config.version.as_deref(), Some("1"));
    /// assert!(config.scrapers.is_empty());
    /// ```
    pub fn new() -> Self {
        Self {
            builder: Config::builder(),
        }
    }

    /// Attach a required YAML/TOML/JSON file; the `config` crate infers format by suffix.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(true));
        self
    }

    /// Attach a file that may be absent.
    pub fn with_optional_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(false));
        self
    }

    /// Allow tests/CLI to merge inline YAML snippets.
    ///
    /// ```
    /// use finder_config::{FinderConfigLoader, ScraperDetails};
    ///
    /// let cfg = FinderConfigLoader::new()
    ///     .with_yaml_str(
    ///         r#"
    /// info_dir: "info"
    /// scrapers:
    ///   - name: "Wikipedia"
    ///     kind: "wikipedia"
    ///     config:
    ///       article_base: "https://de.wikipedia.org/wiki/"
    /// "#,
    ///     )
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(cfg.scrapers.len(), 1);
    /// let ScraperDetails::Wikipedia { config } = &cfg.scrapers[0].details;
    /// assert_eq!(config.article_base, "https://de.wikipedia.org/wiki/");
    /// assert_eq!(config.endpoint, "https://en.wikipedia.org/w/api.php");
    /// ```
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(yaml, config::FileFormat::Yaml));
        self
    }

    /// Consume the builder and deserialize the merged sources into strongly typed config.
    ///
    /// ```
    /// use finder_config::FinderConfigLoader;
    ///
    /// unsafe { std::env::set_var("FINDER_DOC_INFO", "/srv/info"); }
    ///
    /// let config = FinderConfigLoader::new()
    ///     .with_yaml_str("info_dir: \"${FINDER_DOC_INFO}/films\"")
    ///     .load()
    ///     .expect("valid configuration");
    ///
    /// assert_eq!(config.info_dir.unwrap().to_str(), Some("/srv/info/films"));
    /// assert_eq!(config.scrapers[0].name, "wikipedia");
    ///
    /// unsafe { std::env::remove_var("FINDER_DOC_INFO"); }
    /// ```
    pub fn load(self) -> Result<FinderConfig, LoadError> {
        let cfg = self
            .builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut v: Value = cfg.try_deserialize()?;
        // `config` yields nothing for a fully empty source set.
        if v.is_null() {
            v = Value::Object(Default::default());
        }
        expand_env_in_value(&mut v);

        let typed: FinderConfig =
            serde_json::from_value(v).map_err(|e| ConfigError::Message(e.to_string()))?;
        validate(&typed)?;

        Ok(typed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn expands_simple_string() {
        temp_env::with_var("FINDER_T_FOO", Some("bar"), || {
            let mut v = json!("prefix-${FINDER_T_FOO}-suffix");
            expand_env_in_value(&mut v);
            assert_eq!(v, json!("prefix-bar-suffix"));
        });
    }

    #[test]
    fn expands_in_array_and_object() {
        temp_env::with_vars(
            [("FINDER_T_HOST", Some("de")), ("FINDER_T_PATH", Some("wiki"))],
            || {
                let mut v = json!([
                    "https://$FINDER_T_HOST.example",
                    { "base": "${FINDER_T_HOST}/${FINDER_T_PATH}" },
                    42,
                    true,
                    null
                ]);
                expand_env_in_value(&mut v);
                assert_eq!(
                    v,
                    json!(["https://de.example", { "base": "de/wiki" }, 42, true, null])
                );
            },
        );
    }

    #[test]
    fn stops_on_cycles() {
        temp_env::with_vars(
            [("FINDER_T_A", Some("${FINDER_T_B}")), ("FINDER_T_B", Some("${FINDER_T_A}"))],
            || {
                let mut v = json!("x=${FINDER_T_A}-y");
                expand_env_in_value(&mut v);
                let s = v.as_str().unwrap();
                assert!(s.starts_with("x=") && s.ends_with("-y"));
                assert!(s.contains("${"));
            },
        );
    }

    #[test]
    fn unknown_vars_are_left_as_is() {
        let mut v = json!("hi-${FINDER_T_DOES_NOT_EXIST}");
        expand_env_in_value(&mut v);
        assert_eq!(v, json!("hi-${FINDER_T_DOES_NOT_EXIST}"));
    }

    #[test]
    fn duplicate_names_are_rejected_case_insensitively() {
        let err = FinderConfigLoader::new()
            .with_yaml_str(
                r#"
scrapers:
  - name: wikipedia
    kind: wikipedia
  - name: WIKIPEDIA
    kind: wikipedia
"#,
            )
            .load()
            .expect_err("duplicate names");
        assert!(matches!(err, LoadError::Invalid(_)));
    }

    #[test]
    fn unknown_kind_is_a_source_error() {
        let err = FinderConfigLoader::new()
            .with_yaml_str("scrapers:\n  - name: x\n    kind: imdb\n")
            .load()
            .expect_err("unknown kind");
        assert!(matches!(err, LoadError::Source(_)));
    }

    #[test]
    fn logging_defaults_apply() {
        let cfg = FinderConfig::default();
        assert_eq!(cfg.logging.level, "info");
        assert_eq!(cfg.logging.format, "text");
        assert!(cfg.logging.emit_stderr);
        assert!(cfg.scrapers[0].is_enabled());
    }
}
