//! The normalized record describing one creative work.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Records keyed by the store path they should be written to (the subject).
pub type Contents = BTreeMap<String, Content>;

/// Normalized description of a film or show.
///
/// Every optional field is `Some` exactly when its infobox label was present
/// (for `length`: present and parseable). List fields hold the raw cell text
/// as a single element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    pub name: String,
    /// Human-readable article URL.
    #[serde(rename = "wikipedia")]
    pub source_url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directors: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub producers: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub writers: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cinematography: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editors: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub music: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub production: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distributors: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub released: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "crate::duration::option"
    )]
    pub length: Option<Duration>,
}

impl Content {
    pub fn new(name: impl Into<String>, source_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source_url: source_url.into(),
            ..Default::default()
        }
    }
}
