//! Research state threaded through the search workflow.
//!
//! One `ResearchState` is created per query and moved from node to node by the
//! executor. Fields are written through the `set_*`/`record_*` methods, which
//! keep every collection append-only; [`ResearchState::validate`] checks that
//! each map's keys come from the stage before it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Violation of a state write rule or key invariant.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StateError {
    /// A write-once field was written a second time.
    #[error("{0} already written")]
    AlreadyWritten(&'static str),

    /// A map entry already exists for this key.
    #[error("{field}: entry for {key} already recorded")]
    Overwrite { field: &'static str, key: String },

    /// A map holds a key its upstream stage never produced.
    #[error("{field}: key {key} not produced upstream")]
    KeyNotUpstream { field: &'static str, key: String },
}

/// True for urls with a recognized network scheme (`http://`, `https://`).
pub fn is_valid_url(url: &str) -> bool {
    let lower = url.trim_start().to_ascii_lowercase();
    ["http://", "https://"]
        .iter()
        .any(|scheme| lower.starts_with(scheme) && lower.len() > scheme.len())
}

/// State of one research run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResearchState {
    /// Original user input.
    pub query: String,
    /// Corrected query; written at most once.
    pub corrected_query: Option<String>,
    /// Search results in rank order; written once.
    pub urls: Vec<String>,
    pub scraped_content: BTreeMap<String, String>,
    pub corrected_content: BTreeMap<String, String>,
    pub summaries: BTreeMap<String, String>,
    /// Number of accepted writes; bumped by every successful `set_*`/`record_*`.
    #[serde(default)]
    version: u64,
    #[serde(skip)]
    urls_set: bool,
}

impl ResearchState {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn set_corrected_query(&mut self, corrected: impl Into<String>) -> Result<(), StateError> {
        if self.corrected_query.is_some() {
            return Err(StateError::AlreadyWritten("corrected_query"));
        }
        self.corrected_query = Some(corrected.into());
        self.version += 1;
        Ok(())
    }

    pub fn set_urls(&mut self, urls: Vec<String>) -> Result<(), StateError> {
        if self.urls_set || !self.urls.is_empty() {
            return Err(StateError::AlreadyWritten("urls"));
        }
        self.urls = urls;
        self.urls_set = true;
        self.version += 1;
        Ok(())
    }

    pub fn record_scraped(
        &mut self,
        url: impl Into<String>,
        text: impl Into<String>,
    ) -> Result<(), StateError> {
        insert_new(&mut self.scraped_content, "scraped_content", url.into(), text.into())?;
        self.version += 1;
        Ok(())
    }

    pub fn record_corrected(
        &mut self,
        url: impl Into<String>,
        text: impl Into<String>,
    ) -> Result<(), StateError> {
        insert_new(&mut self.corrected_content, "corrected_content", url.into(), text.into())?;
        self.version += 1;
        Ok(())
    }

    pub fn record_summary(
        &mut self,
        url: impl Into<String>,
        summary: impl Into<String>,
    ) -> Result<(), StateError> {
        insert_new(&mut self.summaries, "summaries", url.into(), summary.into())?;
        self.version += 1;
        Ok(())
    }

    /// Urls with a network scheme, in rank order.
    pub fn valid_urls(&self) -> impl Iterator<Item = &str> {
        self.urls.iter().map(String::as_str).filter(|u| is_valid_url(u))
    }

    /// Checks `summaries ⊆ corrected_content ⊆ scraped_content ⊆ valid(urls)` by key.
    pub fn validate(&self) -> Result<(), StateError> {
        for key in self.scraped_content.keys() {
            if !self.valid_urls().any(|u| u == key) {
                return Err(StateError::KeyNotUpstream {
                    field: "scraped_content",
                    key: key.clone(),
                });
            }
        }
        check_subset("corrected_content", &self.corrected_content, &self.scraped_content)?;
        check_subset("summaries", &self.summaries, &self.corrected_content)
    }
}

fn insert_new(
    map: &mut BTreeMap<String, String>,
    field: &'static str,
    key: String,
    value: String,
) -> Result<(), StateError> {
    if map.contains_key(&key) {
        return Err(StateError::Overwrite { field, key });
    }
    map.insert(key, value);
    Ok(())
}

fn check_subset(
    field: &'static str,
    map: &BTreeMap<String, String>,
    upstream: &BTreeMap<String, String>,
) -> Result<(), StateError> {
    match map.keys().find(|k| !upstream.contains_key(*k)) {
        Some(key) => Err(StateError::KeyNotUpstream {
            field,
            key: key.clone(),
        }),
        None => Ok(()),
    }
}
