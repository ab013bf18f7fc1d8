//! Fixture-backed encyclopedia client
//!
//! The demo command runs the worker against a canned article set instead of
//! a live backend. A fixture file is one JSON document mapping lowercase
//! search queries to ranked title lists, and titles to raw extracts.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use minipedia_core::ArticleExtract;
use minipedia_worker::{ClientError, EncyclopediaClient};

use crate::error::CliError;

/// One canned article.
#[derive(Debug, Clone, Deserialize)]
pub struct FixtureArticle {
    /// Raw marker-delimited extract text
    pub extract: String,
    /// Canonical URL, if the fixture carries one
    #[serde(default)]
    pub fullurl: String,
}

#[derive(Debug, Deserialize)]
struct FixtureFile {
    #[serde(default)]
    searches: HashMap<String, Vec<String>>,
    #[serde(default)]
    articles: HashMap<String, FixtureArticle>,
}

/// Encyclopedia client answering from a fixture file.
#[derive(Debug)]
pub struct FixtureClient {
    searches: HashMap<String, Vec<String>>,
    articles: HashMap<String, FixtureArticle>,
}

impl FixtureClient {
    /// Load a fixture set from disk.
    pub fn from_path(path: &Path) -> Result<Self, CliError> {
        let raw = fs::read_to_string(path)
            .map_err(|err| CliError::FileNotFound(format!("{}: {err}", path.display())))?;
        Self::from_json(&raw)
    }

    /// Parse a fixture set from its JSON form.
    pub fn from_json(raw: &str) -> Result<Self, CliError> {
        let file: FixtureFile =
            serde_json::from_str(raw).map_err(|err| CliError::FixtureError(err.to_string()))?;
        Ok(FixtureClient {
            searches: file.searches,
            articles: file.articles,
        })
    }
}

impl EncyclopediaClient for FixtureClient {
    fn search(&mut self, query: &str, limit: usize) -> Result<Vec<String>, ClientError> {
        let results = self
            .searches
            .get(&query.to_lowercase())
            .cloned()
            .unwrap_or_default();
        Ok(results.into_iter().take(limit).collect())
    }

    fn get_extract(&mut self, title: &str) -> Result<ArticleExtract, ClientError> {
        let article = self
            .articles
            .get(title)
            .ok_or_else(|| ClientError(format!("no fixture article named {title}")))?;
        let extract = ArticleExtract::parse(&article.extract)
            .map_err(|err| ClientError(err.to_string()))?;
        Ok(extract.with_fullurl(article.fullurl.clone()))
    }
}
