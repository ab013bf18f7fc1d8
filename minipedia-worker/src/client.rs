//! Encyclopedia backend seam

use minipedia_core::ArticleExtract;

use crate::error::ClientError;

/// Looks up articles in some encyclopedia backend.
///
/// The worker only needs ranked title search and raw extract retrieval; how
/// those happen (live API, replica, fixtures) is up to the implementation.
pub trait EncyclopediaClient {
    /// Titles matching `query`, best first, at most `limit` of them.
    fn search(&mut self, query: &str, limit: usize) -> Result<Vec<String>, ClientError>;

    /// The parsed extract for an exact article title, with its canonical
    /// URL attached when the backend knows it.
    fn get_extract(&mut self, title: &str) -> Result<ArticleExtract, ClientError>;
}
