//! Error types for similarity lookup.

use thiserror::Error;

/// Errors that can occur while building or querying a [`SimilarityIndex`].
///
/// [`SimilarityIndex`]: crate::SimilarityIndex
#[derive(Debug, Error)]
pub enum SearchError {
    /// The catalog and the similarity matrix describe different song sets.
    #[error(
        "data mismatch: catalog has {catalog_len} songs but similarity matrix is {rows}x{cols}"
    )]
    DataMismatch {
        catalog_len: usize,
        rows: usize,
        cols: usize,
    },

    /// The query title does not match any catalog entry.
    #[error("song not found: {title}")]
    NotFound { title: String },

    /// Reading the precomputed artifacts failed.
    #[error("failed to load artifacts: {0}")]
    Load(#[from] timbre_core::Error),
}

impl SearchError {
    /// Returns `true` when the query title was not in the catalog.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns `true` when no index could be built from the given data.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::DataMismatch { .. } | Self::Load(_))
    }
}

/// Convenience alias for search results.
pub type SearchResult<T> = std::result::Result<T, SearchError>;
