//! Similarity lookup for timbre.
//!
//! Pairs a song catalog with its precomputed similarity matrix and answers
//! "what sounds like this song?" by ranking one matrix row.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod error;
pub mod handle;
pub mod index;
pub mod ranking;

pub use error::{SearchError, SearchResult};
pub use handle::IndexHandle;
pub use index::{load, load_dir, Recommendation, SimilarityIndex, DEFAULT_K};
