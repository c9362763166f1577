//! Core domain model for timbre.
//!
//! This crate defines the song catalog, the title normalization rule shared
//! by catalog and queries, the dense similarity matrix, and the loader for
//! the precomputed artifacts produced by the offline builder.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod artifact;
pub mod error;
pub mod model;

pub use error::{Error, Result};
pub use model::{normalize_title, Catalog, SimilarityMatrix, Song, SongRecord};
