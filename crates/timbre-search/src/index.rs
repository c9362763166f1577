use std::path::Path;

use serde::Serialize;
use timbre_core::artifact::{self, CATALOG_FILE, MATRIX_FILE};
use timbre_core::{Catalog, SimilarityMatrix, Song};

use crate::error::{SearchError, SearchResult};
use crate::ranking;

/// Number of recommendations returned when the caller does not ask for a count.
pub const DEFAULT_K: usize = 5;

/// One ranked recommendation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub row_index: usize,
    pub title: String,
    pub artist: Option<String>,
    pub score: f64,
}

/// A catalog paired with its precomputed similarity matrix.
///
/// Row `i` of the matrix belongs to catalog entry `i`. The pairing is
/// checked once at construction; afterwards the index is read-only and can
/// be shared freely between threads.
#[derive(Debug, Clone)]
pub struct SimilarityIndex {
    catalog: Catalog,
    matrix: SimilarityMatrix,
}

impl SimilarityIndex {
    /// Pair a catalog with its similarity matrix.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::DataMismatch`] unless the matrix is
    /// `N×N` for a catalog of `N` songs.
    pub fn new(catalog: Catalog, matrix: SimilarityMatrix) -> SearchResult<Self> {
        let n = catalog.len();
        if matrix.rows() != n || matrix.cols() != n {
            return Err(SearchError::DataMismatch {
                catalog_len: n,
                rows: matrix.rows(),
                cols: matrix.cols(),
            });
        }

        log::info!("Built similarity index over {} songs", n);
        Ok(Self { catalog, matrix })
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub const fn matrix(&self) -> &SimilarityMatrix {
        &self.matrix
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }

    /// Resolve a raw title to its row index.
    #[must_use]
    pub fn resolve(&self, title: &str) -> Option<usize> {
        self.catalog.resolve(title)
    }

    /// Display titles of the `k` songs most similar to `title`, best first.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::NotFound`] if `title` is not in the catalog.
    pub fn recommend(&self, title: &str, k: usize) -> SearchResult<Vec<String>> {
        Ok(self
            .recommend_scored(title, k)?
            .into_iter()
            .map(|rec| rec.title)
            .collect())
    }

    /// Like [`recommend`](Self::recommend), keeping scores and artists.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::NotFound`] if `title` is not in the catalog.
    pub fn recommend_scored(&self, title: &str, k: usize) -> SearchResult<Vec<Recommendation>> {
        let query = self.resolve(title).ok_or_else(|| SearchError::NotFound {
            title: title.to_string(),
        })?;

        // Every resolved row exists: `new` checked the matrix is N×N.
        let row = self.matrix.row(query).unwrap_or_default();
        let ranked = ranking::top_k(row, query, k);

        log::debug!(
            "Recommending {} of {} songs for {:?} (row {})",
            ranked.len(),
            self.len().saturating_sub(1),
            title,
            query
        );

        Ok(ranked
            .into_iter()
            .filter_map(|candidate| {
                self.catalog
                    .get(candidate.row_index)
                    .map(|song| Recommendation {
                        row_index: candidate.row_index,
                        title: song.title.clone(),
                        artist: song.artist.clone(),
                        score: candidate.score,
                    })
            })
            .collect())
    }

    /// Catalog entries whose title contains `fragment`, ignoring case and
    /// surrounding whitespace.
    pub fn search<'a>(&'a self, fragment: &str) -> impl Iterator<Item = &'a Song> + 'a {
        self.catalog.search(fragment)
    }

    /// All display titles in catalog order.
    pub fn titles(&self) -> impl Iterator<Item = &str> + '_ {
        self.catalog.iter().map(|song| song.title.as_str())
    }
}

/// Load both artifacts and pair them.
///
/// # Errors
///
/// Returns [`SearchError::Load`] if either file cannot be read, or
/// [`SearchError::DataMismatch`] if they do not describe the same songs.
pub fn load(
    catalog_path: impl AsRef<Path>,
    matrix_path: impl AsRef<Path>,
) -> SearchResult<SimilarityIndex> {
    let catalog_path = catalog_path.as_ref();
    let matrix_path = matrix_path.as_ref();
    log::info!(
        "Loading catalog {} and matrix {}",
        catalog_path.display(),
        matrix_path.display()
    );

    let catalog = artifact::read_catalog(catalog_path)?;
    let matrix = artifact::read_matrix(matrix_path)?;
    SimilarityIndex::new(catalog, matrix)
}

/// Load `catalog.json` and `similarity.json` from `dir`.
pub fn load_dir(dir: impl AsRef<Path>) -> SearchResult<SimilarityIndex> {
    let dir = dir.as_ref();
    load(dir.join(CATALOG_FILE), dir.join(MATRIX_FILE))
}
