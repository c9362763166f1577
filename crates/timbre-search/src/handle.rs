//! Shared access to the current index, with whole-pair replacement.

use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use crate::error::SearchResult;
use crate::index::{self, SimilarityIndex};

/// Holds the index that lookups are currently served from.
///
/// Readers take an `Arc` snapshot and query it without holding the lock. A
/// reload builds and validates a complete new index before swapping it in,
/// so a reader never sees a catalog from one load paired with a matrix from
/// another.
#[derive(Debug)]
pub struct IndexHandle {
    current: RwLock<Arc<SimilarityIndex>>,
}

impl IndexHandle {
    #[must_use]
    pub fn new(index: SimilarityIndex) -> Self {
        Self {
            current: RwLock::new(Arc::new(index)),
        }
    }

    /// Snapshot of the current index.
    #[must_use]
    pub fn current(&self) -> Arc<SimilarityIndex> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }

    /// Swap in a new index, returning the one it replaces.
    pub fn replace(&self, index: SimilarityIndex) -> Arc<SimilarityIndex> {
        self.replace_arc(Arc::new(index))
    }

    /// Swap in an already shared index, returning the one it replaces.
    pub fn replace_arc(&self, next: Arc<SimilarityIndex>) -> Arc<SimilarityIndex> {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, next)
    }

    /// Load a fresh pair of artifacts and swap it in.
    ///
    /// Returns the index this call loaded, even if another swap has
    /// happened since. On any error the current index stays in place.
    pub fn reload(
        &self,
        catalog_path: impl AsRef<Path>,
        matrix_path: impl AsRef<Path>,
    ) -> SearchResult<Arc<SimilarityIndex>> {
        match index::load(catalog_path, matrix_path) {
            Ok(fresh) => {
                let fresh = Arc::new(fresh);
                let previous = self.replace_arc(Arc::clone(&fresh));
                log::info!(
                    "Reloaded similarity index: {} -> {} songs",
                    previous.len(),
                    fresh.len()
                );
                Ok(fresh)
            }
            Err(e) => {
                log::warn!("Reload failed, keeping current index: {}", e);
                Err(e)
            }
        }
    }
}

impl From<SimilarityIndex> for IndexHandle {
    fn from(index: SimilarityIndex) -> Self {
        Self::new(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use timbre_core::{Catalog, SimilarityMatrix};

    fn index(titles: &[&str]) -> SimilarityIndex {
        let n = titles.len();
        let rows = (0..n)
            .map(|i| (0..n).map(|j| if i == j { 1.0 } else { 0.5 }).collect())
            .collect();
        SimilarityIndex::new(
            Catalog::from_titles(titles.iter().copied()),
            SimilarityMatrix::from_rows(rows).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_replace_swaps_whole_index() {
        let handle = IndexHandle::new(index(&["A", "B"]));
        let before = handle.current();

        let previous = handle.replace(index(&["X", "Y", "Z"]));
        assert_eq!(previous.len(), 2);
        assert_eq!(handle.current().len(), 3);

        // Snapshots taken before the swap are unaffected.
        assert_eq!(before.recommend("a", 5).unwrap(), vec!["B"]);
        assert!(handle.current().recommend("a", 5).unwrap_err().is_not_found());
    }

    #[test]
    fn test_failed_reload_keeps_current() {
        let handle = IndexHandle::new(index(&["A", "B"]));
        let err = handle
            .reload("/nonexistent/catalog.json", "/nonexistent/similarity.json")
            .unwrap_err();
        assert!(err.is_fatal());
        assert_eq!(handle.current().recommend("A", 1).unwrap(), vec!["B"]);
    }

    #[test]
    fn test_reload_returns_loaded_index() {
        let dir = tempfile::TempDir::new().unwrap();
        let catalog = dir.path().join("catalog.json");
        let matrix = dir.path().join("similarity.json");
        std::fs::write(&catalog, r#"[{"title": "Blue"}, {"title": "Green"}]"#).unwrap();
        std::fs::write(&matrix, "[[1.0, 0.2], [0.2, 1.0]]").unwrap();

        let handle = IndexHandle::new(index(&["A", "B", "C"]));
        let loaded = handle.reload(&catalog, &matrix).unwrap();
        assert!(Arc::ptr_eq(&loaded, &handle.current()));

        // A later swap does not change what the reload handed back.
        handle.replace(index(&["X"]));
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.recommend("blue", 1).unwrap(), vec!["Green"]);
        assert!(!Arc::ptr_eq(&loaded, &handle.current()));
    }

    #[test]
    fn test_replace_arc_shares_snapshot() {
        let handle = IndexHandle::new(index(&["A", "B"]));
        let shared = Arc::new(index(&["X", "Y"]));
        let previous = handle.replace_arc(Arc::clone(&shared));
        assert_eq!(previous.len(), 2);
        assert!(Arc::ptr_eq(&shared, &handle.current()));
    }

    #[test]
    fn test_concurrent_readers() {
        let handle = Arc::new(IndexHandle::new(index(&["A", "B", "C"])));
        let workers: Vec<_> = (0..4)
            .map(|_| {
                let handle = Arc::clone(&handle);
                thread::spawn(move || handle.current().recommend("b", 2).unwrap())
            })
            .collect();

        for worker in workers {
            assert_eq!(worker.join().unwrap(), vec!["A", "C"]);
        }
    }
}
