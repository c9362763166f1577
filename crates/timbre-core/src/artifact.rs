//! Reading the precomputed artifacts written by the offline builder.
//!
//! The catalog is a JSON array of [`SongRecord`]s. The similarity matrix is
//! a JSON array of rows, each an array of numbers, in catalog order.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::{Error, Result};
use crate::model::{Catalog, SimilarityMatrix, SongRecord};

/// Default file name of the catalog artifact.
pub const CATALOG_FILE: &str = "catalog.json";

/// Default file name of the similarity matrix artifact.
pub const MATRIX_FILE: &str = "similarity.json";

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| Error::Serialization {
        path: path.to_path_buf(),
        source,
    })
}

/// Read the catalog artifact.
pub fn read_catalog(path: impl AsRef<Path>) -> Result<Catalog> {
    let path = path.as_ref();
    let records: Vec<SongRecord> = read_json(path)?;
    log::debug!("Read {} catalog records from {}", records.len(), path.display());
    Ok(Catalog::from_records(records))
}

/// Read the similarity matrix artifact.
pub fn read_matrix(path: impl AsRef<Path>) -> Result<SimilarityMatrix> {
    let path = path.as_ref();
    let rows: Vec<Vec<f64>> = read_json(path)?;
    log::debug!("Read {} similarity rows from {}", rows.len(), path.display());
    SimilarityMatrix::from_rows(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_catalog() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CATALOG_FILE);
        std::fs::write(
            &path,
            r#"[{"title": "Song A", "artist": "X"}, {"song": "Song B"}]"#,
        )
        .unwrap();

        let catalog = read_catalog(&path).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.resolve("song b"), Some(1));
    }

    #[test]
    fn test_read_matrix() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(MATRIX_FILE);
        std::fs::write(&path, "[[1.0, 0.25], [0.25, 1.0]]").unwrap();

        let matrix = read_matrix(&path).unwrap();
        assert_eq!(matrix.rows(), 2);
        assert_eq!(matrix.get(1, 0), Some(0.25));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = read_catalog(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
        assert!(err.to_string().contains("absent.json"));
    }

    #[test]
    fn test_malformed_json_is_serialization_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(MATRIX_FILE);
        std::fs::write(&path, "[[1.0, \"high\"]]").unwrap();

        let err = read_matrix(&path).unwrap_err();
        assert!(matches!(err, Error::Serialization { .. }));
    }
}
