use crate::error::{Error, Result};

/// Dense, row-major pairwise similarity scores.
///
/// Built once from the offline artifacts and never mutated. Squareness is
/// not enforced here; pairing the matrix with a catalog is where the
/// dimensions are checked.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimilarityMatrix {
    rows: usize,
    cols: usize,
    scores: Vec<f64>,
}

impl SimilarityMatrix {
    /// Build a matrix from nested rows.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidData`] if the rows have differing lengths.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut scores = Vec::with_capacity(rows.len() * cols);

        for (i, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(Error::InvalidData(format!(
                    "similarity row {} has {} scores, expected {}",
                    i,
                    row.len(),
                    cols
                )));
            }
            scores.extend_from_slice(row);
        }

        let non_finite = scores.iter().filter(|s| !s.is_finite()).count();
        if non_finite > 0 {
            log::warn!(
                "Similarity matrix contains {} non-finite scores; they rank last",
                non_finite
            );
        }

        Ok(Self {
            rows: rows.len(),
            cols,
            scores,
        })
    }

    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    #[must_use]
    pub const fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    #[must_use]
    pub fn row(&self, i: usize) -> Option<&[f64]> {
        if i >= self.rows {
            return None;
        }
        let start = i * self.cols;
        self.scores.get(start..start + self.cols)
    }

    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        self.row(i).and_then(|row| row.get(j).copied())
    }
}
