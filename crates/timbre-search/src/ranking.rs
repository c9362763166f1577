//! Top-K selection over one similarity row.

use std::cmp::Ordering;

/// A candidate row and its score relative to the query row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub row_index: usize,
    pub score: f64,
}

/// Non-finite scores rank below every finite score.
fn rank_score(score: f64) -> f64 {
    if score.is_finite() {
        score
    } else {
        f64::NEG_INFINITY
    }
}

/// Best first: higher score, then lower row index.
///
/// This is a total order, so the result never depends on sort stability.
pub fn compare(a: &Candidate, b: &Candidate) -> Ordering {
    rank_score(b.score)
        .partial_cmp(&rank_score(a.score))
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.row_index.cmp(&b.row_index))
}

/// Rank `row` against row `query` and keep the best `k`, excluding `query` itself.
///
/// Returns fewer than `k` candidates when the row is shorter.
pub fn top_k(row: &[f64], query: usize, k: usize) -> Vec<Candidate> {
    if k == 0 {
        return Vec::new();
    }

    let mut candidates: Vec<Candidate> = row
        .iter()
        .enumerate()
        .filter(|&(j, _)| j != query)
        .map(|(row_index, &score)| Candidate { row_index, score })
        .collect();

    if k < candidates.len() {
        candidates.select_nth_unstable_by(k, compare);
        candidates.truncate(k);
    }
    candidates.sort_by(compare);
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indices(candidates: &[Candidate]) -> Vec<usize> {
        candidates.iter().map(|c| c.row_index).collect()
    }

    #[test]
    fn test_excludes_query_row() {
        let row = [1.0, 0.5, 0.9];
        assert_eq!(indices(&top_k(&row, 0, 5)), vec![2, 1]);
    }

    #[test]
    fn test_ties_break_on_lower_index() {
        let row = [1.0, 0.9, 0.9, 0.1];
        assert_eq!(indices(&top_k(&row, 0, 2)), vec![1, 2]);

        let row = [0.3, 0.3, 1.0, 0.3];
        assert_eq!(indices(&top_k(&row, 2, 3)), vec![0, 1, 3]);
    }

    #[test]
    fn test_self_excluded_even_when_not_highest() {
        let row = [0.7, 0.2, 0.95];
        assert_eq!(indices(&top_k(&row, 1, 5)), vec![2, 0]);
    }

    #[test]
    fn test_k_larger_than_row() {
        let row = [1.0, 0.2, 0.8, 0.5];
        assert_eq!(indices(&top_k(&row, 0, 10)), vec![2, 3, 1]);
    }

    #[test]
    fn test_k_zero() {
        assert!(top_k(&[1.0, 0.5], 0, 0).is_empty());
    }

    #[test]
    fn test_non_finite_rank_last() {
        let row = [1.0, f64::NAN, -0.5, f64::INFINITY, f64::NEG_INFINITY, 0.0];
        assert_eq!(indices(&top_k(&row, 0, 10)), vec![5, 2, 1, 3, 4]);
    }

    #[test]
    fn test_selection_matches_full_sort() {
        let row: Vec<f64> = (0..50u32)
            .map(|i| f64::from((i * 37) % 11) / 10.0)
            .collect();
        let full = top_k(&row, 7, row.len());
        for k in [1, 3, 10, 25] {
            assert_eq!(top_k(&row, 7, k), full[..k].to_vec());
        }
    }

    #[test]
    fn test_compare_is_total() {
        let a = Candidate { row_index: 1, score: 0.5 };
        let b = Candidate { row_index: 2, score: 0.5 };
        assert_eq!(compare(&a, &b), Ordering::Less);
        assert_eq!(compare(&b, &a), Ordering::Greater);
        assert_eq!(compare(&a, &a), Ordering::Equal);
    }
}
