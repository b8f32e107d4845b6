//! Batch similarity between two sets of face embeddings.
use ndarray::{Array2, ArrayView1, Axis};
use serde::Serialize;
use thiserror::Error;

use crate::shared::constants::DEEPFAKE_THRESHOLD;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimilarityError {
    #[error("Feature vectors must have the same shape ({left:?} vs {right:?})")]
    ShapeMismatch {
        left: (usize, usize),
        right: (usize, usize),
    },
    #[error("feature batch is empty")]
    Empty,
    #[error("feature rows have inconsistent lengths")]
    Ragged,
}

/// `n x d` matrix of embeddings, one row per sampled frame.
#[derive(Clone, Debug, PartialEq)]
pub struct FeatureBatch {
    rows: Array2<f32>,
}

impl FeatureBatch {
    pub fn from_rows(rows: Vec<Vec<f32>>) -> Result<Self, SimilarityError> {
        let n = rows.len();
        let d = rows.first().map(Vec::len).ok_or(SimilarityError::Empty)?;
        if d == 0 {
            return Err(SimilarityError::Empty);
        }
        if rows.iter().any(|r| r.len() != d) {
            return Err(SimilarityError::Ragged);
        }
        let flat: Vec<f32> = rows.into_iter().flatten().collect();
        let rows = Array2::from_shape_vec((n, d), flat).map_err(|_| SimilarityError::Ragged)?;
        Ok(Self { rows })
    }

    pub fn shape(&self) -> (usize, usize) {
        self.rows.dim()
    }

    pub fn len(&self) -> usize {
        self.rows.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.nrows() == 0
    }

    pub fn row(&self, i: usize) -> ArrayView1<'_, f32> {
        self.rows.row(i)
    }
}

fn check_shapes(a: &FeatureBatch, b: &FeatureBatch) -> Result<(), SimilarityError> {
    if a.shape() != b.shape() {
        return Err(SimilarityError::ShapeMismatch {
            left: a.shape(),
            right: b.shape(),
        });
    }
    Ok(())
}

/// Mean of row-wise cosine similarities. A row with zero norm scores 0.
pub fn cosine_similarity(a: &FeatureBatch, b: &FeatureBatch) -> Result<f64, SimilarityError> {
    check_shapes(a, b)?;

    let total: f64 = a
        .rows
        .axis_iter(Axis(0))
        .zip(b.rows.axis_iter(Axis(0)))
        .map(|(x, y)| row_cosine(x, y))
        .sum();
    Ok(total / a.len() as f64)
}

fn row_cosine(x: ArrayView1<'_, f32>, y: ArrayView1<'_, f32>) -> f64 {
    let mut dot = 0.0_f64;
    let mut nx = 0.0_f64;
    let mut ny = 0.0_f64;
    for (&p, &q) in x.iter().zip(y.iter()) {
        let (p, q) = (p as f64, q as f64);
        dot += p * q;
        nx += p * p;
        ny += q * q;
    }
    let denom = nx.sqrt() * ny.sqrt();
    if denom == 0.0 {
        0.0
    } else {
        dot / denom
    }
}

/// Frobenius norm of `a - b`.
pub fn euclidean_distance(a: &FeatureBatch, b: &FeatureBatch) -> Result<f64, SimilarityError> {
    check_shapes(a, b)?;

    let sum_sq: f64 = a
        .rows
        .iter()
        .zip(b.rows.iter())
        .map(|(&p, &q)| {
            let d = p as f64 - q as f64;
            d * d
        })
        .sum();
    Ok(sum_sq.sqrt())
}

/// Outcome of comparing real and reference media.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SimilarityReport {
    pub cosine_similarity: f64,
    pub euclidean_similarity: f64,
    pub is_likely_deepfake: bool,
}

impl SimilarityReport {
    pub fn compute(real: &FeatureBatch, fake: &FeatureBatch) -> Result<Self, SimilarityError> {
        let cosine = cosine_similarity(real, fake)?;
        let euclidean = euclidean_distance(real, fake)?;
        Ok(Self::from_scores(cosine, euclidean))
    }

    pub fn from_scores(cosine_similarity: f64, euclidean_similarity: f64) -> Self {
        Self {
            cosine_similarity,
            euclidean_similarity,
            is_likely_deepfake: cosine_similarity < DEEPFAKE_THRESHOLD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn batch(rows: &[&[f32]]) -> FeatureBatch {
        FeatureBatch::from_rows(rows.iter().map(|r| r.to_vec()).collect()).unwrap()
    }

    #[test]
    fn test_from_rows_shape() {
        let b = batch(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]]);
        assert_eq!(b.shape(), (2, 3));
        assert_eq!(b.row(1).to_vec(), vec![4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_from_rows_rejects_empty_and_ragged() {
        assert_eq!(FeatureBatch::from_rows(vec![]), Err(SimilarityError::Empty));
        assert_eq!(
            FeatureBatch::from_rows(vec![vec![]]),
            Err(SimilarityError::Empty)
        );
        assert_eq!(
            FeatureBatch::from_rows(vec![vec![1.0, 2.0], vec![1.0]]),
            Err(SimilarityError::Ragged)
        );
    }

    #[test]
    fn test_cosine_identical_is_one() {
        let a = batch(&[&[0.3, -1.2, 4.0], &[1.0, 1.0, 1.0]]);
        assert_relative_eq!(cosine_similarity(&a, &a).unwrap(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_cosine_is_mean_of_rows() {
        // Row 0 identical (1.0), row 1 orthogonal (0.0).
        let a = batch(&[&[1.0, 0.0], &[1.0, 0.0]]);
        let b = batch(&[&[2.0, 0.0], &[0.0, 3.0]]);
        assert_relative_eq!(cosine_similarity(&a, &b).unwrap(), 0.5, epsilon = 1e-9);
    }

    #[test]
    fn test_cosine_opposite_is_negative_one() {
        let a = batch(&[&[1.0, 2.0]]);
        let b = batch(&[&[-1.0, -2.0]]);
        assert_relative_eq!(cosine_similarity(&a, &b).unwrap(), -1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_cosine_zero_row_scores_zero() {
        let a = batch(&[&[0.0, 0.0], &[1.0, 0.0]]);
        let b = batch(&[&[1.0, 0.0], &[1.0, 0.0]]);
        assert_relative_eq!(cosine_similarity(&a, &b).unwrap(), 0.5, epsilon = 1e-9);
    }

    #[test]
    fn test_shape_mismatch() {
        let a = batch(&[&[1.0, 0.0]]);
        let b = batch(&[&[1.0, 0.0], &[0.0, 1.0]]);
        assert_eq!(
            cosine_similarity(&a, &b),
            Err(SimilarityError::ShapeMismatch {
                left: (1, 2),
                right: (2, 2)
            })
        );
        assert!(euclidean_distance(&a, &b).is_err());
    }

    #[test]
    fn test_euclidean_frobenius_norm() {
        let a = batch(&[&[0.0, 0.0], &[0.0, 0.0]]);
        let b = batch(&[&[3.0, 0.0], &[0.0, 4.0]]);
        assert_relative_eq!(euclidean_distance(&a, &b).unwrap(), 5.0, epsilon = 1e-9);
        assert_relative_eq!(euclidean_distance(&a, &a).unwrap(), 0.0);
    }

    #[rstest]
    #[case(0.95, false)]
    #[case(0.7, false)]
    #[case(0.6999, true)]
    #[case(-0.2, true)]
    fn test_report_threshold(#[case] cosine: f64, #[case] expected: bool) {
        assert_eq!(
            SimilarityReport::from_scores(cosine, 1.0).is_likely_deepfake,
            expected
        );
    }

    #[test]
    fn test_report_compute() {
        let a = batch(&[&[1.0, 0.0]]);
        let b = batch(&[&[0.0, 1.0]]);
        let report = SimilarityReport::compute(&a, &b).unwrap();
        assert_relative_eq!(report.cosine_similarity, 0.0);
        assert_relative_eq!(report.euclidean_similarity, 2.0_f64.sqrt(), epsilon = 1e-9);
        assert!(report.is_likely_deepfake);
    }
}
