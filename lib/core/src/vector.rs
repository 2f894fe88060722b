use serde::{Deserialize, Serialize};

/// Fixed-length embedding produced by an external model
///
/// Two vectors are only comparable when their dimensions match.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct EmbeddingVector {
    data: Vec<f32>,
}

impl EmbeddingVector {
    #[inline]
    #[must_use]
    pub fn new(data: Vec<f32>) -> Self {
        Self { data }
    }

    #[inline]
    #[must_use]
    pub fn from_slice(data: &[f32]) -> Self {
        Self {
            data: data.to_vec(),
        }
    }

    #[inline]
    #[must_use]
    pub fn dim(&self) -> usize {
        self.data.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Cosine similarity; 0.0 when dimensions differ or either norm is zero
    #[inline]
    pub fn cosine_similarity(&self, other: &EmbeddingVector) -> f32 {
        cosine_similarity(&self.data, &other.data)
    }
}

impl From<Vec<f32>> for EmbeddingVector {
    fn from(data: Vec<f32>) -> Self {
        Self::new(data)
    }
}

/// `dot(a, b) / (|a| * |b|)`, clamped to [-1, 1]
///
/// Never divides by zero: mismatched lengths, empty input and zero-norm
/// vectors all score 0.0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let (dot, norm_a_sq, norm_b_sq) = dot_and_norms(a, b);
    if norm_a_sq == 0.0 || norm_b_sq == 0.0 {
        return 0.0;
    }

    let score = dot / (norm_a_sq.sqrt() * norm_b_sq.sqrt());
    if score.is_nan() {
        return 0.0;
    }
    score.clamp(-1.0, 1.0) as f32
}

/// Single pass over both slices, four elements at a time with split
/// accumulators. Accumulates in f64 so `cos(v, v)` lands on 1.0.
#[inline]
fn dot_and_norms(a: &[f32], b: &[f32]) -> (f64, f64, f64) {
    let mut dot = [0.0f64; 2];
    let mut na = [0.0f64; 2];
    let mut nb = [0.0f64; 2];

    let chunks_a = a.chunks_exact(4);
    let chunks_b = b.chunks_exact(4);
    let rem_a = chunks_a.remainder();
    let rem_b = chunks_b.remainder();

    for (ca, cb) in chunks_a.zip(chunks_b) {
        let (a0, a1, a2, a3) = (ca[0] as f64, ca[1] as f64, ca[2] as f64, ca[3] as f64);
        let (b0, b1, b2, b3) = (cb[0] as f64, cb[1] as f64, cb[2] as f64, cb[3] as f64);

        dot[0] += a0 * b0 + a1 * b1;
        dot[1] += a2 * b2 + a3 * b3;
        na[0] += a0 * a0 + a1 * a1;
        na[1] += a2 * a2 + a3 * a3;
        nb[0] += b0 * b0 + b1 * b1;
        nb[1] += b2 * b2 + b3 * b3;
    }

    for (&x, &y) in rem_a.iter().zip(rem_b) {
        let (x, y) = (x as f64, y as f64);
        dot[0] += x * y;
        na[0] += x * x;
        nb[0] += y * y;
    }

    (dot[0] + dot[1], na[0] + na[1], nb[0] + nb[1])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_similarity() {
        let v1 = EmbeddingVector::new(vec![1.0, 0.0]);
        let v2 = EmbeddingVector::new(vec![1.0, 0.0]);
        assert!((v1.cosine_similarity(&v2) - 1.0).abs() < 1e-6);

        let v3 = EmbeddingVector::new(vec![1.0, 0.0]);
        let v4 = EmbeddingVector::new(vec![0.0, 1.0]);
        assert!((v3.cosine_similarity(&v4) - 0.0).abs() < 1e-6);
    }

    #[test]
    fn test_self_similarity_is_one() {
        let v: Vec<f32> = (0..37).map(|i| (i as f32 * 0.37).sin()).collect();
        assert_eq!(cosine_similarity(&v, &v), 1.0);

        let neg: Vec<f32> = v.iter().map(|x| -x).collect();
        assert_eq!(cosine_similarity(&v, &neg), -1.0);
    }

    #[test]
    fn test_degenerate_inputs_score_zero() {
        assert_eq!(cosine_similarity(&[1.0, 2.0], &[1.0, 2.0, 3.0]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]), 0.0);
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
    }

    #[test]
    fn test_remainder_elements_counted() {
        // only the fifth element differs from zero, past the 4-wide chunk
        let a = [0.0, 0.0, 0.0, 0.0, 3.0];
        let b = [0.0, 0.0, 0.0, 0.0, 5.0];
        assert_eq!(cosine_similarity(&a, &b), 1.0);
        assert_eq!(cosine_similarity(&a, &[1.0, 0.0, 0.0, 0.0, 0.0]), 0.0);
    }

    #[test]
    fn test_serde_transparent() {
        let v: EmbeddingVector = serde_json::from_str("[0.5, 1.5]").unwrap();
        assert_eq!(v.dim(), 2);
        assert_eq!(serde_json::to_string(&v).unwrap(), "[0.5,1.5]");
    }
}
