//! Shared vector math.

/// Squared Euclidean distance. Callers guarantee equal lengths.
pub fn squared_distance(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

/// Euclidean distance between two vectors of equal length.
pub fn euclidean_distance(a: &[f32], b: &[f32]) -> f32 {
    squared_distance(a, b).sqrt()
}

/// Element-wise arithmetic mean of equal-length vectors.
///
/// Returns `None` for an empty input. Accumulates in f64 so large classes do
/// not lose precision.
pub fn element_mean<V: AsRef<[f32]>>(vectors: &[V]) -> Option<Vec<f32>> {
    let first = vectors.first()?.as_ref();
    let mut sums = vec![0.0f64; first.len()];

    for v in vectors {
        for (acc, &x) in sums.iter_mut().zip(v.as_ref()) {
            *acc += x as f64;
        }
    }

    let n = vectors.len() as f64;
    Some(sums.into_iter().map(|s| (s / n) as f32).collect())
}
