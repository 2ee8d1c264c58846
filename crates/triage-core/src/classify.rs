//! Nearest-centroid classification.
//!
//! Raw Euclidean distance, no normalization. Ties go to the class that comes
//! first in class-name order.

use serde::Serialize;

use crate::corpus::CentroidSet;
use crate::error::ClassifyError;
use crate::math::euclidean_distance;

/// A class and the query's distance to its centroid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub class: String,
    pub distance: f32,
}

/// Return the class whose centroid is closest to `query`.
pub fn classify(query: &[f32], centroids: &CentroidSet) -> Result<Prediction, ClassifyError> {
    check_dimension(query, centroids)?;

    // NaN never compares smaller, so a NaN centroid is never chosen.
    let mut best: Option<(&str, f32)> = None;
    for (class, centroid) in centroids.iter() {
        let distance = euclidean_distance(query, centroid);
        let closer = match best {
            Some((_, best_distance)) => distance < best_distance,
            None => !distance.is_nan(),
        };
        if closer {
            best = Some((class, distance));
        }
    }

    best.map(|(class, distance)| Prediction {
        class: class.to_string(),
        distance,
    })
    .ok_or(ClassifyError::NoComparableCentroid)
}

/// Every class with its distance to `query`, closest first.
pub fn rank(query: &[f32], centroids: &CentroidSet) -> Result<Vec<Prediction>, ClassifyError> {
    check_dimension(query, centroids)?;

    let mut ranked: Vec<Prediction> = centroids
        .iter()
        .map(|(class, centroid)| Prediction {
            class: class.to_string(),
            distance: euclidean_distance(query, centroid),
        })
        .collect();
    // NaN distances go last. Stable sort keeps class-name order among
    // equal distances.
    ranked.sort_by(|a, b| {
        a.distance
            .is_nan()
            .cmp(&b.distance.is_nan())
            .then(a.distance.total_cmp(&b.distance))
    });
    Ok(ranked)
}

fn check_dimension(query: &[f32], centroids: &CentroidSet) -> Result<(), ClassifyError> {
    let expected = centroids.dimension().ok_or(ClassifyError::NoCentroids)?;
    if query.len() != expected {
        return Err(ClassifyError::DimensionMismatch {
            expected,
            actual: query.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cat_dog() -> CentroidSet {
        let mut set = CentroidSet::new();
        set.insert_mean("cat", &[vec![0.0, 0.0], vec![2.0, 0.0]])
            .unwrap();
        set.insert_mean("dog", &[vec![10.0, 10.0]]).unwrap();
        set
    }

    #[test]
    fn test_cat_dog_scenario() {
        let prediction = classify(&[1.0, 1.0], &cat_dog()).unwrap();
        assert_eq!(prediction.class, "cat");
        assert!((prediction.distance - 2.0f32.sqrt()).abs() < 1e-6);

        let ranked = rank(&[1.0, 1.0], &cat_dog()).unwrap();
        assert_eq!(ranked[1].class, "dog");
        assert!((ranked[1].distance - 162.0f32.sqrt()).abs() < 1e-4);
    }

    #[test]
    fn test_query_equal_to_centroid_wins() {
        let set = cat_dog();
        for (class, centroid) in set.iter() {
            let prediction = classify(centroid, &set).unwrap();
            assert_eq!(prediction.class, class);
            assert_eq!(prediction.distance, 0.0);
        }
    }

    #[test]
    fn test_result_is_minimal_among_candidates() {
        let mut set = CentroidSet::new();
        set.insert("a", vec![0.0, 5.0, 1.0], 1).unwrap();
        set.insert("b", vec![3.0, -1.0, 2.0], 1).unwrap();
        set.insert("c", vec![-4.0, 0.5, 0.0], 1).unwrap();
        set.insert("d", vec![1.0, 1.0, 1.0], 1).unwrap();

        let queries = [
            [0.0, 0.0, 0.0],
            [2.5, -0.5, 2.0],
            [-3.0, 1.0, 0.0],
            [0.2, 4.0, 1.0],
            [100.0, 100.0, 100.0],
        ];
        for query in queries {
            let prediction = classify(&query, &set).unwrap();
            for (_, centroid) in set.iter() {
                assert!(prediction.distance <= euclidean_distance(&query, centroid));
            }
        }
    }

    #[test]
    fn test_tie_goes_to_first_class_name() {
        let mut set = CentroidSet::new();
        set.insert("zebra", vec![1.0, 0.0], 1).unwrap();
        set.insert("ant", vec![-1.0, 0.0], 1).unwrap();

        let prediction = classify(&[0.0, 0.0], &set).unwrap();
        assert_eq!(prediction.class, "ant");

        let ranked = rank(&[0.0, 0.0], &set).unwrap();
        let order: Vec<_> = ranked.iter().map(|p| p.class.as_str()).collect();
        assert_eq!(order, vec!["ant", "zebra"]);
    }

    #[test]
    fn test_empty_centroids_is_an_error() {
        let set = CentroidSet::new();
        assert_eq!(
            classify(&[1.0, 2.0], &set).unwrap_err(),
            ClassifyError::NoCentroids
        );
        assert_eq!(rank(&[1.0], &set).unwrap_err(), ClassifyError::NoCentroids);
    }

    #[test]
    fn test_nan_centroid_never_wins() {
        let mut set = CentroidSet::new();
        set.insert("a", vec![0.0, 0.0], 1).unwrap();
        set.insert("b", vec![f32::NAN, 0.0], 1).unwrap();
        set.insert("c", vec![5.0, 5.0], 1).unwrap();

        let prediction = classify(&[0.0, 0.0], &set).unwrap();
        assert_eq!(prediction.class, "a");

        let prediction = classify(&[4.0, 4.0], &set).unwrap();
        assert_eq!(prediction.class, "c");
    }

    #[test]
    fn test_nan_first_in_name_order_is_skipped() {
        let mut set = CentroidSet::new();
        set.insert("a", vec![f32::NAN, 0.0], 1).unwrap();
        set.insert("b", vec![3.0, 0.0], 1).unwrap();

        let prediction = classify(&[0.0, 0.0], &set).unwrap();
        assert_eq!(prediction.class, "b");
        assert_eq!(prediction.distance, 3.0);
    }

    #[test]
    fn test_rank_puts_nan_last() {
        let mut set = CentroidSet::new();
        set.insert("a", vec![f32::NAN, 0.0], 1).unwrap();
        set.insert("b", vec![-f32::NAN, 0.0], 1).unwrap();
        set.insert("c", vec![1.0, 0.0], 1).unwrap();

        let ranked = rank(&[0.0, 0.0], &set).unwrap();
        assert_eq!(ranked[0].class, "c");
        assert!(ranked[1].distance.is_nan());
        assert!(ranked[2].distance.is_nan());
    }

    #[test]
    fn test_all_nan_is_an_error() {
        let mut set = CentroidSet::new();
        set.insert("a", vec![f32::NAN, 0.0], 1).unwrap();

        assert_eq!(
            classify(&[0.0, 0.0], &set).unwrap_err(),
            ClassifyError::NoComparableCentroid
        );
    }

    #[test]
    fn test_dimension_mismatch() {
        let err = classify(&[1.0, 2.0, 3.0], &cat_dog()).unwrap_err();
        assert_eq!(
            err,
            ClassifyError::DimensionMismatch {
                expected: 2,
                actual: 3
            }
        );
    }
}
