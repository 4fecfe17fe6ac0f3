use nalgebra::Point3;

/// Smallest Euclidean distance from `first` or any point of `rest` to `target`.
pub fn min_distance_to(first: &Point3<f64>, rest: &[Point3<f64>], target: &Point3<f64>) -> f64 {
    rest.iter().fold(nalgebra::distance(first, target), |best, p| {
        best.min(nalgebra::distance(p, target))
    })
}
