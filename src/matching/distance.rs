use crate::core::lab::Lab;

/// CIE76 ΔE: Euclidean distance between two Lab points.
///
/// Thresholds such as the default maximum search distance are tuned against
/// this metric; switching to CIE94 or CIEDE2000 means re-tuning them.
#[must_use]
pub fn delta_e(lab1: &Lab, lab2: &Lab) -> f64 {
    let dl = lab1.l - lab2.l;
    let da = lab1.a - lab2.a;
    let db = lab1.b - lab2.b;
    (dl * dl + da * da + db * db).sqrt()
}

/// Round a distance to one decimal place for display
#[must_use]
pub fn round_distance(distance: f64) -> f64 {
    (distance * 10.0).round() / 10.0
}
