//! The utilities module provides general capabilities, that may span the
//! analytic, input modeling, simulation, and output analysis modules.  The
//! utilities are centered around common arithmetic and debugging.

pub mod errors;

/// This function computes n! iteratively over f64.  Server counts are small
/// positive integers in practice, so no gamma-function approximation is
/// used; very large arguments overflow to infinity in the ordinary
/// floating-point manner.
pub fn factorial(n: usize) -> f64 {
    (1..=n).fold(1.0, |product, k| product * k as f64)
}

/// This function calculates the sample mean from a set of points - a simple
/// arithmetic mean.
pub fn sample_mean(points: &[f64]) -> f64 {
    points.iter().sum::<f64>() / (points.len() as f64)
}

/// This function calculates sample variance, given a set of points and the
/// sample mean.
pub fn sample_variance(points: &[f64], mean: &f64) -> f64 {
    points
        .iter()
        .fold(0.0, |acc, point| acc + (point - mean).powi(2))
        / (points.len() as f64)
}

/// When the `console_error_panic_hook` feature is enabled, we can call the
/// `set_panic_hook` function at least once during initialization, and then
/// we will get better error messages if our code ever panics.
///
/// For more details see
/// <https://github.com/rustwasm/console_error_panic_hook#readme>
pub fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}
