//! Approximate Median Significance
//!
//! The challenge figure of merit:
//!
//! ```text
//! AMS = sqrt(2 * ((s + b + b_r) * ln(1 + s / (b + b_r)) - s))
//! ```
//!
//! with `b_r = 10` regularising small background sums.

/// Regularisation term added to the background sum
pub const BACKGROUND_REGULARIZATION: f64 = 10.0;

/// AMS for selected signal weight `sig` and background weight `bkg`.
///
/// Returns 0 when `bkg` is exactly 0. Negative inputs are not checked; a
/// negative radicand yields NaN.
pub fn ams(sig: f64, bkg: f64) -> f64 {
    if bkg == 0.0 {
        return 0.0;
    }
    let br = BACKGROUND_REGULARIZATION;
    (2.0 * ((sig + bkg + br) * (1.0 + sig / (bkg + br)).ln() - sig)).sqrt()
}
