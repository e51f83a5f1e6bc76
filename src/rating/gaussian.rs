//! Standard normal helpers used by the TrueSkill update.
//!
//! `erfc` is the Chebyshev fit from Numerical Recipes (fractional error below 1.2e-7),
//! `ierfc` refines a rational first guess with two Newton steps.

use std::f64::consts::{PI, SQRT_2};

pub fn erfc(x: f64) -> f64 {
    let z = x.abs();
    let t = 1.0 / (1.0 + z / 2.0);
    let r = t
        * (-z * z - 1.26551223
            + t * (1.00002368
                + t * (0.37409196
                    + t * (0.09678418
                        + t * (-0.18628806
                            + t * (0.27886807
                                + t * (-1.13520398
                                    + t * (1.48851587 + t * (-0.82215223 + t * 0.17087277)))))))))
            .exp();
    if x < 0.0 { 2.0 - r } else { r }
}

pub fn ierfc(y: f64) -> f64 {
    if y >= 2.0 {
        return -100.0;
    }
    if y <= 0.0 {
        return 100.0;
    }

    let zero_point = y < 1.0;
    let y = if zero_point { y } else { 2.0 - y };
    let t = (-2.0 * (y / 2.0).ln()).sqrt();
    let mut x = -0.70711 * ((2.30753 + t * 0.27061) / (1.0 + t * (0.99229 + t * 0.04481)) - t);
    for _ in 0..2 {
        let err = erfc(x) - y;
        x += err / (1.12837916709551257 * (-(x * x)).exp() - x * err);
    }
    if zero_point { x } else { -x }
}

/// Cumulative distribution of the standard normal
pub fn cdf(x: f64) -> f64 {
    0.5 * erfc(-x / SQRT_2)
}

/// Density of the standard normal
pub fn pdf(x: f64) -> f64 {
    (-(x * x) / 2.0).exp() / (2.0 * PI).sqrt()
}

/// Inverse of `cdf`
pub fn ppf(p: f64) -> f64 {
    -SQRT_2 * ierfc(2.0 * p)
}
