use super::*;

/// Fills `arr` with independent draws from `N(mu, sigma²)` using the Box–Muller transform.
///
/// Each pair of elements consumes two draws `(u1, u2)`:
/// `r = sigma * sqrt(-2 ln u1)`, then `mu + r cos(2π u2)` and `mu + r sin(2π u2)`.
/// When `arr` has odd length the last element consumes one extra pair and keeps
/// only the cosine branch.
///
/// # Parameters
///
/// - `arr` - Buffer to fill
/// - `rng` - Random stream; its draws must lie strictly inside `(0, 1)`
/// - `mu` - Mean of the distribution
/// - `sigma` - Standard deviation of the distribution
pub fn set_normal_random(arr: &mut [f32], rng: &mut dyn RandomSource, mu: f32, sigma: f32) {
    let two_pi = std::f64::consts::TAU;
    let mu = mu as f64;
    let sigma = sigma as f64;

    let mut pairs = arr.chunks_exact_mut(2);
    for pair in &mut pairs {
        let r = sigma * (-2.0 * rng.draw().ln()).sqrt();
        let theta = two_pi * rng.draw();
        pair[0] = (r * theta.cos() + mu) as f32;
        pair[1] = (r * theta.sin() + mu) as f32;
    }

    if let [last] = pairs.into_remainder() {
        let r = sigma * (-2.0 * rng.draw().ln()).sqrt();
        let theta = two_pi * rng.draw();
        *last = (r * theta.cos() + mu) as f32;
    }
}
