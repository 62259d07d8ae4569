use super::*;

/// Logistic sigmoid activation, `a = 1 / (1 + exp(-z))`.
///
/// The derivative is expressed through the cached output: `da/dz = a (1 - a)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sigmoid;

impl Activation for Sigmoid {
    fn activate(z: &Matrix, a: &mut Matrix) {
        Zip::from(a).and(z).for_each(|a, &z| {
            // Numerically stable in both tails
            *a = if z >= 0.0 {
                1.0 / (1.0 + (-z).exp())
            } else {
                let e = z.exp();
                e / (1.0 + e)
            };
        });
    }

    fn apply_jacobian(_z: &Matrix, a: &Matrix, f: &Matrix, g: &mut Matrix) {
        Zip::from(g)
            .and(a)
            .and(f)
            .for_each(|g, &a, &f| *g = a * (1.0 - a) * f);
    }

    fn name() -> &'static str {
        "Sigmoid"
    }
}
