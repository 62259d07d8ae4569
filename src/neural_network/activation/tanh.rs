use super::*;

/// Hyperbolic tangent activation; `da/dz = 1 - a²`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tanh;

impl Activation for Tanh {
    fn activate(z: &Matrix, a: &mut Matrix) {
        Zip::from(a).and(z).for_each(|a, &z| *a = z.tanh());
    }

    fn apply_jacobian(_z: &Matrix, a: &Matrix, f: &Matrix, g: &mut Matrix) {
        Zip::from(g)
            .and(a)
            .and(f)
            .for_each(|g, &a, &f| *g = (1.0 - a * a) * f);
    }

    fn name() -> &'static str {
        "Tanh"
    }
}
