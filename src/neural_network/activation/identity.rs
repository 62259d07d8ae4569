use super::*;

/// Identity activation, `a = z`. Used for linear output layers.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl Activation for Identity {
    fn activate(z: &Matrix, a: &mut Matrix) {
        a.assign(z);
    }

    fn apply_jacobian(_z: &Matrix, _a: &Matrix, f: &Matrix, g: &mut Matrix) {
        g.assign(f);
    }

    fn name() -> &'static str {
        "Identity"
    }
}
