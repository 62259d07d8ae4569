use super::*;

/// ReLU (Rectified Linear Unit) activation.
///
/// `a = max(z, 0)` element-wise. The Jacobian is diagonal with entries `1[a > 0]`,
/// so the upstream gradient passes through where the unit fired and is zeroed elsewhere.
///
/// # Example
/// ```rust
/// use ndarray::array;
/// use rustynn::prelude::*;
///
/// let z = array![[-1.0_f32, 2.0], [0.0, 3.0]];
/// let mut a = z.clone();
/// ReLU::activate(&z, &mut a);
/// assert_eq!(a, array![[0.0, 2.0], [0.0, 3.0]]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ReLU;

impl Activation for ReLU {
    fn activate(z: &Matrix, a: &mut Matrix) {
        Zip::from(a).and(z).for_each(|a, &z| *a = z.max(0.0));
    }

    fn apply_jacobian(_z: &Matrix, a: &Matrix, f: &Matrix, g: &mut Matrix) {
        Zip::from(g)
            .and(a)
            .and(f)
            .for_each(|g, &a, &f| *g = if a > 0.0 { f } else { 0.0 });
    }

    fn name() -> &'static str {
        "ReLU"
    }
}
