use super::*;
use ndarray::Axis;

/// Softmax activation applied independently to every column (observation).
///
/// The Jacobian is dense within a column, so it is applied directly:
/// `g = a ⊙ (f - Σ_i a_i f_i)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Softmax;

impl Activation for Softmax {
    fn activate(z: &Matrix, a: &mut Matrix) {
        Zip::from(a.axis_iter_mut(Axis(1)))
            .and(z.axis_iter(Axis(1)))
            .for_each(|mut a_col, z_col| {
                let max_val = z_col.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
                Zip::from(&mut a_col)
                    .and(&z_col)
                    .for_each(|a, &z| *a = (z - max_val).exp());
                let sum = a_col.sum();
                a_col.mapv_inplace(|v| v / sum);
            });
    }

    fn apply_jacobian(_z: &Matrix, a: &Matrix, f: &Matrix, g: &mut Matrix) {
        Zip::from(g.axis_iter_mut(Axis(1)))
            .and(a.axis_iter(Axis(1)))
            .and(f.axis_iter(Axis(1)))
            .for_each(|mut g_col, a_col, f_col| {
                let dot = a_col.dot(&f_col);
                Zip::from(&mut g_col)
                    .and(&a_col)
                    .and(&f_col)
                    .for_each(|g, &a, &f| *g = a * (f - dot));
            });
    }

    fn name() -> &'static str {
        "Softmax"
    }
}
