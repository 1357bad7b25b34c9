use crate::model::matrix::{DenseMatrix, UsageMatrix};
use crate::pipeline::stage2_margins::{Margins, Weights};
use crate::pipeline::stage3_diagonalize::AxisSet;

/// Principal coordinates of active genes (rows) and active variables
/// (columns), one column per retained axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Coordinates {
    pub rows: DenseMatrix,
    pub cols: DenseMatrix,
}

/// Transition formula for one row profile.
///
/// `values` are the row's entries over the active variables and `total`
/// their sum; `f_k = Σ_j (x_j / total - c_j) · v_jk / sqrt(c_j)`.
pub fn profile_coordinates(values: &[f64], total: f64, weights: &Weights, axes: &AxisSet) -> Vec<f64> {
    let centred: Vec<f64> = values
        .iter()
        .zip(&weights.col_mass)
        .zip(&weights.col_weight)
        .map(|((&x, &c), &w)| (x / total - c) * w)
        .collect();
    axes.axes
        .iter()
        .map(|axis| {
            if axis.eigenvalue > 0.0 {
                centred.iter().zip(&axis.vector).map(|(a, b)| a * b).sum()
            } else {
                0.0
            }
        })
        .collect()
}

pub fn project(
    matrix: &UsageMatrix,
    margins: &Margins,
    weights: &Weights,
    axes: &AxisSet,
) -> Coordinates {
    let k = axes.len();
    let mut rows = DenseMatrix::zeros(margins.active_rows.len(), k);
    let mut values = Vec::with_capacity(margins.active_cols.len());
    for (ai, &i) in margins.active_rows.iter().enumerate() {
        let row = matrix.row(i);
        values.clear();
        values.extend(margins.active_cols.iter().map(|&j| row[j]));
        let coords = profile_coordinates(&values, margins.row_totals[i], weights, axes);
        for (axis, c) in coords.into_iter().enumerate() {
            rows.set(ai, axis, c);
        }
    }

    let mut cols = DenseMatrix::zeros(margins.active_cols.len(), k);
    for (axis_idx, axis) in axes.axes.iter().enumerate() {
        if axis.eigenvalue <= 0.0 {
            continue;
        }
        let root = axis.eigenvalue.sqrt();
        for (aj, (&v, &w)) in axis.vector.iter().zip(&weights.col_weight).enumerate() {
            cols.set(aj, axis_idx, root * v * w);
        }
    }

    Coordinates { rows, cols }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_project.rs"]
mod tests;
