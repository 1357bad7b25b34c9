use serde::Serialize;

use crate::model::config::DetailLevel;
use crate::model::matrix::DenseMatrix;
use crate::pipeline::stage3_diagonalize::AxisSet;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisInertia {
    /// 1-based axis number.
    pub axis: usize,
    pub eigenvalue: f64,
    pub percent: f64,
    pub cumulative_percent: f64,
}

/// Contribution of one gene or variable to the retained axes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemContribution {
    /// `mass · coord² / λ` per axis.
    pub absolute: Vec<f64>,
    /// `coord²` per axis over the sum of `coord²` across the retained axes.
    pub relative: Vec<f64>,
    /// Squared cosine with the retained subspace: retained `coord²` over
    /// the full squared chi-square distance.
    pub quality: f64,
    /// Share of total inertia carried by the item.
    pub inertia_share: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InertiaReport {
    pub total_inertia: f64,
    pub axes: Vec<AxisInertia>,
    pub genes: Option<Vec<ItemContribution>>,
    pub variables: Option<Vec<ItemContribution>>,
}

pub fn axis_shares(axes: &AxisSet) -> Vec<AxisInertia> {
    let total = axes.total_inertia();
    let mut cumulative = 0.0;
    axes.eigenvalues()
        .enumerate()
        .map(|(k, eigenvalue)| {
            let percent = if total > 0.0 {
                eigenvalue / total * 100.0
            } else {
                0.0
            };
            cumulative += percent;
            AxisInertia {
                axis: k + 1,
                eigenvalue,
                percent,
                cumulative_percent: cumulative,
            }
        })
        .collect()
}

/// Per-item contributions for one side of the table.
///
/// `coords` has one row per item, `masses` and `distances` (squared
/// chi-square distance to the centroid) one entry per item.
pub fn item_contributions(
    coords: &DenseMatrix,
    masses: &[f64],
    distances: &[f64],
    axes: &AxisSet,
    total_inertia: f64,
) -> Vec<ItemContribution> {
    (0..coords.n_rows)
        .map(|i| {
            let mass = masses[i];
            let d2 = distances[i];
            let squared: Vec<f64> = (0..axes.len()).map(|k| coords.get(i, k).powi(2)).collect();
            let retained: f64 = squared.iter().sum();
            let absolute = axes
                .axes
                .iter()
                .zip(&squared)
                .map(|(axis, &c2)| {
                    if axis.eigenvalue > 0.0 {
                        mass * c2 / axis.eigenvalue
                    } else {
                        0.0
                    }
                })
                .collect();
            let relative = squared
                .iter()
                .map(|&c2| if retained > 0.0 { c2 / retained } else { 0.0 })
                .collect();
            let quality = if d2 > 0.0 {
                (retained / d2).min(1.0)
            } else {
                0.0
            };
            let inertia_share = if total_inertia > 0.0 {
                mass * d2 / total_inertia
            } else {
                0.0
            };
            ItemContribution {
                absolute,
                relative,
                quality,
                inertia_share,
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy)]
pub struct InertiaInputs<'a> {
    pub axes: &'a AxisSet,
    pub row_coords: &'a DenseMatrix,
    pub col_coords: &'a DenseMatrix,
    pub row_mass: &'a [f64],
    pub col_mass: &'a [f64],
    pub row_distances: &'a [f64],
    pub col_distances: &'a [f64],
    pub level: DetailLevel,
}

pub fn analyze_inertia(inputs: &InertiaInputs<'_>) -> InertiaReport {
    let total_inertia = inputs.axes.total_inertia();
    let axes = axis_shares(inputs.axes);
    let (genes, variables) = match inputs.level {
        DetailLevel::Standard => (None, None),
        DetailLevel::Expert => (
            Some(item_contributions(
                inputs.row_coords,
                inputs.row_mass,
                inputs.row_distances,
                inputs.axes,
                total_inertia,
            )),
            Some(item_contributions(
                inputs.col_coords,
                inputs.col_mass,
                inputs.col_distances,
                inputs.axes,
                total_inertia,
            )),
        ),
    };
    InertiaReport {
        total_inertia,
        axes,
        genes,
        variables,
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage5_inertia.rs"]
mod tests;
