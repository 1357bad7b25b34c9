use crate::model::matrix::{DenseMatrix, UsageMatrix};
use crate::pipeline::Degenerate;

/// Row and column totals of a usage matrix.
///
/// Rows and columns with a zero total are inactive: they take no part in
/// fitting and no division by their margin ever happens.
#[derive(Debug, Clone, PartialEq)]
pub struct Margins {
    pub row_totals: Vec<f64>,
    pub col_totals: Vec<f64>,
    pub grand_total: f64,
    pub active_rows: Vec<usize>,
    pub active_cols: Vec<usize>,
}

impl Margins {
    pub fn compute(matrix: &UsageMatrix) -> Self {
        let mut row_totals = Vec::with_capacity(matrix.n_rows());
        let mut col_totals = vec![0.0f64; matrix.n_cols()];
        for row in matrix.rows() {
            let mut total = 0.0;
            for (c, &v) in col_totals.iter_mut().zip(row) {
                *c += v;
                total += v;
            }
            row_totals.push(total);
        }
        let grand_total = row_totals.iter().sum();
        let active_rows = active_indices(&row_totals);
        let active_cols = active_indices(&col_totals);
        Self {
            row_totals,
            col_totals,
            grand_total,
            active_rows,
            active_cols,
        }
    }

    pub fn inactive_rows(&self) -> Vec<usize> {
        inactive_indices(&self.row_totals)
    }

    pub fn inactive_cols(&self) -> Vec<usize> {
        inactive_indices(&self.col_totals)
    }
}

fn active_indices(totals: &[f64]) -> Vec<usize> {
    totals
        .iter()
        .enumerate()
        .filter(|(_, t)| **t > 0.0)
        .map(|(i, _)| i)
        .collect()
}

fn inactive_indices(totals: &[f64]) -> Vec<usize> {
    totals
        .iter()
        .enumerate()
        .filter(|(_, t)| **t <= 0.0)
        .map(|(i, _)| i)
        .collect()
}

/// Masses and metric weights over the active rows and columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Weights {
    /// `row_total / grand_total` per active row.
    pub row_mass: Vec<f64>,
    /// `col_total / grand_total` per active column.
    pub col_mass: Vec<f64>,
    /// `1 / sqrt(col_mass)` per active column.
    pub col_weight: Vec<f64>,
}

/// Chi-square standardized residuals, active rows × active columns.
///
/// `s_ij = (p_ij - r_i c_j) / sqrt(r_i c_j)`.
#[derive(Debug, Clone)]
pub struct ScaledMatrix {
    pub residuals: DenseMatrix,
}

impl ScaledMatrix {
    pub fn total_inertia(&self) -> f64 {
        self.residuals.data.iter().map(|v| v * v).sum()
    }

    /// Squared chi-square distance of each active row profile to the centroid.
    pub fn row_distances(&self, weights: &Weights) -> Vec<f64> {
        (0..self.residuals.n_rows)
            .map(|i| {
                let ss: f64 = self.residuals.row(i).iter().map(|v| v * v).sum();
                ss / weights.row_mass[i]
            })
            .collect()
    }

    /// Squared chi-square distance of each active column profile to the centroid.
    pub fn col_distances(&self, weights: &Weights) -> Vec<f64> {
        let mut ss = vec![0.0f64; self.residuals.n_cols];
        for i in 0..self.residuals.n_rows {
            for (acc, v) in ss.iter_mut().zip(self.residuals.row(i)) {
                *acc += v * v;
            }
        }
        ss.iter()
            .zip(&weights.col_mass)
            .map(|(s, m)| s / m)
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct Prepared {
    pub margins: Margins,
    pub weights: Weights,
    pub scaled: ScaledMatrix,
}

pub fn prepare(matrix: &UsageMatrix) -> Result<Prepared, Degenerate> {
    if matrix.is_empty() {
        return Err(Degenerate::EmptyMatrix);
    }
    let margins = Margins::compute(matrix);
    if margins.grand_total <= 0.0 {
        return Err(Degenerate::AllZero);
    }
    if margins.active_rows.len() < 2 {
        return Err(Degenerate::TooFewGenes {
            active: margins.active_rows.len(),
        });
    }
    if margins.active_cols.len() < 2 {
        return Err(Degenerate::TooFewVariables {
            active: margins.active_cols.len(),
        });
    }

    let n = margins.grand_total;
    let row_mass: Vec<f64> = margins
        .active_rows
        .iter()
        .map(|&i| margins.row_totals[i] / n)
        .collect();
    let col_mass: Vec<f64> = margins
        .active_cols
        .iter()
        .map(|&j| margins.col_totals[j] / n)
        .collect();
    let col_weight: Vec<f64> = col_mass.iter().map(|m| 1.0 / m.sqrt()).collect();

    let mut residuals = DenseMatrix::zeros(margins.active_rows.len(), margins.active_cols.len());
    for (ai, &i) in margins.active_rows.iter().enumerate() {
        let row = matrix.row(i);
        let ri = row_mass[ai];
        for (aj, &j) in margins.active_cols.iter().enumerate() {
            let expected = ri * col_mass[aj];
            let observed = row[j] / n;
            residuals.set(ai, aj, (observed - expected) / expected.sqrt());
        }
    }

    Ok(Prepared {
        margins,
        weights: Weights {
            row_mass,
            col_mass,
            col_weight,
        },
        scaled: ScaledMatrix { residuals },
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_margins.rs"]
mod tests;
