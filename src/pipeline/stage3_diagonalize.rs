use crate::model::matrix::{DenseMatrix, SymMatrix, norm};
use crate::pipeline::CoaError;
use crate::pipeline::stage2_margins::Prepared;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EigenSettings {
    /// Convergence bound on the summed absolute off-diagonal entries,
    /// relative to `max(1, trace)`.
    pub tolerance: f64,
    pub max_sweeps: usize,
    /// Eigenvalues below `zero_threshold * max(1, trace)` are clamped to zero.
    pub zero_threshold: f64,
}

impl Default for EigenSettings {
    fn default() -> Self {
        Self {
            tolerance: 1e-10,
            max_sweeps: 50,
            zero_threshold: 1e-12,
        }
    }
}

/// Eigenpairs sorted by descending eigenvalue; column `k` of `vectors`
/// belongs to `values[k]`.
#[derive(Debug, Clone)]
pub struct EigenDecomposition {
    pub values: Vec<f64>,
    pub vectors: DenseMatrix,
    pub sweeps: usize,
}

impl EigenDecomposition {
    pub fn vector(&self, k: usize) -> Vec<f64> {
        self.vectors.column(k)
    }
}

fn off_diagonal(a: &[f64], n: usize) -> f64 {
    let mut sum = 0.0;
    for p in 0..n {
        for q in (p + 1)..n {
            sum += a[p * n + q].abs();
        }
    }
    sum
}

/// Flips `v` so that its largest-magnitude entry (first one on ties) is positive.
pub fn orient(v: &mut [f64]) {
    let mut best = 0usize;
    let mut best_abs = 0.0f64;
    for (i, x) in v.iter().enumerate() {
        if x.abs() > best_abs {
            best_abs = x.abs();
            best = i;
        }
    }
    if best_abs > 0.0 && v[best] < 0.0 {
        for x in v.iter_mut() {
            *x = -*x;
        }
    }
}

/// Cyclic Jacobi eigensolver for small dense symmetric matrices.
pub fn jacobi_eigen(m: &SymMatrix, settings: &EigenSettings) -> Result<EigenDecomposition, CoaError> {
    let n = m.n;
    let mut a = m.data.clone();
    let mut v = vec![0.0f64; n * n];
    for i in 0..n {
        v[i * n + i] = 1.0;
    }

    let scale = m.trace().abs().max(1.0);
    let threshold = settings.tolerance * scale;
    let mut sweeps = 0usize;

    loop {
        let off = off_diagonal(&a, n);
        if off <= threshold {
            break;
        }
        if sweeps >= settings.max_sweeps {
            return Err(CoaError::NonConvergence {
                sweeps,
                off_diagonal: off,
            });
        }
        sweeps += 1;

        for p in 0..n {
            for q in (p + 1)..n {
                let apq = a[p * n + q];
                if apq == 0.0 {
                    continue;
                }
                let theta = (a[q * n + q] - a[p * n + p]) / (2.0 * apq);
                let t = theta.signum() / (theta.abs() + (theta * theta + 1.0).sqrt());
                let c = 1.0 / (t * t + 1.0).sqrt();
                let s = t * c;

                for k in 0..n {
                    let akp = a[k * n + p];
                    let akq = a[k * n + q];
                    a[k * n + p] = c * akp - s * akq;
                    a[k * n + q] = s * akp + c * akq;
                }
                for k in 0..n {
                    let apk = a[p * n + k];
                    let aqk = a[q * n + k];
                    a[p * n + k] = c * apk - s * aqk;
                    a[q * n + k] = s * apk + c * aqk;
                }
                a[p * n + q] = 0.0;
                a[q * n + p] = 0.0;

                for k in 0..n {
                    let vkp = v[k * n + p];
                    let vkq = v[k * n + q];
                    v[k * n + p] = c * vkp - s * vkq;
                    v[k * n + q] = s * vkp + c * vkq;
                }
            }
        }
    }

    let mut order: Vec<usize> = (0..n).collect();
    // stable: equal eigenvalues keep their diagonal order
    order.sort_by(|&x, &y| a[y * n + y].total_cmp(&a[x * n + x]));

    let clamp = settings.zero_threshold * scale;
    let mut values = Vec::with_capacity(n);
    let mut vectors = DenseMatrix::zeros(n, n);
    for (k, &src) in order.iter().enumerate() {
        let lambda = a[src * n + src];
        values.push(if lambda < clamp { 0.0 } else { lambda });
        let mut col: Vec<f64> = (0..n).map(|i| v[i * n + src]).collect();
        orient(&mut col);
        for (i, x) in col.into_iter().enumerate() {
            vectors.set(i, k, x);
        }
    }

    tracing::debug!(n, sweeps, "jacobi converged");

    Ok(EigenDecomposition {
        values,
        vectors,
        sweeps,
    })
}

/// Which cross-product was diagonalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Variables,
    Genes,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    pub eigenvalue: f64,
    /// Unit eigenvector over the active variables; zero for clamped axes
    /// recovered from the gene side.
    pub vector: Vec<f64>,
}

/// Retained principal axes plus the full eigen spectrum.
#[derive(Debug, Clone)]
pub struct AxisSet {
    pub axes: Vec<Axis>,
    pub spectrum: Vec<f64>,
    pub side: Side,
    pub sweeps: usize,
    pub cross_product_trace: f64,
}

impl AxisSet {
    pub fn len(&self) -> usize {
        self.axes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.axes.is_empty()
    }

    pub fn total_inertia(&self) -> f64 {
        self.spectrum.iter().sum()
    }

    pub fn eigenvalues(&self) -> impl Iterator<Item = f64> + '_ {
        self.axes.iter().map(|a| a.eigenvalue)
    }
}

/// Largest retainable axis count for a table with these active dimensions.
pub fn max_axes(active_rows: usize, active_cols: usize) -> usize {
    active_rows.min(active_cols).saturating_sub(1)
}

/// Diagonalizes the smaller cross-product of the scaled table and keeps
/// the leading `n_axes` axes expressed over the variables.
pub fn fit_axes(
    prepared: &Prepared,
    n_axes: usize,
    settings: &EigenSettings,
) -> Result<AxisSet, CoaError> {
    let s = &prepared.scaled.residuals;
    let side = if s.n_cols <= s.n_rows {
        Side::Variables
    } else {
        Side::Genes
    };
    let cross = match side {
        Side::Variables => s.cross_product_cols(),
        Side::Genes => s.cross_product_rows(),
    };
    let decomposition = jacobi_eigen(&cross, settings)?;

    let keep = n_axes.min(decomposition.values.len());
    let mut axes = Vec::with_capacity(keep);
    for k in 0..keep {
        let eigenvalue = decomposition.values[k];
        let vector = match side {
            Side::Variables => decomposition.vector(k),
            Side::Genes => {
                if eigenvalue > 0.0 {
                    let mut v = s.transpose_mul_vec(&decomposition.vector(k));
                    let len = norm(&v);
                    if len > 0.0 {
                        v.iter_mut().for_each(|x| *x /= len);
                    }
                    orient(&mut v);
                    v
                } else {
                    vec![0.0; s.n_cols]
                }
            }
        };
        axes.push(Axis { eigenvalue, vector });
    }

    tracing::info!(
        side = ?side,
        size = cross.n,
        sweeps = decomposition.sweeps,
        retained = keep,
        "diagonalized cross-product matrix"
    );

    Ok(AxisSet {
        axes,
        spectrum: decomposition.values,
        side,
        sweeps: decomposition.sweeps,
        cross_product_trace: cross.trace(),
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_diagonalize.rs"]
mod tests;
