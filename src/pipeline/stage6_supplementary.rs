use rayon::prelude::*;
use serde::Serialize;

use crate::pipeline::stage1_contingency::ContingencyTable;
use crate::pipeline::stage4_project::profile_coordinates;
use crate::pipeline::{CoaError, FittedCoa};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectedGene {
    pub gene: String,
    pub coordinates: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedRow {
    pub gene: String,
    pub reason: String,
}

/// Result of projecting extra genes onto a fitted analysis.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SupplementaryProjection {
    pub projected: Vec<ProjectedGene>,
    pub skipped: Vec<SkippedRow>,
}

enum RowOutcome {
    Projected(ProjectedGene),
    Skipped(SkippedRow),
}

/// Projects every row of `table` with the transition formula, reusing the
/// fitted column masses and eigenvectors. Each row is scaled by its own
/// total over the fitted variables.
pub fn project_supplementary(
    fitted: &FittedCoa,
    table: &ContingencyTable,
) -> Result<SupplementaryProjection, CoaError> {
    if table.mode != fitted.mode() {
        return Err(CoaError::ModeMismatch {
            fitted: fitted.mode(),
            found: table.mode,
        });
    }
    if table.matrix.n_cols() != fitted.variables().len() {
        return Err(CoaError::DimensionMismatch {
            context: "supplementary table".to_string(),
            expected: fitted.variables().len(),
            found: table.matrix.n_cols(),
        });
    }

    let active_cols = &fitted.margins().active_cols;
    let weights = fitted.weights();
    let axes = fitted.axes();

    let outcomes: Vec<RowOutcome> = (0..table.matrix.n_rows())
        .into_par_iter()
        .map(|i| {
            let row = table.matrix.row(i);
            let gene = table.genes[i].clone();
            let values: Vec<f64> = active_cols.iter().map(|&j| row[j]).collect();
            let total: f64 = values.iter().sum();
            if total <= 0.0 {
                return RowOutcome::Skipped(SkippedRow {
                    gene,
                    reason: "zero total over the fitted variables".to_string(),
                });
            }
            let coordinates = profile_coordinates(&values, total, weights, axes);
            RowOutcome::Projected(ProjectedGene { gene, coordinates })
        })
        .collect();

    let dropped_mass: f64 = fitted
        .margins()
        .inactive_cols()
        .iter()
        .map(|&j| {
            (0..table.matrix.n_rows())
                .map(|i| table.matrix.get(i, j))
                .sum::<f64>()
        })
        .sum();
    if dropped_mass > 0.0 {
        tracing::warn!(
            dropped_mass,
            "supplementary genes use variables absent from the fitted table; those counts are ignored"
        );
    }

    let mut out = SupplementaryProjection::default();
    for outcome in outcomes {
        match outcome {
            RowOutcome::Projected(p) => out.projected.push(p),
            RowOutcome::Skipped(s) => {
                tracing::warn!(gene = %s.gene, reason = %s.reason, "supplementary gene not projectable");
                out.skipped.push(s);
            }
        }
    }
    tracing::info!(
        projected = out.projected.len(),
        skipped = out.skipped.len(),
        "projected supplementary genes"
    );
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage6_supplementary.rs"]
mod tests;
