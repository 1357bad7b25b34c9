pub mod stage1_contingency;
pub mod stage2_margins;
pub mod stage3_diagonalize;
pub mod stage4_project;
pub mod stage5_inertia;
pub mod stage6_supplementary;
pub mod stage7_optimal;
pub mod stage8_report;

use crate::code::CodeError;
use crate::model::config::{AnalysisMode, CoaConfig, DetailLevel};
use stage1_contingency::{ContingencyTable, Variable};
use stage2_margins::{Margins, Weights, prepare};
use stage3_diagonalize::{AxisSet, fit_axes, max_axes};
use stage4_project::{Coordinates, project};
use stage5_inertia::{InertiaInputs, InertiaReport, analyze_inertia};
use stage6_supplementary::{SupplementaryProjection, project_supplementary};

#[derive(Debug, thiserror::Error)]
pub enum CoaError {
    #[error("eigen decomposition did not converge after {sweeps} sweeps (off-diagonal sum {off_diagonal:e})")]
    NonConvergence { sweeps: usize, off_diagonal: f64 },
    #[error("{context}: expected {expected} columns, found {found}")]
    DimensionMismatch {
        context: String,
        expected: usize,
        found: usize,
    },
    #[error("invalid value {value} at row {row}, column {col}")]
    InvalidValue { row: usize, col: usize, value: f64 },
    #[error("supplementary table built for {found:?} but analysis was fitted on {fitted:?}")]
    ModeMismatch {
        fitted: AnalysisMode,
        found: AnalysisMode,
    },
    #[error(transparent)]
    Code(#[from] CodeError),
}

/// Reasons an analysis is skipped instead of fitted.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Degenerate {
    #[error("usage matrix is empty")]
    EmptyMatrix,
    #[error("every cell of the usage matrix is zero")]
    AllZero,
    #[error("only {active} gene(s) with non-zero usage; at least 2 required")]
    TooFewGenes { active: usize },
    #[error("only {active} variable(s) with non-zero usage; at least 2 required")]
    TooFewVariables { active: usize },
    #[error("total inertia is zero; usage does not vary across genes")]
    ZeroInertia,
}

#[derive(Debug)]
pub enum FitOutcome {
    Fitted(Box<FittedCoa>),
    Skipped(Degenerate),
}

impl FitOutcome {
    pub fn fitted(self) -> Option<FittedCoa> {
        match self {
            FitOutcome::Fitted(f) => Some(*f),
            FitOutcome::Skipped(_) => None,
        }
    }
}

/// A completed correspondence analysis.
///
/// Immutable once built; supplementary projection only reads it.
#[derive(Debug, Clone)]
pub struct FittedCoa {
    mode: AnalysisMode,
    level: DetailLevel,
    genes: Vec<String>,
    variables: Vec<Variable>,
    margins: Margins,
    weights: Weights,
    axes: AxisSet,
    coordinates: Coordinates,
    inertia: InertiaReport,
    requested_axes: usize,
}

impl FittedCoa {
    pub fn mode(&self) -> AnalysisMode {
        self.mode
    }

    pub fn level(&self) -> DetailLevel {
        self.level
    }

    pub fn genes(&self) -> &[String] {
        &self.genes
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn margins(&self) -> &Margins {
        &self.margins
    }

    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    pub fn axes(&self) -> &AxisSet {
        &self.axes
    }

    pub fn coordinates(&self) -> &Coordinates {
        &self.coordinates
    }

    pub fn inertia(&self) -> &InertiaReport {
        &self.inertia
    }

    pub fn requested_axes(&self) -> usize {
        self.requested_axes
    }

    pub fn n_axes(&self) -> usize {
        self.axes.len()
    }

    /// Active genes paired with their coordinate row.
    pub fn active_genes(&self) -> impl Iterator<Item = (&str, &[f64])> + '_ {
        self.margins
            .active_rows
            .iter()
            .enumerate()
            .map(|(ai, &i)| (self.genes[i].as_str(), self.coordinates.rows.row(ai)))
    }

    /// Active variables paired with their coordinate row.
    pub fn active_variables(&self) -> impl Iterator<Item = (&Variable, &[f64])> + '_ {
        self.margins
            .active_cols
            .iter()
            .enumerate()
            .map(|(aj, &j)| (&self.variables[j], self.coordinates.cols.row(aj)))
    }

    pub fn project_supplementary(
        &self,
        table: &ContingencyTable,
    ) -> Result<SupplementaryProjection, CoaError> {
        project_supplementary(self, table)
    }
}

const ZERO_INERTIA: f64 = 1e-12;

fn resolve_axis_count(config: &CoaConfig, limit: usize) -> usize {
    let cap = config.mode.axis_cap();
    let mut axes = config.axes;
    if axes > cap {
        tracing::warn!(
            requested = axes,
            cap,
            mode = config.mode.label(),
            "requested axis count exceeds mode maximum; clamping"
        );
        axes = cap;
    }
    if axes > limit {
        tracing::warn!(
            requested = axes,
            limit,
            "requested axis count exceeds what the table supports; clamping"
        );
        axes = limit;
    }
    if axes == 0 {
        tracing::warn!("axis count of zero requested; retaining one axis");
        axes = 1;
    }
    axes
}

/// Fits a correspondence analysis to `table`.
///
/// Degenerate tables come back as [`FitOutcome::Skipped`]; only numerical
/// failure is an error.
pub fn fit_analysis(table: &ContingencyTable, config: &CoaConfig) -> Result<FitOutcome, CoaError> {
    let prepared = match prepare(&table.matrix) {
        Ok(p) => p,
        Err(reason) => return Ok(FitOutcome::Skipped(reason)),
    };

    for i in prepared.margins.inactive_rows() {
        tracing::warn!(gene = %table.genes[i], "gene has no usage in the analysed variables; excluded");
    }
    for j in prepared.margins.inactive_cols() {
        tracing::info!(variable = %table.variables[j].label(), "variable unused by every gene; excluded");
    }

    if prepared.scaled.total_inertia() <= ZERO_INERTIA {
        return Ok(FitOutcome::Skipped(Degenerate::ZeroInertia));
    }

    let limit = max_axes(
        prepared.margins.active_rows.len(),
        prepared.margins.active_cols.len(),
    );
    let n_axes = resolve_axis_count(config, limit);
    let axes = fit_axes(&prepared, n_axes, &config.eigen)?;
    if axes.total_inertia() <= 0.0 {
        return Ok(FitOutcome::Skipped(Degenerate::ZeroInertia));
    }

    let coordinates = project(&table.matrix, &prepared.margins, &prepared.weights, &axes);

    let (row_distances, col_distances) = match config.level {
        DetailLevel::Standard => (Vec::new(), Vec::new()),
        DetailLevel::Expert => (
            prepared.scaled.row_distances(&prepared.weights),
            prepared.scaled.col_distances(&prepared.weights),
        ),
    };
    let inertia = analyze_inertia(&InertiaInputs {
        axes: &axes,
        row_coords: &coordinates.rows,
        col_coords: &coordinates.cols,
        row_mass: &prepared.weights.row_mass,
        col_mass: &prepared.weights.col_mass,
        row_distances: &row_distances,
        col_distances: &col_distances,
        level: config.level,
    });

    tracing::info!(
        genes = prepared.margins.active_rows.len(),
        variables = prepared.margins.active_cols.len(),
        axes = axes.len(),
        total_inertia = inertia.total_inertia,
        "correspondence analysis fitted"
    );

    let stage2_margins::Prepared {
        margins, weights, ..
    } = prepared;

    Ok(FitOutcome::Fitted(Box::new(FittedCoa {
        mode: table.mode,
        level: config.level,
        genes: table.genes.clone(),
        variables: table.variables.clone(),
        margins,
        weights,
        axes,
        coordinates,
        inertia,
        requested_axes: config.axes,
    })))
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/mod.rs"]
mod tests;
