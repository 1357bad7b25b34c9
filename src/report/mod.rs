pub mod json;
pub mod text;

use serde::Serialize;

use crate::model::config::{AnalysisMode, DetailLevel};
use crate::pipeline::stage3_diagonalize::Side;
use crate::pipeline::stage5_inertia::{AxisInertia, ItemContribution};
use crate::pipeline::stage6_supplementary::SkippedRow;
use crate::pipeline::stage7_optimal::AxisEnd;

/// Width gene identifiers are cut to in the text report.
pub const REPORT_ID_WIDTH: usize = 20;

#[derive(Debug, Clone, Serialize)]
pub struct ToolInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TableSummary {
    pub input: String,
    pub genes_total: usize,
    pub genes_active: usize,
    pub genes_excluded: Vec<String>,
    pub variables_total: usize,
    pub variables_active: usize,
    /// Dropped by the genetic code or unused by every gene.
    pub variables_excluded: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FitSummary {
    pub axes_requested: usize,
    pub axes_retained: usize,
    pub diagonalized: Side,
    pub sweeps: usize,
    pub total_inertia: f64,
    pub axes: Vec<AxisInertia>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NamedContribution {
    pub id: String,
    pub mass: f64,
    #[serde(flatten)]
    pub contribution: ItemContribution,
}

#[derive(Debug, Clone, Serialize)]
pub struct SupplementarySummary {
    pub input: String,
    pub projected: usize,
    pub skipped: Vec<SkippedRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OptimalSummary {
    pub genes_per_end: usize,
    pub high_end: AxisEnd,
    pub high_bias: f64,
    pub low_bias: f64,
    pub optimal_codons: Vec<String>,
}

/// Everything `summary.json` and `report.txt` are rendered from.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryData {
    pub tool: ToolInfo,
    pub mode: AnalysisMode,
    pub genetic_code: String,
    pub detail: DetailLevel,
    pub table: TableSummary,
    pub fit: FitSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gene_contributions: Option<Vec<NamedContribution>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variable_contributions: Option<Vec<NamedContribution>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplementary: Option<SupplementarySummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optimal: Option<OptimalSummary>,
}

pub fn format_f64_6(v: f64) -> String {
    format!("{:.6}", v)
}

pub fn format_percent(v: f64) -> String {
    format!("{:.2}%", v)
}

/// Cuts `id` to at most `width` characters.
pub fn truncate_id(id: &str, width: usize) -> &str {
    match id.char_indices().nth(width) {
        Some((idx, _)) => &id[..idx],
        None => id,
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
