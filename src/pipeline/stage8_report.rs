use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::code::GeneticCode;
use crate::pipeline::FittedCoa;
use crate::pipeline::stage1_contingency::Variable;
use crate::pipeline::stage5_inertia::ItemContribution;
use crate::pipeline::stage6_supplementary::SupplementaryProjection;
use crate::pipeline::stage7_optimal::OptimalCodons;
use crate::report::json::render_summary_json;
use crate::report::text::render_report_text;
use crate::report::{
    FitSummary, NamedContribution, OptimalSummary, SummaryData, SupplementarySummary,
    TableSummary, ToolInfo, format_f64_6,
};

pub const GENES_FILE: &str = "genes.tsv";
pub const VARIABLES_FILE: &str = "variables.tsv";
pub const SUMMARY_FILE: &str = "summary.json";
pub const REPORT_FILE: &str = "report.txt";
pub const OPTIMAL_FILE: &str = "optimal_codons.tsv";

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct ReportInput<'a> {
    pub fitted: &'a FittedCoa,
    pub code: &'a GeneticCode,
    /// Variables dropped by the genetic code before fitting.
    pub excluded: &'a [Variable],
    pub input_path: String,
    pub supplementary: Option<(&'a SupplementaryProjection, String)>,
    pub optimal: Option<&'a OptimalCodons>,
    pub tool_name: String,
    pub tool_version: String,
}

/// Writes every output file for a fitted analysis into `out_dir`.
pub fn write_reports(input: &ReportInput<'_>, out_dir: &Path) -> Result<(), ReportError> {
    fs::create_dir_all(out_dir)?;

    write_gene_tsv(input, &out_dir.join(GENES_FILE))?;
    write_variable_tsv(input.fitted, &out_dir.join(VARIABLES_FILE))?;
    if let Some(optimal) = input.optimal {
        write_optimal_tsv(optimal, &out_dir.join(OPTIMAL_FILE))?;
    }

    let summary = build_summary(input);
    let json = render_summary_json(&summary)?;
    write_text(&out_dir.join(SUMMARY_FILE), &json)?;

    let report = render_report_text(&summary);
    write_text(&out_dir.join(REPORT_FILE), &report)?;

    tracing::info!(out = %out_dir.display(), "reports written");
    Ok(())
}

fn write_coordinate_rows<W: Write>(
    w: &mut W,
    id: &str,
    kind: &str,
    coords: &[f64],
) -> std::io::Result<()> {
    for (k, c) in coords.iter().enumerate() {
        writeln!(w, "{}\t{}\t{}\t{}", id, kind, k + 1, format_f64_6(*c))?;
    }
    Ok(())
}

fn coordinate_header() -> String {
    ["id", "kind", "axis", "coordinate"].join("\t")
}

fn write_gene_tsv(input: &ReportInput<'_>, path: &Path) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    writeln!(w, "{}", coordinate_header())?;
    for (gene, coords) in input.fitted.active_genes() {
        write_coordinate_rows(&mut w, gene, "active", coords)?;
    }
    if let Some((supp, _)) = &input.supplementary {
        for row in &supp.projected {
            write_coordinate_rows(&mut w, &row.gene, "supplementary", &row.coordinates)?;
        }
    }
    w.flush()
}

fn write_variable_tsv(fitted: &FittedCoa, path: &Path) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    writeln!(w, "{}", coordinate_header())?;
    for (variable, coords) in fitted.active_variables() {
        write_coordinate_rows(&mut w, &variable.label(), "active", coords)?;
    }
    w.flush()
}

fn write_optimal_tsv(optimal: &OptimalCodons, path: &Path) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    let header = [
        "codon",
        "amino_acid",
        "high_count",
        "high_rscu",
        "low_count",
        "low_rscu",
        "delta_rscu",
        "chi_square",
        "optimal",
    ]
    .join("\t");
    writeln!(w, "{}", header)?;
    for c in &optimal.codons {
        let row = [
            c.codon.clone(),
            c.amino_acid.clone(),
            format!("{}", c.high_count),
            format_f64_6(c.high_rscu),
            format!("{}", c.low_count),
            format_f64_6(c.low_rscu),
            format_f64_6(c.delta_rscu),
            format_f64_6(c.chi_square),
            (if c.optimal { "yes" } else { "no" }).to_string(),
        ];
        writeln!(w, "{}", row.join("\t"))?;
    }
    w.flush()
}

fn write_text(path: &Path, content: &str) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    w.write_all(content.as_bytes())?;
    w.flush()
}

fn named(
    ids: Vec<String>,
    masses: &[f64],
    contributions: &[ItemContribution],
) -> Vec<NamedContribution> {
    ids.into_iter()
        .zip(masses)
        .zip(contributions)
        .map(|((id, &mass), c)| NamedContribution {
            id,
            mass,
            contribution: c.clone(),
        })
        .collect()
}

pub fn build_summary(input: &ReportInput<'_>) -> SummaryData {
    let fitted = input.fitted;
    let margins = fitted.margins();
    let weights = fitted.weights();
    let axes = fitted.axes();
    let inertia = fitted.inertia();

    let mut variables_excluded: Vec<String> = input.excluded.iter().map(|v| v.label()).collect();
    variables_excluded.extend(
        margins
            .inactive_cols()
            .into_iter()
            .map(|j| fitted.variables()[j].label()),
    );

    let gene_ids: Vec<String> = fitted.active_genes().map(|(g, _)| g.to_string()).collect();
    let variable_ids: Vec<String> = fitted.active_variables().map(|(v, _)| v.label()).collect();

    SummaryData {
        tool: ToolInfo {
            name: input.tool_name.clone(),
            version: input.tool_version.clone(),
        },
        mode: fitted.mode(),
        genetic_code: input.code.label(),
        detail: fitted.level(),
        table: TableSummary {
            input: input.input_path.clone(),
            genes_total: fitted.genes().len(),
            genes_active: margins.active_rows.len(),
            genes_excluded: margins
                .inactive_rows()
                .into_iter()
                .map(|i| fitted.genes()[i].clone())
                .collect(),
            variables_total: fitted.variables().len() + input.excluded.len(),
            variables_active: margins.active_cols.len(),
            variables_excluded,
        },
        fit: FitSummary {
            axes_requested: fitted.requested_axes(),
            axes_retained: fitted.n_axes(),
            diagonalized: axes.side,
            sweeps: axes.sweeps,
            total_inertia: inertia.total_inertia,
            axes: inertia.axes.clone(),
        },
        gene_contributions: inertia
            .genes
            .as_ref()
            .map(|c| named(gene_ids, &weights.row_mass, c)),
        variable_contributions: inertia
            .variables
            .as_ref()
            .map(|c| named(variable_ids, &weights.col_mass, c)),
        supplementary: input
            .supplementary
            .as_ref()
            .map(|(supp, path)| SupplementarySummary {
                input: path.clone(),
                projected: supp.projected.len(),
                skipped: supp.skipped.clone(),
            }),
        optimal: input.optimal.map(|opt| OptimalSummary {
            genes_per_end: opt.genes_per_end,
            high_end: opt.high_end,
            high_bias: opt.high_bias,
            low_bias: opt.low_bias,
            optimal_codons: opt.optimal().map(|c| c.codon.clone()).collect(),
        }),
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage8_report.rs"]
mod tests;
